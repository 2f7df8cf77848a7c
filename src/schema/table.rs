//! Runtime table schema.

use super::Column;

/// A table name and its ordered columns.
///
/// Two schemas are equal iff their names and ordered column definitions are
/// identical; this is the gate a table must pass before its data is diffed.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TableSchema {
    name: String,
    columns: Vec<Column>,
}

impl TableSchema {
    /// Create a table schema.
    #[must_use]
    pub fn new(name: impl Into<String>, columns: Vec<Column>) -> Self {
        Self {
            name: name.into(),
            columns,
        }
    }

    /// The table name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The columns in declaration order.
    #[must_use]
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// The number of columns in the table.
    #[must_use]
    pub fn number_of_columns(&self) -> usize {
        self.columns.len()
    }

    /// The column names in declaration order.
    #[must_use]
    pub fn column_names(&self) -> Vec<String> {
        self.columns.iter().map(|c| c.name.clone()).collect()
    }

    /// Get a column name by index.
    #[must_use]
    pub fn column_name(&self, index: usize) -> Option<&str> {
        self.columns.get(index).map(|c| c.name.as_str())
    }

    /// Get the indices of declared primary key columns, in PK order.
    ///
    /// Empty when the table declares no primary key.
    #[must_use]
    pub fn declared_pk_indices(&self) -> Vec<usize> {
        let mut pk_cols: Vec<(u32, usize)> = self
            .columns
            .iter()
            .enumerate()
            .filter(|(_, c)| c.pk_ordinal > 0)
            .map(|(idx, c)| (c.pk_ordinal, idx))
            .collect();
        pk_cols.sort_by_key(|(ordinal, _)| *ordinal);
        pk_cols.into_iter().map(|(_, idx)| idx).collect()
    }

    /// Whether both schemas define the same ordered columns.
    #[must_use]
    pub fn has_same_columns(&self, other: &Self) -> bool {
        self.columns == other.columns
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_declared_pk_indices_follow_key_order() {
        let table = TableSchema::new(
            "order_items",
            vec![
                Column::new("qty", "INTEGER"),
                Column::new("item_id", "INTEGER").primary_key(2),
                Column::new("order_id", "INTEGER").primary_key(1),
            ],
        );
        assert_eq!(table.declared_pk_indices(), vec![2, 1]);
        assert_eq!(table.column_name(5), None);
    }

    #[test]
    fn test_type_change_breaks_equality() {
        let old = TableSchema::new("t", vec![Column::new("id", "INT"), Column::new("v", "TEXT")]);
        let new = TableSchema::new("t", vec![Column::new("id", "INT"), Column::new("v", "BLOB")]);
        assert_ne!(old, new);
        assert!(!old.has_same_columns(&new));
        assert!(old.has_same_columns(&old.clone()));
    }

    #[test]
    fn test_nullability_breaks_equality() {
        let old = TableSchema::new("t", vec![Column::new("id", "INT")]);
        let new = TableSchema::new("t", vec![Column::new("id", "INT").not_null()]);
        assert_ne!(old, new);
    }
}
