//! SQL statement generation from classified row changes.
//!
//! Deleted rows become `DELETE` statements matching the row's key, inserted
//! rows become `INSERT` statements carrying every column. Rows whose data
//! changed under an unchanged key are not rendered: they are counted by the
//! differ and reported, and an `UPDATE` generator would slot in here reusing
//! [`where_clause`].
//!
//! # Example
//!
//! ```rust
//! use sqlite_data_diff::schema::{Column, KeyOrigin, PrimaryKey, TableSchema};
//! use sqlite_data_diff::statement::StatementBuilder;
//! use sqlite_data_diff::Value;
//!
//! let table = TableSchema::new("t", vec![Column::new("id", "INT"), Column::new("name", "TEXT")]);
//! let key = PrimaryKey::new(&table, vec![0], KeyOrigin::Inferred).unwrap();
//! let builder = StatementBuilder::new(table.name(), &key);
//!
//! let sql = builder.insert(&[Value::Integer(3)], &[Value::from("c")]).unwrap();
//! assert_eq!(sql, "INSERT INTO t (id, name) VALUES (3, 'c');");
//! ```

mod identifier;

pub use identifier::{quote_identifier, render_identifier};

use crate::differ::ClassifiedChange;
use crate::errors::{Error, Result};
use crate::schema::PrimaryKey;
use crate::value::Value;

/// Render a value as a SQL literal.
///
/// Numbers are bare, NULL is `NULL`, text is single-quoted with internal
/// quotes doubled, blobs are `X'..'` hex literals. Text holding a NUL byte or
/// invalid UTF-8 becomes `CAST(X'..' AS TEXT)`. The same rendering is used
/// for WHERE clauses and VALUES lists.
#[must_use]
pub fn sql_literal(value: &Value) -> String {
    value.to_string()
}

/// Build a conjunction matching each column to its value.
///
/// NULL values match with `IS NULL`, everything else with `=`, e.g.
/// `id=2 AND note IS NULL`. Text comparisons carry `COLLATE BINARY` so a
/// column's declared collation cannot widen the match beyond byte equality:
/// `name='a' COLLATE BINARY`.
///
/// # Errors
///
/// [`Error::Construction`] if `columns` and `values` differ in length; a
/// truncated predicate would match the wrong rows.
pub fn where_clause(table: &str, columns: &[String], values: &[Value]) -> Result<String> {
    if columns.len() != values.len() || columns.is_empty() {
        return Err(Error::Construction {
            table: table.to_string(),
            columns: columns.len(),
            values: values.len(),
        });
    }

    let predicates: Vec<String> = columns
        .iter()
        .zip(values)
        .map(|(column, value)| {
            let column = render_identifier(column);
            if value.is_null() {
                format!("{column} IS NULL")
            } else if value.is_text() {
                format!("{column}={} COLLATE BINARY", sql_literal(value))
            } else {
                format!("{column}={}", sql_literal(value))
            }
        })
        .collect();
    Ok(predicates.join(" AND "))
}

/// Renders statements for one table.
///
/// The INSERT column list is fixed once per table as key columns followed by
/// data columns, the same order in which the differ projects rows.
#[derive(Debug, Clone)]
pub struct StatementBuilder {
    table: String,
    table_sql: String,
    key_columns: Vec<String>,
    insert_prefix: String,
    column_count: usize,
}

impl StatementBuilder {
    /// Create a builder for `table` identified by `key`.
    #[must_use]
    pub fn new(table: &str, key: &PrimaryKey) -> Self {
        let table_sql = render_identifier(table);
        let column_list = key
            .columns()
            .iter()
            .chain(key.data_columns())
            .map(|c| render_identifier(c))
            .collect::<Vec<_>>()
            .join(", ");

        Self {
            table: table.to_string(),
            insert_prefix: format!("INSERT INTO {table_sql} ({column_list}) VALUES ("),
            table_sql,
            key_columns: key.columns().to_vec(),
            column_count: key.columns().len() + key.data_columns().len(),
        }
    }

    /// `DELETE FROM <table> WHERE <key predicate>;`
    ///
    /// # Errors
    ///
    /// [`Error::Construction`] if `key` does not have one value per key column.
    pub fn delete(&self, key: &[Value]) -> Result<String> {
        let predicate = where_clause(&self.table, &self.key_columns, key)?;
        Ok(format!("DELETE FROM {} WHERE {predicate};", self.table_sql))
    }

    /// `INSERT INTO <table> (<key columns>, <data columns>) VALUES (..);`
    ///
    /// # Errors
    ///
    /// [`Error::Construction`] if the values do not cover every column.
    pub fn insert(&self, key: &[Value], data: &[Value]) -> Result<String> {
        if key.len() + data.len() != self.column_count || key.len() != self.key_columns.len() {
            return Err(Error::Construction {
                table: self.table.clone(),
                columns: self.column_count,
                values: key.len() + data.len(),
            });
        }

        let values = key
            .iter()
            .chain(data)
            .map(sql_literal)
            .collect::<Vec<_>>()
            .join(", ");
        Ok(format!("{}{values});", self.insert_prefix))
    }

    /// Render the statement for a classified change, if it has one.
    ///
    /// Only deleted and inserted rows produce statements.
    ///
    /// # Errors
    ///
    /// [`Error::Construction`] if the change's tuples do not fit the table.
    pub fn render(&self, change: &ClassifiedChange) -> Result<Option<String>> {
        match change {
            ClassifiedChange::Deleted { key } => self.delete(key).map(Some),
            ClassifiedChange::Inserted { key, data } => self.insert(key, data).map(Some),
            ClassifiedChange::Unchanged | ClassifiedChange::DataChanged { .. } => Ok(None),
        }
    }
}
