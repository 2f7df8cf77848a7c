//! The columns that identify a row across snapshots.

use serde::Serialize;

use super::TableSchema;
use crate::errors::{Error, Result};

/// Where a table's [`PrimaryKey`] came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyOrigin {
    /// The table's declared `PRIMARY KEY`.
    Declared,
    /// A column prefix found unique by probing a sampled row.
    Inferred,
    /// Every column, because nothing smaller was found unique (or the table
    /// was empty). Rows are identified by their full content.
    AllColumns,
}

/// An ordered, non-empty set of key columns, plus the remaining data columns.
///
/// Key columns keep the order in which the key was built; data columns keep
/// schema order. Both orders are fixed for the whole table, which is what
/// keeps old and new projections comparable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrimaryKey {
    key_columns: Vec<String>,
    key_indices: Vec<usize>,
    data_columns: Vec<String>,
    data_indices: Vec<usize>,
    origin: KeyOrigin,
}

impl PrimaryKey {
    /// Build a key from column indices into `schema`.
    ///
    /// # Errors
    ///
    /// * [`Error::EmptyPrimaryKey`] if `indices` is empty.
    /// * [`Error::ColumnIndexOutOfBounds`] if an index does not name a column.
    pub fn new(schema: &TableSchema, indices: Vec<usize>, origin: KeyOrigin) -> Result<Self> {
        if indices.is_empty() {
            return Err(Error::EmptyPrimaryKey(schema.name().to_string()));
        }

        let mut key_columns = Vec::with_capacity(indices.len());
        for &index in &indices {
            let name = schema
                .column_name(index)
                .ok_or_else(|| Error::ColumnIndexOutOfBounds {
                    table: schema.name().to_string(),
                    index,
                    columns: schema.number_of_columns(),
                })?;
            key_columns.push(name.to_string());
        }

        let (data_indices, data_columns): (Vec<usize>, Vec<String>) = schema
            .columns()
            .iter()
            .enumerate()
            .filter(|(index, _)| !indices.contains(index))
            .map(|(index, column)| (index, column.name.clone()))
            .unzip();

        Ok(Self {
            key_columns,
            key_indices: indices,
            data_columns,
            data_indices,
            origin,
        })
    }

    /// Build a key spanning every column of `schema`, in schema order.
    ///
    /// # Errors
    ///
    /// [`Error::EmptyPrimaryKey`] if the table has no columns.
    pub fn all_columns(schema: &TableSchema) -> Result<Self> {
        Self::new(
            schema,
            (0..schema.number_of_columns()).collect(),
            KeyOrigin::AllColumns,
        )
    }

    /// Key column names, in key order.
    #[must_use]
    pub fn columns(&self) -> &[String] {
        &self.key_columns
    }

    /// Key column indices into the full row, in key order.
    #[must_use]
    pub fn indices(&self) -> &[usize] {
        &self.key_indices
    }

    /// Non-key column names, in schema order.
    #[must_use]
    pub fn data_columns(&self) -> &[String] {
        &self.data_columns
    }

    /// Non-key column indices into the full row, in schema order.
    #[must_use]
    pub fn data_indices(&self) -> &[usize] {
        &self.data_indices
    }

    /// Where the key came from.
    #[must_use]
    pub fn origin(&self) -> KeyOrigin {
        self.origin
    }

    /// Whether the key covers every column, leaving the data tuple empty.
    #[must_use]
    pub fn spans_all_columns(&self) -> bool {
        self.data_indices.is_empty()
    }
}
