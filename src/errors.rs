//! Submodule defining the errors used across the crate.

/// Errors that can occur while diffing two snapshots.
///
/// A schema mismatch between snapshots and an empty table during key
/// inference are not errors: the first skips the table, the second falls back
/// to an all-columns key.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A snapshot could not be opened or is not a database.
    #[error("Cannot open snapshot '{snapshot}': {source}")]
    Open {
        /// Label of the snapshot (usually its path).
        snapshot: String,
        /// The underlying SQLite error.
        #[source]
        source: rusqlite::Error,
    },

    /// A read query against an open snapshot failed.
    #[error("Query against snapshot '{snapshot}' failed: {source}")]
    Query {
        /// Label of the snapshot the query ran against.
        snapshot: String,
        /// The underlying SQLite error.
        #[source]
        source: rusqlite::Error,
    },

    /// Column and value counts disagree while building a statement.
    #[error("Cannot build statement for table '{table}': {columns} columns but {values} values")]
    Construction {
        /// The table the statement targets.
        table: String,
        /// Number of columns supplied.
        columns: usize,
        /// Number of values supplied.
        values: usize,
    },

    /// A primary key was built from an empty column set.
    #[error("Primary key for table '{0}' must name at least one column")]
    EmptyPrimaryKey(String),

    /// The provided index is out of bounds for the number of columns in the table.
    #[error("Column index {index} out of bounds for table '{table}' with {columns} columns")]
    ColumnIndexOutOfBounds {
        /// The table being addressed.
        table: String,
        /// The offending index.
        index: usize,
        /// Number of columns in the table or row.
        columns: usize,
    },

    /// Writing the migration script failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Result alias used throughout the crate.
pub type Result<T, E = Error> = core::result::Result<T, E>;
