//! Read access to one database snapshot.
//!
//! The diff engine never talks to SQLite directly: it goes through the
//! [`Snapshot`] trait, which exposes the four read primitives the engine
//! needs. [`SqliteSnapshot`] implements it over a `rusqlite` connection.
//! All calls are synchronous and may block on I/O; timeouts and
//! cancellation, if wanted, belong to the connection layer.

mod sqlite;

pub use sqlite::SqliteSnapshot;

use crate::errors::Result;
use crate::schema::TableSchema;
use crate::value::Row;

/// A read-only view of one database.
pub trait Snapshot {
    /// A human-readable label (usually the database path), used in errors
    /// and logs.
    fn label(&self) -> &str;

    /// Names of the user tables, in the order the database enumerates them.
    fn table_names(&self) -> Result<Vec<String>>;

    /// Column metadata of `table`, in declaration order.
    fn table_schema(&self, table: &str) -> Result<TableSchema>;

    /// Rows of `table` projected onto `columns`, in retrieval order.
    ///
    /// `predicate` is a SQL boolean expression over the table's columns;
    /// `limit` caps the number of rows returned.
    fn fetch_rows(
        &self,
        table: &str,
        columns: &[String],
        predicate: Option<&str>,
        limit: Option<u64>,
    ) -> Result<Vec<Row>>;

    /// Number of rows of `table` matching `predicate`.
    fn count_rows(&self, table: &str, predicate: &str) -> Result<u64>;
}

impl<T: Snapshot + ?Sized> Snapshot for &T {
    #[inline]
    fn label(&self) -> &str {
        T::label(self)
    }

    #[inline]
    fn table_names(&self) -> Result<Vec<String>> {
        T::table_names(self)
    }

    #[inline]
    fn table_schema(&self, table: &str) -> Result<TableSchema> {
        T::table_schema(self, table)
    }

    #[inline]
    fn fetch_rows(
        &self,
        table: &str,
        columns: &[String],
        predicate: Option<&str>,
        limit: Option<u64>,
    ) -> Result<Vec<Row>> {
        T::fetch_rows(self, table, columns, predicate, limit)
    }

    #[inline]
    fn count_rows(&self, table: &str, predicate: &str) -> Result<u64> {
        T::count_rows(self, table, predicate)
    }
}
