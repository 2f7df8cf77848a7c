//! [`Snapshot`] over a `rusqlite` connection.

use std::path::Path;

use rusqlite::{Connection, OpenFlags};
use tracing::debug;

use super::Snapshot;
use crate::errors::{Error, Result};
use crate::schema::{Column, TableSchema};
use crate::statement::quote_identifier;
use crate::value::{Row, Value};

/// User tables in creation order. SQLite's own `sqlite_%` tables and the
/// shadow tables backing virtual tables (FTS5 `*_data`, `*_idx`, ..) are left
/// out; the virtual table itself is listed.
const LIST_TABLES_SQL: &str = "SELECT name FROM sqlite_master \
     WHERE type = 'table' AND name NOT LIKE 'sqlite\\_%' ESCAPE '\\' \
     AND name NOT IN (SELECT name FROM pragma_table_list WHERE type = 'shadow')";

const TABLE_INFO_SQL: &str =
    "SELECT name, type, \"notnull\", dflt_value, pk FROM pragma_table_info(?1) ORDER BY cid";

/// A snapshot backed by an SQLite database.
#[derive(Debug)]
pub struct SqliteSnapshot {
    conn: Connection,
    label: String,
}

impl SqliteSnapshot {
    /// Open the database at `path` read-only.
    ///
    /// The file must exist and be a valid SQLite database; nothing is ever
    /// written to it.
    ///
    /// # Errors
    ///
    /// [`Error::Open`] if the file cannot be opened or is not a database.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let label = path.display().to_string();
        let open_error = |source| Error::Open {
            snapshot: label.clone(),
            source,
        };

        let conn = Connection::open_with_flags(
            path,
            OpenFlags::SQLITE_OPEN_READ_ONLY
                | OpenFlags::SQLITE_OPEN_URI
                | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )
        .map_err(open_error)?;

        // Opening is lazy: the header is only validated on first read.
        conn.query_row("SELECT COUNT(*) FROM sqlite_master", [], |row| {
            row.get::<_, i64>(0)
        })
        .map_err(open_error)?;

        debug!(snapshot = %label, "Opened snapshot");
        Ok(Self { conn, label })
    }

    /// Wrap an already open connection.
    #[must_use]
    pub fn from_connection(conn: Connection, label: impl Into<String>) -> Self {
        Self {
            conn,
            label: label.into(),
        }
    }

    /// The underlying connection.
    #[must_use]
    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    fn query_error(&self, source: rusqlite::Error) -> Error {
        Error::Query {
            snapshot: self.label.clone(),
            source,
        }
    }
}

/// Build `SELECT <columns> FROM <table> [WHERE ..] [LIMIT ..]`.
fn select_sql(table: &str, columns: &[String], predicate: Option<&str>, limit: Option<u64>) -> String {
    let projection = if columns.is_empty() {
        "*".to_string()
    } else {
        columns
            .iter()
            .map(|c| quote_identifier(c))
            .collect::<Vec<_>>()
            .join(", ")
    };

    let mut sql = format!("SELECT {projection} FROM {}", quote_identifier(table));
    if let Some(predicate) = predicate {
        sql.push_str(" WHERE ");
        sql.push_str(predicate);
    }
    if let Some(limit) = limit {
        sql.push_str(&format!(" LIMIT {limit}"));
    }
    sql
}

impl Snapshot for SqliteSnapshot {
    fn label(&self) -> &str {
        &self.label
    }

    fn table_names(&self) -> Result<Vec<String>> {
        let mut stmt = self
            .conn
            .prepare(LIST_TABLES_SQL)
            .map_err(|e| self.query_error(e))?;
        let names = stmt
            .query_map([], |row| row.get::<_, String>(0))
            .and_then(|rows| rows.collect::<rusqlite::Result<Vec<String>>>())
            .map_err(|e| self.query_error(e))?;
        Ok(names)
    }

    fn table_schema(&self, table: &str) -> Result<TableSchema> {
        let mut stmt = self
            .conn
            .prepare(TABLE_INFO_SQL)
            .map_err(|e| self.query_error(e))?;
        let columns = stmt
            .query_map([table], |row| {
                let pk: i64 = row.get(4)?;
                Ok(Column {
                    name: row.get(0)?,
                    decl_type: row.get(1)?,
                    not_null: row.get::<_, i64>(2)? != 0,
                    default_value: row.get(3)?,
                    pk_ordinal: u32::try_from(pk).unwrap_or_default(),
                })
            })
            .and_then(|rows| rows.collect::<rusqlite::Result<Vec<Column>>>())
            .map_err(|e| self.query_error(e))?;
        Ok(TableSchema::new(table, columns))
    }

    fn fetch_rows(
        &self,
        table: &str,
        columns: &[String],
        predicate: Option<&str>,
        limit: Option<u64>,
    ) -> Result<Vec<Row>> {
        let sql = select_sql(table, columns, predicate, limit);
        let mut stmt = self.conn.prepare(&sql).map_err(|e| self.query_error(e))?;
        let width = stmt.column_count();
        let rows = stmt
            .query_map([], |row| {
                (0..width)
                    .map(|i| row.get_ref(i).map(Value::from))
                    .collect::<rusqlite::Result<Row>>()
            })
            .and_then(|rows| rows.collect::<rusqlite::Result<Vec<Row>>>())
            .map_err(|e| self.query_error(e))?;
        Ok(rows)
    }

    fn count_rows(&self, table: &str, predicate: &str) -> Result<u64> {
        let sql = format!(
            "SELECT COUNT(*) FROM {} WHERE {predicate}",
            quote_identifier(table)
        );
        let count: i64 = self
            .conn
            .query_row(&sql, [], |row| row.get(0))
            .map_err(|e| self.query_error(e))?;
        Ok(u64::try_from(count).unwrap_or_default())
    }
}
