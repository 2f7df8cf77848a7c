//! Choosing the columns that identify a table's rows.
//!
//! [`infer_primary_key`] probes for uniqueness instead of reading constraint
//! metadata, so it behaves the same for tables with a single-column key, a
//! composite key or no declared key at all. It is a heuristic over **one
//! sampled row** and is not a substitute for a declared key:
//!
//! - the sample is whatever row the database returns first, so the result can
//!   change if retrieval order changes;
//! - a sampled row with a NULL (or otherwise unusual value) in a logically
//!   unique column can make the inferred key larger than necessary;
//! - uniqueness is only checked for the sampled row's values, not for every
//!   row in the table.
//!
//! [`resolve_primary_key`] prefers the declared key when the configuration
//! allows it.

use tracing::debug;

use crate::config::KeyStrategy;
use crate::errors::Result;
use crate::schema::{KeyOrigin, PrimaryKey, TableSchema};
use crate::snapshot::Snapshot;
use crate::statement::where_clause;

/// Infer a key for `schema`'s table by probing `snapshot`.
///
/// Columns are appended in declaration order; after each append the rows
/// matching the sampled row on the candidate columns are counted, and the
/// candidate is returned as soon as exactly one row matches. An empty table,
/// or a table where no prefix isolates the sampled row, gets every column as
/// its key.
///
/// # Errors
///
/// Propagates snapshot query errors, and [`crate::Error::EmptyPrimaryKey`]
/// for a table without columns.
pub fn infer_primary_key(snapshot: &impl Snapshot, schema: &TableSchema) -> Result<PrimaryKey> {
    let table = schema.name();
    let columns = schema.column_names();

    let Some(sample) = snapshot
        .fetch_rows(table, &columns, None, Some(1))?
        .into_iter()
        .next()
    else {
        debug!(table, "Empty table, keying on every column");
        return PrimaryKey::all_columns(schema);
    };

    for width in 1..=columns.len() {
        let predicate = where_clause(table, &columns[..width], &sample[..width.min(sample.len())])?;
        let count = snapshot.count_rows(table, &predicate)?;
        debug!(table, %predicate, count, "Key probe");
        if count == 1 {
            let origin = if width == columns.len() {
                KeyOrigin::AllColumns
            } else {
                KeyOrigin::Inferred
            };
            return PrimaryKey::new(schema, (0..width).collect(), origin);
        }
    }

    debug!(table, "No unique prefix, keying on every column");
    PrimaryKey::all_columns(schema)
}

/// Pick the key for a table according to `strategy`.
///
/// With [`KeyStrategy::PreferDeclared`] a declared `PRIMARY KEY` is used when
/// the table has one; otherwise the key is inferred from `snapshot`.
///
/// # Errors
///
/// See [`infer_primary_key`].
pub fn resolve_primary_key(
    snapshot: &impl Snapshot,
    schema: &TableSchema,
    strategy: KeyStrategy,
) -> Result<PrimaryKey> {
    if strategy == KeyStrategy::PreferDeclared {
        let declared = schema.declared_pk_indices();
        if !declared.is_empty() {
            return PrimaryKey::new(schema, declared, KeyOrigin::Declared);
        }
    }
    infer_primary_key(snapshot, schema)
}
