//! End-to-end comparison of two snapshots.
//!
//! For every table present in both snapshots (optionally narrowed by
//! [`DiffConfig::tables`]) the engine:
//!
//! 1. compares the column definitions and skips the table when they differ;
//! 2. resolves the identifying key against the old snapshot;
//! 3. fetches every row of both snapshots over the same column list;
//! 4. classifies rows with [`diff_rows`] and renders deletes and inserts.
//!
//! Statements from all tables are then deduplicated into one
//! [`MigrationScript`], and a [`RunSummary`] carries the counters.

use tracing::{debug, info, info_span, warn};

use crate::catalog::load_common_tables;
use crate::config::DiffConfig;
use crate::differ::diff_rows;
use crate::emitter::MigrationScript;
use crate::errors::Result;
use crate::key_inference::resolve_primary_key;
use crate::report::{RunSummary, TableReport};
use crate::snapshot::Snapshot;
use crate::statement::StatementBuilder;

/// Output of a diff run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiffReport {
    /// Deduplicated statements migrating old to new.
    pub script: MigrationScript,
    /// Counters for the run.
    pub summary: RunSummary,
}

/// Statements and diagnostics for one table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableOutcome {
    /// Diagnostics.
    pub report: TableReport,
    /// Rendered statements, deletes first, not yet deduplicated.
    pub statements: Vec<String>,
}

/// Compares an old and a new snapshot.
#[derive(Debug)]
pub struct SnapshotDiff<'a, O, N> {
    old: &'a O,
    new: &'a N,
    config: DiffConfig,
}

impl<'a, O: Snapshot, N: Snapshot> SnapshotDiff<'a, O, N> {
    /// Prepare a run between `old` and `new`.
    #[must_use]
    pub fn new(old: &'a O, new: &'a N, config: DiffConfig) -> Self {
        Self { old, new, config }
    }

    /// Tables that will be compared, in the new snapshot's order.
    ///
    /// # Errors
    ///
    /// Propagates table-listing errors from either snapshot.
    pub fn tables(&self) -> Result<Vec<String>> {
        let common = load_common_tables(self.old, self.new)?;
        for wanted in &self.config.tables {
            if !common.contains(wanted) {
                warn!(table = %wanted, "Requested table is not present in both snapshots");
            }
        }
        Ok(common
            .into_iter()
            .filter(|table| self.config.includes(table))
            .collect())
    }

    /// Diff a single table.
    ///
    /// # Errors
    ///
    /// Propagates snapshot read errors and statement construction errors.
    pub fn diff_table(&self, table: &str) -> Result<TableOutcome> {
        let old_schema = self.old.table_schema(table)?;
        let new_schema = self.new.table_schema(table)?;
        if !old_schema.has_same_columns(&new_schema) {
            info!("Column definitions differ, skipping table");
            return Ok(TableOutcome {
                report: TableReport::schema_mismatch(table),
                statements: Vec::new(),
            });
        }

        let key = resolve_primary_key(self.old, &old_schema, self.config.key_strategy)?;
        debug!(key = ?key.columns(), origin = ?key.origin(), "Resolved key");

        let columns = old_schema.column_names();
        let old_rows = self.old.fetch_rows(table, &columns, None, None)?;
        let new_rows = self.new.fetch_rows(table, &columns, None, None)?;
        debug!(old = old_rows.len(), new = new_rows.len(), "Fetched rows");

        let diff = diff_rows(table, &key, old_rows, new_rows, self.config.row_order)?;

        let builder = StatementBuilder::new(table, &key);
        let mut statements = Vec::with_capacity(diff.counts.deleted + diff.counts.inserted);
        for change in &diff.changes {
            if let Some(statement) = builder.render(change)? {
                statements.push(statement);
            }
        }

        let counts = diff.counts;
        if counts.has_differences() {
            info!(
                deleted = counts.deleted,
                inserted = counts.inserted,
                data_changed = counts.data_changed,
                unchanged = counts.unchanged,
                "Table differs"
            );
        } else {
            info!(rows = counts.unchanged, "Table identical");
        }
        if counts.data_changed > 0 {
            warn!(
                rows = counts.data_changed,
                "Rows changed data under the same key; no statements generated for them"
            );
        }

        Ok(TableOutcome {
            report: TableReport::diffed(table, &key, counts, statements.len()),
            statements,
        })
    }

    /// Diff every selected table and assemble the script.
    ///
    /// # Errors
    ///
    /// Stops at the first snapshot read error or statement construction
    /// error.
    pub fn run(&self) -> Result<DiffReport> {
        info!(old = self.old.label(), new = self.new.label(), "Comparing snapshots");

        let mut summary = RunSummary::default();
        let mut statements = Vec::new();
        for table in self.tables()? {
            let span = info_span!("table", table = %table);
            let _guard = span.enter();
            let outcome = self.diff_table(&table)?;
            statements.extend(outcome.statements);
            summary.record(outcome.report);
        }

        let script = MigrationScript::new(statements);
        summary.statements_emitted = script.len();

        info!(
            compared = summary.tables_compared,
            identical = summary.tables_identical,
            different = summary.tables_different,
            skipped = summary.tables_skipped,
            statements = summary.statements_emitted,
            "Diff complete"
        );
        if summary.unrendered_changes() > 0 {
            warn!(
                rows = summary.unrendered_changes(),
                "Script does not carry data changes of surviving rows"
            );
        }

        Ok(DiffReport { script, summary })
    }
}

/// Diff `old` against `new` with `config`.
///
/// # Errors
///
/// See [`SnapshotDiff::run`].
pub fn diff_snapshots<O: Snapshot, N: Snapshot>(
    old: &O,
    new: &N,
    config: &DiffConfig,
) -> Result<DiffReport> {
    SnapshotDiff::new(old, new, config.clone()).run()
}
