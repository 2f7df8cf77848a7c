//! Per-table and per-run diagnostics.

use serde::Serialize;

use crate::differ::ChangeCounts;
use crate::schema::{KeyOrigin, PrimaryKey};

/// Outcome of comparing one common table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TableStatus {
    /// No row was deleted, inserted or changed.
    Identical,
    /// At least one row was deleted, inserted or changed.
    Different,
    /// Column definitions differ between snapshots; the data was not diffed.
    SchemaMismatch,
}

/// Diagnostics for one table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableReport {
    /// Table name.
    pub table: String,
    /// Comparison outcome.
    pub status: TableStatus,
    /// Key columns used to identify rows (empty when skipped).
    pub key_columns: Vec<String>,
    /// Where the key came from (absent when skipped).
    pub key_origin: Option<KeyOrigin>,
    /// Row classification counters.
    pub counts: ChangeCounts,
    /// Statements rendered for this table, before deduplication.
    pub statements: usize,
}

impl TableReport {
    /// Report for a table that was diffed.
    #[must_use]
    pub fn diffed(table: &str, key: &PrimaryKey, counts: ChangeCounts, statements: usize) -> Self {
        let status = if counts.has_differences() {
            TableStatus::Different
        } else {
            TableStatus::Identical
        };
        Self {
            table: table.to_string(),
            status,
            key_columns: key.columns().to_vec(),
            key_origin: Some(key.origin()),
            counts,
            statements,
        }
    }

    /// Report for a table skipped because its columns differ.
    #[must_use]
    pub fn schema_mismatch(table: &str) -> Self {
        Self {
            table: table.to_string(),
            status: TableStatus::SchemaMismatch,
            key_columns: Vec::new(),
            key_origin: None,
            counts: ChangeCounts::default(),
            statements: 0,
        }
    }
}

/// Aggregate diagnostics for a whole run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    /// Common tables examined, skipped ones included.
    pub tables_compared: usize,
    /// Tables without differences.
    pub tables_identical: usize,
    /// Tables with at least one difference.
    pub tables_different: usize,
    /// Tables skipped for a schema mismatch.
    pub tables_skipped: usize,
    /// Row counters summed over every diffed table.
    pub totals: ChangeCounts,
    /// Statements in the final, deduplicated script.
    pub statements_emitted: usize,
    /// Per-table reports, in processing order.
    pub tables: Vec<TableReport>,
}

impl RunSummary {
    /// Fold a table report into the summary.
    pub fn record(&mut self, report: TableReport) {
        self.tables_compared += 1;
        match report.status {
            TableStatus::Identical => self.tables_identical += 1,
            TableStatus::Different => self.tables_different += 1,
            TableStatus::SchemaMismatch => self.tables_skipped += 1,
        }
        self.totals.accumulate(&report.counts);
        self.tables.push(report);
    }

    /// Rows whose data changed but for which no statement was generated.
    #[must_use]
    pub fn unrendered_changes(&self) -> usize {
        self.totals.data_changed
    }

    /// Whether the script fully migrates every diffed table.
    ///
    /// False when some rows changed data (no `UPDATE` is generated) or some
    /// table was skipped for a schema mismatch.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.unrendered_changes() == 0 && self.tables_skipped == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{Column, TableSchema};

    #[test]
    fn test_record_tallies_statuses_and_totals() {
        let schema = TableSchema::new("t", vec![Column::new("id", "INT")]);
        let key = PrimaryKey::all_columns(&schema).unwrap();

        let mut summary = RunSummary::default();
        summary.record(TableReport::diffed(
            "t",
            &key,
            ChangeCounts {
                unchanged: 3,
                ..ChangeCounts::default()
            },
            0,
        ));
        summary.record(TableReport::diffed(
            "u",
            &key,
            ChangeCounts {
                deleted: 1,
                data_changed: 2,
                ..ChangeCounts::default()
            },
            1,
        ));
        summary.record(TableReport::schema_mismatch("v"));

        assert_eq!(summary.tables_compared, 3);
        assert_eq!(summary.tables_identical, 1);
        assert_eq!(summary.tables_different, 1);
        assert_eq!(summary.tables_skipped, 1);
        assert_eq!(summary.totals.unchanged, 3);
        assert_eq!(summary.unrendered_changes(), 2);
        assert!(!summary.is_complete());
        assert_eq!(summary.tables[1].status, TableStatus::Different);
    }

    #[test]
    fn test_summary_serializes() {
        let json = serde_json::to_value(RunSummary::default()).unwrap();
        assert_eq!(json["tables_compared"], 0);
        assert_eq!(json["totals"]["data_changed"], 0);
    }
}
