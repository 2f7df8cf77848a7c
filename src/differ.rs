//! Row-level classification of one table across two snapshots.
//!
//! Each row is split into its key tuple and its data tuple (the non-key
//! columns), both tuples are fingerprinted, and the two snapshots are compared
//! through `key fingerprint -> row` maps:
//!
//! - an old row whose key is missing from the new snapshot is **deleted**;
//! - an old row whose key is present but whose data differs has **changed
//!   data** (counted, not rendered);
//! - a new row whose key is missing from the old snapshot is **inserted**;
//! - everything else is **unchanged**.
//!
//! Fingerprints only speed the comparison up: every fingerprint hit is
//! confirmed against the actual tuples, so a digest collision degrades into a
//! miss rather than a false match.
//!
//! Old-side classifications come first, in old row order, followed by the
//! inserted rows in new row order. Row order is whatever the snapshot
//! returned unless [`RowOrder::SortedByKey`] is requested.

use hashbrown::HashMap;
use hashbrown::hash_map::Entry;
use serde::Serialize;
use tracing::{debug, warn};

use crate::config::RowOrder;
use crate::errors::{Error, Result};
use crate::fingerprint::Fingerprint;
use crate::schema::PrimaryKey;
use crate::value::{Row, Value};

/// Classification of a single row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClassifiedChange {
    /// The row's key is absent from the new snapshot.
    Deleted {
        /// Key tuple of the old row.
        key: Vec<Value>,
    },
    /// The row's key is absent from the old snapshot.
    Inserted {
        /// Key tuple of the new row.
        key: Vec<Value>,
        /// Data tuple of the new row (empty when the key spans every column).
        data: Vec<Value>,
    },
    /// Same key and same data in both snapshots.
    Unchanged,
    /// Same key in both snapshots but different data. Not rendered as a
    /// statement.
    DataChanged {
        /// Key tuple shared by both rows.
        key: Vec<Value>,
    },
}

/// Per-table classification counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ChangeCounts {
    /// Rows present with identical data in both snapshots.
    pub unchanged: usize,
    /// Rows only in the old snapshot.
    pub deleted: usize,
    /// Rows only in the new snapshot.
    pub inserted: usize,
    /// Rows whose key survived but whose data changed.
    pub data_changed: usize,
    /// Rows that repeated an earlier key within the same snapshot.
    pub duplicate_keys: usize,
}

impl ChangeCounts {
    /// Whether any row was deleted, inserted or changed.
    #[must_use]
    pub fn has_differences(&self) -> bool {
        self.deleted + self.inserted + self.data_changed > 0
    }

    /// Add another table's counters to these.
    pub fn accumulate(&mut self, other: &Self) {
        self.unchanged += other.unchanged;
        self.deleted += other.deleted;
        self.inserted += other.inserted;
        self.data_changed += other.data_changed;
        self.duplicate_keys += other.duplicate_keys;
    }
}

/// Result of diffing one table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableDiff {
    /// Classified rows: old side first, then inserted rows.
    pub changes: Vec<ClassifiedChange>,
    /// Counters matching `changes`.
    pub counts: ChangeCounts,
    /// Whether the quick-exit found both snapshots identical.
    pub identical: bool,
}

/// A row split into key and data tuples, with their fingerprints.
#[derive(Debug)]
struct ProjectedRow {
    key: Vec<Value>,
    data: Vec<Value>,
    key_fp: Fingerprint,
    data_fp: Fingerprint,
}

impl ProjectedRow {
    fn same_data(&self, other: &Self) -> bool {
        self.data_fp == other.data_fp && self.data == other.data
    }
}

fn take_column(row: &mut Row, index: usize, table: &str) -> Result<Value> {
    let columns = row.len();
    row.get_mut(index)
        .map(core::mem::take)
        .ok_or_else(|| Error::ColumnIndexOutOfBounds {
            table: table.to_string(),
            index,
            columns,
        })
}

/// Split full rows into key and data tuples and fingerprint them.
fn project(
    table: &str,
    pk: &PrimaryKey,
    rows: Vec<Row>,
    order: RowOrder,
) -> Result<Vec<ProjectedRow>> {
    let mut split = rows
        .into_iter()
        .map(|mut row| {
            let key = pk
                .indices()
                .iter()
                .map(|&i| take_column(&mut row, i, table))
                .collect::<Result<Vec<_>>>()?;
            let data = pk
                .data_indices()
                .iter()
                .map(|&i| take_column(&mut row, i, table))
                .collect::<Result<Vec<_>>>()?;
            Ok((key, data))
        })
        .collect::<Result<Vec<(Vec<Value>, Vec<Value>)>>>()?;

    if order == RowOrder::SortedByKey {
        split.sort();
    }

    Ok(split
        .into_iter()
        .map(|(key, data)| ProjectedRow {
            key_fp: Fingerprint::of(&key),
            data_fp: Fingerprint::of(&data),
            key,
            data,
        })
        .collect())
}

/// Index rows by key fingerprint; later duplicates overwrite earlier rows.
///
/// Returns the index and the number of overwritten duplicates.
fn index_by_key(rows: &[ProjectedRow]) -> (HashMap<Fingerprint, usize>, usize) {
    let mut index = HashMap::with_capacity(rows.len());
    let mut duplicates = 0;
    for (position, row) in rows.iter().enumerate() {
        match index.entry(row.key_fp) {
            Entry::Occupied(mut slot) => {
                duplicates += 1;
                slot.insert(position);
            }
            Entry::Vacant(slot) => {
                slot.insert(position);
            }
        }
    }
    (index, duplicates)
}

/// Find the row with the same key, confirming the fingerprint hit.
fn lookup<'r>(
    index: &HashMap<Fingerprint, usize>,
    rows: &'r [ProjectedRow],
    probe: &ProjectedRow,
) -> Option<&'r ProjectedRow> {
    index
        .get(&probe.key_fp)
        .map(|&position| &rows[position])
        .filter(|candidate| candidate.key == probe.key)
}

/// Classify the rows of one table.
///
/// `old_rows` and `new_rows` are full rows in the table's column order; `pk`
/// decides which columns identify a row. Key uniqueness within each snapshot
/// is assumed, not verified: repeated keys are counted in
/// [`ChangeCounts::duplicate_keys`] and the last occurrence wins.
///
/// # Errors
///
/// [`Error::ColumnIndexOutOfBounds`] if a row is narrower than the key
/// requires.
pub fn diff_rows(
    table: &str,
    pk: &PrimaryKey,
    old_rows: Vec<Row>,
    new_rows: Vec<Row>,
    order: RowOrder,
) -> Result<TableDiff> {
    let old = project(table, pk, old_rows, order)?;
    let new = project(table, pk, new_rows, order)?;

    let (old_index, old_duplicates) = index_by_key(&old);
    let (new_index, new_duplicates) = index_by_key(&new);
    let mut counts = ChangeCounts {
        duplicate_keys: old_duplicates + new_duplicates,
        ..ChangeCounts::default()
    };
    if counts.duplicate_keys > 0 {
        warn!(
            table,
            duplicates = counts.duplicate_keys,
            "Key is not unique; later rows shadow earlier ones and counts undercount"
        );
    }

    // Identical key and data projections, in identical order.
    let identical = old.len() == new.len()
        && old
            .iter()
            .zip(&new)
            .all(|(a, b)| a.key == b.key && a.same_data(b));
    if identical {
        counts.unchanged = old.len() - old_duplicates;
        debug!(table, rows = old.len(), "Snapshots identical");
        return Ok(TableDiff {
            changes: Vec::new(),
            counts,
            identical: true,
        });
    }

    let mut changes = Vec::with_capacity(old.len());
    for row in &old {
        let change = match lookup(&new_index, &new, row) {
            None => {
                counts.deleted += 1;
                ClassifiedChange::Deleted {
                    key: row.key.clone(),
                }
            }
            Some(other) if !row.same_data(other) => {
                debug!(
                    table,
                    old = %row.data_fp,
                    new = %other.data_fp,
                    "Row data changed"
                );
                counts.data_changed += 1;
                ClassifiedChange::DataChanged {
                    key: row.key.clone(),
                }
            }
            Some(_) => {
                counts.unchanged += 1;
                ClassifiedChange::Unchanged
            }
        };
        changes.push(change);
    }

    for row in new {
        if lookup(&old_index, &old, &row).is_none() {
            counts.inserted += 1;
            changes.push(ClassifiedChange::Inserted {
                key: row.key,
                data: row.data,
            });
        }
    }

    Ok(TableDiff {
        changes,
        counts,
        identical: false,
    })
}
