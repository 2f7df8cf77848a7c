//! Tables present in both snapshots.

use hashbrown::HashSet;

use crate::errors::Result;
use crate::snapshot::Snapshot;

/// Intersect two table listings, keeping the new snapshot's order.
#[must_use]
pub fn common_tables(old: &[String], new: &[String]) -> Vec<String> {
    let old: HashSet<&str> = old.iter().map(String::as_str).collect();
    new.iter()
        .filter(|name| old.contains(name.as_str()))
        .cloned()
        .collect()
}

/// List the tables both snapshots contain.
///
/// # Errors
///
/// Propagates table-listing errors from either snapshot.
pub fn load_common_tables(old: &impl Snapshot, new: &impl Snapshot) -> Result<Vec<String>> {
    let old_tables = old.table_names()?;
    let new_tables = new.table_names()?;
    Ok(common_tables(&old_tables, &new_tables))
}
