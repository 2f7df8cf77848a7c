#![doc = include_str!("../README.md")]
#![deny(clippy::mod_module_files)]

pub mod catalog;
pub mod config;
pub mod differ;
pub mod emitter;
pub mod engine;
pub mod errors;
pub mod fingerprint;
pub mod key_inference;
pub mod output;
pub mod report;
pub mod schema;
pub mod snapshot;
pub mod statement;
pub mod value;

// Re-export main types
pub use catalog::{common_tables, load_common_tables};
pub use config::{DiffConfig, KeyStrategy, RowOrder};
pub use differ::{ChangeCounts, ClassifiedChange, TableDiff, diff_rows};
pub use emitter::{MigrationScript, dedup_statements};
pub use engine::{DiffReport, SnapshotDiff, TableOutcome, diff_snapshots};
pub use fingerprint::Fingerprint;
pub use key_inference::{infer_primary_key, resolve_primary_key};
pub use output::{script_file_name, write_script};
pub use report::{RunSummary, TableReport, TableStatus};
pub use schema::{Column, KeyOrigin, PrimaryKey, TableSchema};
pub use snapshot::{Snapshot, SqliteSnapshot};
pub use statement::StatementBuilder;
pub use value::{Row, Value};

// Re-export errors
pub use errors::{Error, Result};
