//! Writing a migration script to disk.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;

use crate::emitter::MigrationScript;
use crate::errors::Result;

fn stem(path: &Path) -> &str {
    path.file_stem()
        .and_then(|s| s.to_str())
        .filter(|s| !s.is_empty())
        .unwrap_or("db")
}

/// Name a script after both snapshots and the time of the run.
///
/// `old.db3`, `new.db3` at 2024-03-05 14:07:09 give
/// `old_to_new_20240305_140709.sql`.
#[must_use]
pub fn script_file_name(old: &Path, new: &Path, timestamp: NaiveDateTime) -> PathBuf {
    PathBuf::from(format!(
        "{}_to_{}_{}.sql",
        stem(old),
        stem(new),
        timestamp.format("%Y%m%d_%H%M%S")
    ))
}

/// Write `script` to `path`, replacing any existing file.
///
/// # Errors
///
/// [`crate::Error::Io`] if the file cannot be created or written.
pub fn write_script(path: &Path, script: &MigrationScript) -> Result<()> {
    let mut out = BufWriter::new(File::create(path)?);
    script.write_to(&mut out)?;
    out.flush()?;
    Ok(())
}
