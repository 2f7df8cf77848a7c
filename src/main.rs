//! sqlite-data-diff CLI
//!
//! Compares two SQLite snapshots and writes the `DELETE`/`INSERT` script that
//! migrates the old one's rows to the new one's.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use sqlite_data_diff::{
    DiffConfig, KeyStrategy, RowOrder, SqliteSnapshot, diff_snapshots, script_file_name,
    write_script,
};

/// Diff the row data of two SQLite snapshots.
#[derive(Parser)]
#[command(name = "sqlite-data-diff")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path of the old snapshot.
    old: PathBuf,

    /// Path of the new snapshot.
    new: PathBuf,

    /// Write the script to this file.
    #[arg(short, long, conflicts_with = "stdout")]
    output: Option<PathBuf>,

    /// Directory for the generated script file name.
    #[arg(long, env = "SQLITE_DATA_DIFF_OUTPUT_DIR", default_value = ".")]
    output_dir: PathBuf,

    /// Print the script to standard output instead of a file.
    #[arg(long)]
    stdout: bool,

    /// How row keys are chosen.
    #[arg(long, value_enum, default_value_t = KeyStrategy::PreferDeclared)]
    key_strategy: KeyStrategy,

    /// Order in which rows are classified.
    #[arg(long, value_enum, default_value_t = RowOrder::SortedByKey)]
    row_order: RowOrder,

    /// Only compare this table (repeatable).
    #[arg(long = "table", value_name = "TABLE")]
    tables: Vec<String>,

    /// Write the run summary as JSON to this file.
    #[arg(long)]
    summary_json: Option<PathBuf>,

    /// Enable verbose output.
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_target(false)
        .with_writer(io::stderr)
        .init();

    let old = SqliteSnapshot::open(&cli.old)?;
    let new = SqliteSnapshot::open(&cli.new)?;

    let config = DiffConfig::default()
        .with_key_strategy(cli.key_strategy)
        .with_row_order(cli.row_order)
        .with_tables(cli.tables);
    let report = diff_snapshots(&old, &new, &config)?;

    if cli.stdout {
        let mut out = io::stdout().lock();
        report
            .script
            .write_to(&mut out)
            .context("Failed to write script to stdout")?;
        out.flush()?;
    } else {
        let path = cli.output.unwrap_or_else(|| {
            cli.output_dir.join(script_file_name(
                &cli.old,
                &cli.new,
                chrono::Local::now().naive_local(),
            ))
        });
        write_script(&path, &report.script)
            .with_context(|| format!("Failed to write script to {}", path.display()))?;
        info!(path = %path.display(), statements = report.script.len(), "Script written");
    }

    if let Some(path) = cli.summary_json {
        let file = File::create(&path)
            .with_context(|| format!("Failed to create {}", path.display()))?;
        let mut out = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut out, &report.summary)?;
        out.flush()?;
        info!(path = %path.display(), "Summary written");
    }

    Ok(())
}
