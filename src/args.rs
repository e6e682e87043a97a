//! These structs provide the CLI interface for the spendwise CLI.

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::filter::LevelFilter;

/// spendwise: descriptive statistics and visualizations for a personal
/// expense ledger.
///
/// The ledger is a SQLite database with an `expenses` table, shared with the
/// SpendWise backend. Each subcommand reads the ledger, computes what it
/// needs, and writes timestamped output files; nothing ever writes back to
/// the ledger.
#[derive(Debug, Parser, Clone)]
pub struct Args {
    #[clap(flatten)]
    common: Common,

    #[command(subcommand)]
    command: Command,
}

impl Args {
    pub fn new(common: Common, command: Command) -> Self {
        Self { common, command }
    }

    pub fn common(&self) -> &Common {
        &self.common
    }

    pub fn command(&self) -> &Command {
        &self.command
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Compute the aggregate spending report, print it to the console, and
    /// save it as a timestamped JSON file.
    Analyze,
    /// Export all expenses to a timestamped CSV file and print a spending
    /// summary.
    Export,
    /// Render the category pie chart, category bar chart and daily spending
    /// timeline to timestamped PNG files.
    Visualize,
}

/// Arguments common to all subcommands.
#[derive(Debug, Parser, Clone)]
pub struct Common {
    /// The logging verbosity. One of, from least to most verbose:
    /// off, error, warn, info, debug, trace
    ///
    /// This can be overridden by RUST_LOG.
    #[arg(long, default_value_t = LevelFilter::INFO)]
    log_level: LevelFilter,

    /// The path to the SQLite expense ledger.
    #[arg(long, env = "SPENDWISE_DB", default_value = "expenses.db")]
    db: PathBuf,

    /// The directory where report, export and chart files are written.
    #[arg(long, env = "SPENDWISE_OUT_DIR", default_value = ".")]
    out_dir: PathBuf,
}

impl Common {
    pub fn new(log_level: LevelFilter, db: PathBuf, out_dir: PathBuf) -> Self {
        Self {
            log_level,
            db,
            out_dir,
        }
    }

    pub fn log_level(&self) -> LevelFilter {
        self.log_level
    }

    pub fn db(&self) -> &Path {
        &self.db
    }

    pub fn out_dir(&self) -> &Path {
        &self.out_dir
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::parse_from(["spendwise", "analyze"]);
        assert_eq!(args.common().db(), Path::new("expenses.db"));
        assert_eq!(args.common().out_dir(), Path::new("."));
        assert_eq!(args.common().log_level(), LevelFilter::INFO);
        assert!(matches!(args.command(), Command::Analyze));
    }

    #[test]
    fn test_common_overrides() {
        let args = Args::parse_from([
            "spendwise",
            "--db",
            "ledger/expenses.db",
            "--out-dir",
            "reports",
            "--log-level",
            "debug",
            "visualize",
        ]);
        assert_eq!(args.common().db(), Path::new("ledger/expenses.db"));
        assert_eq!(args.common().out_dir(), Path::new("reports"));
        assert_eq!(args.common().log_level(), LevelFilter::DEBUG);
        assert!(matches!(args.command(), Command::Visualize));
    }
}
