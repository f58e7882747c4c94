//! nestkv CLI
//!
//! Runs a line-oriented session against a fresh in-memory database.
//! Commands are read from stdin (or `--input`), replies go to stdout and
//! logs go to stderr.
//!
//! ```text
//! $ printf 'SET a 10\nGET a\nEND\n' | nestkv
//! 10
//! ```

mod report;
mod session;

use clap::Parser;
use nestkv_core::{Config, Database};
use report::{ReportFormat, SessionReport};
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Nested-transaction key/value session.
#[derive(Parser)]
#[command(name = "nestkv")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Read commands from this file instead of stdin
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Open a transaction before the first command
    #[arg(long)]
    implicit_transaction: bool,

    /// Print a session report to stderr on exit
    #[arg(short, long, value_enum)]
    report: Option<ReportFormat>,
}

/// Opens the command source.
fn open_input(path: Option<&Path>) -> io::Result<Box<dyn BufRead>> {
    match path {
        Some(path) => Ok(Box::new(BufReader::new(File::open(path)?))),
        None => Ok(Box::new(io::stdin().lock())),
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let config = Config::new().implicit_transaction(cli.implicit_transaction);
    let db = Database::with_config(config);

    let input = open_input(cli.input.as_deref())
        .map_err(|e| format!("cannot open input: {e}"))?;
    let summary = session::run(&db, input, io::stdout().lock())?;

    if summary.ignored > 0 {
        info!(ignored = summary.ignored, "skipped malformed lines");
    }

    if let Some(format) = cli.report {
        let report = SessionReport::new(summary, db.stats(), db.depth());
        eprintln!("{}", report.render(format)?);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn reads_commands_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "SET a 10").unwrap();
        writeln!(file, "NUMEQUALTO 10").unwrap();
        writeln!(file, "END").unwrap();

        let db = Database::new();
        let input = open_input(Some(file.path())).unwrap();
        let mut out = Vec::new();
        let summary = session::run(&db, input, &mut out).unwrap();

        assert_eq!(String::from_utf8(out).unwrap(), "1\n");
        assert!(summary.ended);
    }

    #[test]
    fn missing_input_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(open_input(Some(&dir.path().join("missing.txt"))).is_err());
    }

    #[test]
    fn cli_flags_parse() {
        let cli = Cli::parse_from([
            "nestkv",
            "--implicit-transaction",
            "-r",
            "json",
            "-i",
            "cmds.txt",
        ]);
        assert!(cli.implicit_transaction);
        assert_eq!(cli.report, Some(ReportFormat::Json));
        assert_eq!(cli.input, Some(PathBuf::from("cmds.txt")));
        assert!(!cli.verbose);
    }

    #[test]
    fn unknown_report_format_is_rejected_at_parse_time() {
        assert!(Cli::try_parse_from(["nestkv", "-r", "yaml"]).is_err());
        let cli = Cli::try_parse_from(["nestkv", "--report", "text"]).unwrap();
        assert_eq!(cli.report, Some(ReportFormat::Text));
    }
}
