use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use clap::builder::TypedValueParser;
use colored::Colorize;
use env_logger::Env;

use match_scanner::types::{DEFAULT_OUTPUT, DEFAULT_WORKERS, MIN_ROUNDS_PER_SIDE};
use match_scanner::utils::format_elapsed;
use match_scanner::{BatchResult, ReportFormat, ScanConfig, scan_recordings, write_report};

/// Merge per-player statistics from a folder of match recordings
#[derive(Debug, Parser)]
#[command(name = "match-scanner", version, about)]
struct Cli {
    /// Folder containing recordings (searched recursively). Prompted for when omitted.
    input_dir: Option<PathBuf>,

    /// Number of recordings parsed in parallel
    #[arg(short, long, default_value_t = DEFAULT_WORKERS, value_parser = clap::value_parser!(u16).range(1..).map(usize::from))]
    workers: usize,

    /// Report destination
    #[arg(short, long, default_value = DEFAULT_OUTPUT)]
    output: PathBuf,

    /// Report format. Inferred from the output extension when omitted.
    #[arg(short, long, value_enum)]
    format: Option<ReportFormat>,

    /// Rounds one side must win for a match to count
    #[arg(long, default_value_t = MIN_ROUNDS_PER_SIDE)]
    min_rounds: u32,

    /// Disable the progress bar
    #[arg(long)]
    no_progress: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

/// Ask for the recordings folder on stdin
fn prompt_for_root() -> Result<PathBuf> {
    print!("Please enter the path for the demo folder: ");
    io::stdout().flush()?;

    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    let root = line.trim();
    if root.is_empty() {
        return Err(anyhow!("No input directory given"));
    }
    println!("Path= {}", root);
    Ok(PathBuf::from(root))
}

/// Write the batch report. Failing here is fatal for the run.
fn export(config: &ScanConfig, batch: &BatchResult) -> Result<()> {
    write_report(&config.output, &batch.players, &batch.failures, config.format)
        .with_context(|| format!("Failed to write report to {}", config.output.display()))
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(default_filter))
        .format_timestamp_millis()
        .init();

    let input_dir = match cli.input_dir {
        Some(dir) => dir,
        None => prompt_for_root()?,
    };

    let format = cli.format.unwrap_or_else(|| ReportFormat::from_path(&cli.output));
    let config = ScanConfig {
        input_dir,
        workers: cli.workers,
        output: cli.output,
        format,
        min_rounds_per_side: cli.min_rounds,
        show_progress: !cli.no_progress,
    };

    let batch = scan_recordings(&config).await?;
    let stats = batch.stats();

    println!("{}", "\nAll demos processed!\n".green());
    if stats.failed > 0 {
        println!(
            "{}",
            format!("{} out of {} demos were invalid and were ignored.", stats.failed, stats.total).red()
        );
        for (kind, count) in batch.failures.counts_by_kind() {
            println!("  {}: {}", kind, count);
        }
    }
    println!(
        "{}",
        format!("Parsing {} demos took {}", stats.valid, format_elapsed(batch.elapsed)).green()
    );

    println!("{}", "Building report...".yellow());
    export(&config, &batch)?;
    println!("{}", format!("Report done: {}", config.output.display()).green());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use match_scanner::FailureTracker;
    use std::time::Duration;
    use tempfile::tempdir;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_workers_flag() {
        let cli = Cli::try_parse_from(["match-scanner", "demos"]).unwrap();
        assert_eq!(cli.workers, DEFAULT_WORKERS);
        assert_eq!(cli.input_dir, Some(PathBuf::from("demos")));

        let cli = Cli::try_parse_from(["match-scanner", "-w", "4", "demos"]).unwrap();
        assert_eq!(cli.workers, 4);

        assert!(Cli::try_parse_from(["match-scanner", "-w", "0", "demos"]).is_err());
        assert!(Cli::try_parse_from(["match-scanner", "--workers", "-3", "demos"]).is_err());
    }

    #[test]
    fn test_export_failure_is_returned_once_with_context() {
        let dir = tempdir().unwrap();
        let config = ScanConfig {
            output: dir.path().join("missing").join("epicstats.csv"),
            ..Default::default()
        };
        let batch = BatchResult {
            players: Vec::new(),
            failures: FailureTracker::new(),
            elapsed: Duration::ZERO,
        };

        let err = export(&config, &batch).unwrap_err();
        let message = format!("{:#}", err);
        assert!(message.starts_with("Failed to write report to"), "{}", message);
        assert_eq!(message.matches("Failed to create report in").count(), 1);
        assert!(!config.output.exists());
    }
}
