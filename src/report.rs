//! Tabular report of the merged player totals.
//!
//! The report is written to a temporary file next to the destination and only
//! renamed into place once complete, so a failed export leaves no partial file.

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use log::info;
use serde::Serialize;
use tempfile::NamedTempFile;

use crate::failures::FailureTracker;
use crate::types::{PlayerAggregate, ReportFormat};

/// Column headers of the tabular report
pub const HEADER: [&str; 7] = ["ID", "Name", "Matches", "Rounds", "Kills", "Deaths", "Damage"];

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("Failed to create report in {dir}")]
    Create { dir: PathBuf, source: io::Error },
    #[error("Failed to write report: {0}")]
    Io(#[from] io::Error),
    #[error("Failed to write CSV row: {0}")]
    Csv(#[from] csv::Error),
    #[error("Failed to serialize report: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Failed to move report into place: {0}")]
    Persist(#[from] tempfile::PersistError),
}

#[derive(Serialize)]
struct JsonFailure<'a> {
    path: &'a Path,
    reason: String,
}

#[derive(Serialize)]
struct JsonReport<'a> {
    generated_at: DateTime<Utc>,
    total_files: usize,
    failed_files: Vec<JsonFailure<'a>>,
    players: &'a [PlayerAggregate],
}

/// Write `players` to `path` in the requested format
pub fn write_report(
    path: &Path,
    players: &[PlayerAggregate],
    failures: &FailureTracker,
    format: ReportFormat,
) -> Result<(), ExportError> {
    info!("Building {:?} report with {} players", format, players.len());

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut file = NamedTempFile::new_in(dir).map_err(|source| ExportError::Create {
        dir: dir.to_path_buf(),
        source,
    })?;

    match format {
        ReportFormat::Csv => write_csv(file.as_file_mut(), players)?,
        ReportFormat::Json => write_json(file.as_file_mut(), players, failures)?,
    }
    file.as_file_mut().sync_all()?;
    file.persist(path)?;

    info!("Report written to {}", path.display());
    Ok(())
}

/// One header row, then one row per player
pub fn write_csv<W: Write>(writer: W, players: &[PlayerAggregate]) -> Result<(), ExportError> {
    let mut writer = csv::Writer::from_writer(writer);
    writer.write_record(HEADER)?;

    for player in players {
        writer.write_record([
            player.id.to_string(),
            player.name.clone(),
            player.matches.to_string(),
            player.rounds.to_string(),
            player.kills.to_string(),
            player.deaths.to_string(),
            player.damage.to_string(),
        ])?;
    }

    writer.flush()?;
    Ok(())
}

pub fn write_json<W: Write>(
    writer: W,
    players: &[PlayerAggregate],
    failures: &FailureTracker,
) -> Result<(), ExportError> {
    let report = JsonReport {
        generated_at: Utc::now(),
        total_files: failures.stats().total,
        failed_files: failures
            .entries()
            .iter()
            .map(|f| JsonFailure {
                path: &f.path,
                reason: f.reason.to_string(),
            })
            .collect(),
        players,
    };
    serde_json::to_writer_pretty(writer, &report)?;
    Ok(())
}
