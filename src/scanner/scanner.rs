use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::Result;
use log::{debug, info, warn};

use crate::extractor::{DemoFileParser, Extract, RecordingExtractor};
use crate::failures::FailureTracker;
use crate::reducer;
use crate::types::{PlayerAggregate, ScanConfig, ScanStats};
use crate::utils::{estimated_seconds, format_elapsed, progress_bar};
use super::{collector, dispatcher};

/// Everything a finished batch hands to the report writer
#[derive(Debug, Clone)]
pub struct BatchResult {
    /// Merged totals, ordered by identity
    pub players: Vec<PlayerAggregate>,
    pub failures: FailureTracker,
    /// Wall time spent extracting
    pub elapsed: Duration,
}

impl BatchResult {
    pub fn stats(&self) -> ScanStats {
        self.failures.stats()
    }
}

/// Scan `config.input_dir` with the bundled recording parser
pub async fn scan_recordings(config: &ScanConfig) -> Result<BatchResult> {
    let extractor = RecordingExtractor::with_min_rounds(DemoFileParser, config.min_rounds_per_side);
    scan_with_extractor(config, Arc::new(extractor)).await
}

/// Collect, extract and merge every recording below `config.input_dir`
pub async fn scan_with_extractor<E: Extract>(
    config: &ScanConfig,
    extractor: Arc<E>,
) -> Result<BatchResult> {
    info!("Scanning for recordings in {}", config.input_dir.display());
    debug!("Configuration: {:?}", config);

    let paths = collector::collect_recording_files(&config.input_dir)?;
    if paths.is_empty() {
        warn!("No recordings found in {}", config.input_dir.display());
    }

    let (low, high) = estimated_seconds(paths.len());
    info!(
        "You are parsing {} files. Estimated time: {} - {} seconds",
        paths.len(),
        low,
        high
    );

    let progress = progress_bar(paths.len(), config.show_progress);
    let start_time = Instant::now();
    let mut outcomes = dispatcher::run(paths, config.workers, extractor, progress).await;
    let elapsed = start_time.elapsed();

    // Completion order is arbitrary; path order keeps first-seen names stable.
    outcomes.sort_by(|a, b| a.path.cmp(&b.path));

    let mut failures = FailureTracker::new();
    for outcome in &outcomes {
        failures.observe(outcome);
    }

    let players = reducer::reduce_parallel(&outcomes).into_sorted();

    let stats = failures.stats();
    info!(
        "All recordings processed: {} valid, {} skipped in {}",
        stats.valid,
        stats.failed,
        format_elapsed(elapsed)
    );

    Ok(BatchResult {
        players,
        failures,
        elapsed,
    })
}
