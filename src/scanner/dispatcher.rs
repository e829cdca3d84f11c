use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use crossbeam_channel::Receiver;
use futures::future::join_all;
use indicatif::ProgressBar;
use log::{debug, error, info, warn};
use tokio::sync::mpsc;
use tokio::task;

use crate::extractor::Extract;
use crate::types::{MatchOutcome, SkipReason};
use crate::utils::format_elapsed;

/// Extract every path on a fixed pool of `workers` blocking workers.
///
/// The work queue is filled and closed before any worker starts. Workers pull
/// paths until the queue is drained and push one outcome per path onto the
/// result queue; the caller reads exactly `paths.len()` outcomes back, in
/// completion order. Paths whose worker died before reporting come back as
/// [`SkipReason::WorkerLost`].
pub async fn run<E: Extract>(
    paths: Vec<PathBuf>,
    workers: usize,
    extractor: Arc<E>,
    progress: ProgressBar,
) -> Vec<MatchOutcome> {
    let total = paths.len();
    if total == 0 {
        progress.finish_and_clear();
        return Vec::new();
    }

    // Capacity covers every path, so filling never blocks.
    let (path_tx, path_rx) = crossbeam_channel::bounded::<PathBuf>(total);
    for path in &paths {
        if let Err(e) = path_tx.send(path.clone()) {
            error!("Failed to queue {}: work queue closed", e.into_inner().display());
        }
    }
    drop(path_tx);

    let (result_tx, mut result_rx) = mpsc::channel::<MatchOutcome>(total);

    let worker_count = workers.clamp(1, total);
    debug!("Starting {} workers for {} recordings", worker_count, total);

    let handles: Vec<_> = (0..worker_count)
        .map(|id| {
            let paths = path_rx.clone();
            let results = result_tx.clone();
            let extractor = Arc::clone(&extractor);
            task::spawn_blocking(move || worker_loop(id, paths, results, extractor.as_ref()))
        })
        .collect();
    drop(path_rx);
    drop(result_tx);

    let mut outcomes = Vec::with_capacity(total);
    while outcomes.len() < total {
        match result_rx.recv().await {
            Some(outcome) => {
                progress.inc(1);
                outcomes.push(outcome);
            }
            // Every worker is gone; whatever is missing was lost with them.
            None => break,
        }
    }

    for (id, joined) in join_all(handles).await.into_iter().enumerate() {
        if let Err(e) = joined {
            error!("Worker {} terminated abnormally: {}", id, e);
        }
    }

    if outcomes.len() < total {
        let reported: HashSet<PathBuf> = outcomes.iter().map(|o| o.path.clone()).collect();
        let lost: Vec<PathBuf> = paths.into_iter().filter(|p| !reported.contains(p)).collect();
        warn!("{} recordings were lost with their worker", lost.len());
        outcomes.extend(
            lost.into_iter()
                .map(|path| MatchOutcome::skipped(path, Duration::ZERO, SkipReason::WorkerLost)),
        );
    }

    progress.finish_with_message(format!("Processed {} recordings", outcomes.len()));
    outcomes
}

fn worker_loop<E: Extract + ?Sized>(
    id: usize,
    paths: Receiver<PathBuf>,
    results: mpsc::Sender<MatchOutcome>,
    extractor: &E,
) {
    for path in paths.iter() {
        info!("Parsing {}", path.display());
        let outcome = extractor.extract(&path);
        info!("{} took {}", path.display(), format_elapsed(outcome.elapsed));

        if results.blocking_send(outcome).is_err() {
            warn!("Worker {}: result queue closed, stopping", id);
            break;
        }
    }
    debug!("Worker {} finished", id);
}
