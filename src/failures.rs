use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use log::debug;

use crate::types::{MatchOutcome, ScanStats, SkipReason};

/// A recording that did not contribute to the totals
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailedRecording {
    pub path: PathBuf,
    pub reason: SkipReason,
}

/// Collects skipped recordings for the end-of-run summary.
///
/// Owned by the single coordinator that drains the result queue; workers never
/// touch it.
#[derive(Debug, Clone, Default)]
pub struct FailureTracker {
    entries: Vec<FailedRecording>,
    observed: usize,
}

impl FailureTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Account for one outcome, recording it if it was skipped
    pub fn observe(&mut self, outcome: &MatchOutcome) {
        self.observed += 1;
        if let Some(reason) = outcome.skip_reason() {
            self.record(&outcome.path, reason.clone());
        }
    }

    fn record(&mut self, path: &Path, reason: SkipReason) {
        debug!("Recording failure for {}: {}", path.display(), reason);
        self.entries.push(FailedRecording {
            path: path.to_path_buf(),
            reason,
        });
    }

    /// Number of skipped recordings
    pub fn count(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[FailedRecording] {
        &self.entries
    }

    /// Number of skipped recordings per reason kind
    pub fn counts_by_kind(&self) -> BTreeMap<&'static str, usize> {
        let mut counts = BTreeMap::new();
        for entry in &self.entries {
            *counts.entry(entry.reason.kind()).or_insert(0) += 1;
        }
        counts
    }

    pub fn stats(&self) -> ScanStats {
        ScanStats {
            total: self.observed,
            valid: self.observed - self.entries.len(),
            failed: self.entries.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PlayerMatchRecord;
    use pretty_assertions::assert_eq;
    use std::time::Duration;

    #[test]
    fn test_counts_add_up() {
        let outcomes = vec![
            MatchOutcome::valid("a.rec", Duration::ZERO, vec![PlayerMatchRecord::new(1, "one", 25, 1, 1, 1)]),
            MatchOutcome::skipped("b.rec", Duration::ZERO, SkipReason::NoMatchEnd),
            MatchOutcome::skipped("c.rec", Duration::ZERO, SkipReason::InsufficientRounds { score_a: 5, score_b: 3 }),
            MatchOutcome::skipped("d.rec", Duration::ZERO, SkipReason::NoMatchEnd),
        ];

        let mut tracker = FailureTracker::new();
        for outcome in &outcomes {
            tracker.observe(outcome);
        }

        assert_eq!(tracker.count(), 3);
        assert_eq!(tracker.stats(), ScanStats { total: 4, valid: 1, failed: 3 });
        assert_eq!(tracker.entries()[1].path, PathBuf::from("c.rec"));

        let counts = tracker.counts_by_kind();
        assert_eq!(counts.get("no_match_end"), Some(&2));
        assert_eq!(counts.get("insufficient_rounds"), Some(&1));
    }

    #[test]
    fn test_empty_tracker() {
        let tracker = FailureTracker::new();
        assert!(tracker.is_empty());
        assert_eq!(tracker.stats(), ScanStats { total: 0, valid: 0, failed: 0 });
    }
}
