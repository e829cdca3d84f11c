pub mod types;
mod extractor;

pub use types::*;
pub use extractor::*;

use std::io::BufRead;
use std::path::Path;

use crate::types::{MatchOutcome, MIN_ROUNDS_PER_SIDE};

/// Drives a recording parser over a byte stream until it finishes.
///
/// Returns the match-ended signal if the recording produced one.
pub trait MatchParser: Send + Sync {
    fn parse_match(&self, reader: &mut dyn BufRead) -> Result<Option<MatchSummary>, ExtractError>;
}

/// Turns one recording path into a [`MatchOutcome`]. Never fails: problems
/// are reported through the outcome.
pub trait Extract: Send + Sync + 'static {
    fn extract(&self, path: &Path) -> MatchOutcome;
}

/// Extractor for recording files
pub struct RecordingExtractor<P> {
    parser: P,
    /// Rounds one side must reach for the match to count
    min_rounds_per_side: u32,
}

impl<P: MatchParser> RecordingExtractor<P> {
    /// Create an extractor using the default validity threshold
    pub fn new(parser: P) -> Self {
        Self::with_min_rounds(parser, MIN_ROUNDS_PER_SIDE)
    }

    pub fn with_min_rounds(parser: P, min_rounds_per_side: u32) -> Self {
        Self {
            parser,
            min_rounds_per_side,
        }
    }
}

impl<P: MatchParser + 'static> Extract for RecordingExtractor<P> {
    fn extract(&self, path: &Path) -> MatchOutcome {
        extractor::extract_recording(&self.parser, path, self.min_rounds_per_side)
    }
}
