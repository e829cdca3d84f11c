use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::time::Instant;

use log::{debug, warn};

use crate::types::{MatchOutcome, PlayerMatchRecord, SkipReason};
use super::types::{ExtractError, MatchSummary};
use super::MatchParser;

/// [`MatchParser`] backed by the `parser_demo` recording parser
#[derive(Debug, Clone, Copy, Default)]
pub struct DemoFileParser;

impl MatchParser for DemoFileParser {
    fn parse_match(&self, reader: &mut dyn BufRead) -> Result<Option<MatchSummary>, ExtractError> {
        let mut summary: Option<MatchSummary> = None;

        let mut parser = parser_demo::Parser::new(reader);
        parser.on_match_ended(|ended| {
            if summary.is_some() {
                warn!("Recording signalled match end more than once, keeping the first");
                return;
            }
            summary = Some(MatchSummary::from(ended));
        });
        parser.parse_to_end()?;
        drop(parser);

        Ok(summary)
    }
}

/// Extract a single recording file
pub fn extract_recording<P: MatchParser + ?Sized>(
    parser: &P,
    path: &Path,
    min_rounds_per_side: u32,
) -> MatchOutcome {
    let start_time = Instant::now();

    let result = match read_summary(parser, path) {
        Ok(Some(summary)) => build_records(&summary, min_rounds_per_side),
        Ok(None) => Err(SkipReason::NoMatchEnd),
        Err(e) => Err(SkipReason::from(e)),
    };

    let elapsed = start_time.elapsed();
    match &result {
        Ok(records) => debug!(
            "Extracted {} players from {} in {} ms",
            records.len(),
            path.display(),
            elapsed.as_millis()
        ),
        Err(reason) => warn!("Recording {} not valid: {}", path.display(), reason),
    }

    MatchOutcome {
        path: path.to_path_buf(),
        elapsed,
        result,
    }
}

fn read_summary<P: MatchParser + ?Sized>(
    parser: &P,
    path: &Path,
) -> Result<Option<MatchSummary>, ExtractError> {
    let file = File::open(path)?;
    let mut reader = BufReader::new(file);
    parser.parse_match(&mut reader)
}

/// Apply the validity filter and build one record per participant
pub fn build_records(
    summary: &MatchSummary,
    min_rounds_per_side: u32,
) -> Result<Vec<PlayerMatchRecord>, SkipReason> {
    if !summary.is_complete(min_rounds_per_side) {
        return Err(SkipReason::InsufficientRounds {
            score_a: summary.score_a,
            score_b: summary.score_b,
        });
    }
    if summary.participants.is_empty() {
        return Err(SkipReason::NoParticipants);
    }

    let rounds = summary.total_rounds().ok_or_else(|| {
        SkipReason::ParseError(format!(
            "Round total overflows ({}-{})",
            summary.score_a, summary.score_b
        ))
    })?;
    Ok(summary
        .participants
        .iter()
        .map(|p| PlayerMatchRecord::new(p.id, p.name.clone(), rounds, p.kills, p.deaths, p.damage))
        .collect())
}
