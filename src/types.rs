use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Serialize;

/// Stable player identity (SteamID64)
pub type PlayerId = u64;

/// Default number of parallel extraction workers
pub const DEFAULT_WORKERS: usize = 10;

/// Default report location
pub const DEFAULT_OUTPUT: &str = "epicstats.csv";

/// A match only counts once one side has won this many rounds (a full half)
pub const MIN_ROUNDS_PER_SIDE: u32 = 12;

/// One participant's figures from one valid match
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerMatchRecord {
    pub id: PlayerId,
    pub name: String,
    /// Rounds played in the match (both sides' scores added together)
    pub rounds: u32,
    pub kills: u32,
    pub deaths: u32,
    pub damage: u32,
    /// Always 1 for a freshly extracted record
    pub matches: u32,
}

impl PlayerMatchRecord {
    pub fn new(
        id: PlayerId,
        name: impl Into<String>,
        rounds: u32,
        kills: u32,
        deaths: u32,
        damage: u32,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            rounds,
            kills,
            deaths,
            damage,
            matches: 1,
        }
    }
}

/// Merged totals for one identity across every valid match
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlayerAggregate {
    pub id: PlayerId,
    /// Name from the first record merged for this identity
    pub name: String,
    pub matches: u64,
    pub rounds: u64,
    pub kills: u64,
    pub deaths: u64,
    pub damage: u64,
}

impl PlayerAggregate {
    /// Add another aggregate's numeric fields, keeping our name
    pub fn accumulate(&mut self, other: &PlayerAggregate) {
        self.matches += other.matches;
        self.rounds += other.rounds;
        self.kills += other.kills;
        self.deaths += other.deaths;
        self.damage += other.damage;
    }
}

impl From<&PlayerMatchRecord> for PlayerAggregate {
    fn from(record: &PlayerMatchRecord) -> Self {
        Self {
            id: record.id,
            name: record.name.clone(),
            matches: u64::from(record.matches),
            rounds: u64::from(record.rounds),
            kills: u64::from(record.kills),
            deaths: u64::from(record.deaths),
            damage: u64::from(record.damage),
        }
    }
}

/// Reason why a recording was skipped during scanning
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// File could not be opened or read
    Unreadable(String),
    /// The recording parser rejected the file
    ParseError(String),
    /// Neither side reached a full half
    InsufficientRounds { score_a: u32, score_b: u32 },
    /// Parsed cleanly but the match never ended
    NoMatchEnd,
    /// Match ended with nobody on a playing side
    NoParticipants,
    /// The worker handling the file died before reporting back
    WorkerLost,
}

impl SkipReason {
    /// Short stable label, used for grouping in summaries and reports
    pub fn kind(&self) -> &'static str {
        match self {
            SkipReason::Unreadable(_) => "unreadable",
            SkipReason::ParseError(_) => "parse_error",
            SkipReason::InsufficientRounds { .. } => "insufficient_rounds",
            SkipReason::NoMatchEnd => "no_match_end",
            SkipReason::NoParticipants => "no_participants",
            SkipReason::WorkerLost => "worker_lost",
        }
    }
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::Unreadable(e) => write!(f, "Unreadable: {}", e),
            SkipReason::ParseError(e) => write!(f, "Parse error: {}", e),
            SkipReason::InsufficientRounds { score_a, score_b } => {
                write!(f, "Too few rounds played ({}-{})", score_a, score_b)
            }
            SkipReason::NoMatchEnd => write!(f, "Recording has no match end"),
            SkipReason::NoParticipants => write!(f, "No active participants"),
            SkipReason::WorkerLost => write!(f, "Worker terminated before reporting"),
        }
    }
}

/// Result of extracting one recording
#[derive(Debug, Clone, PartialEq)]
pub struct MatchOutcome {
    /// Path to the recording
    pub path: PathBuf,
    /// Time spent extracting it
    pub elapsed: Duration,
    /// Records for every participant, or why the file was skipped
    pub result: Result<Vec<PlayerMatchRecord>, SkipReason>,
}

impl MatchOutcome {
    pub fn valid(path: impl Into<PathBuf>, elapsed: Duration, records: Vec<PlayerMatchRecord>) -> Self {
        Self {
            path: path.into(),
            elapsed,
            result: Ok(records),
        }
    }

    pub fn skipped(path: impl Into<PathBuf>, elapsed: Duration, reason: SkipReason) -> Self {
        Self {
            path: path.into(),
            elapsed,
            result: Err(reason),
        }
    }

    pub fn is_valid(&self) -> bool {
        self.result.is_ok()
    }

    /// Records of a valid match, empty for a skipped one
    pub fn records(&self) -> &[PlayerMatchRecord] {
        match &self.result {
            Ok(records) => records,
            Err(_) => &[],
        }
    }

    pub fn skip_reason(&self) -> Option<&SkipReason> {
        self.result.as_ref().err()
    }
}

/// Output format of the report
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ReportFormat {
    Csv,
    Json,
}

impl ReportFormat {
    /// Pick a format from the output file extension, defaulting to CSV
    pub fn from_path(path: &Path) -> Self {
        match path.extension().map(|ext| ext.to_string_lossy().to_lowercase()) {
            Some(ext) if ext == "json" => ReportFormat::Json,
            _ => ReportFormat::Csv,
        }
    }
}

/// Configuration for a scanning run
#[derive(Debug, Clone)]
pub struct ScanConfig {
    /// Directory searched recursively for recordings
    pub input_dir: PathBuf,
    /// Number of parallel extraction workers
    pub workers: usize,
    /// Where the report is written
    pub output: PathBuf,
    pub format: ReportFormat,
    /// Rounds one side must reach for the match to count
    pub min_rounds_per_side: u32,
    /// Draw a progress bar while extracting
    pub show_progress: bool,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from("."),
            workers: DEFAULT_WORKERS,
            output: PathBuf::from(DEFAULT_OUTPUT),
            format: ReportFormat::Csv,
            min_rounds_per_side: MIN_ROUNDS_PER_SIDE,
            show_progress: false,
        }
    }
}

/// Statistics about a scanning run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanStats {
    /// Total number of recordings found
    pub total: usize,
    /// Number of recordings that contributed to the totals
    pub valid: usize,
    /// Number of recordings that were skipped
    pub failed: usize,
}
