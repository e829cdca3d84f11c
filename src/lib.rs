pub mod extractor;
pub mod failures;
pub mod reducer;
pub mod report;
pub mod scanner;
pub mod types;
pub mod utils;

pub use types::{
    MatchOutcome,
    PlayerAggregate,
    PlayerId,
    PlayerMatchRecord,
    ReportFormat,
    ScanConfig,
    ScanStats,
    SkipReason,
};

pub use extractor::{
    DemoFileParser,
    Extract,
    MatchParser,
    RecordingExtractor,
};

pub use failures::{FailedRecording, FailureTracker};
pub use reducer::{reduce, reduce_parallel, Aggregate};
pub use report::{write_report, ExportError};

pub use scanner::{
    scan_recordings,
    scan_with_extractor,
    BatchResult,
};
