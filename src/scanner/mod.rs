
mod collector;
mod dispatcher;
mod scanner;

// Re-export collector functionality
pub use collector::{collect_recording_files, validate_input_dir};

// Re-export the worker pool
pub use dispatcher::run;

// Re-export scanner functionality
pub use scanner::{scan_recordings, scan_with_extractor, BatchResult};
