use std::path::{Path, PathBuf};

use anyhow::{Result, anyhow};
use log::{debug, warn};
use walkdir::WalkDir;

/// Check that the scan root exists and can be listed
pub fn validate_input_dir(dir: &Path) -> Result<()> {
    if !dir.exists() {
        return Err(anyhow!("Input directory does not exist: {}", dir.display()));
    }
    if !dir.is_dir() {
        return Err(anyhow!("Input path is not a directory: {}", dir.display()));
    }
    if let Err(e) = std::fs::read_dir(dir) {
        return Err(anyhow!("Input directory is not readable: {} - {}", dir.display(), e));
    }
    Ok(())
}

/// Collect every regular file below `dir` as a candidate recording.
///
/// Entries that cannot be read are logged and skipped; the walk carries on
/// elsewhere. Paths come back in file-name order.
pub fn collect_recording_files(dir: &Path) -> Result<Vec<PathBuf>> {
    validate_input_dir(dir)?;

    let mut files = Vec::new();
    for entry in WalkDir::new(dir).sort_by_file_name() {
        match entry {
            Ok(entry) if entry.file_type().is_file() => {
                debug!("Found recording: {}", entry.path().display());
                files.push(entry.into_path());
            }
            Ok(_) => {}
            Err(e) => warn!("Skipping unreadable entry: {}", e),
        }
    }

    Ok(files)
}
