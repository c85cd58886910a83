//! Exporting the sync result to a CI environment file (`GITHUB_ENV`)

use crate::error::{Result, SyncError};
use crate::sync::SyncOutcome;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

/// Append `SWAGGER_UI_VERSION` and `SWAGGER_UI_UPDATED` lines to `path`
pub fn append_ci_env(path: &Path, outcome: &SyncOutcome) -> Result<()> {
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(SyncError::io("failed to open", path))?;

    let lines = format!(
        "SWAGGER_UI_VERSION={}\nSWAGGER_UI_UPDATED={}\n",
        outcome.version, outcome.changed
    );
    file.write_all(lines.as_bytes())
        .map_err(SyncError::io("failed to append to", path))
}
