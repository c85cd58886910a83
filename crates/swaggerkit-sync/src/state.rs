//! The last-synced release tag

use crate::error::{Result, SyncError};
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

/// Reads and writes the state file holding the last-synced tag
pub struct ReleaseState;

impl ReleaseState {
    /// The stored tag, trimmed. A missing file means no prior sync.
    pub fn load(path: &Path) -> Result<Option<String>> {
        match fs::read_to_string(path) {
            Ok(content) => Ok(Some(content.trim().to_string())),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(SyncError::io("failed to read", path)(err)),
        }
    }

    /// Store `tag` as the whole file content, without a trailing newline
    pub fn store(path: &Path, tag: &str) -> Result<()> {
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "state".to_string());
        let tmp = path.with_file_name(format!(".{file_name}.tmp"));

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(SyncError::io("failed to create", parent))?;
        }
        fs::write(&tmp, tag).map_err(SyncError::io("failed to write", &tmp))?;
        fs::rename(&tmp, path).map_err(SyncError::io("failed to replace", path))?;

        tracing::debug!(path = %path.display(), tag, "Release state stored");
        Ok(())
    }
}
