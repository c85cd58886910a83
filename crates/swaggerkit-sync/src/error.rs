//! Error types for the release syncer

use std::path::{Path, PathBuf};

/// Result type alias for sync operations
pub type Result<T, E = SyncError> = std::result::Result<T, E>;

/// Everything that can stop a sync.
///
/// All variants are fatal for the run. The state file is only written after
/// a successful install, so the next run retries from scratch.
#[derive(Debug, thiserror::Error)]
pub enum SyncError {
    /// The release feed could not be reached or answered with a non-success status
    #[error("release feed unavailable: {0}")]
    FeedUnavailable(String),

    /// The feed answered, but not with a usable release descriptor
    #[error("malformed release feed response: {0}")]
    MalformedFeedResponse(String),

    /// The release archive could not be downloaded
    #[error("failed to download release archive from {url}: {reason}")]
    ArchiveDownloadFailed { url: String, reason: String },

    /// The archive is not a readable gzip tarball
    #[error("invalid release archive: {0}")]
    Archive(#[source] std::io::Error),

    /// Two selected archive members flatten to the same file name
    #[error("archive contains more than one `{0}` under a dist directory")]
    DuplicateAsset(String),

    /// The staged directory does not hold exactly the expected files
    #[error("release archive is missing expected assets: {}", .0.join(", "))]
    IncompleteAssets(Vec<String>),

    /// Filesystem failure
    #[error("{action} {}: {source}", .path.display())]
    Io {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The blocking install task did not finish
    #[error("install task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

impl SyncError {
    /// Wrap an I/O error with what was being done to which path
    pub(crate) fn io(action: &'static str, path: &Path) -> impl FnOnce(std::io::Error) -> SyncError {
        let path = path.to_path_buf();
        move |source| SyncError::Io {
            action,
            path,
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        let err = SyncError::IncompleteAssets(vec!["swagger-ui.css".into(), "favicon-32x32.png".into()]);
        assert_eq!(
            err.to_string(),
            "release archive is missing expected assets: swagger-ui.css, favicon-32x32.png"
        );

        let err = SyncError::io("failed to create", Path::new("/tmp/assets"))(
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        assert_eq!(err.to_string(), "failed to create /tmp/assets: denied");
    }
}
