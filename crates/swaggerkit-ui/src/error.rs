//! Error types for the docs service

use bytes::Bytes;
use http::{header, Response, StatusCode};
use serde_json::json;
use std::path::PathBuf;

/// Result type alias for docs operations
pub type Result<T, E = DocsError> = std::result::Result<T, E>;

/// Errors raised while serving the docs
#[derive(Debug, thiserror::Error)]
pub enum DocsError {
    /// The asset source has no such file
    #[error("asset not found: {0}")]
    AssetNotFound(String),

    /// The asset exists but could not be read
    #[error("failed to read asset {path}: {source}")]
    AssetRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The directory was never populated by the syncer
    #[error("{0} is not a synced asset directory (marker file missing)")]
    NotAnAssetDir(PathBuf),
}

impl DocsError {
    /// HTTP status for this error
    pub fn status(&self) -> StatusCode {
        match self {
            DocsError::AssetNotFound(_) => StatusCode::NOT_FOUND,
            DocsError::AssetRead { .. } | DocsError::NotAnAssetDir(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_type(&self) -> &'static str {
        match self {
            DocsError::AssetNotFound(_) => "not_found",
            _ => "internal_error",
        }
    }

    /// Render as a JSON error response
    pub fn into_response(self) -> Response<Bytes> {
        let status = self.status();
        // Filesystem details stay in the logs
        let message = match &self {
            DocsError::AssetNotFound(_) => self.to_string(),
            _ => "failed to load documentation asset".to_string(),
        };
        let body = json!({
            "error": {
                "type": self.error_type(),
                "message": message,
            }
        });

        let mut response = Response::new(Bytes::from(body.to_string()));
        *response.status_mut() = status;
        response.headers_mut().insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/json"),
        );
        response
    }
}
