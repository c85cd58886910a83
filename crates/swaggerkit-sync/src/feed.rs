//! Release feed client

use crate::error::{Result, SyncError};
use bytes::Bytes;
use serde::Deserialize;
use std::time::Duration;

/// GitHub's latest-release endpoint for Swagger UI
pub const SWAGGER_UI_FEED: &str = "https://api.github.com/repos/swagger-api/swagger-ui/releases/latest";

/// Default bound on each network call
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

const USER_AGENT: &str = concat!("swaggerkit-sync/", env!("CARGO_PKG_VERSION"));

/// The latest published release
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Release {
    pub tag: String,
    pub archive_url: String,
}

/// Fields of the descriptor that matter here; everything else is ignored
#[derive(Deserialize)]
struct Descriptor {
    tag_name: Option<String>,
    tarball_url: Option<String>,
}

/// Client for one release feed endpoint
#[derive(Debug, Clone)]
pub struct ReleaseFeed {
    endpoint: String,
    client: reqwest::Client,
}

impl ReleaseFeed {
    /// Feed at `endpoint`, every request bounded by `timeout`
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .map_err(|e| SyncError::FeedUnavailable(format!("cannot build HTTP client: {e}")))?;
        Ok(Self {
            endpoint: endpoint.into(),
            client,
        })
    }

    /// Fetch and parse the latest release descriptor
    pub async fn fetch_latest(&self) -> Result<Release> {
        tracing::debug!(endpoint = %self.endpoint, "Fetching latest release");
        let response = self
            .client
            .get(&self.endpoint)
            .header(reqwest::header::ACCEPT, "application/vnd.github+json")
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| SyncError::FeedUnavailable(describe(&e)))?;

        let body = response
            .bytes()
            .await
            .map_err(|e| SyncError::FeedUnavailable(describe(&e)))?;

        parse_descriptor(&body)
    }

    /// Download the whole archive into memory
    pub async fn download_archive(&self, url: &str) -> Result<Bytes> {
        tracing::debug!(url = %url, "Downloading release archive");
        let failed = |e: reqwest::Error| SyncError::ArchiveDownloadFailed {
            url: url.to_string(),
            reason: describe(&e),
        };

        let response = self
            .client
            .get(url)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(failed)?;
        let archive = response.bytes().await.map_err(failed)?;

        tracing::debug!(bytes = archive.len(), "Release archive downloaded");
        Ok(archive)
    }
}

/// Pull `(tag, archive_url)` out of a descriptor body
pub fn parse_descriptor(body: &[u8]) -> Result<Release> {
    let descriptor: Descriptor = serde_json::from_slice(body)
        .map_err(|e| SyncError::MalformedFeedResponse(format!("not a JSON object: {e}")))?;

    let tag = descriptor
        .tag_name
        .filter(|tag| !tag.trim().is_empty())
        .ok_or_else(|| SyncError::MalformedFeedResponse("missing `tag_name`".into()))?;
    let archive_url = descriptor
        .tarball_url
        .filter(|url| !url.trim().is_empty())
        .ok_or_else(|| SyncError::MalformedFeedResponse("missing `tarball_url`".into()))?;

    Ok(Release { tag, archive_url })
}

fn describe(err: &reqwest::Error) -> String {
    if err.is_timeout() {
        "request timed out".to_string()
    } else if let Some(status) = err.status() {
        format!("server answered {status}")
    } else {
        err.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_descriptor() {
        let body = br#"{"tag_name": "v5.1.0", "tarball_url": "https://example.com/t.tar.gz", "name": "x"}"#;
        let release = parse_descriptor(body).unwrap();
        assert_eq!(release.tag, "v5.1.0");
        assert_eq!(release.archive_url, "https://example.com/t.tar.gz");
    }

    #[test]
    fn test_tag_is_kept_verbatim() {
        let body = br#"{"tag_name": "v5.1.0 ", "tarball_url": "https://example.com/t.tar.gz"}"#;
        assert_eq!(parse_descriptor(body).unwrap().tag, "v5.1.0 ");
    }

    #[test]
    fn test_missing_fields_are_malformed() {
        let err = parse_descriptor(br#"{"tarball_url": "https://example.com"}"#).unwrap_err();
        assert!(matches!(err, SyncError::MalformedFeedResponse(ref m) if m.contains("tag_name")));

        let err = parse_descriptor(br#"{"tag_name": "v5.1.0"}"#).unwrap_err();
        assert!(matches!(err, SyncError::MalformedFeedResponse(ref m) if m.contains("tarball_url")));

        let err = parse_descriptor(br#"{"tag_name": "", "tarball_url": "x"}"#).unwrap_err();
        assert!(matches!(err, SyncError::MalformedFeedResponse(_)));
    }

    #[test]
    fn test_non_json_is_malformed() {
        let err = parse_descriptor(b"<html>rate limited</html>").unwrap_err();
        assert!(matches!(err, SyncError::MalformedFeedResponse(_)));

        let err = parse_descriptor(b"[1, 2]").unwrap_err();
        assert!(matches!(err, SyncError::MalformedFeedResponse(_)));
    }
}
