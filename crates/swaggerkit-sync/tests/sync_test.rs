use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use http::StatusCode;
use swaggerkit_sync::{check_and_sync, sync_with, AssetManifest, ReleaseFeed, SyncError, SyncOutcome};
use swaggerkit_testing::{release_descriptor, MockResponse, MockServer, ReleaseArchive};
use swaggerkit_ui::{AssetDir, MARKER_FILE};
use tempfile::TempDir;

const FEED: &str = "/repos/swagger-api/swagger-ui/releases/latest";

struct Workspace {
    _root: TempDir,
    state: PathBuf,
    target: PathBuf,
}

impl Workspace {
    fn new() -> Self {
        let root = tempfile::tempdir().unwrap();
        Self {
            state: root.path().join("latest_release.txt"),
            target: root.path().join("resources"),
            _root: root,
        }
    }

    async fn sync(&self, server: &MockServer) -> Result<SyncOutcome, SyncError> {
        check_and_sync(&server.url(FEED), &self.state, &AssetManifest::swagger_ui(), &self.target).await
    }
}

/// Serve `tag` as the latest release; the archive must be fetched `downloads` times
fn publish(server: &MockServer, tag: &str, downloads: usize) {
    let tarball = format!("/tarball/{tag}");
    server.mock_get(FEED, MockResponse::new().json(&release_descriptor(tag, &server.url(&tarball))));
    server.expect_get(
        &tarball,
        MockResponse::new().tarball(ReleaseArchive::swagger_ui(tag).build()),
        downloads,
    );
}

fn entries(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

#[tokio::test]
async fn test_first_sync_installs_assets() {
    let server = MockServer::start().await;
    publish(&server, "v5.1.0", 1);
    let ws = Workspace::new();

    let outcome = ws.sync(&server).await.unwrap();

    assert_eq!(
        outcome,
        SyncOutcome {
            changed: true,
            version: "v5.1.0".into()
        }
    );
    assert_eq!(fs::read(&ws.state).unwrap(), b"v5.1.0");
    assert_eq!(
        entries(&ws.target),
        vec![MARKER_FILE, "favicon-32x32.png", "swagger-ui-bundle.js", "swagger-ui.css"]
    );
    assert!(AssetDir::open(&ws.target).is_ok());
    server.verify();
}

#[tokio::test]
async fn test_same_tag_is_a_no_op() {
    let server = MockServer::start().await;
    publish(&server, "v5.1.0", 0);
    let ws = Workspace::new();
    fs::write(&ws.state, "v5.1.0").unwrap();

    let outcome = ws.sync(&server).await.unwrap();

    assert!(!outcome.changed);
    assert_eq!(outcome.version, "v5.1.0");
    assert!(!ws.target.exists());
    assert_eq!(fs::read(&ws.state).unwrap(), b"v5.1.0");
    server.verify();
}

#[tokio::test]
async fn test_second_run_is_idempotent() {
    let server = MockServer::start().await;
    publish(&server, "v5.1.0", 1);
    let ws = Workspace::new();

    assert!(ws.sync(&server).await.unwrap().changed);
    let before = fs::read(ws.target.join("swagger-ui.css")).unwrap();
    let second = ws.sync(&server).await.unwrap();

    assert!(!second.changed);
    assert_eq!(fs::read(ws.target.join("swagger-ui.css")).unwrap(), before);
    server.verify();
}

#[tokio::test]
async fn test_new_release_replaces_assets() {
    let ws = Workspace::new();

    let old = MockServer::start().await;
    publish(&old, "v5.0.0", 1);
    ws.sync(&old).await.unwrap();

    let new = MockServer::start().await;
    publish(&new, "v5.1.0", 1);
    let outcome = ws.sync(&new).await.unwrap();

    assert!(outcome.changed);
    assert_eq!(
        fs::read_to_string(ws.target.join("swagger-ui.css")).unwrap(),
        "/* swagger-ui v5.1.0 */"
    );
    assert_eq!(fs::read(&ws.state).unwrap(), b"v5.1.0");
}

#[tokio::test]
async fn test_feed_error_status_is_unavailable() {
    let server = MockServer::start().await;
    server.mock_get(FEED, MockResponse::new().status(StatusCode::INTERNAL_SERVER_ERROR));
    let ws = Workspace::new();

    let err = ws.sync(&server).await.unwrap_err();

    assert!(matches!(err, SyncError::FeedUnavailable(_)), "{err}");
    assert!(!ws.state.exists());
}

#[tokio::test]
async fn test_unreachable_feed_is_unavailable() {
    let ws = Workspace::new();
    let feed = ReleaseFeed::new("http://127.0.0.1:9/latest", Duration::from_secs(2)).unwrap();

    let err = sync_with(&feed, &ws.state, &AssetManifest::swagger_ui(), &ws.target)
        .await
        .unwrap_err();

    assert!(matches!(err, SyncError::FeedUnavailable(_)), "{err}");
}

#[tokio::test]
async fn test_descriptor_without_tag_is_malformed() {
    let server = MockServer::start().await;
    server.mock_get(
        FEED,
        MockResponse::new().json(&serde_json::json!({ "tarball_url": server.url("/t") })),
    );
    let ws = Workspace::new();

    let err = ws.sync(&server).await.unwrap_err();

    assert!(matches!(err, SyncError::MalformedFeedResponse(_)), "{err}");
}

#[tokio::test]
async fn test_failed_download_keeps_previous_release() {
    let ws = Workspace::new();
    let old = MockServer::start().await;
    publish(&old, "v5.0.0", 1);
    ws.sync(&old).await.unwrap();

    let server = MockServer::start().await;
    let tarball = server.url("/tarball/v5.1.0");
    server.mock_get(FEED, MockResponse::new().json(&release_descriptor("v5.1.0", &tarball)));
    server.mock_get("/tarball/v5.1.0", MockResponse::new().status(StatusCode::NOT_FOUND));

    let err = ws.sync(&server).await.unwrap_err();

    assert!(matches!(err, SyncError::ArchiveDownloadFailed { .. }), "{err}");
    assert_eq!(fs::read(&ws.state).unwrap(), b"v5.0.0");
    assert_eq!(
        fs::read_to_string(ws.target.join("swagger-ui.css")).unwrap(),
        "/* swagger-ui v5.0.0 */"
    );
}

#[tokio::test]
async fn test_incomplete_release_is_rejected() {
    let server = MockServer::start().await;
    let tarball = server.url("/tarball/v6.0.0");
    server.mock_get(FEED, MockResponse::new().json(&release_descriptor("v6.0.0", &tarball)));
    let archive = ReleaseArchive::new()
        .file("swagger-api-swagger-ui-0000/dist/swagger-ui.css", "css only")
        .build();
    server.mock_get("/tarball/v6.0.0", MockResponse::new().tarball(archive));
    let ws = Workspace::new();

    let err = ws.sync(&server).await.unwrap_err();

    assert!(matches!(err, SyncError::IncompleteAssets(_)), "{err}");
    assert!(!ws.state.exists());
    assert!(!ws.target.exists());
}

#[tokio::test]
async fn test_slow_feed_times_out_as_unavailable() {
    let server = MockServer::start().await;
    let descriptor = release_descriptor("v5.1.0", &server.url("/tarball/v5.1.0"));
    server.mock_get(
        FEED,
        MockResponse::new().json(&descriptor).delay(Duration::from_secs(2)),
    );
    let ws = Workspace::new();
    let feed = ReleaseFeed::new(server.url(FEED), Duration::from_millis(200)).unwrap();

    let err = sync_with(&feed, &ws.state, &AssetManifest::swagger_ui(), &ws.target)
        .await
        .unwrap_err();

    assert!(matches!(err, SyncError::FeedUnavailable(ref m) if m.contains("timed out")), "{err}");
    assert!(!ws.state.exists());
    assert!(!ws.target.exists());
}

#[tokio::test]
async fn test_slow_download_times_out_as_download_failure() {
    let server = MockServer::start().await;
    let tarball = server.url("/tarball/v5.1.0");
    server.mock_get(FEED, MockResponse::new().json(&release_descriptor("v5.1.0", &tarball)));
    server.mock_get(
        "/tarball/v5.1.0",
        MockResponse::new()
            .tarball(ReleaseArchive::swagger_ui("v5.1.0").build())
            .delay(Duration::from_secs(2)),
    );
    let ws = Workspace::new();
    let feed = ReleaseFeed::new(server.url(FEED), Duration::from_millis(200)).unwrap();

    let err = sync_with(&feed, &ws.state, &AssetManifest::swagger_ui(), &ws.target)
        .await
        .unwrap_err();

    assert!(matches!(err, SyncError::ArchiveDownloadFailed { .. }), "{err}");
    assert!(!ws.state.exists());
    assert!(!ws.target.exists());
}
