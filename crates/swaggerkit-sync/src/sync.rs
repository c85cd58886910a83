//! One fetch, compare and install cycle

use crate::error::Result;
use crate::feed::{ReleaseFeed, DEFAULT_TIMEOUT};
use crate::install::install;
use crate::manifest::AssetManifest;
use crate::state::ReleaseState;
use std::path::Path;

/// What a sync run did
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncOutcome {
    /// Whether new assets were installed
    pub changed: bool,
    /// The feed's latest tag
    pub version: String,
}

/// Sync `target_dir` with the latest release from `feed_endpoint`.
///
/// Uses [`DEFAULT_TIMEOUT`] for network calls; build a [`ReleaseFeed`] and
/// call [`sync_with`] to choose another.
pub async fn check_and_sync(
    feed_endpoint: &str,
    state_path: &Path,
    manifest: &AssetManifest,
    target_dir: &Path,
) -> Result<SyncOutcome> {
    let feed = ReleaseFeed::new(feed_endpoint, DEFAULT_TIMEOUT)?;
    sync_with(&feed, state_path, manifest, target_dir).await
}

/// Sync `target_dir` with the latest release from `feed`.
///
/// Nothing is downloaded or written when the stored tag already matches.
/// The state file is only updated after the new assets are in place.
pub async fn sync_with(
    feed: &ReleaseFeed,
    state_path: &Path,
    manifest: &AssetManifest,
    target_dir: &Path,
) -> Result<SyncOutcome> {
    let release = feed.fetch_latest().await?;
    let stored = ReleaseState::load(state_path)?;

    if stored.as_deref() == Some(release.tag.as_str()) {
        tracing::info!(tag = %release.tag, "Assets already up to date");
        return Ok(SyncOutcome {
            changed: false,
            version: release.tag,
        });
    }

    tracing::info!(
        from = stored.as_deref().unwrap_or("<none>"),
        to = %release.tag,
        "New release available"
    );
    let archive = feed.download_archive(&release.archive_url).await?;

    let manifest = manifest.clone();
    let target = target_dir.to_path_buf();
    tokio::task::spawn_blocking(move || install(&archive, &manifest, &target)).await??;

    ReleaseState::store(state_path, &release.tag)?;
    Ok(SyncOutcome {
        changed: true,
        version: release.tag,
    })
}
