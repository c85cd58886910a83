//! Staged install of a release archive into the asset directory
//!
//! Everything happens in a sibling staging directory first. Only a staged
//! directory that passes [`verify`](crate::layout::verify) is renamed over the
//! target, so a failed run leaves the previous assets in place.

use crate::archive::extract_selected;
use crate::error::{Result, SyncError};
use crate::layout::{flatten, remove_subdirectories, verify, write_marker};
use crate::manifest::AssetManifest;
use std::fs;
use std::path::{Path, PathBuf};

/// Sibling paths used while installing into `target`
#[derive(Debug)]
struct Siblings {
    staging: PathBuf,
    previous: PathBuf,
}

impl Siblings {
    fn of(target: &Path) -> Result<Self> {
        let name = target.file_name().ok_or_else(|| SyncError::Io {
            action: "cannot install into",
            path: target.to_path_buf(),
            source: std::io::Error::new(std::io::ErrorKind::InvalidInput, "path has no final component"),
        })?;
        let name = name.to_string_lossy();
        let parent = target.parent().unwrap_or_else(|| Path::new(""));
        Ok(Self {
            staging: parent.join(format!(".{name}.staging")),
            previous: parent.join(format!(".{name}.previous")),
        })
    }
}

/// Extract, flatten and validate `archive`, then swap it in as `target_dir`.
pub fn install(archive: &[u8], manifest: &AssetManifest, target_dir: &Path) -> Result<()> {
    let siblings = Siblings::of(target_dir)?;

    if let Some(parent) = target_dir.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(SyncError::io("failed to create", parent))?;
    }
    clear(&siblings.staging)?;
    fs::create_dir(&siblings.staging).map_err(SyncError::io("failed to create", &siblings.staging))?;

    if let Err(err) = stage(archive, manifest, &siblings.staging) {
        if let Err(cleanup) = fs::remove_dir_all(&siblings.staging) {
            tracing::warn!(dir = %siblings.staging.display(), error = %cleanup, "Failed to remove staging directory");
        }
        return Err(err);
    }

    swap(&siblings, target_dir)?;
    tracing::info!(dir = %target_dir.display(), "Assets installed");
    Ok(())
}

fn stage(archive: &[u8], manifest: &AssetManifest, staging: &Path) -> Result<()> {
    let extracted = extract_selected(archive, manifest, staging)?;
    if extracted.is_empty() {
        return Err(SyncError::IncompleteAssets(
            manifest.file_names().map(str::to_string).collect(),
        ));
    }
    let moved = flatten(staging)?;
    tracing::debug!(files = moved, "Flattened extracted assets");
    remove_subdirectories(staging, manifest.wrapper_prefix())?;
    write_marker(staging)?;
    verify(staging, manifest)
}

fn swap(siblings: &Siblings, target: &Path) -> Result<()> {
    clear(&siblings.previous)?;

    let had_target = target.exists();
    if had_target {
        fs::rename(target, &siblings.previous).map_err(SyncError::io("failed to move aside", target))?;
    }

    if let Err(source) = fs::rename(&siblings.staging, target) {
        if had_target {
            if let Err(restore) = fs::rename(&siblings.previous, target) {
                tracing::error!(dir = %target.display(), error = %restore, "Failed to restore previous assets");
            }
        }
        let _ = fs::remove_dir_all(&siblings.staging);
        return Err(SyncError::Io {
            action: "failed to move staged assets into",
            path: target.to_path_buf(),
            source,
        });
    }

    if had_target {
        if let Err(err) = fs::remove_dir_all(&siblings.previous) {
            tracing::warn!(dir = %siblings.previous.display(), error = %err, "Failed to remove previous assets");
        }
    }
    Ok(())
}

/// Remove a leftover from an interrupted run
fn clear(path: &Path) -> Result<()> {
    if path.exists() {
        tracing::debug!(dir = %path.display(), "Removing leftover directory");
        fs::remove_dir_all(path).map_err(SyncError::io("failed to remove", path))?;
    }
    Ok(())
}
