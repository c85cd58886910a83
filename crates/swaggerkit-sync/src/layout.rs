//! Reshaping an extraction directory into the flat asset layout
//!
//! After extraction the files sit at `<wrapper>/dist/<name>`. The asset
//! directory the docs server reads wants them at `<name>`, next to the marker
//! file and nothing else.

use crate::error::{Result, SyncError};
use crate::manifest::AssetManifest;
use std::fs;
use std::path::{Path, PathBuf};
use swaggerkit_ui::MARKER_FILE;
use walkdir::WalkDir;

/// Move every regular file below `dir` directly into `dir`.
///
/// Fails with [`SyncError::DuplicateAsset`] if two files share a name.
pub fn flatten(dir: &Path) -> Result<usize> {
    let nested: Vec<PathBuf> = WalkDir::new(dir)
        .min_depth(2)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.into_path())
        .collect();

    for path in &nested {
        let Some(name) = path.file_name() else {
            continue;
        };
        let target = dir.join(name);
        if target.exists() {
            return Err(SyncError::DuplicateAsset(name.to_string_lossy().into_owned()));
        }
        fs::rename(path, &target).map_err(SyncError::io("failed to move", path))?;
    }

    Ok(nested.len())
}

/// Remove every directory directly inside `dir`.
///
/// Wrapper directories are expected after flattening; anything else is
/// logged before it goes.
pub fn remove_subdirectories(dir: &Path, wrapper_prefix: &str) -> Result<()> {
    let entries = fs::read_dir(dir).map_err(SyncError::io("failed to read", dir))?;
    for entry in entries {
        let entry = entry.map_err(SyncError::io("failed to read", dir))?;
        let path = entry.path();
        if !path.is_dir() {
            continue;
        }
        let name = entry.file_name();
        if !name.to_string_lossy().starts_with(wrapper_prefix) {
            tracing::warn!(dir = %path.display(), "Removing unexpected directory");
        }
        fs::remove_dir_all(&path).map_err(SyncError::io("failed to remove", &path))?;
    }
    Ok(())
}

/// Create the empty marker file
pub fn write_marker(dir: &Path) -> Result<()> {
    let path = dir.join(MARKER_FILE);
    fs::write(&path, b"").map_err(SyncError::io("failed to write", &path))
}

/// Check that `dir` holds every manifest file plus the marker, and nothing else
pub fn verify(dir: &Path, manifest: &AssetManifest) -> Result<()> {
    let missing: Vec<String> = manifest
        .file_names()
        .filter(|name| !dir.join(name).is_file())
        .map(str::to_string)
        .collect();
    if !missing.is_empty() {
        return Err(SyncError::IncompleteAssets(missing));
    }

    let entries = fs::read_dir(dir).map_err(SyncError::io("failed to read", dir))?;
    for entry in entries {
        let entry = entry.map_err(SyncError::io("failed to read", dir))?;
        let name = entry.file_name();
        let name = name.to_string_lossy();
        let expected = name == MARKER_FILE || manifest.file_names().any(|n| n == name);
        if !expected || entry.path().is_dir() {
            return Err(SyncError::Io {
                action: "unexpected entry in",
                path: dir.to_path_buf(),
                source: std::io::Error::new(std::io::ErrorKind::InvalidData, name.into_owned()),
            });
        }
    }
    Ok(())
}
