//! Pulling the allow-listed members out of a release tarball

use crate::error::{Result, SyncError};
use crate::manifest::AssetManifest;
use flate2::read::GzDecoder;
use std::io::Read;
use std::path::{Path, PathBuf};
use tar::Archive;

/// Extract the members `manifest` selects from a gzip tarball into `dest`.
///
/// Member paths are kept as they are in the archive, wrapper directory
/// included. Returns those relative paths in archive order.
pub fn extract_selected(archive: &[u8], manifest: &AssetManifest, dest: &Path) -> Result<Vec<PathBuf>> {
    unpack_selected(GzDecoder::new(archive), manifest, dest)
}

fn unpack_selected<R: Read>(reader: R, manifest: &AssetManifest, dest: &Path) -> Result<Vec<PathBuf>> {
    let mut archive = Archive::new(reader);
    let mut extracted = Vec::new();
    let mut seen = 0usize;

    for entry in archive.entries().map_err(SyncError::Archive)? {
        let mut entry = entry.map_err(SyncError::Archive)?;
        seen += 1;

        if !entry.header().entry_type().is_file() {
            continue;
        }
        let path = entry.path().map_err(SyncError::Archive)?.into_owned();
        if !manifest.selects(&path) {
            continue;
        }

        // unpack_in refuses paths that would land outside `dest`
        let unpacked = entry
            .unpack_in(dest)
            .map_err(SyncError::io("failed to extract into", dest))?;
        if unpacked {
            tracing::debug!(member = %path.display(), "Extracted");
            extracted.push(path);
        } else {
            tracing::warn!(member = %path.display(), "Skipped member escaping the target directory");
        }
    }

    tracing::info!(members = seen, extracted = extracted.len(), "Release archive scanned");
    Ok(extracted)
}
