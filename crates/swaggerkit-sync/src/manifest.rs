//! Which archive members make up the asset set

use std::ffi::OsStr;
use std::path::Path;
use swaggerkit_ui::Asset;

/// A file to extract and the directory it must sit in
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestEntry {
    pub file_name: String,
    pub parent: String,
}

/// Allow-list of archive members
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetManifest {
    entries: Vec<ManifestEntry>,
    wrapper_prefix: String,
}

impl AssetManifest {
    /// Manifest with the given entries and wrapper-directory prefix
    pub fn new(entries: Vec<ManifestEntry>, wrapper_prefix: impl Into<String>) -> Self {
        Self {
            entries,
            wrapper_prefix: wrapper_prefix.into(),
        }
    }

    /// The three Swagger UI assets from the release's `dist` directory
    pub fn swagger_ui() -> Self {
        let entries = Asset::ALL
            .iter()
            .map(|asset| ManifestEntry {
                file_name: asset.file_name().to_string(),
                parent: "dist".to_string(),
            })
            .collect();
        Self::new(entries, "swagger-api-swagger-ui-")
    }

    /// Whether the member at `path` is extracted
    pub fn selects(&self, path: &Path) -> bool {
        let (Some(name), Some(parent)) = (
            path.file_name().and_then(OsStr::to_str),
            path.parent()
                .and_then(Path::file_name)
                .and_then(OsStr::to_str),
        ) else {
            return false;
        };
        self.entries
            .iter()
            .any(|entry| entry.file_name == name && entry.parent == parent)
    }

    /// File names a complete sync produces
    pub fn file_names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|entry| entry.file_name.as_str())
    }

    /// Name prefix of the top-level directory release archives wrap files in
    pub fn wrapper_prefix(&self) -> &str {
        &self.wrapper_prefix
    }
}

impl Default for AssetManifest {
    fn default() -> Self {
        Self::swagger_ui()
    }
}
