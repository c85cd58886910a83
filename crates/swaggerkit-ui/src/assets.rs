//! Bundled Swagger UI assets
//!
//! The docs page needs three files from a Swagger UI release. They are read
//! through an [`AssetSource`]: either a directory populated by
//! `swaggerkit-sync` ([`AssetDir`]) or blobs the embedder already holds in
//! memory ([`MemoryAssets`], e.g. from `include_bytes!`).

use crate::error::{DocsError, Result};
use async_trait::async_trait;
use bytes::Bytes;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tokio::io::AsyncReadExt;

/// Empty file marking a directory as a complete, synced asset set
pub const MARKER_FILE: &str = ".swaggerkit-assets";

/// One of the files the docs page loads
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Asset {
    /// `swagger-ui-bundle.js`
    Bundle,
    /// `swagger-ui.css`
    Css,
    /// `favicon-32x32.png`
    Favicon,
}

impl Asset {
    /// Every asset, in a fixed order
    pub const ALL: [Asset; 3] = [Asset::Favicon, Asset::Css, Asset::Bundle];

    /// File name inside a Swagger UI `dist` directory
    pub fn file_name(self) -> &'static str {
        match self {
            Asset::Bundle => "swagger-ui-bundle.js",
            Asset::Css => "swagger-ui.css",
            Asset::Favicon => "favicon-32x32.png",
        }
    }

    /// Content-Type to serve the asset with
    pub fn content_type(self) -> &'static str {
        match self {
            Asset::Bundle => "application/javascript",
            Asset::Css => "text/css",
            Asset::Favicon => "image/png",
        }
    }

    /// Look an asset up by file name
    pub fn from_file_name(name: &str) -> Option<Asset> {
        Asset::ALL.into_iter().find(|asset| asset.file_name() == name)
    }
}

/// Where asset bytes come from
#[async_trait]
pub trait AssetSource: Send + Sync + 'static {
    /// Load the full contents of `asset`
    async fn load(&self, asset: Asset) -> Result<Bytes>;
}

/// Assets read from a directory on every request
#[derive(Debug, Clone)]
pub struct AssetDir {
    root: PathBuf,
}

impl AssetDir {
    /// Use `root` as the asset directory.
    ///
    /// Fails unless `root` carries the marker file written at the end of a sync.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        if !root.join(MARKER_FILE).is_file() {
            return Err(DocsError::NotAnAssetDir(root));
        }
        Ok(Self { root })
    }

    /// Use `root` without checking for the marker
    pub fn unchecked(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The directory assets are read from
    pub fn root(&self) -> &Path {
        &self.root
    }
}

#[async_trait]
impl AssetSource for AssetDir {
    async fn load(&self, asset: Asset) -> Result<Bytes> {
        let path = self.root.join(asset.file_name());
        // File handle is dropped at the end of this block
        let content = {
            let mut file = match tokio::fs::File::open(&path).await {
                Ok(file) => file,
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                    return Err(DocsError::AssetNotFound(asset.file_name().to_string()));
                }
                Err(source) => return Err(DocsError::AssetRead { path, source }),
            };
            let mut content = Vec::new();
            if let Err(source) = file.read_to_end(&mut content).await {
                return Err(DocsError::AssetRead { path, source });
            }
            content
        };
        tracing::debug!(asset = asset.file_name(), bytes = content.len(), "Asset loaded");
        Ok(Bytes::from(content))
    }
}

/// Assets held in memory
#[derive(Debug, Clone, Default)]
pub struct MemoryAssets {
    blobs: HashMap<Asset, Bytes>,
}

impl MemoryAssets {
    /// Create an empty set
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace one asset
    pub fn with(mut self, asset: Asset, content: impl Into<Bytes>) -> Self {
        self.blobs.insert(asset, content.into());
        self
    }

    /// Build from three static blobs
    pub fn from_static(bundle: &'static [u8], css: &'static [u8], favicon: &'static [u8]) -> Self {
        Self::new()
            .with(Asset::Bundle, Bytes::from_static(bundle))
            .with(Asset::Css, Bytes::from_static(css))
            .with(Asset::Favicon, Bytes::from_static(favicon))
    }
}

#[async_trait]
impl AssetSource for MemoryAssets {
    async fn load(&self, asset: Asset) -> Result<Bytes> {
        self.blobs
            .get(&asset)
            .cloned()
            .ok_or_else(|| DocsError::AssetNotFound(asset.file_name().to_string()))
    }
}
