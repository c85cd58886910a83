//! Self-hosted Swagger UI for tower services
//!
//! This crate attaches interactive API documentation to an existing HTTP
//! service without pulling Swagger UI from a CDN. The JavaScript bundle,
//! stylesheet and favicon are served by the application itself, from a
//! directory kept up to date by `swaggerkit-sync` or from memory.
//!
//! # Features
//!
//! - Docs page at `/docs` (configurable), with `/` redirecting to it
//! - Bundle, CSS and favicon served from [`AssetDir`] or [`MemoryAssets`]
//! - Swagger UI options merged per request from built-in defaults and an overlay
//! - TanStack request-snippet generator in the "Try it out" panel
//!
//! # Usage
//!
//! ```rust,ignore
//! use swaggerkit_ui::{patch, AppInfo, AssetDir, DocsOptions};
//!
//! let host = AppInfo::new("Pet Store").openapi_url("/openapi.json");
//! let docs = patch(&host, DocsOptions::new(), AssetDir::open("resources")?);
//! let service = tower::ServiceBuilder::new().layer(docs).service(app);
//! ```

mod assets;
mod config;
mod error;
mod host;
mod layer;
mod swagger;

pub use assets::{Asset, AssetDir, AssetSource, MemoryAssets, MARKER_FILE};
pub use config::{
    default_parameters, merge_config, DocsOptions, Parameters, DEFAULT_API_CLIENT,
    DEFAULT_CSS_URL, DEFAULT_DOCS_URL, DEFAULT_FAVICON_URL, DEFAULT_JS_URL,
};
pub use error::{DocsError, Result};
pub use host::{conflicts, AppInfo, HostApp, RouteConflict};
pub use layer::{patch, SwaggerUi, SwaggerUiLayer};
pub use swagger::{render_page, PageContext};
