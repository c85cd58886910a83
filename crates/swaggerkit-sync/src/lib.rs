//! Keeps a local Swagger UI asset directory in step with upstream releases
//!
//! A sync asks the release feed for the latest tag, compares it with the tag
//! recorded in a state file and, when they differ, downloads the release
//! tarball, pulls `swagger-ui-bundle.js`, `swagger-ui.css` and
//! `favicon-32x32.png` out of its `dist` directory and swaps them into the
//! target directory.
//!
//! ```rust,ignore
//! use swaggerkit_sync::{check_and_sync, AssetManifest, SWAGGER_UI_FEED};
//!
//! let outcome = check_and_sync(
//!     SWAGGER_UI_FEED,
//!     "latest_release.txt".as_ref(),
//!     &AssetManifest::swagger_ui(),
//!     "crates/swaggerkit-ui/resources".as_ref(),
//! )
//! .await?;
//! println!("{} (changed: {})", outcome.version, outcome.changed);
//! ```

pub mod archive;
pub mod ci_env;
pub mod error;
pub mod feed;
pub mod install;
pub mod layout;
pub mod manifest;
pub mod state;
pub mod sync;

pub use archive::extract_selected;
pub use ci_env::append_ci_env;
pub use error::{Result, SyncError};
pub use feed::{Release, ReleaseFeed, DEFAULT_TIMEOUT, SWAGGER_UI_FEED};
pub use install::install;
pub use manifest::{AssetManifest, ManifestEntry};
pub use state::ReleaseState;
pub use sync::{check_and_sync, sync_with, SyncOutcome};
