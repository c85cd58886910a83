//! Testing utilities for swaggerkit
//!
//! `MockServer` plays the release feed over real HTTP; `ReleaseArchive`
//! builds tarballs laid out like upstream Swagger UI releases.

pub mod archive;
pub mod expectation;
pub mod server;

pub use archive::{release_descriptor, ReleaseArchive, WRAPPER_DIR};
pub use expectation::{Expectation, MockResponse, Times};
pub use server::MockServer;
