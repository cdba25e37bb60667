//! Forge abstraction for creating hosted repositories.
//!
//! - **ForgeWriter**: trait for repository creation
//! - **GitHubWriter**: GitHub REST API implementation
//!
//! Local-only launches never construct a writer, so they make no network calls.

mod types;
pub mod writer;

pub mod github;

pub use github::GitHubWriter;
pub use types::*;
pub use writer::ForgeWriter;

/// `.gitignore` template GitHub applies to new paper repositories
pub const GITIGNORE_TEMPLATE: &str = "TeX";
