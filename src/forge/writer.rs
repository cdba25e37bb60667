//! Forge write operations for repository creation.
//!
//! "Do X": Create a repository on a forge platform.
//!
//! # Example
//!
//! ```ignore
//! use paperlaunch::forge::{ForgeWriter, GitHubWriter, Owner, RepoRequest, Visibility};
//!
//! let writer = GitHubWriter::new("https://api.github.com", token)?;
//! let remote = writer.create_repo(&RepoRequest {
//!     name: "my-paper".to_string(),
//!     description: "My paper".to_string(),
//!     gitignore_template: "TeX".to_string(),
//!     visibility: Visibility::Private,
//!     owner: Owner::User,
//! })?;
//! println!("Created {}", remote.html_url);
//! ```

use anyhow::Result;

use super::{RemoteRepo, RepoRequest};

/// Write operations on a forge platform.
///
/// Errors from the forge (bad token, name already taken, network failure)
/// are returned as-is. Nothing is retried.
pub trait ForgeWriter {
    /// Create a new repository and return where it lives.
    fn create_repo(&self, request: &RepoRequest) -> Result<RemoteRepo>;
}
