//! GitHub ForgeWriter implementation.
//!
//! "Do X": Create repositories on GitHub.
//!
//! Talks to the REST API with a personal access token.
//! All HTTP interaction hidden in internal.rs.

mod internal;

use anyhow::Result;
use reqwest::blocking::Client;

use super::{ForgeWriter, RemoteRepo, RepoRequest};

/// Public GitHub API root
pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// GitHub implementation of ForgeWriter.
pub struct GitHubWriter {
    client: Client,
    api_url: String,
    token: String,
}

impl GitHubWriter {
    pub fn new(api_url: impl Into<String>, token: impl Into<String>) -> Result<Self> {
        Ok(Self::with_client(internal::build_client()?, api_url, token))
    }

    /// Use a preconfigured HTTP client.
    pub fn with_client(client: Client, api_url: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            client,
            api_url: api_url.into(),
            token: token.into(),
        }
    }
}

impl ForgeWriter for GitHubWriter {
    fn create_repo(&self, request: &RepoRequest) -> Result<RemoteRepo> {
        internal::create_repo(&self.client, &self.api_url, &self.token, request)
    }
}

impl std::fmt::Debug for GitHubWriter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GitHubWriter")
            .field("api_url", &self.api_url)
            .field("token", &"<redacted>")
            .finish()
    }
}
