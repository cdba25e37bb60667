//! Internal implementation for GitHubWriter.
//!
//! Contains REST calls and JSON shapes.
//! Not exposed in public interface.

use anyhow::{anyhow, bail, Context, Result};
use reqwest::blocking::Client;
use reqwest::Url;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

use crate::forge::{Owner, RemoteRepo, RepoRequest};

pub(crate) const USER_AGENT: &str = concat!("paperlaunch/", env!("CARGO_PKG_VERSION"));

// ============================================================================
// GitHub JSON types (internal, match REST v3 format)
// ============================================================================

#[derive(Debug, Serialize)]
struct CreateRepoBody<'a> {
    name: &'a str,
    description: &'a str,
    gitignore_template: &'a str,
    private: bool,
}

#[derive(Debug, Deserialize)]
struct GhError {
    message: String,
    #[serde(default)]
    errors: Vec<GhErrorDetail>,
}

#[derive(Debug, Deserialize)]
struct GhErrorDetail {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    field: Option<String>,
    #[serde(default)]
    code: Option<String>,
}

// ============================================================================
// Functions called by GitHubWriter
// ============================================================================

pub(crate) fn build_client() -> Result<Client> {
    Client::builder()
        .user_agent(USER_AGENT)
        .connect_timeout(Duration::from_secs(30))
        .build()
        .context("Failed to build HTTP client")
}

/// `/user/repos` for the token owner, `/orgs/{org}/repos` for an organization.
///
/// Path segments are percent-encoded, so an org name cannot change the route.
pub(crate) fn create_repo_endpoint(api_url: &str, owner: &Owner) -> Result<Url> {
    let mut url =
        Url::parse(api_url).with_context(|| format!("Invalid GitHub API URL: {}", api_url))?;
    {
        let mut segments = url
            .path_segments_mut()
            .map_err(|_| anyhow!("GitHub API URL cannot take a path: {}", api_url))?;
        segments.pop_if_empty();
        match owner {
            Owner::User => segments.extend(["user", "repos"]),
            Owner::Org(org) => segments.extend(["orgs", org.as_str(), "repos"]),
        };
    }
    Ok(url)
}

pub(crate) fn create_repo(
    client: &Client,
    api_url: &str,
    token: &str,
    request: &RepoRequest,
) -> Result<RemoteRepo> {
    let url = create_repo_endpoint(api_url, &request.owner)?;
    let body = CreateRepoBody {
        name: &request.name,
        description: &request.description,
        gitignore_template: &request.gitignore_template,
        private: request.visibility.is_private(),
    };

    debug!(%url, name = %request.name, private = body.private, "creating repository");

    let response = client
        .post(url.clone())
        .bearer_auth(token)
        .header("Accept", "application/vnd.github+json")
        .header("X-GitHub-Api-Version", "2022-11-28")
        .json(&body)
        .send()
        .with_context(|| format!("Failed to connect to GitHub API at {}", url))?;

    let status = response.status();
    if !status.is_success() {
        let text = response.text().unwrap_or_default();
        bail!(
            "GitHub refused to create repository '{}' ({}): {}",
            request.name,
            status,
            describe_error(&text)
        );
    }

    response
        .json::<RemoteRepo>()
        .context("Failed to parse GitHub repository JSON")
}

/// Flatten GitHub's error body into one line.
fn describe_error(body: &str) -> String {
    let Ok(error) = serde_json::from_str::<GhError>(body) else {
        return body.trim().to_string();
    };

    let details: Vec<String> = error
        .errors
        .iter()
        .filter_map(|detail| {
            detail.message.clone().or_else(|| match (&detail.field, &detail.code) {
                (Some(field), Some(code)) => Some(format!("{} {}", field, code)),
                _ => None,
            })
        })
        .collect();

    if details.is_empty() {
        error.message
    } else {
        format!("{} ({})", error.message, details.join("; "))
    }
}
