//! Domain types for remote repository creation.

use serde::Deserialize;

/// Account a new repository is created under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Owner {
    /// The user the token belongs to
    User,
    /// An organization the token can create repositories in
    Org(String),
}

/// Repository visibility on the forge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Visibility {
    #[default]
    Private,
    Public,
}

impl Visibility {
    /// Private unless `--public` was given
    pub fn from_public_flag(public: bool) -> Self {
        if public {
            Visibility::Public
        } else {
            Visibility::Private
        }
    }

    pub fn is_private(self) -> bool {
        self == Visibility::Private
    }
}

/// Which remote URL to clone from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CloneProtocol {
    #[default]
    Https,
    Ssh,
}

/// Everything needed to create a repository on a forge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoRequest {
    pub name: String,
    pub description: String,
    pub gitignore_template: String,
    pub visibility: Visibility,
    pub owner: Owner,
}

/// Repository as created on the forge.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RemoteRepo {
    pub full_name: String,
    pub clone_url: String,
    pub ssh_url: String,
    pub html_url: String,
    pub private: bool,
}

impl RemoteRepo {
    pub fn clone_url_for(&self, protocol: CloneProtocol) -> &str {
        match protocol {
            CloneProtocol::Https => &self.clone_url,
            CloneProtocol::Ssh => &self.ssh_url,
        }
    }
}
