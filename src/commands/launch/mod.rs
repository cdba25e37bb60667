//! Launch a new LaTeX paper project
//!
//! Public interface lives here; the steps are in `internal.rs`.
//!
//! # Example
//!
//! ```no_run
//! use paperlaunch::commands::launch::{self, LaunchOptions};
//!
//! launch::execute(LaunchOptions {
//!     name: "my-paper".to_string(),
//!     github: false,
//!     public: false,
//! })
//! .expect("Failed to launch project");
//! ```

mod internal;

use anyhow::Result;
use std::path::{Path, PathBuf};

use crate::config::Settings;
use crate::forge::RemoteRepo;

pub use internal::INITIAL_COMMIT_MESSAGE;

/// What the caller asked for on the command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchOptions {
    /// Project name: directory name, repository name and fallback title
    pub name: String,
    /// Create the repository on GitHub and clone it
    pub github: bool,
    /// Make the GitHub repository public
    pub public: bool,
}

/// Outcome of a successful launch
#[derive(Debug, Clone)]
pub struct LaunchReport {
    pub path: PathBuf,
    pub remote: Option<RemoteRepo>,
    pub commit: String,
    pub files: Vec<PathBuf>,
}

/// Execute the launch command
///
/// # Process
///
/// 1. **Config**: load the settings file
/// 2. **Repository**: `git init ./<name>`, or create on GitHub and clone
/// 3. **Templates**: render `paper.tex`, `si.tex`, `README.md`; copy
///    `Makefile` and `bibliography.bib`
/// 4. **Commit**: stage those five files and commit
///
/// # Errors
///
/// Returns an error if:
/// - The settings file is missing or malformed
/// - `./<name>` exists and is not empty
/// - A template file is missing
/// - GitHub rejects the token or the name is taken
/// - Any git command fails
pub fn execute(options: LaunchOptions) -> Result<LaunchReport> {
    internal::execute_launch(options)
}

/// Run the launch with already-resolved settings and locations.
///
/// The project is created at `base_dir/<name>`.
pub fn run(
    settings: &Settings,
    options: &LaunchOptions,
    base_dir: &Path,
    templates_dir: &Path,
) -> Result<LaunchReport> {
    internal::run_launch(settings, options, base_dir, templates_dir)
}
