//! Low-level git operations
//!
//! Calls run in an explicit repository directory. Only `clone` resolves its
//! target against the process working directory.

use anyhow::{bail, Context, Result};
use std::ffi::OsStr;
use std::fs;
use std::path::Path;
use std::process::Command;
use tracing::debug;

/// Run git in `dir` and return trimmed stdout.
fn run_git<I, S>(dir: &Path, args: I) -> Result<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    let args: Vec<S> = args.into_iter().collect();
    let rendered: Vec<String> = args
        .iter()
        .map(|a| a.as_ref().to_string_lossy().into_owned())
        .collect();
    debug!(dir = %dir.display(), "git {}", rendered.join(" "));

    let output = Command::new("git")
        .args(&args)
        .current_dir(dir)
        .output()
        .with_context(|| format!("Failed to execute `git {}`. Is git installed?", rendered[0]))?;

    if !output.status.success() {
        bail!(
            "git {} failed: {}",
            rendered[0],
            String::from_utf8_lossy(&output.stderr).trim()
        );
    }

    Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
}

/// True if `path` is missing or an empty directory.
pub fn is_vacant(path: &Path) -> Result<bool> {
    if !path.exists() {
        return Ok(true);
    }
    if !path.is_dir() {
        return Ok(false);
    }
    let mut entries = fs::read_dir(path)
        .with_context(|| format!("Failed to read directory {}", path.display()))?;
    Ok(entries.next().is_none())
}

/// Create `path` and initialize an empty repository in it.
pub fn init(path: &Path) -> Result<()> {
    if !is_vacant(path)? {
        bail!(
            "Target directory already exists and is not empty: {}",
            path.display()
        );
    }

    fs::create_dir_all(path)
        .with_context(|| format!("Failed to create directory {}", path.display()))?;
    run_git(path, ["init", "--quiet"])?;
    Ok(())
}

/// Clone `url` into `target`.
pub fn clone(url: &str, target: &Path) -> Result<()> {
    if !is_vacant(target)? {
        bail!("Target directory already exists: {}", target.display());
    }

    if let Some(parent) = target.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }

    run_git(
        Path::new("."),
        [OsStr::new("clone"), OsStr::new("--quiet"), OsStr::new(url), target.as_os_str()],
    )?;
    Ok(())
}

/// Stage specific files. A missing file is an error.
pub fn add_paths<S: AsRef<OsStr>>(repo: &Path, paths: &[S]) -> Result<()> {
    let mut args = vec![OsStr::new("add"), OsStr::new("--")];
    args.extend(paths.iter().map(|p| p.as_ref()));
    run_git(repo, args).context("Failed to stage files")?;
    Ok(())
}

/// Name and email recorded on a commit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub name: String,
    pub email: String,
}

/// Create a commit from the index.
///
/// Without a configured identity, commits as `<login>@<hostname>`.
pub fn commit(repo: &Path, message: &str) -> Result<()> {
    let identity = if has_identity(repo) {
        None
    } else {
        let identity = fallback_identity();
        debug!(name = %identity.name, email = %identity.email, "no git identity configured, using fallback");
        Some(identity)
    };
    commit_as(repo, message, identity.as_ref())
}

/// Create a commit, overriding `user.name`/`user.email` when `identity` is given.
pub fn commit_as(repo: &Path, message: &str, identity: Option<&Identity>) -> Result<()> {
    let mut args: Vec<String> = Vec::new();
    if let Some(identity) = identity {
        args.push("-c".to_string());
        args.push(format!("user.name={}", identity.name));
        args.push("-c".to_string());
        args.push(format!("user.email={}", identity.email));
    }
    args.extend(["commit", "--quiet", "-m", message].map(str::to_string));

    run_git(repo, args).context("Failed to create commit")?;
    Ok(())
}

/// True if git can resolve both author and committer for `repo`.
pub fn has_identity(repo: &Path) -> bool {
    ["GIT_AUTHOR_IDENT", "GIT_COMMITTER_IDENT"]
        .iter()
        .all(|var| run_git(repo, ["var", *var]).is_ok())
}

/// Identity built from the login name and hostname.
pub fn fallback_identity() -> Identity {
    identity_from(|key| std::env::var(key).ok(), local_hostname())
}

fn identity_from<F>(env: F, hostname: Option<String>) -> Identity
where
    F: Fn(&str) -> Option<String>,
{
    let user = ["LOGNAME", "USER", "LNAME", "USERNAME"]
        .iter()
        .filter_map(|key| env(*key))
        .map(|value| value.trim().to_string())
        .find(|value| !value.is_empty())
        .unwrap_or_else(|| "paperlaunch".to_string());
    let host = hostname
        .map(|h| h.trim().to_string())
        .filter(|h| !h.is_empty())
        .unwrap_or_else(|| "localhost".to_string());

    Identity {
        email: format!("{}@{}", user, host),
        name: user,
    }
}

fn local_hostname() -> Option<String> {
    let output = Command::new("hostname").output().ok()?;
    if output.status.success() {
        let name = String::from_utf8_lossy(&output.stdout).trim().to_string();
        if !name.is_empty() {
            return Some(name);
        }
    }
    std::env::var("HOSTNAME").ok()
}

/// Check if `path` is inside a git working tree
pub fn is_git_repo(path: &Path) -> Result<bool> {
    let output = Command::new("git")
        .args(["rev-parse", "--is-inside-work-tree"])
        .current_dir(path)
        .output()
        .context("Failed to check if directory is a git repository")?;

    Ok(output.status.success())
}

/// Full SHA of HEAD
pub fn head_sha(repo: &Path) -> Result<String> {
    run_git(repo, ["rev-parse", "HEAD"])
}

/// Number of commits reachable from HEAD
pub fn commit_count(repo: &Path) -> Result<usize> {
    let count = run_git(repo, ["rev-list", "--count", "HEAD"])?;
    count.parse().context("Failed to parse commit count")
}

/// Subject and body of the last commit
pub fn last_commit_message(repo: &Path) -> Result<String> {
    run_git(repo, ["log", "-1", "--format=%B"])
}

/// Files recorded in the index
pub fn tracked_files(repo: &Path) -> Result<Vec<String>> {
    let listing = run_git(repo, ["ls-files"])?;
    Ok(listing.lines().map(str::to_string).collect())
}

/// Files changed by the last commit
pub fn files_in_head(repo: &Path) -> Result<Vec<String>> {
    let listing = run_git(
        repo,
        ["show", "--pretty=format:", "--name-only", "--no-renames", "HEAD"],
    )?;
    Ok(listing
        .lines()
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect())
}
