//! End-to-end runs of the paperlaunch binary in local mode.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

fn shipped_templates() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("templates")
}

fn write_settings(dir: &Path, text: &str) -> PathBuf {
    let path = dir.join("settings.toml");
    fs::write(&path, text).unwrap();
    path
}

fn paperlaunch(cwd: &Path, settings: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_paperlaunch"))
        .args(args)
        .current_dir(cwd)
        .env("PAPERLAUNCH_CONFIG", settings)
        .env("PAPERLAUNCH_TEMPLATES", shipped_templates())
        .env("GIT_AUTHOR_NAME", "Paper Launcher")
        .env("GIT_AUTHOR_EMAIL", "launcher@example.com")
        .env("GIT_COMMITTER_NAME", "Paper Launcher")
        .env("GIT_COMMITTER_EMAIL", "launcher@example.com")
        .env("GIT_CONFIG_NOSYSTEM", "1")
        .env("GIT_CONFIG_GLOBAL", "/dev/null")
        .env_remove("RUST_LOG")
        .output()
        .unwrap()
}

fn git(repo: &Path, args: &[&str]) -> String {
    let output = Command::new("git")
        .args(args)
        .current_dir(repo)
        .env("GIT_CONFIG_NOSYSTEM", "1")
        .env("GIT_CONFIG_GLOBAL", "/dev/null")
        .output()
        .unwrap();
    assert!(output.status.success(), "git {:?} failed", args);
    String::from_utf8(output.stdout).unwrap().trim().to_string()
}

#[test]
fn test_local_launch_creates_committed_project() {
    let work = TempDir::new().unwrap();
    let settings = write_settings(
        work.path(),
        "[template]\nauthor = \"A. Person\"\naffiliation = \"Dept. of Things\"\n",
    );

    let output = paperlaunch(work.path(), &settings, &["my-paper"]);
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let repo = work.path().join("my-paper");
    assert_eq!(git(&repo, &["rev-list", "--count", "HEAD"]), "1");
    assert_eq!(git(&repo, &["log", "-1", "--format=%s"]), "Initial setup from templates");
    assert_eq!(
        git(&repo, &["ls-files"]).lines().collect::<Vec<_>>(),
        vec!["Makefile", "README.md", "bibliography.bib", "paper.tex", "si.tex"]
    );
    assert_eq!(git(&repo, &["status", "--porcelain"]), "");

    let paper = fs::read_to_string(repo.join("paper.tex")).unwrap();
    assert!(paper.contains("\\title{my-paper}"));
    assert!(paper.contains("A. Person"));
    assert!(paper.contains("Dept. of Things"));

    let readme = fs::read_to_string(repo.join("README.md")).unwrap();
    assert!(readme.starts_with("# my-paper\n"));

    assert_eq!(
        fs::read(repo.join("Makefile")).unwrap(),
        fs::read(shipped_templates().join("Makefile")).unwrap()
    );
}

#[test]
fn test_unmatched_placeholders_survive() {
    let work = TempDir::new().unwrap();
    let settings = write_settings(work.path(), "[template]\ntitle = \"On Things\"\n");

    let output = paperlaunch(work.path(), &settings, &["draft"]);
    assert!(output.status.success());

    let paper = fs::read_to_string(work.path().join("draft").join("paper.tex")).unwrap();
    assert!(paper.contains("\\title{On Things}"));
    assert!(paper.contains("${AUTHOR}"));
}

#[test]
fn test_launch_commits_without_git_identity() {
    let work = TempDir::new().unwrap();
    let home = TempDir::new().unwrap();
    let settings = write_settings(work.path(), "");

    let output = Command::new(env!("CARGO_BIN_EXE_paperlaunch"))
        .arg("no-ident")
        .current_dir(work.path())
        .env("PAPERLAUNCH_CONFIG", &settings)
        .env("PAPERLAUNCH_TEMPLATES", shipped_templates())
        .env("HOME", home.path())
        .env("XDG_CONFIG_HOME", home.path())
        .env("GIT_CONFIG_NOSYSTEM", "1")
        .env("GIT_CONFIG_GLOBAL", "/dev/null")
        .env("LOGNAME", "paperuser")
        .env("USER", "paperuser")
        .env_remove("GIT_AUTHOR_NAME")
        .env_remove("GIT_AUTHOR_EMAIL")
        .env_remove("GIT_COMMITTER_NAME")
        .env_remove("GIT_COMMITTER_EMAIL")
        .env_remove("EMAIL")
        .env_remove("RUST_LOG")
        .output()
        .unwrap();

    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let repo = work.path().join("no-ident");
    assert_eq!(git(&repo, &["rev-list", "--count", "HEAD"]), "1");
    assert!(git(&repo, &["log", "-1", "--format=%ae"]).contains('@'));
    assert!(!git(&repo, &["log", "-1", "--format=%an"]).is_empty());
}

#[test]
fn test_missing_settings_file_fails() {
    let work = TempDir::new().unwrap();
    let missing = work.path().join("nowhere.toml");

    let output = paperlaunch(work.path(), &missing, &["my-paper"]);

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("nowhere.toml"));
    assert!(!work.path().join("my-paper").exists());
}

#[test]
fn test_existing_directory_fails() {
    let work = TempDir::new().unwrap();
    let settings = write_settings(work.path(), "");
    let existing = work.path().join("my-paper");
    fs::create_dir(&existing).unwrap();
    fs::write(existing.join("notes.txt"), "keep").unwrap();

    let output = paperlaunch(work.path(), &settings, &["my-paper"]);

    assert!(!output.status.success());
    assert!(!existing.join(".git").exists());
    assert_eq!(fs::read_to_string(existing.join("notes.txt")).unwrap(), "keep");
}

#[test]
fn test_github_without_token_fails_before_touching_disk() {
    let work = TempDir::new().unwrap();
    let settings = write_settings(work.path(), "[github]\n");

    let output = paperlaunch(work.path(), &settings, &["my-paper", "--gh"]);

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("No GitHub token"));
    assert!(!work.path().join("my-paper").exists());
}
