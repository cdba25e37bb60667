//! Git repository management for paperlaunch
//!
//! Handles:
//! - Creating a fresh repository or cloning a remote one
//! - Staging a fixed list of files and committing them
//! - Inspecting the result (commit count, tracked files)

mod operations;

pub use operations::{
    add_paths, clone, commit, commit_as, commit_count, fallback_identity, files_in_head,
    has_identity, head_sha, init, is_git_repo, is_vacant, last_commit_message, tracked_files,
    Identity,
};
