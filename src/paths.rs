//! Where paperlaunch looks for its settings file and templates.
//!
//! This module defines WHERE data lives. It has no I/O beyond existence
//! checks and no business logic.
//!
//! # Lookup order
//!
//! ```text
//! settings:  $PAPERLAUNCH_CONFIG
//!            <exe dir>/settings.toml
//!            <user config dir>/paperlaunch/settings.toml
//!
//! templates: $PAPERLAUNCH_TEMPLATES
//!            <exe dir>/templates/
//!            <user config dir>/paperlaunch/templates/
//! ```
//!
//! The first existing candidate wins. When nothing exists the
//! executable-adjacent path is returned so the load error names it.

use anyhow::{Context, Result};
use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Environment variable overriding the settings file location
pub const CONFIG_ENV: &str = "PAPERLAUNCH_CONFIG";

/// Environment variable overriding the templates directory
pub const TEMPLATES_ENV: &str = "PAPERLAUNCH_TEMPLATES";

/// Settings file name
pub const SETTINGS_FILE: &str = "settings.toml";

/// Templates directory name
pub const TEMPLATES_DIR: &str = "templates";

/// Directory containing the running executable
pub fn install_dir() -> Result<PathBuf> {
    let exe = std::env::current_exe().context("Failed to locate the paperlaunch executable")?;
    let exe = exe.canonicalize().unwrap_or(exe);
    exe.parent()
        .map(Path::to_path_buf)
        .context("Executable path has no parent directory")
}

/// Per-user config directory: `<config dir>/paperlaunch/`
pub fn user_config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("paperlaunch"))
}

/// Settings file to load
pub fn settings_file() -> Result<PathBuf> {
    let install = install_dir()?;
    let mut candidates = vec![install.join(SETTINGS_FILE)];
    if let Some(user) = user_config_dir() {
        candidates.push(user.join(SETTINGS_FILE));
    }
    Ok(resolve(std::env::var_os(CONFIG_ENV), candidates))
}

/// Directory holding the template files
pub fn templates_dir() -> Result<PathBuf> {
    let install = install_dir()?;
    let mut candidates = vec![install.join(TEMPLATES_DIR)];
    if let Some(user) = user_config_dir() {
        candidates.push(user.join(TEMPLATES_DIR));
    }
    Ok(resolve(std::env::var_os(TEMPLATES_ENV), candidates))
}

/// Pick the override if set, else the first existing candidate, else the first candidate.
fn resolve(override_path: Option<OsString>, candidates: Vec<PathBuf>) -> PathBuf {
    if let Some(path) = override_path.filter(|p| !p.is_empty()) {
        return PathBuf::from(path);
    }

    candidates
        .iter()
        .find(|candidate| candidate.exists())
        .or_else(|| candidates.first())
        .cloned()
        .unwrap_or_else(|| PathBuf::from(SETTINGS_FILE))
}
