//! Settings file for paperlaunch.
//!
//! Loaded once at startup into a read-only [`Settings`] value that is passed
//! to each step of the launch.
//!
//! ```toml
//! [github]
//! token = "ghp_..."
//! org = "my-lab"            # optional: create under this organization
//!
//! [template]
//! title = "On Things"        # optional: defaults to the project name
//! author = "A. Person"
//! ```

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use crate::forge::github::DEFAULT_API_URL;
use crate::forge::{CloneProtocol, Owner};

/// Template key that falls back to the project name
pub const TITLE_KEY: &str = "TITLE";

/// Parsed settings file
#[derive(Debug, Clone, Default)]
pub struct Settings {
    pub github: GithubSettings,
    template: toml::Table,
    raw: toml::Table,
}

/// `[github]` section
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GithubSettings {
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub org: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub api_url: Option<String>,
    #[serde(default)]
    pub clone_protocol: CloneProtocol,
}

#[derive(Deserialize)]
struct Sections {
    #[serde(default)]
    github: GithubSettings,
    #[serde(default)]
    template: toml::Table,
}

impl Settings {
    /// Load settings from a file. Missing or malformed files are errors.
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings file {}", path.display()))?;
        Self::from_toml_str(&text)
            .with_context(|| format!("Invalid settings file {}", path.display()))
    }

    pub fn from_toml_str(text: &str) -> Result<Self> {
        let raw: toml::Table = toml::from_str(text).context("Failed to parse settings TOML")?;
        let sections: Sections = toml::from_str(text).context("Failed to parse settings sections")?;

        Ok(Self {
            github: sections.github,
            template: sections.template,
            raw,
        })
    }

    /// Value of `key` in `section`, if present and scalar.
    pub fn get(&self, section: &str, key: &str) -> Option<String> {
        self.raw
            .get(section)?
            .as_table()?
            .get(key)
            .and_then(scalar_to_string)
    }

    /// Value of `key` in `section`, or `default` if absent.
    pub fn get_or(&self, section: &str, key: &str, default: &str) -> String {
        self.get(section, key).unwrap_or_else(|| default.to_string())
    }

    /// Template variables for a project: keys upper-cased, `TITLE` defaulted
    /// to the project name.
    pub fn substitutions(&self, project_name: &str) -> Result<Substitutions> {
        let mut values = BTreeMap::new();
        for (key, value) in &self.template {
            let Some(text) = scalar_to_string(value) else {
                bail!(
                    "Template value '{}' must be a string, number or boolean, found {}",
                    key,
                    value.type_str()
                );
            };
            let upper = key.to_uppercase();
            if values.contains_key(&upper) {
                bail!(
                    "Template key '{}' duplicates another key that differs only in case ({})",
                    key,
                    upper
                );
            }
            values.insert(upper, text);
        }

        values
            .entry(TITLE_KEY.to_string())
            .or_insert_with(|| project_name.to_string());

        Ok(Substitutions(values))
    }
}

impl GithubSettings {
    /// Token for API calls; required for `--github`.
    pub fn token(&self) -> Result<&str> {
        match self.token.as_deref().map(str::trim) {
            Some(token) if !token.is_empty() => Ok(token),
            _ => bail!(
                "No GitHub token configured\n\
                 \n\
                 Add one to the settings file:\n\
                 [github]\n\
                 token = \"<token from https://github.com/settings/tokens>\""
            ),
        }
    }

    /// Organization if configured, otherwise the token's user.
    pub fn owner(&self) -> Owner {
        match self.org.as_deref().map(str::trim) {
            Some(org) if !org.is_empty() => Owner::Org(org.to_string()),
            _ => Owner::User,
        }
    }

    pub fn api_url(&self) -> &str {
        self.api_url.as_deref().unwrap_or(DEFAULT_API_URL)
    }

    /// Repository description, falling back to the document title.
    pub fn description_or<'a>(&'a self, title: &'a str) -> &'a str {
        self.description.as_deref().unwrap_or(title)
    }
}

/// Template variables handed to the materializer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Substitutions(BTreeMap<String, String>);

impl Substitutions {
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn title(&self) -> &str {
        self.get(TITLE_KEY).unwrap_or_default()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Substitutions {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

fn scalar_to_string(value: &toml::Value) -> Option<String> {
    match value {
        toml::Value::String(s) => Some(s.clone()),
        toml::Value::Integer(i) => Some(i.to_string()),
        toml::Value::Float(f) => Some(f.to_string()),
        toml::Value::Boolean(b) => Some(b.to_string()),
        toml::Value::Datetime(d) => Some(d.to_string()),
        toml::Value::Array(_) | toml::Value::Table(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const SAMPLE: &str = r#"
[github]
token = "ghp_abc"
org = "my-lab"

[template]
name = "X"
author = "Y"
year = 2026
"#;

    #[test]
    fn test_load_missing_file_fails() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("settings.toml");

        let err = Settings::load(&path).unwrap_err();
        assert!(format!("{:#}", err).contains("settings.toml"));
    }

    #[test]
    fn test_load_malformed_file_fails() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("settings.toml");
        fs::write(&path, "[github\ntoken = ").unwrap();

        assert!(Settings::load(&path).is_err());
    }

    #[test]
    fn test_load_reads_sections() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("settings.toml");
        fs::write(&path, SAMPLE).unwrap();

        let settings = Settings::load(&path).unwrap();
        assert_eq!(settings.github.token().unwrap(), "ghp_abc");
        assert_eq!(settings.github.owner(), Owner::Org("my-lab".to_string()));
        assert_eq!(settings.github.clone_protocol, CloneProtocol::Https);
        assert_eq!(settings.github.api_url(), DEFAULT_API_URL);
    }

    #[test]
    fn test_get_with_default() {
        let settings = Settings::from_toml_str(SAMPLE).unwrap();
        assert_eq!(settings.get("github", "org").as_deref(), Some("my-lab"));
        assert_eq!(settings.get("template", "year").as_deref(), Some("2026"));
        assert_eq!(settings.get("github", "missing"), None);
        assert_eq!(settings.get("nosection", "token"), None);
        assert_eq!(settings.get_or("template", "journal", "TBD"), "TBD");
    }

    #[test]
    fn test_substitutions_uppercase_keys() {
        let settings = Settings::from_toml_str(SAMPLE).unwrap();
        let subs = settings.substitutions("my-paper").unwrap();

        assert_eq!(subs.get("NAME"), Some("X"));
        assert_eq!(subs.get("AUTHOR"), Some("Y"));
        assert_eq!(subs.get("YEAR"), Some("2026"));
        assert_eq!(subs.get("name"), None);
    }

    #[test]
    fn test_title_defaults_to_project_name() {
        let settings = Settings::from_toml_str(SAMPLE).unwrap();
        let subs = settings.substitutions("my-paper").unwrap();
        assert_eq!(subs.title(), "my-paper");
    }

    #[test]
    fn test_configured_title_wins() {
        let settings = Settings::from_toml_str("[template]\ntitle = \"On Things\"\n").unwrap();
        let subs = settings.substitutions("my-paper").unwrap();
        assert_eq!(subs.title(), "On Things");
        assert_eq!(subs.get("TITLE"), Some("On Things"));
    }

    #[test]
    fn test_keys_differing_only_in_case_rejected() {
        let settings =
            Settings::from_toml_str("[template]\nAuthor = \"Upper\"\nauthor = \"lower\"\n").unwrap();
        let err = settings.substitutions("p").unwrap_err();
        assert!(err.to_string().contains("AUTHOR"));
    }

    #[test]
    fn test_empty_file_is_valid() {
        let settings = Settings::from_toml_str("").unwrap();
        let subs = settings.substitutions("p").unwrap();
        assert_eq!(subs.title(), "p");
        assert_eq!(settings.github.owner(), Owner::User);
    }

    #[test]
    fn test_missing_token_is_error() {
        let settings = Settings::from_toml_str("[github]\ntoken = \"  \"\n").unwrap();
        assert!(settings.github.token().is_err());
        assert!(Settings::default().github.token().is_err());
    }

    #[test]
    fn test_blank_org_means_user() {
        let settings = Settings::from_toml_str("[github]\norg = \"\"\n").unwrap();
        assert_eq!(settings.github.owner(), Owner::User);
    }

    #[test]
    fn test_ssh_clone_protocol() {
        let settings = Settings::from_toml_str("[github]\nclone_protocol = \"ssh\"\n").unwrap();
        assert_eq!(settings.github.clone_protocol, CloneProtocol::Ssh);
    }

    #[test]
    fn test_nested_template_value_rejected() {
        let settings = Settings::from_toml_str("[template]\nauthors = [\"a\", \"b\"]\n").unwrap();
        let err = settings.substitutions("p").unwrap_err();
        assert!(err.to_string().contains("authors"));
    }

    #[test]
    fn test_description_falls_back_to_title() {
        let settings = Settings::default();
        assert_eq!(settings.github.description_or("On Things"), "On Things");

        let settings = Settings::from_toml_str("[github]\ndescription = \"Draft\"\n").unwrap();
        assert_eq!(settings.github.description_or("On Things"), "Draft");
    }
}
