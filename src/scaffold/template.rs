//! `$`-placeholder substitution.
//!
//! Recognized forms:
//!
//! - `${KEY}` and `$KEY` where `KEY` is `[_a-zA-Z][_a-zA-Z0-9]*`
//! - `$$`, which renders as a single `$`
//!
//! Placeholders with no matching key, and any other `$`, are left as written.

use regex::{Captures, Regex};
use std::sync::LazyLock;

use crate::config::Substitutions;

static PLACEHOLDER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\$(?:(\$)|([_a-zA-Z][_a-zA-Z0-9]*)|\{([_a-zA-Z][_a-zA-Z0-9]*)\})")
        .expect("placeholder pattern is valid")
});

/// Replace known placeholders in `text`. Never fails.
pub fn safe_substitute(text: &str, substitutions: &Substitutions) -> String {
    PLACEHOLDER
        .replace_all(text, |caps: &Captures| {
            if caps.get(1).is_some() {
                return "$".to_string();
            }

            let key = caps
                .get(2)
                .or_else(|| caps.get(3))
                .map(|m| m.as_str())
                .unwrap_or_default();

            match substitutions.get(key) {
                Some(value) => value.to_string(),
                None => caps[0].to_string(),
            }
        })
        .into_owned()
}
