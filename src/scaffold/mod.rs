//! Render the project files from the templates directory.
//!
//! `paper.tex`, `si.tex` and `README.md` go through placeholder substitution.
//! `Makefile` and `bibliography.bib` are copied byte-for-byte.

pub mod template;

use anyhow::{bail, Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::config::Substitutions;

pub use template::safe_substitute;

/// Files rendered with substitution
pub const TEMPLATED_FILES: [&str; 3] = ["paper.tex", "si.tex", "README.md"];

/// Files copied unchanged
pub const COPIED_FILES: [&str; 2] = ["Makefile", "bibliography.bib"];

/// Every file a launch writes, in staging order
pub const GENERATED_FILES: [&str; 5] = [
    "paper.tex",
    "si.tex",
    "README.md",
    "Makefile",
    "bibliography.bib",
];

pub struct Scaffold {
    templates_path: PathBuf,
}

impl Scaffold {
    pub fn new(templates_path: impl AsRef<Path>) -> Self {
        Self {
            templates_path: templates_path.as_ref().to_path_buf(),
        }
    }

    /// Check every template file is present before anything is created.
    pub fn verify(&self) -> Result<()> {
        let missing: Vec<&str> = GENERATED_FILES
            .iter()
            .copied()
            .filter(|name| !self.templates_path.join(name).is_file())
            .collect();

        if !missing.is_empty() {
            bail!(
                "Missing template files in {}: {}",
                self.templates_path.display(),
                missing.join(", ")
            );
        }
        Ok(())
    }

    /// Write the project files into `target` and return their paths.
    pub fn materialize(&self, target: &Path, substitutions: &Substitutions) -> Result<Vec<PathBuf>> {
        let mut written = Vec::with_capacity(GENERATED_FILES.len());

        for name in TEMPLATED_FILES {
            let source = self.templates_path.join(name);
            let text = fs::read_to_string(&source)
                .with_context(|| format!("Failed to read template {}", source.display()))?;

            let dest = target.join(name);
            fs::write(&dest, safe_substitute(&text, substitutions))
                .with_context(|| format!("Failed to write {}", dest.display()))?;
            debug!(file = name, "rendered template");
            written.push(dest);
        }

        for name in COPIED_FILES {
            let source = self.templates_path.join(name);
            let dest = target.join(name);
            fs::copy(&source, &dest).with_context(|| {
                format!("Failed to copy {} to {}", source.display(), dest.display())
            })?;
            debug!(file = name, "copied template");
            written.push(dest);
        }

        Ok(written)
    }
}
