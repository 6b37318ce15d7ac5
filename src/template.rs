//! Placeholder scanning and safe substitution.
//!
//! A placeholder is `${name}` or `$name`, where `name` is an ASCII identifier
//! (`[_A-Za-z][_A-Za-z0-9]*`). `$$` renders a literal `$`. Substitution is
//! permissive: a placeholder with no matching metadata entry, or a `$` that
//! does not start a placeholder, is copied to the output unchanged.

use indexmap::IndexSet;
use regex::{Captures, Regex};
use std::fs;
use std::path::Path;
use std::sync::LazyLock;

use crate::error::{PackagerError, Result};
use crate::metadata::PackageMetadata;

static PLACEHOLDER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"\$(?:",
        r"(?P<escaped>\$)",
        r"|(?P<named>[_A-Za-z][_A-Za-z0-9]*)",
        r"|\{(?P<braced>[_A-Za-z][_A-Za-z0-9]*)\}",
        r"|(?P<invalid>)",
        r")",
    ))
    .expect("placeholder pattern compiles")
});

/// A template document loaded into memory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    text: String,
}

impl Template {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    /// Read a whole template file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|source| PackagerError::TemplateRead {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::new(text))
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Distinct placeholder names, in order of first appearance.
    pub fn identifiers(&self) -> Vec<&str> {
        let mut seen = IndexSet::new();
        for caps in PLACEHOLDER.captures_iter(&self.text) {
            if let Some(name) = placeholder_name(&caps) {
                seen.insert(name);
            }
        }
        seen.into_iter().collect()
    }

    /// Placeholder names that `metadata` has no value for.
    pub fn unresolved(&self, metadata: &PackageMetadata) -> Vec<&str> {
        self.identifiers()
            .into_iter()
            .filter(|name| !metadata.contains_key(name))
            .collect()
    }

    /// Replace every placeholder that `metadata` covers. Never fails.
    pub fn safe_substitute(&self, metadata: &PackageMetadata) -> String {
        substitute(&self.text, metadata)
    }
}

/// Substitute placeholders in `text`, leaving unknown ones in place.
pub fn substitute(text: &str, metadata: &PackageMetadata) -> String {
    PLACEHOLDER
        .replace_all(text, |caps: &Captures| {
            if caps.name("escaped").is_some() {
                return "$".to_string();
            }
            placeholder_name(caps)
                .and_then(|name| metadata.get(name))
                .unwrap_or(&caps[0])
                .to_string()
        })
        .into_owned()
}

fn placeholder_name<'t>(caps: &Captures<'t>) -> Option<&'t str> {
    caps.name("named")
        .or_else(|| caps.name("braced"))
        .map(|m| m.as_str())
}
