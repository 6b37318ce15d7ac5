use indexmap::IndexMap;

use crate::version::normalize_version;

pub const VERSION_KEY: &str = "version";
pub const SHORT_VERSION_KEY: &str = "short_version";
pub const CHECKSUM_KEY: &str = "checksum";

/// Placeholder values for a single formula render.
///
/// Entries keep insertion order so the CI echo lists them the way they were
/// added. Re-inserting a key replaces the value in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PackageMetadata {
    entries: IndexMap<String, String>,
}

impl PackageMetadata {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the standard `version`, `short_version`, `checksum` mapping for
    /// a release tag.
    pub fn for_release(release_version: &str, checksum: &str) -> Self {
        Self::new()
            .with(VERSION_KEY, release_version)
            .with(SHORT_VERSION_KEY, normalize_version(release_version))
            .with(CHECKSUM_KEY, checksum)
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.entries.insert(key.into(), value.into())
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for PackageMetadata
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut metadata = Self::new();
        for (key, value) in iter {
            metadata.insert(key, value);
        }
        metadata
    }
}
