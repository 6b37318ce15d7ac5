//! Test helpers for hermetic filesystem tests
//!
//! ```rust,ignore
//! let workspace = TestWorkspace::new()?;
//! let template = workspace.add_template("formula.rb.in", "sha256 \"${checksum}\"")?;
//! let output = workspace.path("formula.rb");
//! ```

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use crate::Result;

/// A temporary directory that holds templates and generated formulae.
///
/// Removed when dropped.
pub struct TestWorkspace {
    temp_dir: TempDir,
}

impl TestWorkspace {
    pub fn new() -> Result<Self> {
        Ok(Self {
            temp_dir: TempDir::new()?,
        })
    }

    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Absolute path for `relative` inside the workspace. Nothing is created.
    pub fn path(&self, relative: impl AsRef<Path>) -> PathBuf {
        self.root().join(relative)
    }

    /// Write a file (creating parent directories) and return its path
    pub fn add_template(&self, relative: impl AsRef<Path>, content: &str) -> Result<PathBuf> {
        let path = self.path(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, content)?;
        Ok(path)
    }

    pub fn read(&self, relative: impl AsRef<Path>) -> Result<String> {
        Ok(fs::read_to_string(self.path(relative))?)
    }
}
