use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, PackagerError>;

#[derive(Error, Debug)]
pub enum PackagerError {
    // Filesystem errors, kept apart so CI logs say which side failed
    #[error("failed to read template {}", .path.display())]
    TemplateRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write output {}", .path.display())]
    OutputWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // Template errors
    #[error("unresolved placeholders in template: {}", .0.join(", "))]
    UnresolvedPlaceholders(Vec<String>),

    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl From<config::ConfigError> for PackagerError {
    fn from(err: config::ConfigError) -> Self {
        PackagerError::Configuration(err.to_string())
    }
}
