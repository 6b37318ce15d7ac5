use config::{Config as ConfigBuilder, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing_subscriber::EnvFilter;

use crate::error::{PackagerError, Result};

/// File picked up from the working directory when no `--config` is given.
pub const DEFAULT_CONFIG_FILE: &str = "brew_packager.toml";

/// Prefix for environment overrides, e.g. `BREW_PACKAGER_LOGGING_LEVEL`.
pub const ENV_PREFIX: &str = "BREW_PACKAGER";

const LOG_FORMATS: [&str; 3] = ["pretty", "compact", "json"];

/// Diagnostics configuration. None of it affects the generated file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub logging: LoggingConfig,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default filter directive when `RUST_LOG` is unset
    pub level: String,
    pub format: String, // pretty, compact, json
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "compact".to_string(),
        }
    }
}

/// A loaded configuration, plus the error that forced a fallback, if any.
#[derive(Debug)]
pub struct LoadedConfig {
    pub config: Config,
    pub ignored: Option<PackagerError>,
}

impl Config {
    /// Load configuration with precedence, lowest first:
    /// 1. Default values
    /// 2. `explicit` file if given, else `brew_packager.toml` in the working
    ///    directory (if it exists)
    /// 3. Environment variables (BREW_PACKAGER_*)
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        Self::load_from_dir(&std::env::current_dir()?, explicit)
    }

    /// Load configuration, looking for the default file in `dir`
    pub fn load_from_dir(dir: &Path, explicit: Option<&Path>) -> Result<Self> {
        Self::build(dir, explicit, true)
    }

    /// Like [`Config::load`], but only a broken `explicit` file is an error.
    pub fn load_lenient(explicit: Option<&Path>) -> Result<LoadedConfig> {
        Self::load_lenient_from_dir(&std::env::current_dir()?, explicit)
    }

    /// Logging settings must never block a release, so a bad environment
    /// override or default file falls back instead of failing. With an
    /// explicit file the environment is dropped and the file alone is used;
    /// otherwise the defaults are used.
    pub fn load_lenient_from_dir(dir: &Path, explicit: Option<&Path>) -> Result<LoadedConfig> {
        match Self::build(dir, explicit, true) {
            Ok(config) => Ok(LoadedConfig { config, ignored: None }),
            Err(err) => {
                let config = match explicit {
                    Some(_) => Self::build(dir, explicit, false)?,
                    None => Config::default(),
                };
                Ok(LoadedConfig { config, ignored: Some(err) })
            }
        }
    }

    fn build(dir: &Path, explicit: Option<&Path>, with_env: bool) -> Result<Self> {
        let mut builder = ConfigBuilder::builder();

        match explicit {
            // An explicitly named file must exist
            Some(path) => {
                if !path.is_file() {
                    return Err(PackagerError::Configuration(format!(
                        "config file {} not found",
                        path.display()
                    )));
                }
                builder = builder.add_source(File::from(path));
            }
            None => {
                let config_file = dir.join(DEFAULT_CONFIG_FILE);
                if config_file.exists() {
                    builder = builder.add_source(File::from(config_file));
                }
            }
        }

        if with_env {
            builder = builder.add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .separator("_")
                    .try_parsing(true),
            );
        }

        let config: Config = builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if !LOG_FORMATS.contains(&self.logging.format.as_str()) {
            return Err(PackagerError::Configuration(format!(
                "unknown logging format '{}', expected one of: {}",
                self.logging.format,
                LOG_FORMATS.join(", ")
            )));
        }
        EnvFilter::try_new(&self.logging.level).map_err(|e| {
            PackagerError::Configuration(format!(
                "invalid log level '{}': {}",
                self.logging.level, e
            ))
        })?;
        Ok(())
    }

    /// Apply the `--verbose` flag
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        if verbose {
            self.logging.level = "debug".to_string();
        }
        self
    }
}
