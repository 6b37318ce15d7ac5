use std::io::IsTerminal;
use tracing_subscriber::EnvFilter;

use crate::config::LoggingConfig;
use crate::error::{PackagerError, Result};

/// Build the filter: `RUST_LOG` if set, otherwise the configured level.
pub fn build_filter(config: &LoggingConfig) -> Result<EnvFilter> {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return Ok(filter);
    }
    EnvFilter::try_new(&config.level).map_err(|e| {
        PackagerError::Configuration(format!("invalid log level '{}': {}", config.level, e))
    })
}

/// Install the global subscriber. Diagnostics go to stderr so stdout carries
/// only the CI echo. Colour is only used when stderr is a terminal.
pub fn init(config: &LoggingConfig) -> Result<()> {
    let filter = build_filter(config)?;
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .with_target(false);

    let installed = match config.format.as_str() {
        "json" => builder.json().try_init(),
        "pretty" => builder.pretty().try_init(),
        _ => builder.compact().try_init(),
    };

    installed.map_err(|e| PackagerError::Configuration(format!("failed to install logger: {}", e)))
}
