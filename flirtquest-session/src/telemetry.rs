//! Tracing subscriber setup.

use flirtquest_core::config::GeneralConfig;
use flirtquest_core::error::{EngineError, Result};
use tracing_subscriber::EnvFilter;

/// Install a global `fmt` subscriber.
///
/// `RUST_LOG` wins over `general.log_level`. `general.log_format = "json"`
/// switches to one JSON object per line.
///
/// # Errors
/// Returns `EngineError::Config` if the level is unparseable or a global
/// subscriber is already installed.
pub fn init_tracing(config: &GeneralConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))
        .map_err(|e| {
            EngineError::Config(format!("invalid log level '{}': {e}", config.log_level))
        })?;

    let builder = tracing_subscriber::fmt().with_env_filter(filter).with_target(false);
    let installed = match config.log_format.as_str() {
        "json" => builder.json().try_init(),
        _ => builder.try_init(),
    };
    installed.map_err(|e| EngineError::Config(e.to_string()))
}
