pub mod config;
pub mod error;

pub use config::{Config, ConfigIssue, ConfigReport, StorageConfig, Units, WeatherConfig};
pub use error::{
    AppError, ConfigError, FetchError, FetchTarget, StorageError, ValidationError,
    CITY_NOT_FOUND_MESSAGE,
};

use anyhow::Result;

/// Initialize tracing.
///
/// `RUST_LOG` wins; otherwise `default_filter` is used.
pub fn init(default_filter: &str) -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize tracing: {}", e))?;

    tracing::debug!("SkyCast core initialized");
    Ok(())
}
