//! Process-wide tracing setup.
//!
//! Library code only emits `tracing` events. Binaries call [`init`] once at
//! startup to decide where those events go.

use repokit_core::RepositoryError;
use thiserror::Error;
use tracing_subscriber::{
    layer::SubscriberExt, util::SubscriberInitExt, util::TryInitError, EnvFilter,
};

use crate::config::RepositoryConfig;

/// Output format of the fmt layer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum LogFormat {
    /// Human-readable lines
    #[default]
    Pretty,
    /// One JSON object per event
    Json,
}

#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("Invalid logging configuration: {0}")]
    InvalidConfig(#[from] RepositoryError),

    #[error("Tracing subscriber already initialized: {0}")]
    AlreadyInitialized(#[from] TryInitError),
}

/// Installs the global subscriber described by `config`.
///
/// `RUST_LOG` takes precedence over `config.log_level`. Does nothing when
/// logging is disabled. Fails if a global subscriber is already set.
pub fn init(config: &RepositoryConfig, format: LogFormat) -> Result<(), LoggingError> {
    config.validate()?;
    if !config.enable_logging {
        return Ok(());
    }

    let registry = tracing_subscriber::registry().with(env_filter(config));
    match format {
        LogFormat::Pretty => registry.with(tracing_subscriber::fmt::layer()).try_init()?,
        LogFormat::Json => registry
            .with(tracing_subscriber::fmt::layer().json())
            .try_init()?,
    }

    tracing::debug!(%config, ?format, "Logging initialized");
    Ok(())
}

fn env_filter(config: &RepositoryConfig) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let level = config.filter_directive();
        EnvFilter::new(format!("repokit={level},repokit_core={level}"))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_rejects_invalid_config() {
        let config = RepositoryConfig {
            log_level: "CHATTY".to_string(),
            ..Default::default()
        };

        let result = init(&config, LogFormat::Pretty);
        assert!(matches!(result, Err(LoggingError::InvalidConfig(_))));
    }

    #[test]
    fn test_init_disabled_is_noop() {
        let config = RepositoryConfig {
            enable_logging: false,
            ..Default::default()
        };

        assert!(init(&config, LogFormat::Json).is_ok());
    }

    #[test]
    fn test_second_init_fails() {
        let config = RepositoryConfig::default();

        // Only the second outcome is deterministic.
        let _ = init(&config, LogFormat::Pretty);
        let second = init(&config, LogFormat::Pretty);

        assert!(matches!(second, Err(LoggingError::AlreadyInitialized(_))));
    }
}
