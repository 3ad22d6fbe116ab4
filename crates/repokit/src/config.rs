use std::{env, fmt};

use repokit_core::{RepositoryError, Result};

/// Log levels accepted by [`RepositoryConfig::log_level`], compared
/// case-insensitively.
const LOG_LEVELS: [&str; 5] = ["TRACE", "DEBUG", "INFO", "WARN", "ERROR"];

/// Repository configuration loaded from environment variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryConfig {
    /// Wrap repositories in a cache (default: false)
    pub enable_caching: bool,
    /// Maximum number of cached entities (default: 100)
    pub max_cache_size: usize,
    /// Install a tracing subscriber at startup (default: true)
    pub enable_logging: bool,
    /// Minimum level emitted when `RUST_LOG` is unset (default: "INFO")
    pub log_level: String,
}

impl Default for RepositoryConfig {
    fn default() -> Self {
        Self {
            enable_caching: false,
            max_cache_size: 100,
            enable_logging: true,
            log_level: "INFO".to_string(),
        }
    }
}

impl RepositoryConfig {
    /// Small cache with caching enabled and verbose logging.
    pub fn test_config() -> Self {
        Self {
            enable_caching: true,
            max_cache_size: 10,
            enable_logging: true,
            log_level: "DEBUG".to_string(),
        }
    }

    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `REPOKIT_ENABLE_CACHING` - Wrap repositories in a cache (default: false)
    /// - `REPOKIT_MAX_CACHE_SIZE` - Maximum cached entities (default: 100)
    /// - `REPOKIT_ENABLE_LOGGING` - Install a subscriber (default: true)
    /// - `REPOKIT_LOG_LEVEL` - Default log level (default: "INFO")
    ///
    /// Unparsable values fall back to their defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            enable_caching: lookup("REPOKIT_ENABLE_CACHING")
                .and_then(|v| parse_bool(&v))
                .unwrap_or(defaults.enable_caching),
            max_cache_size: lookup("REPOKIT_MAX_CACHE_SIZE")
                .and_then(|v| v.trim().parse().ok())
                .unwrap_or(defaults.max_cache_size),
            enable_logging: lookup("REPOKIT_ENABLE_LOGGING")
                .and_then(|v| parse_bool(&v))
                .unwrap_or(defaults.enable_logging),
            log_level: lookup("REPOKIT_LOG_LEVEL").unwrap_or(defaults.log_level),
        }
    }

    /// Rejects a zero-sized cache when caching is enabled and unknown log
    /// levels.
    pub fn validate(&self) -> Result<()> {
        if self.enable_caching && self.max_cache_size == 0 {
            return Err(RepositoryError::InvalidArgument(
                "max_cache_size must be positive when caching is enabled".to_string(),
            ));
        }
        if !LOG_LEVELS
            .iter()
            .any(|level| level.eq_ignore_ascii_case(self.log_level.trim()))
        {
            return Err(RepositoryError::InvalidArgument(format!(
                "unknown log level '{}'",
                self.log_level
            )));
        }
        Ok(())
    }

    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }

    /// The log level as a tracing filter directive, e.g. `"info"`.
    pub fn filter_directive(&self) -> String {
        self.log_level.trim().to_ascii_lowercase()
    }
}

impl fmt::Display for RepositoryConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "RepositoryConfig{{caching={}, maxCacheSize={}, logging={}, logLevel={}}}",
            self.enable_caching, self.max_cache_size, self.enable_logging, self.log_level
        )
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
