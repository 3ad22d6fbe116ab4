use thiserror::Error;

/// Errors raised when a retry configuration is invalid.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum RetryConfigError {
    #[error("max_attempts must be at least 1")]
    ZeroAttempts,
    #[error("backoff_multiplier must be finite and non-negative, got {0}")]
    InvalidMultiplier(f64),
}
