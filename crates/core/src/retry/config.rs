use std::time::Duration;

use super::RetryConfigError;

/// Configuration for retry behavior with exponential backoff.
///
/// The delay before retry `n` (1-based) is
/// `initial_delay * backoff_multiplier^(n - 1)`. No jitter and no cap are
/// applied, so attempt counts and delays are fully deterministic.
#[derive(Debug, Clone, PartialEq)]
pub struct RetryConfig {
    /// Total number of attempts, including the first one.
    pub max_attempts: u32,
    /// Delay before the first retry.
    pub initial_delay: Duration,
    /// Factor applied to the delay after every failed attempt.
    pub backoff_multiplier: f64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            initial_delay: Duration::from_millis(100),
            backoff_multiplier: 2.0,
        }
    }
}

impl RetryConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    pub fn with_initial_delay(mut self, delay: Duration) -> Self {
        self.initial_delay = delay;
        self
    }

    pub fn with_backoff_multiplier(mut self, multiplier: f64) -> Self {
        self.backoff_multiplier = multiplier;
        self
    }

    /// Checks that at least one attempt is allowed and the multiplier is usable.
    pub fn validate(&self) -> Result<(), RetryConfigError> {
        if self.max_attempts == 0 {
            return Err(RetryConfigError::ZeroAttempts);
        }
        if !self.backoff_multiplier.is_finite() || self.backoff_multiplier < 0.0 {
            return Err(RetryConfigError::InvalidMultiplier(self.backoff_multiplier));
        }
        Ok(())
    }

    /// Returns the delay that follows `current` after one more failure.
    pub fn next_delay(&self, current: Duration) -> Duration {
        let nanos = (current.as_nanos() as f64 * self.backoff_multiplier).round();
        // Float-to-int casts saturate, so huge products clamp to u64::MAX.
        Duration::from_nanos(nanos as u64)
    }

    /// The full backoff schedule: one delay per retry, `max_attempts - 1` in
    /// total.
    pub fn delays(&self) -> impl Iterator<Item = Duration> + '_ {
        let retries = self.max_attempts.saturating_sub(1) as usize;
        std::iter::successors(Some(self.initial_delay), move |d| {
            Some(self.next_delay(*d))
        })
        .take(retries)
    }
}
