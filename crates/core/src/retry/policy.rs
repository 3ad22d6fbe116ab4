use std::fmt;
use std::future::Future;
use std::time::Duration;

use super::{RetryConfig, RetryConfigError};

/// Outcome of a single attempt.
enum Attempt<T, E> {
    Succeeded(T),
    Exhausted(E),
    Retry,
}

/// Wraps a fallible operation with bounded retries and exponential backoff.
///
/// The operation receives a clone of the caller's arguments on every attempt
/// (use a tuple for several). The first success is returned immediately; the
/// error from the last allowed attempt is returned unchanged.
///
/// ```
/// use std::time::Duration;
/// use repokit_core::retry::{RetryConfig, RetryPolicy};
///
/// let mut calls = 0;
/// let config = RetryConfig::new().with_initial_delay(Duration::from_millis(1));
/// let mut policy = RetryPolicy::new(
///     |value: i32| {
///         calls += 1;
///         if calls < 2 { Err("not yet") } else { Ok(value * 2) }
///     },
///     config,
/// )
/// .unwrap();
///
/// assert_eq!(policy.execute(21), Ok(42));
/// ```
pub struct RetryPolicy<F> {
    operation: F,
    config: RetryConfig,
}

/// Creates a policy with `max_attempts` and the default delay and multiplier.
pub fn retry_policy<F>(
    operation: F,
    max_attempts: u32,
) -> Result<RetryPolicy<F>, RetryConfigError> {
    RetryPolicy::new(
        operation,
        RetryConfig::default().with_max_attempts(max_attempts),
    )
}

impl<F> RetryPolicy<F> {
    /// Creates a policy, rejecting configurations that cannot run.
    pub fn new(operation: F, config: RetryConfig) -> Result<Self, RetryConfigError> {
        config.validate()?;
        Ok(Self { operation, config })
    }

    pub fn config(&self) -> &RetryConfig {
        &self.config
    }

    /// Runs the operation, blocking the current thread between attempts.
    pub fn execute<A, T, E>(&mut self, args: A) -> Result<T, E>
    where
        F: FnMut(A) -> Result<T, E>,
        A: Clone,
        E: fmt::Display,
    {
        let mut delay = self.config.initial_delay;
        let mut attempt = 1;

        loop {
            let outcome = (self.operation)(args.clone());
            match self.settle(attempt, delay, outcome) {
                Attempt::Succeeded(value) => return Ok(value),
                Attempt::Exhausted(err) => return Err(err),
                Attempt::Retry => {
                    std::thread::sleep(delay);
                    delay = self.config.next_delay(delay);
                    attempt += 1;
                }
            }
        }
    }

    /// Runs an async operation, awaiting a tokio timer between attempts.
    ///
    /// Dropping the returned future cancels any pending wait.
    pub async fn execute_async<A, T, E, Fut>(&mut self, args: A) -> Result<T, E>
    where
        F: FnMut(A) -> Fut,
        Fut: Future<Output = Result<T, E>>,
        A: Clone,
        E: fmt::Display,
    {
        let mut delay = self.config.initial_delay;
        let mut attempt = 1;

        loop {
            let outcome = (self.operation)(args.clone()).await;
            match self.settle(attempt, delay, outcome) {
                Attempt::Succeeded(value) => return Ok(value),
                Attempt::Exhausted(err) => return Err(err),
                Attempt::Retry => {
                    tokio::time::sleep(delay).await;
                    delay = self.config.next_delay(delay);
                    attempt += 1;
                }
            }
        }
    }

    fn settle<T, E>(&self, attempt: u32, delay: Duration, outcome: Result<T, E>) -> Attempt<T, E>
    where
        E: fmt::Display,
    {
        let max_attempts = self.config.max_attempts;
        match outcome {
            Ok(value) => {
                if attempt > 1 {
                    tracing::debug!(attempt, max_attempts, "Operation succeeded after retry");
                }
                Attempt::Succeeded(value)
            }
            Err(err) if attempt >= max_attempts => {
                tracing::warn!(attempt, max_attempts, error = %err, "Retry attempts exhausted");
                Attempt::Exhausted(err)
            }
            Err(err) => {
                tracing::warn!(
                    attempt,
                    max_attempts,
                    delay_ms = delay.as_millis() as u64,
                    error = %err,
                    "Attempt failed; retrying"
                );
                Attempt::Retry
            }
        }
    }
}

impl<F> fmt::Debug for RetryPolicy<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RetryPolicy")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
