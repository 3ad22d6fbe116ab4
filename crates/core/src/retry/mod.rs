//! Bounded retries with exponential backoff for arbitrary fallible operations.
//!
//! The policy is independent of the repository stack: it wraps any callable
//! returning `Result` and propagates the final error unchanged once the
//! attempts are exhausted.

mod config;
mod error;
mod policy;

pub use config::RetryConfig;
pub use error::RetryConfigError;
pub use policy::{retry_policy, RetryPolicy};
