//! In-memory and cached repositories built on `repokit_core`.
//!
//! The core crate defines the contracts; this crate provides the backends,
//! the factory and configuration, logging setup and the demo scenarios used
//! by the `repokit` binary.

pub mod config;
pub mod demo;
pub mod logging;
pub mod models;
pub mod storage;

pub use config::RepositoryConfig;
pub use storage::{CachedRepository, InMemoryRepository, RepositoryFactory};
