//! Storage backend implementations.
//!
//! This module provides concrete implementations of the repository trait
//! defined in `repokit_core::storage`:
//!
//! - [`InMemoryRepository`]: owns its entities in a map and assigns identities
//! - [`CachedRepository`]: decorates any repository with a bounded read cache
//!
//! [`RepositoryFactory`] builds either one behind a boxed trait object.

pub mod cached;
mod factory;
pub mod inmemory;

pub use cached::CachedRepository;
pub use factory::{BoxedRepository, RepositoryFactory};
pub use inmemory::InMemoryRepository;
