//! Construction of boxed repositories.

use repokit_core::{Entity, Repository, Result};

use super::{CachedRepository, InMemoryRepository};
use crate::config::RepositoryConfig;

/// A type-erased repository, exclusively owned by the caller.
pub type BoxedRepository<E> = Box<dyn Repository<Entity = E>>;

/// Builds repositories behind the common contract.
///
/// Callers receive a [`BoxedRepository`] and can swap backends without
/// touching the code that uses them.
pub struct RepositoryFactory;

impl RepositoryFactory {
    /// An empty in-memory repository.
    pub fn in_memory<E: Entity + 'static>() -> BoxedRepository<E> {
        Box::new(InMemoryRepository::<E>::new())
    }

    /// Wraps `inner` in a cache of at most `max_cache_size` entries.
    pub fn cached<E: Entity + 'static>(
        inner: BoxedRepository<E>,
        max_cache_size: usize,
    ) -> BoxedRepository<E> {
        Box::new(CachedRepository::new(inner, max_cache_size))
    }

    /// An in-memory repository behind a cache.
    pub fn cached_in_memory<E: Entity + 'static>(max_cache_size: usize) -> BoxedRepository<E> {
        Self::cached(Self::in_memory(), max_cache_size)
    }

    /// Builds the repository described by `config`, after validating it.
    pub fn from_config<E: Entity + 'static>(
        config: &RepositoryConfig,
    ) -> Result<BoxedRepository<E>> {
        config.validate()?;

        let repository = if config.enable_caching {
            Self::cached_in_memory(config.max_cache_size)
        } else {
            Self::in_memory()
        };

        tracing::debug!(
            caching = config.enable_caching,
            max_cache_size = config.max_cache_size,
            "Repository created"
        );
        Ok(repository)
    }
}
