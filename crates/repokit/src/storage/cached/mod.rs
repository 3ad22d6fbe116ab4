//! Cached repository decorator.
//!
//! This module provides a decorator that wraps any repository with a bounded
//! point-lookup cache. The decorator implements the cache-aside pattern:
//!
//! - **Reads**: Check cache first, on miss fetch from repository and populate cache
//! - **Writes**: Delegate to repository, then invalidate the whole cache
//!
//! # Example
//!
//! ```
//! use repokit::models::Product;
//! use repokit::storage::cached::CachedRepository;
//! use repokit::storage::inmemory::InMemoryRepository;
//! use repokit_core::Repository;
//!
//! let cached = CachedRepository::new(InMemoryRepository::new(), 100);
//! cached.add(Product::new("Lamp", 2_500, 3)).unwrap();
//! cached.warm_cache();
//!
//! assert!(cached.is_cache_valid());
//! assert_eq!(cached.get_by_id(1).unwrap().name, "Lamp");
//! ```

mod repository;

pub use repository::CachedRepository;
