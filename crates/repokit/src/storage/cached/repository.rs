//! Cached repository decorator.
//!
//! Wraps a `Repository` implementation with a bounded cache-aside read path
//! and whole-cache invalidation on every write.

use std::cell::RefCell;
use std::fmt;

use repokit_core::cache::{EntityCache, DEFAULT_MAX_CACHE_SIZE};
use repokit_core::{Entity, EntityId, Repository, Result};

/// Cached repository decorator.
///
/// Implements the cache-aside pattern:
/// - **Reads** (`get_by_id`): served from the cache only while it is valid;
///   otherwise fetched from the wrapped repository, and a copy is cached if
///   there is room. Opportunistic fills never set the validity flag; only
///   [`CachedRepository::warm_cache`] does.
/// - **Writes** (`add`, `update`, `remove`): delegated, then the entire cache
///   is cleared and marked invalid, whatever the outcome.
/// - **Enumeration** (`get_all`): always delegated, never cached.
///
/// Invalidation is deliberately coarse: a single-entity write drops every
/// cached entry.
///
/// # Type Parameters
///
/// * `R` - The underlying repository implementation, exclusively owned
pub struct CachedRepository<R: Repository> {
    repository: R,
    cache: RefCell<EntityCache<R::Entity>>,
}

impl<R: Repository> CachedRepository<R> {
    /// Creates a new cached repository holding at most `max_cache_size`
    /// entries.
    ///
    /// A size of `0` is allowed and disables caching entirely.
    pub fn new(repository: R, max_cache_size: usize) -> Self {
        Self {
            repository,
            cache: RefCell::new(EntityCache::new(max_cache_size)),
        }
    }

    /// Creates a cached repository with the default cache size.
    pub fn with_default_size(repository: R) -> Self {
        Self::new(repository, DEFAULT_MAX_CACHE_SIZE)
    }

    /// Refills the cache from the wrapped repository and marks it valid.
    ///
    /// At most `max_cache_size` entities are copied. Entities without an
    /// identity are skipped.
    pub fn warm_cache(&self) {
        let all = self.repository.get_all();
        let mut cache = self.cache.borrow_mut();
        cache.invalidate();

        for entity in all {
            if cache.is_full() {
                break;
            }
            if let Some(id) = entity.id() {
                cache.insert(id, entity);
            }
        }

        cache.mark_valid();
        tracing::debug!(cached = cache.len(), max = cache.max_size(), "Cache warmed");
    }

    /// Empties the cache and marks it invalid. The wrapped repository is
    /// untouched.
    pub fn clear_cache(&self) {
        self.cache.borrow_mut().invalidate();
    }

    pub fn cache_size(&self) -> usize {
        self.cache.borrow().len()
    }

    pub fn max_cache_size(&self) -> usize {
        self.cache.borrow().max_size()
    }

    pub fn is_cache_valid(&self) -> bool {
        self.cache.borrow().is_valid()
    }

    /// Borrows the wrapped repository.
    pub fn inner(&self) -> &R {
        &self.repository
    }

    /// Unwraps the decorator, discarding the cache.
    pub fn into_inner(self) -> R {
        self.repository
    }

    fn invalidate(&self, operation: &'static str) {
        let mut cache = self.cache.borrow_mut();
        if !cache.is_empty() || cache.is_valid() {
            tracing::debug!(operation, dropped = cache.len(), "Cache invalidated");
        }
        cache.invalidate();
    }
}

impl<R: Repository> Repository for CachedRepository<R> {
    type Entity = R::Entity;

    fn add(&self, entity: R::Entity) -> Result<R::Entity> {
        let result = self.repository.add(entity);
        self.invalidate("add");
        result
    }

    fn get_by_id(&self, id: EntityId) -> Option<R::Entity> {
        // Check cache first
        if let Some(entity) = self.cache.borrow().get(id) {
            tracing::trace!(id, "Cache hit");
            return Some(entity.clone());
        }

        // Cache miss - fetch from repository
        tracing::trace!(id, "Cache miss");
        let entity = self.repository.get_by_id(id)?;

        // Populate cache if there is room
        self.cache.borrow_mut().insert(id, entity.clone());

        Some(entity)
    }

    fn get_all(&self) -> Vec<R::Entity> {
        self.repository.get_all()
    }

    fn update(&self, entity: &R::Entity) -> bool {
        let updated = self.repository.update(entity);
        self.invalidate("update");
        updated
    }

    fn remove(&self, id: EntityId) -> bool {
        let removed = self.repository.remove(id);
        self.invalidate("remove");
        removed
    }

    fn last_operation(&self) -> Option<String> {
        self.repository.last_operation()
    }
}

impl<R: Repository + fmt::Debug> fmt::Debug for CachedRepository<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cache = self.cache.borrow();
        f.debug_struct("CachedRepository")
            .field("repository", &self.repository)
            .field("cache_size", &cache.len())
            .field("max_cache_size", &cache.max_size())
            .field("cache_valid", &cache.is_valid())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    use repokit_core::RepositoryExt;

    use crate::models::{AuditEvent, Product};
    use crate::storage::inmemory::InMemoryRepository;

    // Mock repository that tracks point lookups
    struct MockProductRepository {
        inner: InMemoryRepository<Product>,
        get_by_id_calls: Cell<usize>,
    }

    impl MockProductRepository {
        fn new() -> Self {
            Self {
                inner: InMemoryRepository::new(),
                get_by_id_calls: Cell::new(0),
            }
        }

        fn seeded(count: usize) -> Self {
            let repo = Self::new();
            for i in 0..count {
                repo.inner
                    .add(Product::new(&format!("product-{i}"), 100 * i as i64, 1))
                    .unwrap();
            }
            repo
        }
    }

    impl Repository for MockProductRepository {
        type Entity = Product;

        fn add(&self, entity: Product) -> Result<Product> {
            self.inner.add(entity)
        }

        fn get_by_id(&self, id: EntityId) -> Option<Product> {
            self.get_by_id_calls.set(self.get_by_id_calls.get() + 1);
            self.inner.get_by_id(id)
        }

        fn get_all(&self) -> Vec<Product> {
            self.inner.get_all()
        }

        fn update(&self, entity: &Product) -> bool {
            self.inner.update(entity)
        }

        fn remove(&self, id: EntityId) -> bool {
            self.inner.remove(id)
        }
    }

    fn calls(cached: &CachedRepository<MockProductRepository>) -> usize {
        cached.inner().get_by_id_calls.get()
    }

    // ==================== Read Path Tests ====================

    #[test]
    fn test_get_by_id_hits_cache_when_valid() {
        let cached = CachedRepository::new(MockProductRepository::seeded(3), 10);
        cached.warm_cache();

        let product = cached.get_by_id(2).unwrap();

        assert_eq!(product.name, "product-1");
        assert_eq!(calls(&cached), 0);
    }

    #[test]
    fn test_miss_populates_but_does_not_validate() {
        let cached = CachedRepository::new(MockProductRepository::seeded(3), 10);

        cached.get_by_id(1).unwrap();
        assert_eq!(cached.cache_size(), 1);
        assert!(!cached.is_cache_valid());

        // Still invalid, so the populated entry is not trusted.
        cached.get_by_id(1).unwrap();
        assert_eq!(calls(&cached), 2);
    }

    #[test]
    fn test_miss_for_absent_id_caches_nothing() {
        let cached = CachedRepository::new(MockProductRepository::seeded(1), 10);

        assert!(cached.get_by_id(99).is_none());
        assert_eq!(cached.cache_size(), 0);
    }

    #[test]
    fn test_opportunistic_fill_respects_capacity() {
        let cached = CachedRepository::new(MockProductRepository::seeded(5), 2);

        for id in 1..=5 {
            cached.get_by_id(id).unwrap();
        }

        assert_eq!(cached.cache_size(), 2);
    }

    #[test]
    fn test_valid_cache_miss_falls_through_and_fills() {
        let cached = CachedRepository::new(MockProductRepository::seeded(3), 2);
        cached.warm_cache();
        assert_eq!(cached.cache_size(), 2);

        // Id 3 did not fit during warming.
        assert_eq!(cached.get_by_id(3).unwrap().name, "product-2");
        assert_eq!(calls(&cached), 1);
        assert_eq!(cached.cache_size(), 2);
    }

    #[test]
    fn test_get_all_is_never_cached() {
        let cached = CachedRepository::new(MockProductRepository::seeded(3), 10);
        cached.warm_cache();
        cached.inner().inner.add(Product::new("direct", 1, 1)).unwrap();

        assert_eq!(cached.get_all().len(), 4);
        assert_eq!(cached.count(), 4);
    }

    // ==================== Invalidation Tests ====================

    #[test]
    fn test_update_invalidates_and_reads_fresh_data() {
        let cached = CachedRepository::new(MockProductRepository::seeded(2), 10);
        cached.warm_cache();
        let mut product = cached.get_by_id(1).unwrap();

        product.price_cents = 9_999;
        assert!(cached.update(&product));

        assert!(!cached.is_cache_valid());
        assert_eq!(cached.cache_size(), 0);
        assert_eq!(cached.get_by_id(1).unwrap().price_cents, 9_999);
    }

    #[test]
    fn test_remove_invalidates() {
        let cached = CachedRepository::new(MockProductRepository::seeded(2), 10);
        cached.warm_cache();

        assert!(cached.remove(1));

        assert!(!cached.is_cache_valid());
        assert!(cached.get_by_id(1).is_none());
        assert!(!cached.exists(1));
    }

    #[test]
    fn test_add_invalidates_whole_cache() {
        let cached = CachedRepository::new(MockProductRepository::seeded(3), 10);
        cached.warm_cache();
        assert_eq!(cached.cache_size(), 3);

        let added = cached.add(Product::new("new", 500, 2)).unwrap();

        assert_eq!(added.id, 4);
        assert_eq!(cached.cache_size(), 0);
        assert!(!cached.is_cache_valid());
    }

    #[test]
    fn test_failed_write_still_invalidates() {
        let cached = CachedRepository::new(MockProductRepository::seeded(2), 10);
        cached.warm_cache();

        let mut ghost = Product::new("ghost", 0, 0);
        ghost.id = 77;
        assert!(!cached.update(&ghost));
        assert!(!cached.remove(77));

        assert!(!cached.is_cache_valid());
        assert_eq!(cached.cache_size(), 0);
    }

    // ==================== Cache Management Tests ====================

    #[test]
    fn test_warm_cache_is_bounded() {
        let cached = CachedRepository::new(MockProductRepository::seeded(10), 4);
        cached.warm_cache();

        assert_eq!(cached.cache_size(), 4);
        assert_eq!(cached.max_cache_size(), 4);
        assert!(cached.is_cache_valid());
    }

    #[test]
    fn test_warm_cache_skips_entities_without_identity() {
        let cached = CachedRepository::new(InMemoryRepository::new(), 10);
        cached.add(AuditEvent::new("login")).unwrap();
        cached.add(AuditEvent::new("logout")).unwrap();

        cached.warm_cache();

        assert_eq!(cached.cache_size(), 0);
        assert!(cached.is_cache_valid());
        // Point lookups still reach the wrapped repository.
        assert_eq!(cached.get_by_id(1).unwrap().message, "login");
    }

    #[test]
    fn test_clear_cache_leaves_repository_untouched() {
        let cached = CachedRepository::new(MockProductRepository::seeded(3), 10);
        cached.warm_cache();

        cached.clear_cache();

        assert_eq!(cached.cache_size(), 0);
        assert!(!cached.is_cache_valid());
        assert_eq!(cached.count(), 3);
    }

    #[test]
    fn test_zero_size_cache_never_stores() {
        let cached = CachedRepository::new(MockProductRepository::seeded(3), 0);
        cached.warm_cache();
        cached.get_by_id(1);

        assert_eq!(cached.cache_size(), 0);
        assert_eq!(calls(&cached), 1);
    }

    #[test]
    fn test_default_size() {
        let cached = CachedRepository::with_default_size(InMemoryRepository::<Product>::new());
        assert_eq!(cached.max_cache_size(), DEFAULT_MAX_CACHE_SIZE);
    }

    // ==================== Delegation Tests ====================

    #[test]
    fn test_default_clear_removes_through_decorator() {
        let cached = CachedRepository::new(InMemoryRepository::new(), 10);
        for name in ["a", "b", "c"] {
            cached.add(Product::new(name, 1, 1)).unwrap();
        }
        cached.warm_cache();

        cached.clear();

        assert_eq!(cached.count(), 0);
        assert!(!cached.is_cache_valid());
        // The generic clear removes one by one, so numbering continues.
        assert_eq!(cached.inner().next_id(), 4);
    }

    #[test]
    fn test_last_operation_delegates() {
        let cached = CachedRepository::new(InMemoryRepository::new(), 10);
        cached.add(Product::new("Lamp", 2_500, 3)).unwrap();

        assert_eq!(cached.last_operation(), Some("ADD:1".to_string()));
    }

    #[test]
    fn test_find_first_through_decorator() {
        let cached = CachedRepository::new(MockProductRepository::seeded(3), 10);
        let found = cached.find_first(|p| p.price_cents == 200).unwrap();
        assert_eq!(found.id, 3);
    }

    #[test]
    fn test_into_inner() {
        let cached = CachedRepository::new(InMemoryRepository::new(), 10);
        cached.add(Product::new("Lamp", 2_500, 3)).unwrap();

        let inner = cached.into_inner();
        assert_eq!(inner.count(), 1);
    }
}
