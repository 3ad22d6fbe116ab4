//! Bounded point-lookup cache for entity copies.
//!
//! The cache never evicts. Once `max_size` entries are held, new keys are
//! refused until the cache is invalidated. Entries are trusted for lookups
//! only while the validity flag is set.

use std::collections::HashMap;

use crate::entity::EntityId;

/// Default capacity used by cached repositories.
pub const DEFAULT_MAX_CACHE_SIZE: usize = 100;

/// A bounded `id -> entity` map plus a validity flag.
#[derive(Debug, Clone)]
pub struct EntityCache<E> {
    entries: HashMap<EntityId, E>,
    max_size: usize,
    valid: bool,
}

impl<E> Default for EntityCache<E> {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_CACHE_SIZE)
    }
}

impl<E> EntityCache<E> {
    /// Creates an empty, invalid cache holding at most `max_size` entries.
    pub fn new(max_size: usize) -> Self {
        Self {
            entries: HashMap::new(),
            max_size,
            valid: false,
        }
    }

    /// Returns the cached entry, but only while the cache is valid.
    pub fn get(&self, id: EntityId) -> Option<&E> {
        if self.valid {
            self.entries.get(&id)
        } else {
            None
        }
    }

    /// Returns the cached entry regardless of validity.
    pub fn peek(&self, id: EntityId) -> Option<&E> {
        self.entries.get(&id)
    }

    /// Stores `entity` under `id` if there is room.
    ///
    /// Returns false when the cache is full. Insertion does not change the
    /// validity flag.
    pub fn insert(&mut self, id: EntityId, entity: E) -> bool {
        if self.entries.len() >= self.max_size {
            return false;
        }
        self.entries.insert(id, entity);
        true
    }

    /// Empties the cache and marks it invalid.
    pub fn invalidate(&mut self) {
        self.entries.clear();
        self.valid = false;
    }

    /// Marks the current contents as trustworthy for lookups.
    pub fn mark_valid(&mut self) {
        self.valid = true;
    }

    pub fn is_valid(&self) -> bool {
        self.valid
    }

    pub fn is_full(&self) -> bool {
        self.entries.len() >= self.max_size
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn max_size(&self) -> usize {
        self.max_size
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_cache_is_empty_and_invalid() {
        let cache: EntityCache<String> = EntityCache::new(4);
        assert!(cache.is_empty());
        assert!(!cache.is_valid());
        assert_eq!(cache.max_size(), 4);
    }

    #[test]
    fn test_default_capacity() {
        let cache: EntityCache<String> = EntityCache::default();
        assert_eq!(cache.max_size(), DEFAULT_MAX_CACHE_SIZE);
    }

    #[test]
    fn test_get_requires_validity() {
        let mut cache = EntityCache::new(4);
        assert!(cache.insert(1, "one".to_string()));

        assert_eq!(cache.get(1), None);
        assert_eq!(cache.peek(1).map(String::as_str), Some("one"));

        cache.mark_valid();
        assert_eq!(cache.get(1).map(String::as_str), Some("one"));
    }

    #[test]
    fn test_insert_refuses_when_full() {
        let mut cache = EntityCache::new(2);
        assert!(cache.insert(1, "one"));
        assert!(cache.insert(2, "two"));
        assert!(cache.is_full());

        assert!(!cache.insert(3, "three"));
        assert_eq!(cache.len(), 2);
        assert_eq!(cache.peek(3), None);
    }

    #[test]
    fn test_zero_capacity_never_stores() {
        let mut cache = EntityCache::new(0);
        assert!(!cache.insert(1, "one"));
        assert!(cache.is_empty());
    }

    #[test]
    fn test_insert_overwrites_existing_key_when_room() {
        let mut cache = EntityCache::new(2);
        cache.insert(1, "old");
        assert!(cache.insert(1, "new"));
        assert_eq!(cache.peek(1), Some(&"new"));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_invalidate_clears_and_resets_flag() {
        let mut cache = EntityCache::new(2);
        cache.insert(1, "one");
        cache.mark_valid();

        cache.invalidate();

        assert!(cache.is_empty());
        assert!(!cache.is_valid());
    }
}
