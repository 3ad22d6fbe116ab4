//! In-memory repository implementation.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fmt;

use repokit_core::entity::is_assigned;
use repokit_core::{Entity, EntityId, Repository, RepositoryError, Result};

/// First identity handed out by a fresh or cleared repository.
const INITIAL_ID: EntityId = 1;

#[derive(Debug)]
struct Store<E> {
    data: BTreeMap<EntityId, E>,
    next_id: EntityId,
}

impl<E> Store<E> {
    fn allocate(&mut self) -> Result<EntityId> {
        let id = self.next_id;
        self.next_id = id.checked_add(1).ok_or_else(|| {
            RepositoryError::OperationFailed("identity space exhausted".to_string())
        })?;
        Ok(id)
    }

    /// Keeps the counter above a caller-provided identity.
    fn reserve(&mut self, id: EntityId) -> Result<()> {
        let successor = id.checked_add(1).ok_or_else(|| {
            RepositoryError::InvalidArgument(format!("identity {id} has no successor"))
        })?;
        self.next_id = self.next_id.max(successor);
        Ok(())
    }
}

/// In-memory storage backend.
///
/// Owns every stored entity and hands out copies. Uses a `RefCell`, so it is
/// `Send` but not `Sync`: share it across threads only behind a mutex.
///
/// Every successful operation records a diagnostic descriptor such as
/// `"ADD:3"` or `"GET_ALL:10"`, readable through
/// [`InMemoryRepository::last_operation`].
pub struct InMemoryRepository<E> {
    store: RefCell<Store<E>>,
    last_operation: RefCell<String>,
}

impl<E> Default for InMemoryRepository<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> InMemoryRepository<E> {
    /// Creates a new empty in-memory repository.
    pub fn new() -> Self {
        Self {
            store: RefCell::new(Store {
                data: BTreeMap::new(),
                next_id: INITIAL_ID,
            }),
            last_operation: RefCell::new(String::new()),
        }
    }

    /// Descriptor of the last recorded operation, empty if none yet.
    pub fn last_operation(&self) -> String {
        self.last_operation.borrow().clone()
    }

    /// Identities of all stored entities, in ascending order.
    pub fn all_ids(&self) -> Vec<EntityId> {
        self.store.borrow().data.keys().copied().collect()
    }

    /// The identity the next unidentified entity will receive.
    pub fn next_id(&self) -> EntityId {
        self.store.borrow().next_id
    }

    pub fn is_empty(&self) -> bool {
        self.store.borrow().data.is_empty()
    }

    fn record(&self, operation: &str, identifier: impl fmt::Display) {
        let descriptor = format!("{operation}:{identifier}");
        tracing::trace!(operation = %descriptor, "Repository operation");
        *self.last_operation.borrow_mut() = descriptor;
    }
}

impl<E: Entity> Repository for InMemoryRepository<E> {
    type Entity = E;

    fn add(&self, mut entity: E) -> Result<E> {
        let id = {
            let mut store = self.store.borrow_mut();
            let id = match entity.id() {
                Some(id) if is_assigned(id) => {
                    store.reserve(id)?;
                    id
                }
                Some(_) => {
                    let id = store.allocate()?;
                    entity.set_id(id);
                    id
                }
                // No identity capability: key it internally.
                None => store.allocate()?,
            };
            store.data.insert(id, entity.clone());
            id
        };

        self.record("ADD", id);
        Ok(entity)
    }

    fn get_by_id(&self, id: EntityId) -> Option<E> {
        let entity = self.store.borrow().data.get(&id).cloned();
        if entity.is_some() {
            self.record("GET", id);
        }
        entity
    }

    fn get_all(&self) -> Vec<E> {
        let all: Vec<E> = self.store.borrow().data.values().cloned().collect();
        self.record("GET_ALL", all.len());
        all
    }

    fn update(&self, entity: &E) -> bool {
        let Some(id) = entity.id() else {
            return false;
        };

        let replaced = match self.store.borrow_mut().data.get_mut(&id) {
            Some(slot) => {
                *slot = entity.clone();
                true
            }
            None => false,
        };

        if replaced {
            self.record("UPDATE", id);
        }
        replaced
    }

    fn remove(&self, id: EntityId) -> bool {
        let removed = self.store.borrow_mut().data.remove(&id).is_some();
        if removed {
            self.record("DELETE", id);
        }
        removed
    }

    fn count(&self) -> usize {
        self.store.borrow().data.len()
    }

    fn exists(&self, id: EntityId) -> bool {
        self.store.borrow().data.contains_key(&id)
    }

    /// Removes everything and restarts identity numbering at 1.
    fn clear(&self) {
        let cleared = {
            let mut store = self.store.borrow_mut();
            let cleared = store.data.len();
            store.data.clear();
            store.next_id = INITIAL_ID;
            cleared
        };
        self.record("CLEAR", cleared);
    }

    fn last_operation(&self) -> Option<String> {
        Some(InMemoryRepository::last_operation(self))
    }
}

impl<E> fmt::Debug for InMemoryRepository<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let store = self.store.borrow();
        f.debug_struct("InMemoryRepository")
            .field("len", &store.data.len())
            .field("next_id", &store.next_id)
            .field("last_operation", &*self.last_operation.borrow())
            .finish()
    }
}
