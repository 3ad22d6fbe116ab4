//! Deferred, ordered batches of repository mutations.
//!
//! A [`UnitOfWork`] borrows the repositories it writes to, so the borrow
//! checker guarantees they outlive it. Nothing runs until [`UnitOfWork::commit`];
//! dropping an uncommitted unit discards its queue.
//!
//! ```
//! use repokit_core::{Entity, EntityId, Repository, Result, UnitOfWork};
//! # use std::cell::RefCell;
//! # #[derive(Debug, Clone)]
//! # struct Item(EntityId);
//! # impl Entity for Item {
//! #     fn id(&self) -> Option<EntityId> { Some(self.0) }
//! #     fn set_id(&mut self, id: EntityId) { self.0 = id; }
//! # }
//! # #[derive(Default)]
//! # struct Items(RefCell<Vec<Item>>);
//! # impl Repository for Items {
//! #     type Entity = Item;
//! #     fn add(&self, e: Item) -> Result<Item> { self.0.borrow_mut().push(e.clone()); Ok(e) }
//! #     fn get_by_id(&self, id: EntityId) -> Option<Item> { self.0.borrow().iter().find(|i| i.0 == id).cloned() }
//! #     fn get_all(&self) -> Vec<Item> { self.0.borrow().clone() }
//! #     fn update(&self, _: &Item) -> bool { false }
//! #     fn remove(&self, id: EntityId) -> bool { self.0.borrow_mut().retain(|i| i.0 != id); true }
//! # }
//! let items = Items::default();
//! {
//!     let mut uow = UnitOfWork::new();
//!     uow.register_add(&items, Item(1));
//!     // dropped without commit: nothing happens
//! }
//! assert_eq!(items.count(), 0);
//!
//! let mut uow = UnitOfWork::new();
//! uow.register_add(&items, Item(1));
//! uow.commit()?;
//! assert_eq!(items.count(), 1);
//! # Ok::<(), repokit_core::RepositoryError>(())
//! ```

use std::fmt;

use crate::entity::EntityId;
use crate::storage::{Repository, Result};

type Operation<'a> = Box<dyn FnOnce() -> Result<()> + 'a>;

/// One logical transaction over one or more repositories.
///
/// Commit is ordered but not atomic: if an action fails, actions already
/// applied stay applied, the remaining ones are discarded, and the error is
/// returned.
pub struct UnitOfWork<'a> {
    operations: Vec<Operation<'a>>,
    committed: bool,
}

impl Default for UnitOfWork<'_> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> UnitOfWork<'a> {
    /// Creates an empty, uncommitted unit of work.
    pub fn new() -> Self {
        Self {
            operations: Vec::new(),
            committed: false,
        }
    }

    /// Queues an `add` of `entity` into `repo`.
    pub fn register_add<R>(&mut self, repo: &'a R, entity: R::Entity)
    where
        R: Repository + ?Sized,
        R::Entity: 'a,
    {
        self.operations.push(Box::new(move || repo.add(entity).map(|_| ())));
    }

    /// Queues an `update` of `entity` in `repo`.
    ///
    /// The entity is captured by value at registration time. An update that
    /// finds nothing to replace is not an error.
    pub fn register_update<R>(&mut self, repo: &'a R, entity: R::Entity)
    where
        R: Repository + ?Sized,
        R::Entity: 'a,
    {
        self.operations.push(Box::new(move || {
            if !repo.update(&entity) {
                tracing::debug!("Queued update matched no stored entity");
            }
            Ok(())
        }));
    }

    /// Queues a `remove` of `id` from `repo`.
    pub fn register_remove<R>(&mut self, repo: &'a R, id: EntityId)
    where
        R: Repository + ?Sized,
    {
        self.operations.push(Box::new(move || {
            if !repo.remove(id) {
                tracing::debug!(id, "Queued remove matched no stored entity");
            }
            Ok(())
        }));
    }

    /// Runs every queued action in insertion order.
    ///
    /// On success the unit is marked committed and the queue is empty, so a
    /// second call does nothing. On failure the error of the failing action is
    /// returned and the unit stays uncommitted.
    pub fn commit(&mut self) -> Result<()> {
        let operations = std::mem::take(&mut self.operations);
        let total = operations.len();

        for (index, operation) in operations.into_iter().enumerate() {
            if let Err(err) = operation() {
                tracing::warn!(
                    failed_at = index,
                    total,
                    error = %err,
                    "Unit of work commit aborted; remaining actions discarded"
                );
                return Err(err);
            }
        }

        self.committed = true;
        tracing::debug!(total, "Unit of work committed");
        Ok(())
    }

    /// Discards every queued action without running it.
    pub fn rollback(&mut self) {
        self.operations.clear();
        self.committed = false;
    }

    /// Number of queued actions.
    pub fn operation_count(&self) -> usize {
        self.operations.len()
    }

    pub fn is_committed(&self) -> bool {
        self.committed
    }
}

impl Drop for UnitOfWork<'_> {
    fn drop(&mut self) {
        if !self.committed {
            if !self.operations.is_empty() {
                tracing::debug!(
                    discarded = self.operations.len(),
                    "Unit of work dropped without commit; rolling back"
                );
            }
            self.rollback();
        }
    }
}

impl fmt::Debug for UnitOfWork<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UnitOfWork")
            .field("operations", &self.operations.len())
            .field("committed", &self.committed)
            .finish()
    }
}
