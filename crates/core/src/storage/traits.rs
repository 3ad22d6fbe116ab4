use std::rc::Rc;

use crate::entity::{Entity, EntityId};

use super::Result;

/// Repository for entity CRUD and enumeration.
///
/// Every method takes `&self`. Backends are single-owner, in-process
/// collections that use single-threaded interior mutability, so they are not
/// `Sync`: callers sharing one across threads must wrap it in a mutex.
///
/// Reads hand back owned copies. The only way to change a stored entity is
/// [`Repository::update`].
pub trait Repository {
    /// The stored record type.
    type Entity: Entity;

    /// Stores a new entity and returns a copy of what was stored.
    ///
    /// Entities without an assigned identity receive the next identity from
    /// the repository's counter. A provided positive identity is kept, and the
    /// counter is moved past it.
    fn add(&self, entity: Self::Entity) -> Result<Self::Entity>;

    /// Gets an entity by its identity.
    fn get_by_id(&self, id: EntityId) -> Option<Self::Entity>;

    /// Gets all entities. Order is not guaranteed.
    fn get_all(&self) -> Vec<Self::Entity>;

    /// Replaces the stored entity that has the same identity.
    ///
    /// Returns false if the entity has no identity capability or nothing is
    /// stored under its identity.
    fn update(&self, entity: &Self::Entity) -> bool;

    /// Deletes an entity by its identity. Returns false if it was absent.
    fn remove(&self, id: EntityId) -> bool;

    /// Number of stored entities.
    fn count(&self) -> usize {
        self.get_all().len()
    }

    /// Returns true if an entity is stored under `id`.
    fn exists(&self, id: EntityId) -> bool {
        self.get_by_id(id).is_some()
    }

    /// Removes every identity-capable entity, one `remove` at a time.
    ///
    /// Backends may override this to also reset identity numbering.
    fn clear(&self) {
        for entity in self.get_all() {
            if let Some(id) = entity.id() {
                self.remove(id);
            }
        }
    }

    /// Descriptor of the last recorded operation (`"OPERATION:identifier"`).
    ///
    /// Diagnostic only. Backends that record nothing return `None`.
    fn last_operation(&self) -> Option<String> {
        None
    }
}

/// Predicate queries available on every repository, including trait objects.
pub trait RepositoryExt: Repository {
    /// Returns all entities matching `predicate`.
    fn find_if<P>(&self, mut predicate: P) -> Vec<Self::Entity>
    where
        P: FnMut(&Self::Entity) -> bool,
    {
        self.get_all()
            .into_iter()
            .filter(|entity| predicate(entity))
            .collect()
    }

    /// Returns the first entity matching `predicate`, if any.
    fn find_first<P>(&self, mut predicate: P) -> Option<Self::Entity>
    where
        P: FnMut(&Self::Entity) -> bool,
    {
        self.get_all().into_iter().find(|entity| predicate(entity))
    }
}

impl<R: Repository + ?Sized> RepositoryExt for R {}

macro_rules! forward_repository {
    ($($ty:ty),*) => {
        $(
            impl<R: Repository + ?Sized> Repository for $ty {
                type Entity = R::Entity;

                fn add(&self, entity: R::Entity) -> Result<R::Entity> {
                    (**self).add(entity)
                }

                fn get_by_id(&self, id: EntityId) -> Option<R::Entity> {
                    (**self).get_by_id(id)
                }

                fn get_all(&self) -> Vec<R::Entity> {
                    (**self).get_all()
                }

                fn update(&self, entity: &R::Entity) -> bool {
                    (**self).update(entity)
                }

                fn remove(&self, id: EntityId) -> bool {
                    (**self).remove(id)
                }

                fn count(&self) -> usize {
                    (**self).count()
                }

                fn exists(&self, id: EntityId) -> bool {
                    (**self).exists(id)
                }

                fn clear(&self) {
                    (**self).clear()
                }

                fn last_operation(&self) -> Option<String> {
                    (**self).last_operation()
                }
            }
        )*
    };
}

forward_repository!(&R, Box<R>, Rc<R>);
