//! The identity capability shared by every stored record.

/// Integer identity assigned by a repository.
pub type EntityId = i64;

/// A record that can be stored in a repository.
///
/// The identity capability is opt-in. Types that keep the default methods have
/// no identity: repositories still accept them and assign an internal key, but
/// they cannot be updated or cache-warmed by identity.
///
/// Identity-capable types override both methods and return `Some(raw)` from
/// [`Entity::id`] even when the raw value is unset. A raw value `<= 0` means
/// the identity has not been assigned yet.
///
/// ```
/// use repokit_core::{Entity, EntityId};
///
/// #[derive(Debug, Clone)]
/// struct Tag {
///     id: EntityId,
///     label: String,
/// }
///
/// impl Entity for Tag {
///     fn id(&self) -> Option<EntityId> {
///         Some(self.id)
///     }
///
///     fn set_id(&mut self, id: EntityId) {
///         self.id = id;
///     }
/// }
/// ```
pub trait Entity: Clone {
    /// Returns the raw identity, or `None` when the type carries no identity.
    fn id(&self) -> Option<EntityId> {
        None
    }

    /// Stores an identity assigned by a repository.
    fn set_id(&mut self, _id: EntityId) {}
}

/// Returns true if `id` is a valid, assigned identity.
pub fn is_assigned(id: EntityId) -> bool {
    id > 0
}
