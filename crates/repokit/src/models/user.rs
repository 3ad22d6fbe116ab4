use chrono::{DateTime, Utc};
use repokit_core::{Entity, EntityId};
use serde::{Deserialize, Serialize};

/// A user account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// Repository identity; `0` until the user is stored.
    pub id: EntityId,
    pub name: String,
    pub email: String,
    pub active: bool,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Create a new, unsaved user.
    pub fn new(name: &str, email: &str) -> Self {
        Self {
            id: 0,
            name: name.to_string(),
            email: email.to_string(),
            active: true,
            created_at: Utc::now(),
        }
    }
}

impl Entity for User {
    fn id(&self) -> Option<EntityId> {
        Some(self.id)
    }

    fn set_id(&mut self, id: EntityId) {
        self.id = id;
    }
}
