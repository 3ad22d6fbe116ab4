use repokit_core::{Entity, EntityId};
use serde::{Deserialize, Serialize};

/// A catalog product. Prices are stored in cents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: EntityId,
    pub name: String,
    pub price_cents: i64,
    pub stock: u32,
}

impl Product {
    /// Create a new, unsaved product.
    pub fn new(name: &str, price_cents: i64, stock: u32) -> Self {
        Self {
            id: 0,
            name: name.to_string(),
            price_cents,
            stock,
        }
    }

    pub fn in_stock(&self) -> bool {
        self.stock > 0
    }
}

impl Entity for Product {
    fn id(&self) -> Option<EntityId> {
        Some(self.id)
    }

    fn set_id(&mut self, id: EntityId) {
        self.id = id;
    }
}
