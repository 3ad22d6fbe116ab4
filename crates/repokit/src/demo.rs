//! Scenarios driven by the `repokit` binary.
//!
//! Each scenario returns a serializable summary so the CLI can print it in
//! either output format and tests can assert on it directly.

use std::cell::Cell;

use repokit_core::retry::{RetryConfig, RetryPolicy};
use repokit_core::{Repository, RepositoryExt, UnitOfWork};
use serde::Serialize;

use crate::config::RepositoryConfig;
use crate::models::{AuditEvent, Product, User};
use crate::storage::{CachedRepository, InMemoryRepository, RepositoryFactory};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CacheSummary {
    pub size: usize,
    pub max_size: usize,
    pub valid: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DemoSummary {
    pub users: usize,
    pub active_users: usize,
    pub products: usize,
    pub products_in_stock: usize,
    /// Operations dropped by the unit of work that was never committed.
    pub rolled_back: usize,
    pub product_cache: CacheSummary,
    pub audit_events: usize,
    pub last_product_operation: String,
}

/// Seeds users and products, batches changes through units of work and
/// warms a product cache.
pub fn run_demo(config: &RepositoryConfig) -> anyhow::Result<DemoSummary> {
    let audit = InMemoryRepository::<AuditEvent>::new();

    let users = RepositoryFactory::from_config::<User>(config)?;
    for (name, email) in [
        ("Ada", "ada@example.com"),
        ("Grace", "grace@example.com"),
        ("Linus", "linus@example.com"),
    ] {
        let user = users.add(User::new(name, email))?;
        tracing::info!(user_id = user.id, name, "User created");
    }
    audit.add(AuditEvent::new("users seeded"))?;

    if let Some(mut linus) = users.find_first(|u| u.name == "Linus") {
        linus.active = false;
        users.update(&linus);
    }

    let products = InMemoryRepository::<Product>::new();
    {
        let mut uow = UnitOfWork::new();
        uow.register_add(&products, Product::new("Lamp", 2_500, 3));
        uow.register_add(&products, Product::new("Desk", 18_000, 1));
        uow.register_add(&products, Product::new("Chair", 7_500, 0));
        uow.register_add(&products, Product::new("Shelf", 9_900, 2));
        uow.commit()?;
    }
    audit.add(AuditEvent::new("catalog created"))?;

    {
        let mut uow = UnitOfWork::new();
        if let Some(mut desk) = products.find_first(|p| p.name == "Desk") {
            desk.stock = 0;
            uow.register_update(&products, desk);
        }
        if let Some(shelf) = products.find_first(|p| p.name == "Shelf") {
            uow.register_remove(&products, shelf.id);
        }
        uow.commit()?;
    }
    audit.add(AuditEvent::new("catalog adjusted"))?;

    let rolled_back = {
        let mut uow = UnitOfWork::new();
        uow.register_add(&products, Product::new("Sofa", 45_000, 1));
        uow.register_remove(&products, 1);
        // Dropped without commit.
        uow.operation_count()
    };

    let cached = CachedRepository::new(&products, config.max_cache_size);
    cached.warm_cache();
    for product in cached.find_if(|p| p.in_stock()) {
        cached.get_by_id(product.id);
    }
    let product_cache = CacheSummary {
        size: cached.cache_size(),
        max_size: cached.max_cache_size(),
        valid: cached.is_cache_valid(),
    };
    audit.add(AuditEvent::new("cache warmed"))?;

    Ok(DemoSummary {
        users: users.count(),
        active_users: users.find_if(|u| u.active).len(),
        products: products.count(),
        products_in_stock: products.find_if(|p| p.in_stock()).len(),
        rolled_back,
        product_cache,
        audit_events: audit.count(),
        last_product_operation: products.last_operation(),
    })
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RetrySummary {
    pub attempts: u32,
    pub max_attempts: u32,
    pub delays_ms: Vec<u64>,
    pub value: Option<i64>,
    pub error: Option<String>,
}

/// Runs an operation that fails until attempt `succeed_on` through
/// [`RetryPolicy::execute_async`].
pub async fn run_flaky(
    config: RetryConfig,
    succeed_on: u32,
    value: i64,
) -> anyhow::Result<RetrySummary> {
    let calls = Cell::new(0u32);
    let max_attempts = config.max_attempts;
    let delays_ms: Vec<u64> = config
        .delays()
        .map(|d| d.as_millis() as u64)
        .collect();

    let mut policy = RetryPolicy::new(
        |value: i64| {
            calls.set(calls.get() + 1);
            let attempt = calls.get();
            async move {
                if attempt < succeed_on {
                    Err(format!("transient failure on attempt {attempt}"))
                } else {
                    Ok(value * 2)
                }
            }
        },
        config,
    )?;

    let outcome = policy.execute_async(value).await;
    let (value, error) = match outcome {
        Ok(doubled) => (Some(doubled), None),
        Err(err) => (None, Some(err)),
    };

    Ok(RetrySummary {
        attempts: calls.get(),
        max_attempts,
        delays_ms,
        value,
        error,
    })
}
