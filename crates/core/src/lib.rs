//! Core contracts for the repokit data-access layer.
//!
//! This crate has no I/O: it defines the entity capability, the repository
//! contract, the bounded entity cache, the unit of work and the retry policy.
//! Concrete backends live in the `repokit` crate.

pub mod cache;
pub mod entity;
pub mod retry;
pub mod storage;
pub mod unit_of_work;

pub use entity::{Entity, EntityId};
pub use storage::{Repository, RepositoryError, RepositoryExt, Result};
pub use unit_of_work::UnitOfWork;
