//! In-memory storage backend.
//!
//! This module provides an in-memory implementation of the repository trait
//! that stores all entities in an ordered map owned by the repository. Data
//! is not persisted and will be lost when the repository is dropped.
//!
//! # Example
//!
//! ```rust
//! use repokit::storage::inmemory::InMemoryRepository;
//! use repokit::models::User;
//! use repokit_core::Repository;
//!
//! let repo = InMemoryRepository::new();
//! let stored = repo.add(User::new("Ada", "ada@example.com")).unwrap();
//! assert_eq!(stored.id, 1);
//! ```

mod repository;

pub use repository::InMemoryRepository;
