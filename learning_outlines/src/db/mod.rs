//! Persistence module for course outline storage.
//!
//! This module provides abstractions for outline persistence via the
//! Repository pattern, plus the versioned process-local cache that sits in
//! front of it.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │  Service Layer (services::outlines) - Resolver          │
//! │  - Staff short-circuit                                   │
//! │  - Processor pipeline orchestration                      │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼─────────────────────────────────────┐
//! │  OutlineStore (store.rs) - Versioned Cache               │
//! │  - Cheap version probe on every read                     │
//! │  - Identity-preserving cache hits                        │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼─────────────────────────────────────┐
//! │  Repository Trait (repository/) - Abstract Interface     │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//!     ┌──────────────────────────────────────────────┐
//!     │             Local Repository                  │
//!     │               (in-memory)                     │
//!     └──────────────────────────────────────────────┘
//! ```
//!
//! # Recommended Usage
//!
//! Go through the service layer (`crate::services::outlines`), which works
//! with any repository implementation:
//!
//! ```
//! use learning_outlines::db::{OutlineStore, RepositoryFactory, RepositoryType};
//!
//! let repo = RepositoryFactory::create(RepositoryType::Local).unwrap();
//! let store = OutlineStore::new(repo);
//! ```

pub mod factory;
pub mod repositories;
pub mod repository;
pub mod store;

pub use factory::{RepositoryFactory, RepositoryType};
pub use repositories::LocalRepository;
pub use repository::{OutlineRepository, RepositoryError, RepositoryResult};
pub use store::OutlineStore;

use anyhow::{Context, Result};
use std::sync::{Arc, OnceLock};

/// Global outline store initialized once per process.
static OUTLINE_STORE: OnceLock<Arc<OutlineStore>> = OnceLock::new();

/// Initialize the global outline store for the configured backend.
///
/// This function is idempotent: calling it when the store already exists is
/// a no-op that returns success.
pub fn init_outline_store() -> Result<()> {
    if OUTLINE_STORE.get().is_some() {
        return Ok(());
    }

    let repo = RepositoryFactory::from_env()?;
    let _ = OUTLINE_STORE.set(Arc::new(OutlineStore::new(repo)));
    Ok(())
}

/// Get a reference to the global outline store.
///
/// Lazily performs a best-effort init so callers that never configure a
/// backend transparently get the local one.
pub fn get_outline_store() -> Result<&'static Arc<OutlineStore>> {
    if OUTLINE_STORE.get().is_none() {
        let _ = init_outline_store();
    }

    OUTLINE_STORE
        .get()
        .context("Outline store not initialized. Call init_outline_store() first.")
}
