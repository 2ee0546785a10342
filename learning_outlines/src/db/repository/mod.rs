//! Repository trait for abstracting outline persistence.
//!
//! This trait defines the interface for all persistence operations, allowing
//! different implementations (relational store, in-memory, etc.) to be
//! swapped via dependency injection. The contract that matters to the rest
//! of the crate is that outline *metadata* (title, timestamps, version
//! stamp) is readable independently of — and much more cheaply than — the
//! full section/sequence structure. [`crate::db::OutlineStore`] relies on
//! that split for its version-checked cache.

mod error;

use async_trait::async_trait;

pub use error::{RepositoryError, RepositoryResult};

use crate::models::keys::CourseKey;
use crate::models::outline::CourseOutlineData;

/// Repository trait for course outline persistence.
///
/// # Thread Safety
/// Implementations must be `Send + Sync` to work with async Rust and allow
/// sharing across threads.
///
/// # Error Handling
/// All methods return `RepositoryResult<T>` which wraps either the expected
/// return type or a `RepositoryError` describing what went wrong. No method
/// retries internally; transient failures propagate to the caller.
#[async_trait]
pub trait OutlineRepository: Send + Sync {
    /// Check if the backing store is healthy.
    ///
    /// # Returns
    /// - `Ok(true)` if the store is reachable and healthy
    /// - `Ok(false)` if unhealthy but no error occurred
    /// - `Err(RepositoryError)` if the check itself failed
    async fn health_check(&self) -> RepositoryResult<bool>;

    /// Fetch only the current published version stamp for a course.
    ///
    /// This is the cheap metadata probe issued on every read; it must not
    /// touch the structural records.
    ///
    /// # Returns
    /// * `Ok(String)` - The opaque `published_version` token
    /// * `Err(RepositoryError::NotFound)` - If no outline was ever stored
    async fn get_published_version(&self, course_key: &CourseKey) -> RepositoryResult<String>;

    /// Fetch the full outline structure and rebuild the aggregate.
    ///
    /// This is the expensive path: metadata plus every section and sequence
    /// row, reconstructed into a fresh `CourseOutlineData`.
    ///
    /// # Returns
    /// * `Ok(CourseOutlineData)` - The complete outline
    /// * `Err(RepositoryError::NotFound)` - If no outline was ever stored
    async fn get_outline(&self, course_key: &CourseKey) -> RepositoryResult<CourseOutlineData>;

    /// Atomically persist an outline, fully superseding any prior structure
    /// for the same course key.
    ///
    /// Partial writes (metadata without structure, or vice versa) must never
    /// be observable to concurrent readers; on failure no state changes.
    async fn replace_outline(&self, outline: &CourseOutlineData) -> RepositoryResult<()>;

    /// Check whether an outline exists for a course.
    async fn has_outline(&self, course_key: &CourseKey) -> RepositoryResult<bool>;

    /// List the course keys of all stored outlines.
    async fn list_course_keys(&self) -> RepositoryResult<Vec<CourseKey>>;
}
