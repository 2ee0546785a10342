//! Versioned, cache-coherent outline store.
//!
//! `OutlineStore` sits between the resolver and the repository. Every read
//! starts with the repository's cheap metadata probe; the full structural
//! query only runs when the process-local cache misses or holds a stale
//! version. That makes the common path one lightweight query plus a map
//! lookup, while guaranteeing a published-version bump is picked up on the
//! very next read.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use log::{debug, info};

use crate::db::repository::{OutlineRepository, RepositoryError, RepositoryResult};
use crate::models::keys::CourseKey;
use crate::models::outline::CourseOutlineData;

/// Version-checked process-local cache over an [`OutlineRepository`].
///
/// Cached values are `Arc`s, so a cache hit returns the identical object a
/// previous read produced — no reconstruction. That identity is a property
/// of this process-local cache only, not of the repository contract: a
/// shared cache across processes could not provide it, and callers must not
/// rely on it for correctness.
///
/// Entries have no TTL. They are replaced wholesale when the version probe
/// disagrees with the cached value, and dropped on [`OutlineStore::replace`].
/// Losing the cache entirely (e.g. process restart) costs extra work, never
/// correctness: the repository stays the sole source of truth.
pub struct OutlineStore {
    repo: Arc<dyn OutlineRepository>,
    cache: RwLock<HashMap<CourseKey, Arc<CourseOutlineData>>>,
}

impl OutlineStore {
    /// Create a store over the given repository with an empty cache.
    pub fn new(repo: Arc<dyn OutlineRepository>) -> Self {
        Self {
            repo,
            cache: RwLock::new(HashMap::new()),
        }
    }

    /// The underlying repository.
    pub fn repository(&self) -> &Arc<dyn OutlineRepository> {
        &self.repo
    }

    /// Retrieve the canonical outline for a course.
    ///
    /// # Returns
    /// * `Ok(Arc<CourseOutlineData>)` - Cached (same identity) on a version
    ///   match, freshly rebuilt otherwise
    /// * `Err(RepositoryError::ValidationError)` - Deprecated course key;
    ///   no lookup is attempted
    /// * `Err(RepositoryError::NotFound)` - No outline was ever stored
    pub async fn get(&self, course_key: &CourseKey) -> RepositoryResult<Arc<CourseOutlineData>> {
        Self::reject_deprecated(course_key)?;

        // Tier 1: cheap metadata probe. Runs on every read, which is what
        // keeps the cache from ever serving a superseded version.
        let version = self.repo.get_published_version(course_key).await?;

        {
            let cache = self.cache.read().unwrap();
            if let Some(cached) = cache.get(course_key) {
                if cached.published_version() == version {
                    debug!("Outline store: cache hit for {} @ {}", course_key, version);
                    return Ok(Arc::clone(cached));
                }
            }
        }

        // Tier 2: full structural read. A concurrent reader may race us to
        // this insert; last-writer-wins is fine because both rebuilt the
        // same version and the values are equal.
        debug!("Outline store: cache miss for {} @ {}", course_key, version);
        let outline = Arc::new(self.repo.get_outline(course_key).await?);
        self.cache
            .write()
            .unwrap()
            .insert(course_key.clone(), Arc::clone(&outline));
        Ok(outline)
    }

    /// Persist a new outline version, superseding any prior structure.
    ///
    /// The cache entry for the course is invalidated rather than refreshed,
    /// so the next read observes exactly what a cold reader would.
    pub async fn replace(&self, outline: &CourseOutlineData) -> RepositoryResult<()> {
        info!(
            "Outline store: replacing outline for {} with version {} ({} sections, {} sequences)",
            outline.course_key(),
            outline.published_version(),
            outline.sections().len(),
            outline.sequence_count(),
        );
        self.repo.replace_outline(outline).await?;
        self.invalidate(outline.course_key());
        Ok(())
    }

    /// Drop the cache entry for a course, if present.
    pub fn invalidate(&self, course_key: &CourseKey) {
        self.cache.write().unwrap().remove(course_key);
    }

    /// Number of courses currently cached. Mostly useful in tests.
    pub fn cached_count(&self) -> usize {
        self.cache.read().unwrap().len()
    }

    fn reject_deprecated(course_key: &CourseKey) -> RepositoryResult<()> {
        if course_key.is_deprecated() {
            return Err(RepositoryError::ValidationError(format!(
                "Deprecated course key not supported: {}",
                course_key
            )));
        }
        Ok(())
    }
}
