//! In-memory local repository implementation.
//!
//! This module provides a local implementation of the repository trait
//! suitable for unit testing and local development. Outlines are stored
//! decomposed into a metadata table and a structure table (mirroring the
//! relational layout a SQL backend would use), so the cheap metadata probe
//! and the expensive structural read exercise genuinely different paths.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::db::repository::{OutlineRepository, RepositoryError, RepositoryResult};
use crate::models::keys::{CourseKey, UsageKey};
use crate::models::outline::{
    CourseLearningSequenceData, CourseOutlineData, CourseSectionData, VisibilityData,
};

/// In-memory local repository.
///
/// Both "tables" live behind a single `RwLock`, so `replace_outline` commits
/// metadata and structure in one write-lock scope: readers observe either
/// the fully-old or the fully-new outline, never a mix.
///
/// # Example
/// ```
/// use learning_outlines::db::repositories::LocalRepository;
///
/// let repo = LocalRepository::new();
/// assert_eq!(repo.outline_count(), 0);
/// ```
#[derive(Clone, Default)]
pub struct LocalRepository {
    data: Arc<RwLock<LocalData>>,
}

/// Metadata record: what `get_published_version` reads.
struct MetadataRow {
    title: String,
    published_at: DateTime<Utc>,
    published_version: String,
}

/// One section with its ordered sequence rows.
struct SectionRow {
    usage_key: UsageKey,
    title: String,
    visibility: VisibilityData,
    sequences: Vec<SequenceRow>,
}

struct SequenceRow {
    usage_key: UsageKey,
    title: String,
    visibility: VisibilityData,
}

struct LocalData {
    metadata: HashMap<CourseKey, MetadataRow>,
    structure: HashMap<CourseKey, Vec<SectionRow>>,
    is_healthy: bool,
}

impl Default for LocalData {
    fn default() -> Self {
        Self {
            metadata: HashMap::new(),
            structure: HashMap::new(),
            is_healthy: true,
        }
    }
}

impl LocalRepository {
    /// Create a new empty local repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the health status for testing connection failures.
    pub fn set_healthy(&self, healthy: bool) {
        let mut data = self.data.write().unwrap();
        data.is_healthy = healthy;
    }

    /// Clear all stored outlines.
    pub fn clear(&self) {
        let mut data = self.data.write().unwrap();
        data.metadata.clear();
        data.structure.clear();
    }

    /// Number of outlines currently stored.
    pub fn outline_count(&self) -> usize {
        self.data.read().unwrap().metadata.len()
    }

    fn check_health(&self) -> RepositoryResult<()> {
        let data = self.data.read().unwrap();
        if !data.is_healthy {
            return Err(RepositoryError::ConnectionError(
                "Store is not healthy".to_string(),
            ));
        }
        Ok(())
    }

    fn not_found(course_key: &CourseKey) -> RepositoryError {
        RepositoryError::NotFound(format!("No outline stored for course {}", course_key))
    }

    fn decompose(outline: &CourseOutlineData) -> (MetadataRow, Vec<SectionRow>) {
        let metadata = MetadataRow {
            title: outline.title().to_string(),
            published_at: outline.published_at(),
            published_version: outline.published_version().to_string(),
        };
        let structure = outline
            .sections()
            .iter()
            .map(|section| SectionRow {
                usage_key: section.usage_key.clone(),
                title: section.title.clone(),
                visibility: section.visibility,
                sequences: section
                    .sequences
                    .iter()
                    .map(|seq| SequenceRow {
                        usage_key: seq.usage_key.clone(),
                        title: seq.title.clone(),
                        visibility: seq.visibility,
                    })
                    .collect(),
            })
            .collect();
        (metadata, structure)
    }
}

#[async_trait]
impl OutlineRepository for LocalRepository {
    async fn health_check(&self) -> RepositoryResult<bool> {
        let data = self.data.read().unwrap();
        Ok(data.is_healthy)
    }

    async fn get_published_version(&self, course_key: &CourseKey) -> RepositoryResult<String> {
        self.check_health()?;
        let data = self.data.read().unwrap();
        data.metadata
            .get(course_key)
            .map(|row| row.published_version.clone())
            .ok_or_else(|| Self::not_found(course_key))
    }

    async fn get_outline(&self, course_key: &CourseKey) -> RepositoryResult<CourseOutlineData> {
        self.check_health()?;
        let data = self.data.read().unwrap();

        let metadata = data
            .metadata
            .get(course_key)
            .ok_or_else(|| Self::not_found(course_key))?;
        let structure = data
            .structure
            .get(course_key)
            .ok_or_else(|| Self::not_found(course_key))?;

        let sections: Vec<CourseSectionData> = structure
            .iter()
            .map(|row| CourseSectionData {
                usage_key: row.usage_key.clone(),
                title: row.title.clone(),
                visibility: row.visibility,
                sequences: row
                    .sequences
                    .iter()
                    .map(|seq| CourseLearningSequenceData {
                        usage_key: seq.usage_key.clone(),
                        title: seq.title.clone(),
                        visibility: seq.visibility,
                    })
                    .collect(),
            })
            .collect();

        // Rows came from a validated outline, so revalidation only fails if
        // the store itself was corrupted.
        let outline = CourseOutlineData::new(
            course_key.clone(),
            metadata.title.clone(),
            metadata.published_at,
            metadata.published_version.clone(),
            sections,
        )
        .map_err(|e| {
            RepositoryError::InternalError(format!(
                "Stored outline for {} failed revalidation: {}",
                course_key, e
            ))
        })?;

        Ok(outline)
    }

    async fn replace_outline(&self, outline: &CourseOutlineData) -> RepositoryResult<()> {
        self.check_health()?;
        let (metadata, structure) = Self::decompose(outline);

        // Single write-lock scope: both tables change together or not at all.
        let mut data = self.data.write().unwrap();
        data.metadata.insert(outline.course_key().clone(), metadata);
        data.structure
            .insert(outline.course_key().clone(), structure);
        Ok(())
    }

    async fn has_outline(&self, course_key: &CourseKey) -> RepositoryResult<bool> {
        self.check_health()?;
        let data = self.data.read().unwrap();
        Ok(data.metadata.contains_key(course_key))
    }

    async fn list_course_keys(&self) -> RepositoryResult<Vec<CourseKey>> {
        self.check_health()?;
        let data = self.data.read().unwrap();
        let mut keys: Vec<CourseKey> = data.metadata.keys().cloned().collect();
        keys.sort();
        Ok(keys)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample_outline(version: &str) -> CourseOutlineData {
        let key: CourseKey = "course-v1:OpenLearn+Repo+Test".parse().unwrap();
        CourseOutlineData::new(
            key.clone(),
            "Repo Test Course",
            Utc.with_ymd_and_hms(2026, 5, 20, 0, 0, 0).unwrap(),
            version,
            vec![CourseSectionData {
                usage_key: key.make_usage_key("chapter", "ch1"),
                title: "Chapter 1".to_string(),
                visibility: VisibilityData::default(),
                sequences: vec![CourseLearningSequenceData {
                    usage_key: key.make_usage_key("sequential", "seq_1_0"),
                    title: "Seq 1.0".to_string(),
                    visibility: VisibilityData::default(),
                }],
            }],
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_health_check() {
        let repo = LocalRepository::new();
        assert!(repo.health_check().await.unwrap());

        repo.set_healthy(false);
        assert!(!repo.health_check().await.unwrap());
    }

    #[tokio::test]
    async fn test_replace_and_get_roundtrip() {
        let repo = LocalRepository::new();
        let outline = sample_outline("v1");

        repo.replace_outline(&outline).await.unwrap();
        let retrieved = repo.get_outline(outline.course_key()).await.unwrap();

        assert_eq!(retrieved, outline);
        assert_eq!(repo.outline_count(), 1);
    }

    #[tokio::test]
    async fn test_metadata_probe_reads_version_only() {
        let repo = LocalRepository::new();
        let outline = sample_outline("version-token-1");
        repo.replace_outline(&outline).await.unwrap();

        let version = repo
            .get_published_version(outline.course_key())
            .await
            .unwrap();
        assert_eq!(version, "version-token-1");
    }

    #[tokio::test]
    async fn test_not_found() {
        let repo = LocalRepository::new();
        let key: CourseKey = "course-v1:No+Such+Course".parse().unwrap();

        assert!(matches!(
            repo.get_outline(&key).await,
            Err(RepositoryError::NotFound(_))
        ));
        assert!(matches!(
            repo.get_published_version(&key).await,
            Err(RepositoryError::NotFound(_))
        ));
        assert!(!repo.has_outline(&key).await.unwrap());
    }

    #[tokio::test]
    async fn test_replace_fully_supersedes() {
        let repo = LocalRepository::new();
        let v1 = sample_outline("v1");
        repo.replace_outline(&v1).await.unwrap();

        // v2 has no sections at all; nothing of v1's structure may survive.
        let v2 = CourseOutlineData::new(
            v1.course_key().clone(),
            "Repo Test Course",
            v1.published_at(),
            "v2",
            vec![],
        )
        .unwrap();
        repo.replace_outline(&v2).await.unwrap();

        let retrieved = repo.get_outline(v1.course_key()).await.unwrap();
        assert_eq!(retrieved, v2);
        assert!(retrieved.sections().is_empty());
        assert_eq!(repo.outline_count(), 1);
    }

    #[tokio::test]
    async fn test_unhealthy_store_reports_connection_error() {
        let repo = LocalRepository::new();
        repo.set_healthy(false);

        let key: CourseKey = "course-v1:Any+Course+Run".parse().unwrap();
        assert!(matches!(
            repo.get_outline(&key).await,
            Err(RepositoryError::ConnectionError(_))
        ));
    }

    #[tokio::test]
    async fn test_list_course_keys_sorted() {
        let repo = LocalRepository::new();
        for org in ["Zeta", "Alpha"] {
            let key: CourseKey = format!("course-v1:{}+C+R", org).parse().unwrap();
            let outline =
                CourseOutlineData::new(key, "T", Utc::now(), "v1", vec![]).unwrap();
            repo.replace_outline(&outline).await.unwrap();
        }

        let keys = repo.list_course_keys().await.unwrap();
        assert_eq!(keys.len(), 2);
        assert!(keys[0] < keys[1]);
        assert_eq!(keys[0].org(), "Alpha");
    }
}
