//! High-level outline service layer.
//!
//! These functions are the crate's public contract for request-handling
//! layers: canonical outline read/write plus viewer-specific resolution.
//! They are repository-agnostic — everything goes through an
//! [`OutlineStore`], so any [`crate::db::OutlineRepository`] backend works.

use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use log::{debug, info};
use serde::Serialize;

use crate::db::repository::RepositoryResult;
use crate::db::store::OutlineStore;
use crate::models::keys::{CourseKey, UsageKey};
use crate::models::outline::CourseOutlineData;
use crate::models::viewer::ViewerContext;
use crate::processors::{ProcessorContext, ProcessorRegistry};

/// Key sets contributed by a single processor during one resolve call.
///
/// `inaccessible_sequences` means "exists but this viewer cannot access it";
/// `usage_keys_to_remove` means "dropped outright". Callers that only need
/// the final outline can ignore the distinction; callers rendering a
/// course-home page use it to show "locked" entries.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ProcessorResult {
    pub inaccessible_sequences: HashSet<UsageKey>,
    pub usage_keys_to_remove: HashSet<UsageKey>,
}

/// A viewer-specific outline plus the raw per-processor contributions.
#[derive(Debug, Clone, Serialize)]
pub struct UserCourseOutlineDetailsData {
    pub outline: Arc<CourseOutlineData>,
    /// Keyed by registry name; empty for privileged viewers, for whom no
    /// processor runs at all.
    pub processor_results: BTreeMap<String, ProcessorResult>,
}

/// Fetch the canonical (unfiltered) outline for a course.
///
/// # Returns
/// * `Ok(Arc<CourseOutlineData>)` - The full outline, possibly cache-shared
/// * `Err(RepositoryError::NotFound)` - No outline was ever stored
pub async fn get_course_outline(
    store: &OutlineStore,
    course_key: &CourseKey,
) -> RepositoryResult<Arc<CourseOutlineData>> {
    info!("Service layer: loading outline for {}", course_key);
    store.get(course_key).await
}

/// Persist a new outline version, fully superseding the previous one.
pub async fn replace_course_outline(
    store: &OutlineStore,
    outline: &CourseOutlineData,
) -> RepositoryResult<()> {
    info!(
        "Service layer: replacing outline for {}",
        outline.course_key()
    );
    store.replace(outline).await
}

/// Resolve the outline a specific viewer should see at a specific time.
///
/// Staff viewers get the full outline back untouched — no processor is even
/// constructed. For everyone else, every registered processor contributes
/// its key sets against the full outline and a single `remove` of the union
/// produces the result. The viewer-specific outline is derived on every call
/// and never cached; it is cheap to compute from the cached canonical tree.
///
/// # Returns
/// * `Ok(Arc<CourseOutlineData>)` - The viewer-specific outline
/// * `Err(RepositoryError::NotFound)` - No outline was ever stored
pub async fn get_user_course_outline(
    store: &OutlineStore,
    registry: &ProcessorRegistry,
    course_key: &CourseKey,
    viewer: &ViewerContext,
    at_time: DateTime<Utc>,
) -> RepositoryResult<Arc<CourseOutlineData>> {
    let (outline, _results) =
        user_outline_and_results(store, registry, course_key, viewer, at_time).await?;
    Ok(outline)
}

/// Like [`get_user_course_outline`], but also reports what each processor
/// contributed, so callers can distinguish "exists but locked" from "does
/// not exist".
pub async fn get_user_course_outline_details(
    store: &OutlineStore,
    registry: &ProcessorRegistry,
    course_key: &CourseKey,
    viewer: &ViewerContext,
    at_time: DateTime<Utc>,
) -> RepositoryResult<UserCourseOutlineDetailsData> {
    let (outline, processor_results) =
        user_outline_and_results(store, registry, course_key, viewer, at_time).await?;
    Ok(UserCourseOutlineDetailsData {
        outline,
        processor_results,
    })
}

async fn user_outline_and_results(
    store: &OutlineStore,
    registry: &ProcessorRegistry,
    course_key: &CourseKey,
    viewer: &ViewerContext,
    at_time: DateTime<Utc>,
) -> RepositoryResult<(Arc<CourseOutlineData>, BTreeMap<String, ProcessorResult>)> {
    let full_outline = store.get(course_key).await?;

    if viewer.has_unrestricted_access() {
        debug!(
            "Service layer: unrestricted viewer {}, returning full outline for {}",
            viewer.username, course_key
        );
        return Ok((full_outline, BTreeMap::new()));
    }

    let context = ProcessorContext {
        course_key: course_key.clone(),
        viewer: viewer.clone(),
        at_time,
    };

    let mut processor_results = BTreeMap::new();
    let mut keys_to_remove: HashSet<UsageKey> = HashSet::new();

    for (name, mut processor) in registry.build(&context) {
        processor.load_data(&full_outline);
        let result = ProcessorResult {
            inaccessible_sequences: processor.inaccessible_sequences(&full_outline),
            usage_keys_to_remove: processor.usage_keys_to_remove(&full_outline),
        };
        keys_to_remove.extend(result.inaccessible_sequences.iter().cloned());
        keys_to_remove.extend(result.usage_keys_to_remove.iter().cloned());
        processor_results.insert(name.to_string(), result);
    }

    debug!(
        "Service layer: removing {} keys from {} for viewer {}",
        keys_to_remove.len(),
        course_key,
        viewer.username
    );
    let user_outline = Arc::new(full_outline.remove(&keys_to_remove));
    Ok((user_outline, processor_results))
}
