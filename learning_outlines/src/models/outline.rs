//! Domain model for course outlines.
//!
//! A course outline is the navigable tree of a course: an ordered list of
//! sections, each holding an ordered list of learning sequences, plus the
//! per-item visibility flags that the processor pipeline consumes. All of
//! these types are immutable value objects with structural equality;
//! "modifications" like [`CourseOutlineData::remove`] return a new outline
//! and leave the original untouched.

use std::collections::{HashMap, HashSet};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::keys::{CourseKey, UsageKey};

/// Ceiling on the total number of sequences in a single outline.
///
/// Outlines are loaded and cached whole, so an unbounded outline would turn
/// the "cheap" read path into an unbounded one.
pub const MAX_SEQUENCES_PER_OUTLINE: usize = 1000;

/// Result type for outline construction
pub type OutlineResult<T> = Result<T, OutlineError>;

/// Validation errors raised when constructing a [`CourseOutlineData`].
///
/// These indicate bad input from the caller (usually the authoring/publish
/// pipeline) and are never retried.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum OutlineError {
    #[error("Deprecated course key not supported: {0}")]
    DeprecatedCourseKey(CourseKey),

    #[error("Sequence {0} appears in more than one section")]
    DuplicateSequenceKey(UsageKey),

    #[error("Course {course_key} has {count} sequences, exceeding the limit of {limit}")]
    TooManySequences {
        course_key: CourseKey,
        count: usize,
        limit: usize,
    },
}

/// Per-item visibility flags attached to every section and sequence.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VisibilityData {
    /// Hidden from the course navigation, but not access-controlled.
    pub hide_from_toc: bool,
    /// Only staff viewers may see this item at all.
    pub visible_to_staff_only: bool,
}

impl VisibilityData {
    /// True if either flag would hide this item from an ordinary viewer.
    pub fn hidden_from_learners(&self) -> bool {
        self.hide_from_toc || self.visible_to_staff_only
    }
}

/// A leaf unit of learning content within a section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseLearningSequenceData {
    pub usage_key: UsageKey,
    pub title: String,
    pub visibility: VisibilityData,
}

/// A top-level course grouping (e.g. a chapter) with its ordered sequences.
///
/// Order is meaningful: it is the presentation order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseSectionData {
    pub usage_key: UsageKey,
    pub title: String,
    pub visibility: VisibilityData,
    pub sequences: Vec<CourseLearningSequenceData>,
}

/// The aggregate root: one course's complete, validated outline.
///
/// Fields are private so the construction-time invariants hold for the life
/// of the value:
///
/// - the course key is structured (not a deprecated legacy key)
/// - every sequence appears in exactly one section (no DAG sharing)
/// - the total sequence count is at most [`MAX_SEQUENCES_PER_OUTLINE`]
/// - [`CourseOutlineData::sequences`] is exactly the flattening of
///   [`CourseOutlineData::sections`]
///
/// Equality is structural, so a store round-trip can be asserted with `==`.
///
/// # Examples
///
/// ```
/// use learning_outlines::models::{
///     CourseKey, CourseOutlineData, CourseSectionData, CourseLearningSequenceData,
///     VisibilityData,
/// };
/// use chrono::{TimeZone, Utc};
///
/// let course_key: CourseKey = "course-v1:OpenLearn+Rust101+2026".parse().unwrap();
/// let outline = CourseOutlineData::new(
///     course_key.clone(),
///     "Rust 101",
///     Utc.with_ymd_and_hms(2026, 5, 19, 0, 0, 0).unwrap(),
///     "v1",
///     vec![CourseSectionData {
///         usage_key: course_key.make_usage_key("chapter", "ch1"),
///         title: "Chapter 1".to_string(),
///         visibility: VisibilityData::default(),
///         sequences: vec![CourseLearningSequenceData {
///             usage_key: course_key.make_usage_key("sequential", "seq_1_0"),
///             title: "Seq 1.0".to_string(),
///             visibility: VisibilityData::default(),
///         }],
///     }],
/// )
/// .unwrap();
///
/// assert_eq!(outline.sequences().len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CourseOutlineData {
    course_key: CourseKey,
    title: String,
    published_at: DateTime<Utc>,
    published_version: String,
    sections: Vec<CourseSectionData>,
    // Derived flattening of `sections`; rebuilt on every construction, never
    // mutated independently.
    #[serde(skip)]
    sequences: HashMap<UsageKey, CourseLearningSequenceData>,
}

impl CourseOutlineData {
    /// Construct a validated outline.
    ///
    /// # Arguments
    /// * `course_key` - Structured course identifier (legacy keys rejected)
    /// * `title` - Course title
    /// * `published_at` - When this version was published
    /// * `published_version` - Opaque version token from the authoring system
    /// * `sections` - Ordered sections with their ordered sequences
    ///
    /// # Returns
    /// * `Ok(CourseOutlineData)` - If all invariants hold
    /// * `Err(OutlineError)` - Deprecated key, duplicate sequence, or too
    ///   many sequences
    pub fn new(
        course_key: CourseKey,
        title: impl Into<String>,
        published_at: DateTime<Utc>,
        published_version: impl Into<String>,
        sections: Vec<CourseSectionData>,
    ) -> OutlineResult<Self> {
        if course_key.is_deprecated() {
            return Err(OutlineError::DeprecatedCourseKey(course_key));
        }

        let mut sequences = HashMap::new();
        let mut count = 0usize;
        for section in &sections {
            for seq in &section.sequences {
                count += 1;
                if sequences
                    .insert(seq.usage_key.clone(), seq.clone())
                    .is_some()
                {
                    return Err(OutlineError::DuplicateSequenceKey(seq.usage_key.clone()));
                }
            }
        }
        if count > MAX_SEQUENCES_PER_OUTLINE {
            return Err(OutlineError::TooManySequences {
                course_key,
                count,
                limit: MAX_SEQUENCES_PER_OUTLINE,
            });
        }

        Ok(Self {
            course_key,
            title: title.into(),
            published_at,
            published_version: published_version.into(),
            sections,
            sequences,
        })
    }

    /// The structured course identifier.
    pub fn course_key(&self) -> &CourseKey {
        &self.course_key
    }

    /// The course title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// When this version of the outline was published.
    pub fn published_at(&self) -> DateTime<Utc> {
        self.published_at
    }

    /// Opaque version token; changes whenever the authoring system publishes
    /// a new revision.
    pub fn published_version(&self) -> &str {
        &self.published_version
    }

    /// Ordered sections, in presentation order.
    pub fn sections(&self) -> &[CourseSectionData] {
        &self.sections
    }

    /// Flattened view of every sequence in the outline, keyed by usage key.
    pub fn sequences(&self) -> &HashMap<UsageKey, CourseLearningSequenceData> {
        &self.sequences
    }

    /// Total number of sequences across all sections.
    pub fn sequence_count(&self) -> usize {
        self.sequences.len()
    }

    /// Return a new outline with the given keys removed.
    ///
    /// A key naming a section drops that section and every sequence in it; a
    /// key naming a sequence drops just that sequence from its section. Keys
    /// present in neither are ignored, so this never fails: removing the
    /// empty set or only unknown keys yields an outline equal to `self`.
    pub fn remove(&self, usage_keys: &HashSet<UsageKey>) -> CourseOutlineData {
        if usage_keys.is_empty() {
            return self.clone();
        }

        let sections: Vec<CourseSectionData> = self
            .sections
            .iter()
            .filter(|section| !usage_keys.contains(&section.usage_key))
            .map(|section| CourseSectionData {
                usage_key: section.usage_key.clone(),
                title: section.title.clone(),
                visibility: section.visibility,
                sequences: section
                    .sequences
                    .iter()
                    .filter(|seq| !usage_keys.contains(&seq.usage_key))
                    .cloned()
                    .collect(),
            })
            .collect();

        // Removal only shrinks a valid outline, so the invariants cannot be
        // violated; rebuild the derived map directly instead of revalidating.
        let sequences = sections
            .iter()
            .flat_map(|section| section.sequences.iter())
            .map(|seq| (seq.usage_key.clone(), seq.clone()))
            .collect();

        Self {
            course_key: self.course_key.clone(),
            title: self.title.clone(),
            published_at: self.published_at,
            published_version: self.published_version.clone(),
            sections,
            sequences,
        }
    }
}

#[cfg(test)]
#[path = "outline_tests.rs"]
mod outline_tests;
