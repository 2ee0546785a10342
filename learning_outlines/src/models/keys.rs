//! Opaque identifier types for courses and course content.
//!
//! A `CourseKey` identifies one run of a course; a `UsageKey` identifies a
//! single content item (section, sequence, ...) within a course run. Both are
//! value objects: parsed once, validated up front, and immutable afterwards.
//!
//! Two course key formats exist in the wild. The structured form is
//! `course-v1:Org+Course+Run`. The legacy form is an unstructured
//! `Org/Course/Run` triple; it can still be parsed (so callers can report on
//! it) but is flagged deprecated and rejected by every outline API boundary.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Result type for key parsing operations
pub type KeyResult<T> = Result<T, KeyError>;

/// Error type for malformed identifier strings
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum KeyError {
    #[error("Invalid course key: {0}")]
    InvalidCourseKey(String),

    #[error("Invalid usage key: {0}")]
    InvalidUsageKey(String),
}

const COURSE_KEY_PREFIX: &str = "course-v1:";
const USAGE_KEY_PREFIX: &str = "block-v1:";

/// Block type used for top-level course sections.
pub const SECTION_BLOCK_TYPE: &str = "chapter";

/// Block type used for learning sequences.
pub const SEQUENCE_BLOCK_TYPE: &str = "sequential";

/// Identifier for a single run of a course.
///
/// # Examples
///
/// ```
/// use learning_outlines::models::CourseKey;
///
/// let key: CourseKey = "course-v1:OpenLearn+Rust101+2026".parse().unwrap();
/// assert_eq!(key.org(), "OpenLearn");
/// assert!(!key.is_deprecated());
///
/// let legacy: CourseKey = "OpenLearn/Rust101/2026".parse().unwrap();
/// assert!(legacy.is_deprecated());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CourseKey {
    org: String,
    course: String,
    run: String,
    deprecated: bool,
}

impl CourseKey {
    /// Create a structured (non-deprecated) course key from its parts.
    pub fn new(
        org: impl Into<String>,
        course: impl Into<String>,
        run: impl Into<String>,
    ) -> KeyResult<Self> {
        let (org, course, run) = (org.into(), course.into(), run.into());
        for part in [&org, &course, &run] {
            if part.is_empty() || part.contains('+') || part.contains('/') {
                return Err(KeyError::InvalidCourseKey(format!(
                    "{}+{}+{}",
                    org, course, run
                )));
            }
        }
        Ok(Self {
            org,
            course,
            run,
            deprecated: false,
        })
    }

    /// The organization part of the key.
    pub fn org(&self) -> &str {
        &self.org
    }

    /// The course part of the key.
    pub fn course(&self) -> &str {
        &self.course
    }

    /// The run part of the key.
    pub fn run(&self) -> &str {
        &self.run
    }

    /// Whether this key uses the legacy unstructured `Org/Course/Run` format.
    ///
    /// Deprecated keys can be parsed and displayed, but outline APIs reject
    /// them with a validation error before attempting any lookup.
    pub fn is_deprecated(&self) -> bool {
        self.deprecated
    }

    /// Build a usage key for a content item within this course run.
    ///
    /// # Examples
    ///
    /// ```
    /// use learning_outlines::models::CourseKey;
    ///
    /// let course: CourseKey = "course-v1:OpenLearn+Rust101+2026".parse().unwrap();
    /// let seq = course.make_usage_key("sequential", "seq_1_0");
    /// assert_eq!(
    ///     seq.to_string(),
    ///     "block-v1:OpenLearn+Rust101+2026+type@sequential+block@seq_1_0"
    /// );
    /// ```
    pub fn make_usage_key(
        &self,
        block_type: impl Into<String>,
        block_id: impl Into<String>,
    ) -> UsageKey {
        UsageKey {
            course_key: self.clone(),
            block_type: block_type.into(),
            block_id: block_id.into(),
        }
    }
}

impl FromStr for CourseKey {
    type Err = KeyError;

    fn from_str(s: &str) -> KeyResult<Self> {
        if let Some(rest) = s.strip_prefix(COURSE_KEY_PREFIX) {
            let parts: Vec<&str> = rest.split('+').collect();
            if parts.len() != 3 || parts.iter().any(|p| p.is_empty()) {
                return Err(KeyError::InvalidCourseKey(s.to_string()));
            }
            return Self::new(parts[0], parts[1], parts[2]);
        }

        // Legacy "Org/Course/Run" triple. Representable, but deprecated.
        let parts: Vec<&str> = s.split('/').collect();
        if parts.len() == 3 && parts.iter().all(|p| !p.is_empty()) {
            return Ok(Self {
                org: parts[0].to_string(),
                course: parts[1].to_string(),
                run: parts[2].to_string(),
                deprecated: true,
            });
        }

        Err(KeyError::InvalidCourseKey(s.to_string()))
    }
}

impl fmt::Display for CourseKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.deprecated {
            write!(f, "{}/{}/{}", self.org, self.course, self.run)
        } else {
            write!(
                f,
                "{}{}+{}+{}",
                COURSE_KEY_PREFIX, self.org, self.course, self.run
            )
        }
    }
}

impl TryFrom<String> for CourseKey {
    type Error = KeyError;

    fn try_from(s: String) -> KeyResult<Self> {
        s.parse()
    }
}

impl From<CourseKey> for String {
    fn from(key: CourseKey) -> Self {
        key.to_string()
    }
}

/// Globally unique identifier for a content item within a course run.
///
/// Rendered as `block-v1:Org+Course+Run+type@<block_type>+block@<block_id>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UsageKey {
    course_key: CourseKey,
    block_type: String,
    block_id: String,
}

impl UsageKey {
    /// The course run this item belongs to.
    pub fn course_key(&self) -> &CourseKey {
        &self.course_key
    }

    /// The block type, e.g. `chapter` or `sequential`.
    pub fn block_type(&self) -> &str {
        &self.block_type
    }

    /// The item identifier, unique within the course for its block type.
    pub fn block_id(&self) -> &str {
        &self.block_id
    }

    /// Helper in case more Section-like block types are added.
    pub fn is_section_key(&self) -> bool {
        self.block_type == SECTION_BLOCK_TYPE
    }

    /// Helper in case more Sequence-like block types are added.
    pub fn is_sequence_key(&self) -> bool {
        self.block_type == SEQUENCE_BLOCK_TYPE
    }
}

impl FromStr for UsageKey {
    type Err = KeyError;

    fn from_str(s: &str) -> KeyResult<Self> {
        let rest = s
            .strip_prefix(USAGE_KEY_PREFIX)
            .ok_or_else(|| KeyError::InvalidUsageKey(s.to_string()))?;

        let parts: Vec<&str> = rest.split('+').collect();
        if parts.len() != 5 {
            return Err(KeyError::InvalidUsageKey(s.to_string()));
        }
        let block_type = parts[3]
            .strip_prefix("type@")
            .ok_or_else(|| KeyError::InvalidUsageKey(s.to_string()))?;
        let block_id = parts[4]
            .strip_prefix("block@")
            .ok_or_else(|| KeyError::InvalidUsageKey(s.to_string()))?;
        if block_type.is_empty() || block_id.is_empty() {
            return Err(KeyError::InvalidUsageKey(s.to_string()));
        }

        let course_key = CourseKey::new(parts[0], parts[1], parts[2])
            .map_err(|_| KeyError::InvalidUsageKey(s.to_string()))?;

        Ok(course_key.make_usage_key(block_type, block_id))
    }
}

impl fmt::Display for UsageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}+{}+{}+type@{}+block@{}",
            USAGE_KEY_PREFIX,
            self.course_key.org,
            self.course_key.course,
            self.course_key.run,
            self.block_type,
            self.block_id
        )
    }
}

impl TryFrom<String> for UsageKey {
    type Error = KeyError;

    fn try_from(s: String) -> KeyResult<Self> {
        s.parse()
    }
}

impl From<UsageKey> for String {
    fn from(key: UsageKey) -> Self {
        key.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_course_key_roundtrip() {
        let raw = "course-v1:OpenLearn+Rust101+2026";
        let key: CourseKey = raw.parse().unwrap();
        assert_eq!(key.to_string(), raw);
        assert_eq!(key.org(), "OpenLearn");
        assert_eq!(key.course(), "Rust101");
        assert_eq!(key.run(), "2026");
        assert!(!key.is_deprecated());
    }

    #[test]
    fn test_legacy_course_key_is_deprecated() {
        let key: CourseKey = "OpenLearn/Rust101/2026".parse().unwrap();
        assert!(key.is_deprecated());
        assert_eq!(key.to_string(), "OpenLearn/Rust101/2026");
    }

    #[test]
    fn test_invalid_course_keys_rejected() {
        for raw in [
            "",
            "course-v1:",
            "course-v1:Org+Course",
            "course-v1:Org+Course+Run+Extra",
            "course-v1:Org++Run",
            "Org/Course",
            "Org/Course/Run/Extra",
            "just-a-string",
        ] {
            assert!(
                raw.parse::<CourseKey>().is_err(),
                "expected parse failure for {:?}",
                raw
            );
        }
    }

    #[test]
    fn test_usage_key_roundtrip() {
        let raw = "block-v1:OpenLearn+Rust101+2026+type@sequential+block@seq_1_0";
        let key: UsageKey = raw.parse().unwrap();
        assert_eq!(key.to_string(), raw);
        assert_eq!(key.block_type(), "sequential");
        assert_eq!(key.block_id(), "seq_1_0");
        assert!(key.is_sequence_key());
        assert!(!key.is_section_key());
    }

    #[test]
    fn test_make_usage_key() {
        let course: CourseKey = "course-v1:OpenLearn+Rust101+2026".parse().unwrap();
        let section = course.make_usage_key(SECTION_BLOCK_TYPE, "ch1");
        assert!(section.is_section_key());
        assert_eq!(section.course_key(), &course);
    }

    #[test]
    fn test_invalid_usage_keys_rejected() {
        for raw in [
            "",
            "block-v1:Org+Course+Run",
            "block-v1:Org+Course+Run+sequential+seq_1",
            "block-v1:Org+Course+Run+type@+block@x",
            "block-v1:Org+Course+Run+type@sequential+block@",
            "course-v1:Org+Course+Run",
        ] {
            assert!(
                raw.parse::<UsageKey>().is_err(),
                "expected parse failure for {:?}",
                raw
            );
        }
    }

    #[test]
    fn test_keys_serialize_as_strings() {
        let course: CourseKey = "course-v1:OpenLearn+Rust101+2026".parse().unwrap();
        let json = serde_json::to_string(&course).unwrap();
        assert_eq!(json, "\"course-v1:OpenLearn+Rust101+2026\"");

        let back: CourseKey = serde_json::from_str(&json).unwrap();
        assert_eq!(back, course);
    }
}
