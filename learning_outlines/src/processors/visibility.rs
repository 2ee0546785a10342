//! Processor that removes items based on their visibility flags.

use std::collections::HashSet;

use crate::models::keys::UsageKey;
use crate::models::outline::CourseOutlineData;

use super::{OutlineProcessor, ProcessorContext};

/// Removes every item flagged `hide_from_toc` or `visible_to_staff_only`.
///
/// Hidden items are elided outright rather than marked-but-present: learners
/// never see them in any form, while staff bypass the pipeline entirely and
/// still see everything. Everything this rule needs is already on the
/// outline, so `load_data` stays the default no-op.
pub struct VisibilityOutlineProcessor;

impl VisibilityOutlineProcessor {
    pub fn new(_context: &ProcessorContext) -> Self {
        Self
    }
}

impl OutlineProcessor for VisibilityOutlineProcessor {
    fn usage_keys_to_remove(&self, full_outline: &CourseOutlineData) -> HashSet<UsageKey> {
        let mut keys: HashSet<UsageKey> = full_outline
            .sections()
            .iter()
            .filter(|section| section.visibility.hidden_from_learners())
            .map(|section| section.usage_key.clone())
            .collect();

        keys.extend(
            full_outline
                .sequences()
                .values()
                .filter(|seq| seq.visibility.hidden_from_learners())
                .map(|seq| seq.usage_key.clone()),
        );

        keys
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::keys::CourseKey;
    use crate::models::outline::{
        CourseLearningSequenceData, CourseSectionData, VisibilityData,
    };
    use crate::models::viewer::ViewerContext;
    use chrono::Utc;

    fn context(key: &CourseKey) -> ProcessorContext {
        ProcessorContext {
            course_key: key.clone(),
            viewer: ViewerContext::learner("student"),
            at_time: Utc::now(),
        }
    }

    fn seq(key: &CourseKey, id: &str, visibility: VisibilityData) -> CourseLearningSequenceData {
        CourseLearningSequenceData {
            usage_key: key.make_usage_key("sequential", id),
            title: id.to_string(),
            visibility,
        }
    }

    #[test]
    fn test_flagged_sections_and_sequences_collected() {
        let key: CourseKey = "course-v1:Open+Learn+Run".parse().unwrap();
        let hidden = VisibilityData {
            hide_from_toc: true,
            visible_to_staff_only: false,
        };
        let staff_only = VisibilityData {
            hide_from_toc: false,
            visible_to_staff_only: true,
        };

        let outline = CourseOutlineData::new(
            key.clone(),
            "Visibility Course",
            Utc::now(),
            "v1",
            vec![
                CourseSectionData {
                    usage_key: key.make_usage_key("chapter", "open_ch"),
                    title: "Open".to_string(),
                    visibility: VisibilityData::default(),
                    sequences: vec![
                        seq(&key, "open_seq", VisibilityData::default()),
                        seq(&key, "hidden_seq", hidden),
                        seq(&key, "staff_seq", staff_only),
                    ],
                },
                CourseSectionData {
                    usage_key: key.make_usage_key("chapter", "staff_ch"),
                    title: "Staff".to_string(),
                    visibility: staff_only,
                    sequences: vec![seq(&key, "inner_seq", VisibilityData::default())],
                },
            ],
        )
        .unwrap();

        let processor = VisibilityOutlineProcessor::new(&context(&key));
        let to_remove = processor.usage_keys_to_remove(&outline);

        assert_eq!(to_remove.len(), 3);
        assert!(to_remove.contains(&key.make_usage_key("sequential", "hidden_seq")));
        assert!(to_remove.contains(&key.make_usage_key("sequential", "staff_seq")));
        assert!(to_remove.contains(&key.make_usage_key("chapter", "staff_ch")));
        // The sequence inside the staff-only section is not itself flagged;
        // it disappears anyway when `remove` drops its whole section.
        assert!(!to_remove.contains(&key.make_usage_key("sequential", "inner_seq")));
    }

    #[test]
    fn test_nothing_flagged_means_nothing_removed() {
        let key: CourseKey = "course-v1:Open+Learn+Run".parse().unwrap();
        let outline = CourseOutlineData::new(
            key.clone(),
            "Plain Course",
            Utc::now(),
            "v1",
            vec![CourseSectionData {
                usage_key: key.make_usage_key("chapter", "ch1"),
                title: "Chapter 1".to_string(),
                visibility: VisibilityData::default(),
                sequences: vec![seq(&key, "seq_1_0", VisibilityData::default())],
            }],
        )
        .unwrap();

        let processor = VisibilityOutlineProcessor::new(&context(&key));
        assert!(processor.usage_keys_to_remove(&outline).is_empty());
        assert!(processor.inaccessible_sequences(&outline).is_empty());
    }
}
