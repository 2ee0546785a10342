//! Shared builders for outline integration tests.

use chrono::{TimeZone, Utc};
use learning_outlines::models::{
    CourseKey, CourseLearningSequenceData, CourseOutlineData, CourseSectionData, VisibilityData,
};

pub fn course_key() -> CourseKey {
    "course-v1:OpenLearn+Outlines+Roundtrip".parse().unwrap()
}

pub fn sequence(
    key: &CourseKey,
    id: &str,
    visibility: VisibilityData,
) -> CourseLearningSequenceData {
    CourseLearningSequenceData {
        usage_key: key.make_usage_key("sequential", id),
        title: format!("Seq {}: 🔥", id),
        visibility,
    }
}

pub fn section(
    key: &CourseKey,
    id: &str,
    sequences: Vec<CourseLearningSequenceData>,
) -> CourseSectionData {
    CourseSectionData {
        usage_key: key.make_usage_key("chapter", id),
        title: format!("Chapter {}: 🔥", id),
        visibility: VisibilityData::default(),
        sequences,
    }
}

/// Two sections with two normal sequences each.
pub fn roundtrip_outline() -> CourseOutlineData {
    let key = course_key();
    let normal = VisibilityData::default();
    let sections = (0..2)
        .map(|sec_num| {
            section(
                &key,
                &format!("ch{}", sec_num),
                (0..2)
                    .map(|seq_num| {
                        sequence(&key, &format!("seq_{}_{}", sec_num, seq_num), normal)
                    })
                    .collect(),
            )
        })
        .collect();

    CourseOutlineData::new(
        key,
        "Roundtrip Test Course! 🔥",
        Utc.with_ymd_and_hms(2026, 5, 20, 0, 0, 0).unwrap(),
        "5ebece4b69dd593d82fe2015",
        sections,
    )
    .unwrap()
}

/// Same course, different version token and slightly different structure.
pub fn roundtrip_outline_v2() -> CourseOutlineData {
    let key = course_key();
    CourseOutlineData::new(
        key.clone(),
        "Roundtrip Test Course! 🔥 (2nd ed.)",
        Utc.with_ymd_and_hms(2026, 6, 1, 0, 0, 0).unwrap(),
        "5ebece4b69dd593d82fe2016",
        vec![section(
            &key,
            "ch0",
            vec![sequence(&key, "seq_0_0", VisibilityData::default())],
        )],
    )
    .unwrap()
}
