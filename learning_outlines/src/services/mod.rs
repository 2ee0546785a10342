pub mod outlines;

pub use outlines::{
    get_course_outline, get_user_course_outline, get_user_course_outline_details,
    replace_course_outline, ProcessorResult, UserCourseOutlineDetailsData,
};
