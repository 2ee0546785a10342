//! Viewer identity passed through the outline resolution pipeline.

use serde::{Deserialize, Serialize};

/// The identity an outline is being resolved for.
///
/// The resolver itself only needs the [`ViewerContext::has_unrestricted_access`]
/// predicate; everything else is opaque data carried through to processors.
/// Mapping a session or token to this struct is the caller's concern.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewerContext {
    pub username: String,
    pub is_staff: bool,
}

impl ViewerContext {
    /// A staff viewer: bypasses every outline processor.
    pub fn staff(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            is_staff: true,
        }
    }

    /// An ordinary learner: sees the filtered outline.
    pub fn learner(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            is_staff: false,
        }
    }

    /// Whether this viewer is exempt from all filtering.
    pub fn has_unrestricted_access(&self) -> bool {
        self.is_staff
    }
}
