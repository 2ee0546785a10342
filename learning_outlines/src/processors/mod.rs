//! Pluggable outline filtering rules.
//!
//! An [`OutlineProcessor`] is one independent visibility/accessibility rule.
//! Each processor gets a one-time [`OutlineProcessor::load_data`] call and
//! then contributes two key sets: sequences the viewer cannot access at all,
//! and items to drop from the outline outright. The resolver unions every
//! set across all registered processors and applies a single
//! [`crate::models::CourseOutlineData::remove`], so processors are
//! order-insensitive: each one computes against the untouched full outline,
//! never against another processor's partial result.
//!
//! None of the filter methods run for a privileged (staff) viewer; the
//! resolver short-circuits before building any processor.

pub mod visibility;

use std::collections::HashSet;

use chrono::{DateTime, Utc};

use crate::models::keys::{CourseKey, UsageKey};
use crate::models::outline::CourseOutlineData;
use crate::models::viewer::ViewerContext;

pub use visibility::VisibilityOutlineProcessor;

/// What every processor is instantiated with for one resolve call.
#[derive(Debug, Clone)]
pub struct ProcessorContext {
    pub course_key: CourseKey,
    pub viewer: ViewerContext,
    pub at_time: DateTime<Utc>,
}

/// One pluggable filtering rule.
///
/// Implementations must stay cheap: `load_data` runs once per resolve and
/// has a budget of tens of milliseconds even for large courses. Do not walk
/// full content trees or call remote services here; the whole point of the
/// outline subsystem is to avoid that work on the read path. If everything a
/// rule needs is already in the `CourseOutlineData`, the default no-op
/// `load_data` is enough.
pub trait OutlineProcessor: Send {
    /// One-time data load for this resolve call. Default: no-op.
    fn load_data(&mut self, _full_outline: &CourseOutlineData) {}

    /// Sequences the viewer cannot access at all — distinct from merely
    /// hidden. Never invoked for staff. Default: empty.
    fn inaccessible_sequences(&self, _full_outline: &CourseOutlineData) -> HashSet<UsageKey> {
        HashSet::new()
    }

    /// Sections and/or sequences to drop from the outline outright. Never
    /// invoked for staff. Default: empty.
    fn usage_keys_to_remove(&self, _full_outline: &CourseOutlineData) -> HashSet<UsageKey> {
        HashSet::new()
    }
}

/// Factory producing a fresh processor for one resolve call.
pub type ProcessorFactory = fn(&ProcessorContext) -> Box<dyn OutlineProcessor>;

/// Ordered, named collection of processor factories.
///
/// New rule types are added by registering a factory here; the resolver
/// never has to change. Names key the per-processor results in
/// [`crate::services::outlines::UserCourseOutlineDetailsData`].
pub struct ProcessorRegistry {
    entries: Vec<(&'static str, ProcessorFactory)>,
}

impl ProcessorRegistry {
    /// An empty registry (no filtering beyond the staff short-circuit).
    pub fn empty() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Register a processor factory under a unique name.
    pub fn register(mut self, name: &'static str, factory: ProcessorFactory) -> Self {
        self.entries.push((name, factory));
        self
    }

    /// Number of registered processors.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Instantiate every registered processor for one resolve call.
    pub fn build(
        &self,
        context: &ProcessorContext,
    ) -> Vec<(&'static str, Box<dyn OutlineProcessor>)> {
        self.entries
            .iter()
            .map(|(name, factory)| (*name, factory(context)))
            .collect()
    }
}

impl Default for ProcessorRegistry {
    /// The standard pipeline: just the visibility processor.
    fn default() -> Self {
        Self::empty().register("visibility", |ctx| {
            Box::new(VisibilityOutlineProcessor::new(ctx))
        })
    }
}
