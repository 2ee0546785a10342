//! Course outline storage, caching, and viewer-specific filtering.
//!
//! This crate maintains a per-course outline — the navigable tree of
//! sections and learning sequences — and serves it filtered for a specific
//! viewer at a specific time:
//!
//! - [`models`]: immutable, validated outline data model
//! - [`db`]: repository abstraction plus the version-checked process-local
//!   cache ([`db::OutlineStore`])
//! - [`processors`]: pluggable visibility/accessibility rules
//! - [`services`]: the public resolve/replace API
//!
//! HTTP presentation, authentication, and the authoring pipeline that
//! produces new outline versions are external collaborators.

pub mod db;
pub mod models;
pub mod processors;
pub mod services;
