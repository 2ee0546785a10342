//! Repository implementations module.
//!
//! This module contains implementations of the `OutlineRepository` trait:
//! - `local`: In-memory implementation for unit testing and local development
//!
//! A relational backend would slot in here behind the same trait; the rest
//! of the crate only ever sees `Arc<dyn OutlineRepository>`.

pub mod local;

pub use local::LocalRepository;
