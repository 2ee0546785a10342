//! Repository factory for dependency injection.
//!
//! This module provides utilities for creating repository instances based on
//! runtime configuration.

use std::sync::Arc;

use super::repository::{OutlineRepository, RepositoryResult};
use super::repositories::LocalRepository;

/// Repository backend selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepositoryType {
    /// In-memory repository for local development and testing
    Local,
}

impl RepositoryType {
    /// Parse repository type from string.
    ///
    /// # Arguments
    /// * `s` - String representation ("local")
    ///
    /// # Returns
    /// * `Ok(RepositoryType)` if valid
    /// * `Err` if invalid
    pub fn parse(s: &str) -> Result<Self, String> {
        match s.to_lowercase().as_str() {
            "local" => Ok(Self::Local),
            _ => Err(format!("Unknown repository type: {}", s)),
        }
    }

    /// Get repository type from environment.
    ///
    /// Reads the `OUTLINE_REPOSITORY_TYPE` environment variable. Defaults to
    /// `Local` if unset or unrecognized.
    pub fn from_env() -> Self {
        std::env::var("OUTLINE_REPOSITORY_TYPE")
            .ok()
            .and_then(|s| Self::parse(&s).ok())
            .unwrap_or(Self::Local)
    }
}

/// Factory for creating repository instances.
///
/// # Example
/// ```
/// use learning_outlines::db::{RepositoryFactory, RepositoryType};
///
/// let repo = RepositoryFactory::create(RepositoryType::Local).unwrap();
/// ```
pub struct RepositoryFactory;

impl RepositoryFactory {
    /// Create a repository instance based on type.
    pub fn create(repo_type: RepositoryType) -> RepositoryResult<Arc<dyn OutlineRepository>> {
        match repo_type {
            RepositoryType::Local => Ok(Self::create_local()),
        }
    }

    /// Create an in-memory local repository.
    pub fn create_local() -> Arc<dyn OutlineRepository> {
        Arc::new(LocalRepository::new())
    }

    /// Create a repository from environment configuration.
    pub fn from_env() -> RepositoryResult<Arc<dyn OutlineRepository>> {
        Self::create(RepositoryType::from_env())
    }
}
