//! Domain Layer - Core Entity Trait
//!
//! This trait defines the basic contract for all domain entities.
//! All entities must have a unique ID and be thread-safe.

use serde::Serialize;
use thiserror::Error;

/// Core trait for all domain entities
pub trait Entity: Sized + Send + Sync + Clone {
    /// The type of the entity's unique identifier
    type Id: Copy + Eq + std::hash::Hash + Send + Sync;

    /// Returns the entity's unique identifier
    fn id(&self) -> Self::Id;
}

/// Common result type for domain operations
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level errors
///
/// Lookups that may legitimately miss return `Ok(None)`; `NotFound` is kept
/// for call sites that require the row to exist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Error)]
pub enum DomainError {
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),
    #[error("Query failed: {0}")]
    Query(String),
}

impl DomainError {
    /// Stable machine-readable name, used in HTTP error bodies
    pub fn kind(&self) -> &'static str {
        match self {
            DomainError::NotFound(_) => "NotFound",
            DomainError::InvalidInput(_) => "InvalidInput",
            DomainError::ConstraintViolation(_) => "ConstraintViolation",
            DomainError::Query(_) => "QueryFailure",
        }
    }
}
