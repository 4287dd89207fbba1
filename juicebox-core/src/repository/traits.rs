//! Repository Layer - Core Traits
//!
//! Defines the abstract interfaces for data access.

use async_trait::async_trait;

use crate::domain::{DomainResult, Entity};

/// Read and partial-update operations shared by users and posts
///
/// Creation differs per entity (users may silently conflict, posts may not),
/// so it lives on the concrete repositories.
#[async_trait]
pub trait Repository<T: Entity>: Send + Sync {
    /// Optional-field update struct for `T`
    type Changes: Send + Sync;

    /// Find a fully hydrated entity by ID
    async fn find_by_id(&self, id: T::Id) -> DomainResult<Option<T>>;

    /// List all entities
    async fn list(&self) -> DomainResult<Vec<T>>;

    /// Apply the present fields of `changes`; `None` when nothing was updated
    async fn update(&self, id: T::Id, changes: &Self::Changes) -> DomainResult<Option<T>>;
}
