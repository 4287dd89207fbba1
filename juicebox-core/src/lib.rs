//! Juicebox Backend
//!
//! Layered architecture:
//! - domain: Core entities and the error taxonomy
//! - repository: SQLite-backed users, posts and tags
//! - seed: demo data for a fresh database

pub mod domain;
pub mod password;
pub mod repository;
pub mod seed;

pub use domain::{DomainError, DomainResult};
pub use repository::{init_db, DbState};
