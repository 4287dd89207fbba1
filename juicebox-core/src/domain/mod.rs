//! Domain Layer
//!
//! Contains all domain entities and core abstractions.
//! This layer has no storage dependencies.

mod entity;
mod post;
mod tag;
mod user;

pub use entity::{DomainError, DomainResult, Entity};
pub use post::{NewPost, Post, PostUpdate};
pub use tag::{normalize_tag_names, PostTag, Tag};
pub use user::{Author, NewUser, User, UserUpdate};
