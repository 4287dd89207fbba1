//! Post Repository Module
//!
//! - post_repo: creation, listing and updates
//! - hydrate: per-post author and tag loading

mod hydrate;
mod post_repo;

pub use post_repo::PostRepository;

pub(crate) use hydrate::{hydrate_post, post_exists};
