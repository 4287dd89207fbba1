//! Tag Repository Module
//!
//! - tag_repo: tag resolution (insert-if-absent, then read back) and listing
//! - post_tag: Post-Tag relationship statements

mod post_tag;
mod tag_repo;

pub use post_tag::PostTagOperations;
pub use tag_repo::TagRepository;

pub(crate) use post_tag::{attach_tags, replace_post_tags, tags_for_post};
pub(crate) use tag_repo::resolve_tags;
