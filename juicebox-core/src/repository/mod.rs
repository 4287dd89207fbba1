//! Repository Layer
//!
//! Data access abstractions and implementations.

mod db;
mod traits;
mod user_repo;

mod post;
mod tag;


pub use db::{drop_tables, init_db, run_migrations, DbState, SharedConnection};
pub use post::PostRepository;
pub use tag::{PostTagOperations, TagRepository};
pub use traits::Repository;
pub use user_repo::UserRepository;
