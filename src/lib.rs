//! Juicebox HTTP server
//!
//! Wires the repositories from `juicebox_core` into an axum router.

pub mod config;
pub mod error;
pub mod routes;

use std::sync::Arc;

use axum::Router;
use juicebox_core::repository::{PostRepository, TagRepository, UserRepository};
use juicebox_core::DbState;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

pub use config::Config;
pub use error::ApiError;

/// Shared handler state
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<UserRepository>,
    pub posts: Arc<PostRepository>,
    pub tags: Arc<TagRepository>,
}

impl AppState {
    pub fn new(db: &DbState) -> Self {
        let conn = db.connection();
        Self {
            users: Arc::new(UserRepository::new(conn.clone())),
            posts: Arc::new(PostRepository::new(conn.clone())),
            tags: Arc::new(TagRepository::new(conn)),
        }
    }
}

/// Build the `/api` router with request tracing
pub fn app(state: AppState) -> Router {
    Router::new()
        .nest("/api", routes::router())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Install the global subscriber; `RUST_LOG` overrides the default `info` filter
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}
