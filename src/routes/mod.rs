//! Route table
//!
//! Handlers only translate between HTTP and the repositories.

mod posts;
mod tags;
mod users;

use axum::routing::get;
use axum::Router;
use juicebox_core::domain::Entity;
use juicebox_core::repository::Repository;

use crate::{ApiError, AppState};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/tags", get(tags::list_tags))
        .route("/tags/{tag_name}/posts", get(tags::list_posts_by_tag))
        .route("/users", get(users::list_users).post(users::create_user))
        .route(
            "/users/{id}",
            get(users::get_user).patch(users::update_user),
        )
        .route("/users/{id}/posts", get(users::list_user_posts))
        .route("/posts", get(posts::list_posts).post(posts::create_post))
        .route(
            "/posts/{id}",
            get(posts::get_post).patch(posts::update_post),
        )
}

/// Look up one entity, turning a miss into a 404
async fn fetch<T, R>(repo: &R, id: T::Id, what: &str) -> Result<T, ApiError>
where
    T: Entity,
    T::Id: std::fmt::Display,
    R: Repository<T> + ?Sized,
{
    repo.find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("{} {} not found", what, id)))
}
