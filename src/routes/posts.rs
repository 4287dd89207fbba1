use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use juicebox_core::domain::{NewPost, Post, PostUpdate};
use juicebox_core::repository::Repository;
use serde_json::{json, Value};

use super::fetch;
use crate::{ApiError, AppState};

pub async fn list_posts(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    let posts = state.posts.list().await?;
    Ok(Json(json!({ "posts": posts })))
}

/// Unknown `authorId` surfaces as a constraint violation (409)
pub async fn create_post(
    State(state): State<AppState>,
    Json(new_post): Json<NewPost>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let post = state.posts.create(&new_post).await?;
    tracing::info!(id = post.id, author = post.author.id, "post created");
    Ok((StatusCode::CREATED, Json(json!({ "post": post }))))
}

pub async fn get_post(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Value>, ApiError> {
    let post: Post = fetch(state.posts.as_ref(), id, "post").await?;
    Ok(Json(json!({ "post": post })))
}

pub async fn update_post(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(changes): Json<PostUpdate>,
) -> Result<Json<Value>, ApiError> {
    let post = state
        .posts
        .update(id, &changes)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("post {} not found", id)))?;
    Ok(Json(json!({ "post": post })))
}
