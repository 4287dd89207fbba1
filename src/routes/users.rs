use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use juicebox_core::domain::{NewUser, User, UserUpdate};
use juicebox_core::repository::Repository;
use juicebox_core::DomainError;
use serde_json::{json, Value};

use super::fetch;
use crate::{ApiError, AppState};

pub async fn list_users(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    let users = state.users.list().await?;
    Ok(Json(json!({ "users": users })))
}

pub async fn create_user(
    State(state): State<AppState>,
    Json(new_user): Json<NewUser>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    match state.users.create(&new_user).await? {
        Some(user) => {
            tracing::info!(id = user.id, username = %user.username, "user created");
            Ok((StatusCode::CREATED, Json(json!({ "user": user }))))
        }
        None => Err(ApiError(DomainError::ConstraintViolation(format!(
            "username {} is already taken",
            new_user.username
        )))),
    }
}

pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Value>, ApiError> {
    let user: User = fetch(state.users.as_ref(), id, "user").await?;
    Ok(Json(json!({ "user": user })))
}

/// An empty body changes nothing and reports 404, like a missing id
pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(changes): Json<UserUpdate>,
) -> Result<Json<Value>, ApiError> {
    let user = state
        .users
        .update(id, &changes)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("user {} not updated", id)))?;
    Ok(Json(json!({ "user": user })))
}

pub async fn list_user_posts(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Value>, ApiError> {
    let posts = state.posts.list_by_author(id).await?;
    Ok(Json(json!({ "posts": posts })))
}
