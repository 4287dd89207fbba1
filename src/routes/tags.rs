use axum::extract::{Path, State};
use axum::Json;
use serde_json::{json, Value};

use crate::{ApiError, AppState};

pub async fn list_tags(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    let tags = state.tags.list().await?;
    Ok(Json(json!({ "tags": tags })))
}

/// Unknown tag names yield an empty list
pub async fn list_posts_by_tag(
    State(state): State<AppState>,
    Path(tag_name): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let posts = state.posts.list_by_tag_name(&tag_name).await?;
    Ok(Json(json!({ "posts": posts })))
}
