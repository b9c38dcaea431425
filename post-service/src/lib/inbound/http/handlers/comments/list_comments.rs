use axum::extract::Path;
use axum::extract::State;
use axum::Json;

use crate::domain::post::models::PostId;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::CommentData;
use crate::inbound::http::router::AppState;

/// Approved comments for a post, newest first.
pub async fn list_comments(
    State(state): State<AppState>,
    Path(post_id): Path<i64>,
) -> Result<Json<Vec<CommentData>>, ApiError> {
    let comments = state.comment_service.list_comments(PostId(post_id)).await?;

    Ok(Json(comments.iter().map(CommentData::from).collect()))
}
