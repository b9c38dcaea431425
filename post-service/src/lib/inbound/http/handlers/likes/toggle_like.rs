use axum::extract::Path;
use axum::extract::State;
use axum::Extension;
use axum::Json;
use serde::Serialize;

use crate::domain::post::models::PostId;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::middleware::CurrentUser;
use crate::inbound::http::router::AppState;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ToggleLikeResponse {
    pub liked: bool,
    pub likes_count: i64,
    pub message: String,
}

pub async fn toggle_like(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path(post_id): Path<i64>,
) -> Result<Json<ToggleLikeResponse>, ApiError> {
    let status = state
        .post_service
        .toggle_like(PostId(post_id), user.user_id)
        .await?;

    let message = if status.liked { "Liked" } else { "Unliked" };

    Ok(Json(ToggleLikeResponse {
        liked: status.liked,
        likes_count: status.likes_count,
        message: message.to_string(),
    }))
}
