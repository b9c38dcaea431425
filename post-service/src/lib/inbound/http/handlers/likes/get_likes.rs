use axum::extract::Path;
use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::domain::post::models::PostId;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::router::AppState;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LikesCountResponse {
    pub likes_count: i64,
}

pub async fn get_likes(
    State(state): State<AppState>,
    Path(post_id): Path<i64>,
) -> Result<Json<LikesCountResponse>, ApiError> {
    let likes_count = state.post_service.likes_count(PostId(post_id)).await?;

    Ok(Json(LikesCountResponse { likes_count }))
}
