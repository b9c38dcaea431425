use axum::extract::Path;
use axum::extract::State;
use axum::Json;

use crate::domain::post::models::PostId;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::PostData;
use crate::inbound::http::router::AppState;

/// Reading a post counts a view.
pub async fn get_post(
    State(state): State<AppState>,
    Path(post_id): Path<i64>,
) -> Result<Json<PostData>, ApiError> {
    let post = state.post_service.get_post(PostId(post_id)).await?;

    Ok(Json(PostData::from(&post)))
}
