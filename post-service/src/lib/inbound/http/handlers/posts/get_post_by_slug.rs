use axum::extract::Path;
use axum::extract::State;
use axum::Json;

use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::PostData;
use crate::inbound::http::router::AppState;

/// Cached read path; a cache hit serves a snapshot without counting a view.
pub async fn get_post_by_slug(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<PostData>, ApiError> {
    let post = state.post_service.get_post_by_slug(&slug).await?;

    Ok(Json(PostData::from(&post)))
}
