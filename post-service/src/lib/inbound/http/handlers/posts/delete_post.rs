use axum::extract::Path;
use axum::extract::State;
use axum::Extension;
use axum::Json;
use serde_json::json;
use serde_json::Value;

use crate::domain::post::models::PostId;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::middleware::CurrentUser;
use crate::inbound::http::router::AppState;

pub async fn delete_post(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path(post_id): Path<i64>,
) -> Result<Json<Value>, ApiError> {
    state
        .post_service
        .delete_post(PostId(post_id), &user)
        .await?;

    Ok(Json(json!({ "message": "Post deleted successfully" })))
}
