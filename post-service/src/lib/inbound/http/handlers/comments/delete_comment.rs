use axum::extract::Path;
use axum::extract::State;
use axum::Extension;
use axum::Json;
use serde_json::json;
use serde_json::Value;

use crate::domain::comment::models::CommentId;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::middleware::CurrentUser;
use crate::inbound::http::router::AppState;

pub async fn delete_comment(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path(comment_id): Path<i64>,
) -> Result<Json<Value>, ApiError> {
    state
        .comment_service
        .delete_comment(CommentId(comment_id), &user)
        .await?;

    Ok(Json(json!({ "message": "Comment deleted successfully" })))
}
