use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum::Json;
use serde::Deserialize;

use crate::domain::post::models::PostId;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::CommentData;
use crate::inbound::http::middleware::CurrentUser;
use crate::inbound::http::router::AppState;

const CONTENT_MAX_LENGTH: usize = 1000;

#[derive(Debug, Clone, Deserialize)]
pub struct CreateCommentRequest {
    content: String,
}

pub async fn create_comment(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path(post_id): Path<i64>,
    Json(body): Json<CreateCommentRequest>,
) -> Result<(StatusCode, Json<CommentData>), ApiError> {
    let length = body.content.chars().count();
    if length == 0 || length > CONTENT_MAX_LENGTH {
        return Err(ApiError::UnprocessableEntity(
            "Comment content must be between 1 and 1000 characters".to_string(),
        ));
    }

    let comment = state
        .comment_service
        .create_comment(PostId(post_id), body.content, &user)
        .await?;

    Ok((StatusCode::CREATED, Json(CommentData::from(&comment))))
}
