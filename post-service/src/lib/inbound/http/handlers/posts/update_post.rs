use axum::extract::Path;
use axum::extract::State;
use axum::Extension;
use axum::Json;
use serde::Deserialize;

use super::validate_content;
use super::validate_summary;
use super::validate_title;
use super::ParsePostRequestError;
use crate::domain::post::models::PostId;
use crate::domain::post::models::UpdatePostCommand;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::PostData;
use crate::inbound::http::middleware::CurrentUser;
use crate::inbound::http::router::AppState;

#[derive(Debug, Clone, Deserialize)]
pub struct UpdatePostRequest {
    title: Option<String>,
    content: Option<String>,
    summary: Option<String>,
    is_published: Option<bool>,
    is_featured: Option<bool>,
}

impl UpdatePostRequest {
    fn try_into_command(self) -> Result<UpdatePostCommand, ParsePostRequestError> {
        if let Some(title) = &self.title {
            validate_title(title)?;
        }
        if let Some(content) = &self.content {
            validate_content(content)?;
        }
        if let Some(summary) = &self.summary {
            validate_summary(summary)?;
        }

        Ok(UpdatePostCommand {
            title: self.title,
            content: self.content,
            summary: self.summary,
            is_published: self.is_published,
            is_featured: self.is_featured,
        })
    }
}

pub async fn update_post(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path(post_id): Path<i64>,
    Json(body): Json<UpdatePostRequest>,
) -> Result<Json<PostData>, ApiError> {
    let command = body
        .try_into_command()
        .map_err(|e| ApiError::UnprocessableEntity(e.to_string()))?;

    let post = state
        .post_service
        .update_post(PostId(post_id), command, &user)
        .await?;

    Ok(Json(PostData::from(&post)))
}
