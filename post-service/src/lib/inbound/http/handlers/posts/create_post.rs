use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum::Json;
use serde::Deserialize;

use super::validate_content;
use super::validate_summary;
use super::validate_title;
use super::ParsePostRequestError;
use crate::domain::post::models::CreatePostCommand;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::PostData;
use crate::inbound::http::middleware::CurrentUser;
use crate::inbound::http::router::AppState;

#[derive(Debug, Clone, Deserialize)]
pub struct CreatePostRequest {
    title: String,
    content: String,
    summary: Option<String>,
    #[serde(default)]
    is_published: bool,
    #[serde(default)]
    is_featured: bool,
}

impl CreatePostRequest {
    fn try_into_command(self) -> Result<CreatePostCommand, ParsePostRequestError> {
        validate_title(&self.title)?;
        validate_content(&self.content)?;
        if let Some(summary) = &self.summary {
            validate_summary(summary)?;
        }

        Ok(CreatePostCommand {
            title: self.title,
            content: self.content,
            summary: self.summary,
            is_published: self.is_published,
            is_featured: self.is_featured,
        })
    }
}

pub async fn create_post(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Json(body): Json<CreatePostRequest>,
) -> Result<(StatusCode, Json<PostData>), ApiError> {
    let command = body
        .try_into_command()
        .map_err(|e| ApiError::UnprocessableEntity(e.to_string()))?;

    let post = state.post_service.create_post(command, &user).await?;

    Ok((StatusCode::CREATED, Json(PostData::from(&post))))
}
