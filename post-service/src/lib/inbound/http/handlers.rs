use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use chrono::DateTime;
use chrono::Utc;
use serde::Serialize;

use crate::domain::auth::errors::TokenValidatorError;
use crate::domain::comment::errors::CommentError;
use crate::domain::comment::models::Comment;
use crate::domain::post::errors::PostError;
use crate::domain::post::models::Page;
use crate::domain::post::models::Post;
use crate::domain::post::models::PostListItem;

pub mod comments;
pub mod health;
pub mod likes;
pub mod posts;

/// HTTP-level error carrying a status and a message body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    InternalServerError(String),
    UnprocessableEntity(String),
    NotFound(String),
    Unauthorized(String),
    ServiceUnavailable(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::InternalServerError(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
            ApiError::UnprocessableEntity(msg) => (StatusCode::UNPROCESSABLE_ENTITY, msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
            ApiError::ServiceUnavailable(msg) => (StatusCode::SERVICE_UNAVAILABLE, msg),
        };

        (status, Json(ApiErrorBody { message })).into_response()
    }
}

impl From<PostError> for ApiError {
    fn from(err: PostError) -> Self {
        match err {
            PostError::NotFound | PostError::NotFoundOrUnauthorized => {
                ApiError::NotFound(err.to_string())
            }
            PostError::Database(_) => ApiError::InternalServerError(err.to_string()),
        }
    }
}

impl From<CommentError> for ApiError {
    fn from(err: CommentError) -> Self {
        match err {
            CommentError::PostNotFound | CommentError::NotFoundOrUnauthorized => {
                ApiError::NotFound(err.to_string())
            }
            CommentError::Database(_) => ApiError::InternalServerError(err.to_string()),
        }
    }
}

impl From<TokenValidatorError> for ApiError {
    fn from(err: TokenValidatorError) -> Self {
        match err {
            TokenValidatorError::Unauthorized(msg) => ApiError::Unauthorized(msg),
            TokenValidatorError::ServiceUnavailable(msg) => ApiError::ServiceUnavailable(msg),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiErrorBody {
    pub message: String,
}

/// Full post representation for detail endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PostData {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub summary: Option<String>,
    pub author_id: i64,
    pub author_email: String,
    pub author_username: String,
    pub slug: String,
    pub is_published: bool,
    pub is_featured: bool,
    pub view_count: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<&Post> for PostData {
    fn from(post: &Post) -> Self {
        Self {
            id: post.id.0,
            title: post.title.clone(),
            content: post.content.clone(),
            summary: post.summary.clone(),
            author_id: post.author_id,
            author_email: post.author_email.clone(),
            author_username: post.author_username.clone(),
            slug: post.slug.clone(),
            is_published: post.is_published,
            is_featured: post.is_featured,
            view_count: post.view_count,
            created_at: post.created_at,
            updated_at: post.updated_at,
        }
    }
}

/// Slimmer representation for list endpoints, with the comment tally.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PostListItemData {
    pub id: i64,
    pub title: String,
    pub summary: Option<String>,
    pub content: String,
    pub author_id: i64,
    pub author_username: String,
    pub slug: String,
    pub is_published: bool,
    pub is_featured: bool,
    pub view_count: i32,
    pub created_at: DateTime<Utc>,
    pub comments_count: i64,
}

impl From<PostListItem> for PostListItemData {
    fn from(item: PostListItem) -> Self {
        Self {
            id: item.id.0,
            title: item.title,
            summary: item.summary,
            content: item.content,
            author_id: item.author_id,
            author_username: item.author_username,
            slug: item.slug,
            is_published: item.is_published,
            is_featured: item.is_featured,
            view_count: item.view_count,
            created_at: item.created_at,
            comments_count: item.comments_count,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageData {
    pub items: Vec<PostListItemData>,
    pub total: i64,
    pub page: i64,
    pub size: i64,
    pub pages: i64,
}

impl From<Page<PostListItem>> for PageData {
    fn from(page: Page<PostListItem>) -> Self {
        Self {
            items: page.items.into_iter().map(Into::into).collect(),
            total: page.total,
            page: page.page,
            size: page.size,
            pages: page.pages,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommentData {
    pub id: i64,
    pub post_id: i64,
    pub content: String,
    pub author_id: i64,
    pub author_email: String,
    pub author_username: String,
    pub is_approved: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<&Comment> for CommentData {
    fn from(comment: &Comment) -> Self {
        Self {
            id: comment.id.0,
            post_id: comment.post_id.0,
            content: comment.content.clone(),
            author_id: comment.author_id,
            author_email: comment.author_email.clone(),
            author_username: comment.author_username.clone(),
            is_approved: comment.is_approved,
            created_at: comment.created_at,
            updated_at: comment.updated_at,
        }
    }
}
