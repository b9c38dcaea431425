use axum::extract::Query;
use axum::extract::State;
use axum::Extension;
use axum::Json;
use serde::Deserialize;

use super::page_request;
use crate::domain::post::models::PostFilter;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::PageData;
use crate::inbound::http::middleware::CurrentUser;
use crate::inbound::http::router::AppState;

#[derive(Debug, Clone, Deserialize)]
pub struct MyPostsQuery {
    page: Option<i64>,
    size: Option<i64>,
    published_only: Option<bool>,
}

/// The caller's own posts; drafts are included unless filtered out.
pub async fn my_posts(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Query(query): Query<MyPostsQuery>,
) -> Result<Json<PageData>, ApiError> {
    let page = page_request(&state.pagination, query.page, query.size);

    let filter = PostFilter {
        published_only: query.published_only.unwrap_or(false),
        featured_only: false,
        author_id: Some(user.user_id),
        search: None,
    };

    let result = state.post_service.list_posts(filter, page).await?;

    Ok(Json(PageData::from(result)))
}
