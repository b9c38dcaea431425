use axum::extract::Query;
use axum::extract::State;
use axum::Json;
use serde::Deserialize;

use super::page_request;
use crate::domain::post::models::PostFilter;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::PageData;
use crate::inbound::http::router::AppState;

#[derive(Debug, Clone, Deserialize)]
pub struct ListPostsQuery {
    page: Option<i64>,
    size: Option<i64>,
    published_only: Option<bool>,
    featured_only: Option<bool>,
    author_id: Option<i64>,
    search: Option<String>,
}

pub async fn list_posts(
    State(state): State<AppState>,
    Query(query): Query<ListPostsQuery>,
) -> Result<Json<PageData>, ApiError> {
    let page = page_request(&state.pagination, query.page, query.size);

    let filter = PostFilter {
        published_only: query.published_only.unwrap_or(true),
        featured_only: query.featured_only.unwrap_or(false),
        author_id: query.author_id,
        search: query.search,
    };

    let result = state.post_service.list_posts(filter, page).await?;

    Ok(Json(PageData::from(result)))
}
