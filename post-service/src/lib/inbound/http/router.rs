use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::Request;
use axum::http::Response;
use axum::middleware;
use axum::routing::delete;
use axum::routing::get;
use axum::routing::post;
use axum::routing::put;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::comments::create_comment::create_comment;
use super::handlers::comments::delete_comment::delete_comment;
use super::handlers::comments::list_comments::list_comments;
use super::handlers::health::health;
use super::handlers::likes::get_likes::get_likes;
use super::handlers::likes::toggle_like::toggle_like;
use super::handlers::posts::create_post::create_post;
use super::handlers::posts::delete_post::delete_post;
use super::handlers::posts::get_post::get_post;
use super::handlers::posts::get_post_by_slug::get_post_by_slug;
use super::handlers::posts::list_posts::list_posts;
use super::handlers::posts::my_posts::my_posts;
use super::handlers::posts::update_post::update_post;
use super::middleware::authenticate as auth_middleware;
use crate::config::PaginationConfig;
use crate::domain::comment::service::CommentService;
use crate::domain::post::service::PostService;
use crate::outbound::auth::HttpTokenValidator;
use crate::outbound::cache::RedisCacheStore;
use crate::outbound::repositories::PostgresCommentRepository;
use crate::outbound::repositories::PostgresLikeRepository;
use crate::outbound::repositories::PostgresPostRepository;

pub type Posts = PostService<PostgresPostRepository, PostgresLikeRepository, RedisCacheStore>;
pub type Comments = CommentService<PostgresCommentRepository, PostgresPostRepository>;

#[derive(Clone)]
pub struct AppState {
    pub post_service: Arc<Posts>,
    pub comment_service: Arc<Comments>,
    pub token_validator: Arc<HttpTokenValidator>,
    pub pagination: PaginationConfig,
}

pub fn create_router(
    post_service: Arc<Posts>,
    comment_service: Arc<Comments>,
    token_validator: Arc<HttpTokenValidator>,
    pagination: PaginationConfig,
) -> Router {
    let state = AppState {
        post_service,
        comment_service,
        token_validator,
        pagination,
    };

    let public_routes = Router::new()
        .route("/posts", get(list_posts))
        .route("/posts/:id", get(get_post))
        .route("/posts/slug/:slug", get(get_post_by_slug))
        .route("/posts/:id/comments", get(list_comments))
        .route("/posts/:id/likes", get(get_likes))
        .route("/health", get(health));

    let protected_routes = Router::new()
        .route("/posts", post(create_post))
        .route("/posts/:id", put(update_post))
        .route("/posts/:id", delete(delete_post))
        .route("/posts/:id/comments", post(create_comment))
        .route("/posts/:id/like", post(toggle_like))
        .route("/comments/:id", delete(delete_comment))
        .route("/my-posts", get(my_posts))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                version = ?request.version(),
            )
        })
        .on_request(|request: &Request<Body>, _span: &Span| {
            tracing::info!(
                method = %request.method(),
                uri = %request.uri(),
                "Request started"
            );
        })
        .on_response(
            |response: &Response<Body>, latency: Duration, _span: &Span| {
                tracing::info!(
                    status = response.status().as_u16(),
                    latency_ms = latency.as_millis(),
                    "Request completed"
                );
            },
        );

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(trace_layer)
        .layer(CorsLayer::permissive())
        .with_state(state)
}
