use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::Request;
use axum::http::Response;
use axum::middleware;
use axum::routing::get;
use axum::routing::post;
use axum::routing::put;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::health::health;
use super::handlers::login::login;
use super::handlers::logout::logout;
use super::handlers::me::get_me;
use super::handlers::me::update_me;
use super::handlers::refresh::refresh;
use super::handlers::register::register;
use super::handlers::validate_token::validate_token;
use super::middleware::authenticate as auth_middleware;
use crate::domain::auth::service::AuthService;
use crate::outbound::repositories::user::PostgresUserRepository;
use crate::outbound::token_store::redis::RedisTokenStore;

#[derive(Clone)]
pub struct AppState {
    pub auth_service: Arc<AuthService<PostgresUserRepository, RedisTokenStore>>,
}

pub fn create_router(
    auth_service: Arc<AuthService<PostgresUserRepository, RedisTokenStore>>,
) -> Router {
    let state = AppState { auth_service };

    // Logout is "public" in routing terms: it accepts any bearer token,
    // including expired ones, and still reports success.
    let public_routes = Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/validate-token", post(validate_token))
        .route("/refresh", post(refresh))
        .route("/logout", post(logout))
        .route("/health", get(health));

    let protected_routes = Router::new()
        .route("/me", get(get_me))
        .route("/me", put(update_me))
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
