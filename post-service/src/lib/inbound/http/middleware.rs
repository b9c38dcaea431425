use axum::extract::Request;
use axum::extract::State;
use axum::http::StatusCode;
use axum::http::{self};
use axum::middleware::Next;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use serde_json::json;

use crate::domain::auth::errors::TokenValidatorError;
use crate::domain::auth::models::AuthenticatedUser;
use crate::domain::auth::ports::TokenValidator;
use crate::inbound::http::router::AppState;

/// Extension type carrying the resolved caller for protected routes.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub AuthenticatedUser);

/// Middleware resolving the bearer token to an identity via the auth
/// service. A rejected token is a 401; not being able to ask is a 503.
pub async fn authenticate(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, Response> {
    let token = extract_bearer_token(&req)?;

    let user = state.token_validator.validate(token).await.map_err(|e| {
        let status = match &e {
            TokenValidatorError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            TokenValidatorError::ServiceUnavailable(_) => {
                tracing::error!(error = %e, "Token validation unavailable");
                StatusCode::SERVICE_UNAVAILABLE
            }
        };
        (status, Json(json!({ "message": e.to_string() }))).into_response()
    })?;

    req.extensions_mut().insert(CurrentUser(user));

    Ok(next.run(req).await)
}

pub fn extract_bearer_token(req: &Request) -> Result<&str, Response> {
    let auth_header = req
        .headers()
        .get(http::header::AUTHORIZATION)
        .ok_or_else(|| {
            (
                StatusCode::UNAUTHORIZED,
                Json(json!({
                    "message": "Missing Authorization header"
                })),
            )
                .into_response()
        })?;

    let auth_str = auth_header.to_str().map_err(|_| {
        (
            StatusCode::UNAUTHORIZED,
            Json(json!({
                "message": "Invalid Authorization header"
            })),
        )
            .into_response()
    })?;

    if !auth_str.starts_with("Bearer ") {
        return Err((
            StatusCode::UNAUTHORIZED,
            Json(json!({
                "message": "Invalid Authorization header format. Expected: Bearer <token>"
            })),
        )
            .into_response());
    }

    Ok(auth_str.trim_start_matches("Bearer "))
}
