use axum::extract::Request;
use axum::extract::State;
use axum::http::StatusCode;
use axum::http::{self};
use axum::middleware::Next;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use serde_json::json;

use crate::domain::auth::errors::AuthError;
use crate::domain::auth::models::User;
use crate::inbound::http::router::AppState;

/// Extension type carrying the resolved caller for protected routes.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

/// Middleware resolving the bearer access token to a user.
///
/// Runs the full check chain (blacklist, signature/expiry, type, subject)
/// through the auth service, so revocation is visible immediately.
pub async fn authenticate(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, Response> {
    let token = extract_bearer_token(&req)?;

    let user = state.auth_service.authorize(token).await.map_err(|e| {
        let (status, message) = match &e {
            AuthError::TokenRevoked | AuthError::InvalidToken(_) => {
                (StatusCode::UNAUTHORIZED, e.to_string())
            }
            _ => {
                tracing::error!(error = %e, "Authorization infrastructure failure");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };
        (status, Json(json!({ "message": message }))).into_response()
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
