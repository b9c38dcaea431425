use axum::extract::Request;
use axum::extract::State;
use axum::Json;
use serde::Serialize;

use super::ApiError;
use crate::inbound::http::middleware::extract_bearer_token;
use crate::inbound::http::router::AppState;

/// Revoke the presented access token.
///
/// Succeeds regardless of the token's validity: an expired or malformed
/// token already cannot be used again, which is the whole point of logout.
pub async fn logout(
    State(state): State<AppState>,
    req: Request,
) -> Result<Json<LogoutResponse>, ApiError> {
    let token = extract_bearer_token(&req)
        .map_err(|_| ApiError::Unauthorized("Missing Authorization header".to_string()))?;

    state.auth_service.logout(token).await?;

    Ok(Json(LogoutResponse {
        message: "Successfully logged out".to_string(),
    }))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LogoutResponse {
    pub message: String,
}
