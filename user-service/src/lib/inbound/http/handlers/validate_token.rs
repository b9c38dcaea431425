use axum::extract::State;
use axum::Json;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use crate::domain::auth::models::TokenValidation;
use crate::inbound::http::router::AppState;

/// Service-to-service validation endpoint.
///
/// Always answers 200 with the verdict in the body; an HTTP error here only
/// ever means the auth service's own infrastructure failed.
pub async fn validate_token(
    State(state): State<AppState>,
    Json(body): Json<ValidateTokenRequest>,
) -> Result<Json<ValidateTokenResponse>, ApiError> {
    let verdict = state.auth_service.validate(&body.token).await?;

    Ok(Json(verdict.into()))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ValidateTokenRequest {
    pub token: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidateTokenResponse {
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl From<TokenValidation> for ValidateTokenResponse {
    fn from(verdict: TokenValidation) -> Self {
        match verdict {
            TokenValidation::Valid {
                user_id,
                email,
                username,
            } => Self {
                valid: true,
                user_id: Some(user_id),
                email: Some(email),
                username: Some(username),
                message: None,
            },
            TokenValidation::Invalid { message } => Self {
                valid: false,
                user_id: None,
                email: None,
                username: None,
                message: Some(message),
            },
        }
    }
}
