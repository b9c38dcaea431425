use axum::extract::State;
use axum::Json;
use serde::Deserialize;

use super::ApiError;
use super::TokenPairData;
use crate::inbound::http::router::AppState;

pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> Result<Json<TokenPairData>, ApiError> {
    let pair = state.auth_service.login(&body.email, &body.password).await?;

    Ok(Json(pair.into()))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoginRequest {
    email: String,
    password: String,
}
