use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use thiserror::Error;

use super::ApiError;
use super::UserData;
use crate::domain::auth::errors::EmailError;
use crate::domain::auth::errors::UsernameError;
use crate::domain::auth::models::EmailAddress;
use crate::domain::auth::models::RegisterUserCommand;
use crate::domain::auth::models::Username;
use crate::inbound::http::router::AppState;

pub async fn register(
    State(state): State<AppState>,
    Json(body): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<UserData>), ApiError> {
    let user = state.auth_service.register(body.try_into_command()?).await?;

    Ok((StatusCode::CREATED, Json(UserData::from(&user))))
}

/// HTTP request body for registration (raw JSON)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RegisterRequest {
    email: String,
    username: String,
    password: String,
    first_name: String,
    last_name: String,
    #[serde(default)]
    phone: Option<String>,
    #[serde(default)]
    address: Option<String>,
}

#[derive(Debug, Clone, Error)]
enum ParseRegisterRequestError {
    #[error("Invalid email: {0}")]
    Email(#[from] EmailError),

    #[error("Invalid username: {0}")]
    Username(#[from] UsernameError),
}

impl RegisterRequest {
    fn try_into_command(self) -> Result<RegisterUserCommand, ParseRegisterRequestError> {
        let email = EmailAddress::new(self.email)?;
        let username = Username::new(self.username)?;
        Ok(RegisterUserCommand {
            email,
            username,
            password: self.password,
            first_name: self.first_name,
            last_name: self.last_name,
            phone: self.phone,
            address: self.address,
        })
    }
}

impl From<ParseRegisterRequestError> for ApiError {
    fn from(err: ParseRegisterRequestError) -> Self {
        ApiError::UnprocessableEntity(err.to_string())
    }
}
