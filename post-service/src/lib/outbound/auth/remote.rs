use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use serde::Serialize;

use crate::domain::auth::errors::TokenValidatorError;
use crate::domain::auth::models::AuthenticatedUser;
use crate::domain::auth::ports::TokenValidator;

/// Asks the auth service for a verdict on a bearer token.
///
/// One synchronous round-trip per call, bounded by the client timeout, no
/// retries. A request that never reaches the auth service is reported as
/// `ServiceUnavailable`, never as a rejection.
pub struct HttpTokenValidator {
    client: reqwest::Client,
    base_url: String,
}

#[derive(Debug, Serialize)]
struct ValidateTokenRequest<'a> {
    token: &'a str,
}

#[derive(Debug, Deserialize)]
struct ValidateTokenResponse {
    valid: bool,
    user_id: Option<i64>,
    email: Option<String>,
    username: Option<String>,
    message: Option<String>,
}

impl HttpTokenValidator {
    pub fn new(base_url: String, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl TokenValidator for HttpTokenValidator {
    async fn validate(&self, token: &str) -> Result<AuthenticatedUser, TokenValidatorError> {
        let url = format!("{}/validate-token", self.base_url);

        let response = self
            .client
            .post(&url)
            .json(&ValidateTokenRequest { token })
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    TokenValidatorError::ServiceUnavailable("Auth service unavailable".to_string())
                } else {
                    tracing::error!(error = %e, "Auth service request failed");
                    TokenValidatorError::ServiceUnavailable(
                        "Auth service connection error".to_string(),
                    )
                }
            })?;

        if !response.status().is_success() {
            return Err(TokenValidatorError::Unauthorized("Invalid token".to_string()));
        }

        let verdict: ValidateTokenResponse = response.json().await.map_err(|e| {
            tracing::error!(error = %e, "Auth service returned an unreadable body");
            TokenValidatorError::ServiceUnavailable("Auth service unavailable".to_string())
        })?;

        if !verdict.valid {
            return Err(TokenValidatorError::Unauthorized(
                verdict.message.unwrap_or_else(|| "Invalid token".to_string()),
            ));
        }

        match (verdict.user_id, verdict.email, verdict.username) {
            (Some(user_id), Some(email), Some(username)) => Ok(AuthenticatedUser {
                user_id,
                email,
                username,
            }),
            // A positive verdict without an identity cannot be acted on.
            _ => Err(TokenValidatorError::ServiceUnavailable(
                "Auth service unavailable".to_string(),
            )),
        }
    }
}
