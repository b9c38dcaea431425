use async_trait::async_trait;

use super::errors::TokenValidatorError;
use super::models::AuthenticatedUser;

/// Resolves a bearer token to an identity.
///
/// The only implementation today asks the auth service over HTTP, but the
/// port keeps call sites unaware of that; a local verification cache could
/// slot in behind it without touching handlers.
#[async_trait]
pub trait TokenValidator: Send + Sync + 'static {
    async fn validate(&self, token: &str) -> Result<AuthenticatedUser, TokenValidatorError>;
}
