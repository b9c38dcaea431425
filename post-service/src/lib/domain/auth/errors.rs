use thiserror::Error;

/// Outcome of asking the auth service about a token.
///
/// `Unauthorized` means the auth service answered and rejected the token
/// (revoked, expired, malformed, or an unknown subject all look the same
/// from here). `ServiceUnavailable` means no answer was obtained at all.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenValidatorError {
    #[error("{0}")]
    Unauthorized(String),
    #[error("{0}")]
    ServiceUnavailable(String),
}
