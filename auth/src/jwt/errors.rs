use thiserror::Error;

/// Error type for JWT operations.
///
/// Verification failures are kept distinct so callers can produce precise
/// responses; public endpoints may still collapse them into a generic
/// "invalid token" message.
#[derive(Debug, Clone, Error)]
pub enum JwtError {
    #[error("Failed to encode token: {0}")]
    EncodingFailed(String),

    #[error("Token is expired")]
    Expired,

    #[error("Token signature is invalid")]
    InvalidSignature,

    #[error("Token is malformed: {0}")]
    Malformed(String),
}
