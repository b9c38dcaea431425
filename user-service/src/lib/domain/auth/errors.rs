use thiserror::Error;

/// Error for Username validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum UsernameError {
    #[error("Username too short: minimum {min} characters, got {actual}")]
    TooShort { min: usize, actual: usize },

    #[error("Username too long: maximum {max} characters, got {actual}")]
    TooLong { max: usize, actual: usize },

    #[error(
        "Username contains invalid characters (only alphanumeric, underscore, and hyphen allowed)"
    )]
    InvalidCharacters,
}

/// Error for EmailAddress validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EmailError {
    #[error("Invalid email format: {0}")]
    InvalidFormat(String),
}

/// Error for revocation store operations
#[derive(Debug, Clone, Error)]
pub enum TokenStoreError {
    #[error("Failed to serialize token metadata: {0}")]
    SerializationFailed(String),

    #[error("Revocation store operation failed: {0}")]
    Backend(String),
}

/// Top-level error for all auth operations
#[derive(Debug, Clone, Error)]
pub enum AuthError {
    // Value object validation errors (automatically converted via #[from])
    #[error("Invalid username: {0}")]
    InvalidUsername(#[from] UsernameError),

    #[error("Invalid email: {0}")]
    InvalidEmail(#[from] EmailError),

    #[error("Password error: {0}")]
    Password(#[from] auth::PasswordError),

    // Domain-level errors
    #[error("Email or username already registered")]
    DuplicateIdentity,

    #[error("Incorrect email or password")]
    InvalidCredentials,

    #[error("{0}")]
    InvalidToken(String),

    #[error("Token has been revoked")]
    TokenRevoked,

    #[error("User not found: {0}")]
    NotFound(String),

    // Infrastructure errors
    #[error("Token issuance failed: {0}")]
    TokenIssuance(String),

    #[error("Revocation store error: {0}")]
    TokenStore(#[from] TokenStoreError),

    #[error("Database error: {0}")]
    Database(String),
}
