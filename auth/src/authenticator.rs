use chrono::Duration;

use crate::jwt::JwtError;
use crate::jwt::JwtHandler;
use crate::jwt::TokenClaims;
use crate::jwt::TokenType;
use crate::password::PasswordError;
use crate::password::PasswordHasher;

/// Authentication coordinator combining password verification and token pairs.
///
/// Services inject this where they need credential checks or token issuance;
/// revocation state lives with the service, not here.
pub struct Authenticator {
    password_hasher: PasswordHasher,
    jwt_handler: JwtHandler,
}

/// Access/refresh pair minted together at login or rotation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

/// Authentication operation errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthenticationError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Password error: {0}")]
    PasswordError(#[from] PasswordError),

    #[error("JWT error: {0}")]
    JwtError(#[from] JwtError),
}

impl Authenticator {
    /// Create a new authenticator signing tokens with `jwt_secret`.
    pub fn new(jwt_secret: &[u8]) -> Self {
        Self {
            password_hasher: PasswordHasher::new(),
            jwt_handler: JwtHandler::new(jwt_secret),
        }
    }

    /// Hash a password for storage.
    ///
    /// # Errors
    /// * `PasswordError` - Hashing operation failed
    pub fn hash_password(&self, password: &str) -> Result<String, PasswordError> {
        self.password_hasher.hash(password)
    }

    /// Verify a plaintext password against a stored hash.
    ///
    /// # Errors
    /// * `InvalidCredentials` - Password does not match
    /// * `PasswordError` - Stored hash is not parseable
    pub fn authenticate(
        &self,
        password: &str,
        stored_hash: &str,
    ) -> Result<(), AuthenticationError> {
        let is_valid = self.password_hasher.verify(password, stored_hash)?;

        if !is_valid {
            return Err(AuthenticationError::InvalidCredentials);
        }

        Ok(())
    }

    /// Mint an access/refresh pair for `subject`.
    ///
    /// # Errors
    /// * `JwtError` - Token encoding failed
    pub fn issue_pair(
        &self,
        subject: &str,
        access_ttl: Duration,
        refresh_ttl: Duration,
    ) -> Result<TokenPair, JwtError> {
        let access_token = self.jwt_handler.issue(subject, TokenType::Access, access_ttl)?;
        let refresh_token = self
            .jwt_handler
            .issue(subject, TokenType::Refresh, refresh_ttl)?;

        Ok(TokenPair {
            access_token,
            refresh_token,
        })
    }

    /// Verify a token's signature and expiry and decode its claims.
    ///
    /// # Errors
    /// * `JwtError` - Expired, bad signature, or malformed
    pub fn verify_token(&self, token: &str) -> Result<TokenClaims, JwtError> {
        self.jwt_handler.verify(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn authenticator() -> Authenticator {
        Authenticator::new(b"test_secret_key_at_least_32_bytes!")
    }

    #[test]
    fn test_authenticate_success() {
        let auth = authenticator();

        let hash = auth.hash_password("my_password").expect("Failed to hash");
        auth.authenticate("my_password", &hash)
            .expect("Authentication failed");
    }

    #[test]
    fn test_authenticate_invalid_password() {
        let auth = authenticator();

        let hash = auth.hash_password("my_password").expect("Failed to hash");
        let result = auth.authenticate("wrong_password", &hash);
        assert!(matches!(
            result,
            Err(AuthenticationError::InvalidCredentials)
        ));
    }

    #[test]
    fn test_issue_pair_mints_distinct_typed_tokens() {
        let auth = authenticator();

        let pair = auth
            .issue_pair(
                "alice@example.com",
                Duration::minutes(30),
                Duration::days(7),
            )
            .expect("Failed to issue pair");

        assert_ne!(pair.access_token, pair.refresh_token);

        let access = auth
            .verify_token(&pair.access_token)
            .expect("Failed to verify access token");
        assert_eq!(access.token_type, TokenType::Access);
        assert_eq!(access.sub, "alice@example.com");

        let refresh = auth
            .verify_token(&pair.refresh_token)
            .expect("Failed to verify refresh token");
        assert_eq!(refresh.token_type, TokenType::Refresh);
        assert!(refresh.exp > access.exp);
    }

    #[test]
    fn test_verify_invalid_token() {
        let auth = authenticator();

        let result = auth.verify_token("invalid.token.here");
        assert!(result.is_err());
    }
}
