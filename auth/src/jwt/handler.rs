use chrono::Duration;
use chrono::Utc;
use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;

use super::claims::TokenClaims;
use super::claims::TokenType;
use super::errors::JwtError;

/// JWT token codec.
///
/// Issues and verifies compact signed tokens carrying a subject, a type tag
/// and a time window. Uses HS256 (HMAC with SHA-256) with a process-wide
/// secret. Pure apart from reading the clock at issuance.
pub struct JwtHandler {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
}

impl JwtHandler {
    /// Create a new JWT handler with a secret key.
    ///
    /// # Security Notes
    /// - The secret should be at least 256 bits (32 bytes) for HS256
    /// - Store secrets in environment variables or secure vaults, never in code
    pub fn new(secret: &[u8]) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            algorithm: Algorithm::HS256,
        }
    }

    /// Issue a signed token for `subject`.
    ///
    /// Embeds issued-at and expires-at timestamps; `ttl` may be negative,
    /// which produces an already-expired token (useful in tests).
    ///
    /// # Errors
    /// * `EncodingFailed` - Token encoding failed
    pub fn issue(
        &self,
        subject: &str,
        token_type: TokenType,
        ttl: Duration,
    ) -> Result<String, JwtError> {
        let now = Utc::now();
        let claims = TokenClaims {
            sub: subject.to_string(),
            token_type,
            iat: now.timestamp(),
            exp: (now + ttl).timestamp(),
        };

        let header = Header::new(self.algorithm);
        encode(&header, &claims, &self.encoding_key)
            .map_err(|e| JwtError::EncodingFailed(e.to_string()))
    }

    /// Verify a token's signature and expiry and decode its claims.
    ///
    /// Expiry is checked with zero leeway, so an expired-but-well-formed
    /// token always yields `Expired` rather than a generic failure.
    ///
    /// # Errors
    /// * `Expired` - Embedded expiry has passed
    /// * `InvalidSignature` - Signature does not match the secret
    /// * `Malformed` - Not a parseable token
    pub fn verify(&self, token: &str) -> Result<TokenClaims, JwtError> {
        let mut validation = Validation::new(self.algorithm);
        validation.leeway = 0;

        let token_data =
            decode::<TokenClaims>(token, &self.decoding_key, &validation).map_err(|e| {
                match e.kind() {
                    ErrorKind::ExpiredSignature => JwtError::Expired,
                    ErrorKind::InvalidSignature => JwtError::InvalidSignature,
                    _ => JwtError::Malformed(e.to_string()),
                }
            })?;

        Ok(token_data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn handler() -> JwtHandler {
        JwtHandler::new(b"my_secret_key_at_least_32_bytes_long!")
    }

    #[test]
    fn test_issue_and_verify() {
        let handler = handler();

        let token = handler
            .issue("alice@example.com", TokenType::Access, Duration::minutes(30))
            .expect("Failed to issue token");
        assert!(!token.is_empty());

        let claims = handler.verify(&token).expect("Failed to verify token");
        assert_eq!(claims.sub, "alice@example.com");
        assert_eq!(claims.token_type, TokenType::Access);
        assert_eq!(claims.exp - claims.iat, 30 * 60);
    }

    #[test]
    fn test_verify_expired_token() {
        let handler = handler();

        let token = handler
            .issue("alice@example.com", TokenType::Access, Duration::minutes(-5))
            .expect("Failed to issue token");

        let result = handler.verify(&token);
        assert!(matches!(result, Err(JwtError::Expired)));
    }

    #[test]
    fn test_verify_with_wrong_secret() {
        let handler1 = JwtHandler::new(b"secret1_at_least_32_bytes_long_key!");
        let handler2 = JwtHandler::new(b"secret2_at_least_32_bytes_long_key!");

        let token = handler1
            .issue("alice@example.com", TokenType::Refresh, Duration::days(7))
            .expect("Failed to issue token");

        let result = handler2.verify(&token);
        assert!(matches!(result, Err(JwtError::InvalidSignature)));
    }

    #[test]
    fn test_verify_malformed_token() {
        let handler = handler();

        let result = handler.verify("not.a.token");
        assert!(matches!(result, Err(JwtError::Malformed(_))));
    }

    #[test]
    fn test_type_tag_round_trips() {
        let handler = handler();

        let refresh = handler
            .issue("alice@example.com", TokenType::Refresh, Duration::days(7))
            .expect("Failed to issue token");

        let claims = handler.verify(&refresh).expect("Failed to verify token");
        assert_eq!(claims.token_type, TokenType::Refresh);
    }
}
