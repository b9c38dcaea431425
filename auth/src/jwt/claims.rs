use std::fmt;

use serde::Deserialize;
use serde::Serialize;

/// Discriminates the two halves of a token pair.
///
/// Serialized into the token payload as `"type"` so verifiers can reject an
/// access token presented where a refresh token is required (and vice versa).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenType {
    /// Short-lived credential authorizing API calls.
    Access,
    /// Longer-lived credential used solely to mint new pairs.
    Refresh,
}

impl fmt::Display for TokenType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenType::Access => write!(f, "access"),
            TokenType::Refresh => write!(f, "refresh"),
        }
    }
}

/// Signed token payload.
///
/// Every field is mandatory; there is no catch-all claims map. The subject is
/// the user's email address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Subject (user email)
    pub sub: String,

    /// Token kind: access or refresh
    #[serde(rename = "type")]
    pub token_type: TokenType,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

impl TokenClaims {
    /// Check whether the embedded expiry has passed at `current_timestamp`.
    pub fn is_expired(&self, current_timestamp: i64) -> bool {
        self.exp < current_timestamp
    }

    /// Seconds of validity left at `current_timestamp`. Negative when expired.
    pub fn remaining_seconds(&self, current_timestamp: i64) -> i64 {
        self.exp - current_timestamp
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_type_serialization() {
        assert_eq!(
            serde_json::to_string(&TokenType::Access).unwrap(),
            "\"access\""
        );
        assert_eq!(
            serde_json::to_string(&TokenType::Refresh).unwrap(),
            "\"refresh\""
        );
    }

    #[test]
    fn test_claims_round_trip_uses_type_key() {
        let claims = TokenClaims {
            sub: "alice@example.com".to_string(),
            token_type: TokenType::Refresh,
            iat: 1000,
            exp: 2000,
        };

        let json = serde_json::to_value(&claims).unwrap();
        assert_eq!(json["type"], "refresh");
        assert_eq!(json["sub"], "alice@example.com");

        let decoded: TokenClaims = serde_json::from_value(json).unwrap();
        assert_eq!(decoded, claims);
    }

    #[test]
    fn test_is_expired() {
        let claims = TokenClaims {
            sub: "alice@example.com".to_string(),
            token_type: TokenType::Access,
            iat: 0,
            exp: 1000,
        };

        assert!(!claims.is_expired(999));
        assert!(!claims.is_expired(1000)); // Exactly at expiration
        assert!(claims.is_expired(1001));
    }

    #[test]
    fn test_remaining_seconds() {
        let claims = TokenClaims {
            sub: "alice@example.com".to_string(),
            token_type: TokenType::Access,
            iat: 0,
            exp: 1000,
        };

        assert_eq!(claims.remaining_seconds(400), 600);
        assert_eq!(claims.remaining_seconds(1500), -500);
    }
}
