use std::fmt;
use std::str::FromStr;

use auth::TokenType;
use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use crate::domain::auth::errors::EmailError;
use crate::domain::auth::errors::UsernameError;

/// User aggregate entity.
///
/// Identity record owned by the credential store; the password hash never
/// leaves the domain layer.
#[derive(Debug, Clone)]
pub struct User {
    pub id: UserId,
    pub email: EmailAddress,
    pub username: Username,
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub is_active: bool,
    pub is_verified: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// User unique identifier type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UserId(pub i64);

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Username value type
///
/// Ensures username is 3-32 characters and contains only alphanumeric,
/// underscore, and hyphen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Username(String);

impl Username {
    const MIN_LENGTH: usize = 3;
    const MAX_LENGTH: usize = 32;

    /// Create a new valid username.
    ///
    /// # Errors
    /// * `TooShort` - Username shorter than 3 characters
    /// * `TooLong` - Username longer than 32 characters
    /// * `InvalidCharacters` - Contains non-alphanumeric characters (except _ and -)
    pub fn new(username: String) -> Result<Self, UsernameError> {
        let username = Self::with_valid_length(username)?;
        let username = Self::with_valid_chars(username)?;
        Ok(Self(username))
    }

    fn with_valid_length(username: String) -> Result<String, UsernameError> {
        let length = username.len();
        if length < Self::MIN_LENGTH {
            Err(UsernameError::TooShort {
                min: Self::MIN_LENGTH,
                actual: length,
            })
        } else if length > Self::MAX_LENGTH {
            Err(UsernameError::TooLong {
                max: Self::MAX_LENGTH,
                actual: length,
            })
        } else {
            Ok(username)
        }
    }

    fn with_valid_chars(username: String) -> Result<String, UsernameError> {
        if username
            .chars()
            .all(|c| c.is_alphanumeric() || c == '_' || c == '-')
        {
            Ok(username)
        } else {
            Err(UsernameError::InvalidCharacters)
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Email address type
///
/// Validates email format using RFC 5322 compliant parser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Create a new validated email address.
    ///
    /// # Errors
    /// * `InvalidFormat` - Email does not conform to RFC 5322
    pub fn new(email: String) -> Result<Self, EmailError> {
        email_address::EmailAddress::from_str(&email)
            .map(|_| EmailAddress(email))
            .map_err(|e| EmailError::InvalidFormat(e.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Command to register a new user with validated identity fields.
#[derive(Debug)]
pub struct RegisterUserCommand {
    pub email: EmailAddress,
    pub username: Username,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: Option<String>,
    pub address: Option<String>,
}

/// Row to insert for a new user; the store assigns id and timestamps.
#[derive(Debug)]
pub struct NewUser {
    pub email: EmailAddress,
    pub username: Username,
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: Option<String>,
    pub address: Option<String>,
}

/// Command to update profile fields; `None` leaves a field unchanged.
#[derive(Debug, Default)]
pub struct UpdateProfileCommand {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
}

/// Metadata recorded in the revocation store while a token is live.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenMetadata {
    pub user_id: i64,
    pub email: String,
    #[serde(rename = "type")]
    pub token_type: TokenType,
}

/// Verdict of the cross-service token validation operation.
///
/// Validation never raises for a bad token; every failure is an `Invalid`
/// verdict with a message, so callers can relay it over the wire as data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenValidation {
    Valid {
        user_id: i64,
        email: String,
        username: String,
    },
    Invalid {
        message: String,
    },
}

impl TokenValidation {
    pub fn invalid(message: impl Into<String>) -> Self {
        TokenValidation::Invalid {
            message: message.into(),
        }
    }

    pub fn is_valid(&self) -> bool {
        matches!(self, TokenValidation::Valid { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_username_validation() {
        assert!(Username::new("alice".to_string()).is_ok());
        assert!(Username::new("al".to_string()).is_err());
        assert!(Username::new("a".repeat(33)).is_err());
        assert!(Username::new("alice!".to_string()).is_err());
        assert!(Username::new("alice_01-x".to_string()).is_ok());
    }

    #[test]
    fn test_email_validation() {
        assert!(EmailAddress::new("a@x.com".to_string()).is_ok());
        assert!(EmailAddress::new("not-an-email".to_string()).is_err());
    }

    #[test]
    fn test_token_metadata_serialization() {
        let metadata = TokenMetadata {
            user_id: 1,
            email: "a@x.com".to_string(),
            token_type: auth::TokenType::Access,
        };

        let json = serde_json::to_value(&metadata).unwrap();
        assert_eq!(json["user_id"], 1);
        assert_eq!(json["type"], "access");
    }
}
