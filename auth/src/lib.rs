//! Authentication utilities library
//!
//! Provides reusable authentication infrastructure for microservices:
//! - Password hashing (Argon2id)
//! - JWT token issuance and verification (access/refresh pairs)
//! - Authentication coordination
//!
//! Each service defines its own authentication traits and adapts these
//! implementations. This avoids coupling services through shared domain logic
//! while reducing code duplication.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! let is_valid = hasher.verify("my_password", &hash).unwrap();
//! assert!(is_valid);
//! ```
//!
//! ## JWT Tokens
//! ```
//! use auth::{JwtHandler, TokenType};
//! use chrono::Duration;
//!
//! let handler = JwtHandler::new(b"secret_key_at_least_32_bytes_long!");
//! let token = handler
//!     .issue("alice@example.com", TokenType::Access, Duration::minutes(30))
//!     .unwrap();
//! let claims = handler.verify(&token).unwrap();
//! assert_eq!(claims.sub, "alice@example.com");
//! ```
//!
//! ## Complete Authentication Flow
//! ```
//! use auth::Authenticator;
//! use chrono::Duration;
//!
//! let auth = Authenticator::new(b"secret_key_at_least_32_bytes_long!");
//!
//! // Register: hash password
//! let hash = auth.hash_password("password123").unwrap();
//!
//! // Login: verify credentials, then mint an access/refresh pair
//! auth.authenticate("password123", &hash).unwrap();
//! let pair = auth
//!     .issue_pair("alice@example.com", Duration::minutes(30), Duration::days(7))
//!     .unwrap();
//!
//! // Validate the access token
//! let claims = auth.verify_token(&pair.access_token).unwrap();
//! assert_eq!(claims.sub, "alice@example.com");
//! ```

pub mod authenticator;
pub mod jwt;
pub mod password;

// Re-export commonly used items
pub use authenticator::AuthenticationError;
pub use authenticator::Authenticator;
pub use authenticator::TokenPair;
pub use jwt::JwtError;
pub use jwt::JwtHandler;
pub use jwt::TokenClaims;
pub use jwt::TokenType;
pub use password::PasswordError;
pub use password::PasswordHasher;
