use async_trait::async_trait;
use chrono::Duration;

use crate::domain::auth::errors::AuthError;
use crate::domain::auth::errors::TokenStoreError;
use crate::domain::auth::models::NewUser;
use crate::domain::auth::models::TokenMetadata;
use crate::domain::auth::models::UpdateProfileCommand;
use crate::domain::auth::models::User;
use crate::domain::auth::models::UserId;

/// Persistence operations for the user aggregate.
#[async_trait]
pub trait UserRepository: Send + Sync + 'static {
    /// Persist a new user.
    ///
    /// Uniqueness of email and username is enforced by the store itself, not
    /// by a pre-check, so concurrent registrations cannot race past it.
    ///
    /// # Errors
    /// * `DuplicateIdentity` - Email or username already present
    /// * `Database` - Storage operation failed
    async fn create(&self, user: NewUser) -> Result<User, AuthError>;

    /// Retrieve user by email address.
    ///
    /// # Errors
    /// * `Database` - Storage operation failed
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AuthError>;

    /// Retrieve user by identifier.
    ///
    /// # Errors
    /// * `Database` - Storage operation failed
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, AuthError>;

    /// Apply a partial profile update and return the updated user.
    ///
    /// # Errors
    /// * `NotFound` - User does not exist
    /// * `Database` - Storage operation failed
    async fn update_profile(
        &self,
        id: UserId,
        command: UpdateProfileCommand,
    ) -> Result<User, AuthError>;
}

/// Shared revocation store over token lifecycle state.
///
/// Entries are keyed by the raw token string and expire on their own; no
/// entry outlives its token's natural expiry. Single-key operations only, so
/// concurrent service instances need no coordination.
#[async_trait]
pub trait TokenStore: Send + Sync + 'static {
    /// Record metadata for a freshly issued token, expiring after `ttl`.
    ///
    /// # Errors
    /// * `SerializationFailed` - Metadata could not be encoded
    /// * `Backend` - Store operation failed
    async fn record_active(
        &self,
        token: &str,
        metadata: &TokenMetadata,
        ttl: Duration,
    ) -> Result<(), TokenStoreError>;

    /// Mark a token as revoked for the remainder of its natural life.
    ///
    /// A `ttl` of zero or less is a no-op: the token is already expired and
    /// needs no blacklist entry.
    ///
    /// # Errors
    /// * `Backend` - Store operation failed
    async fn blacklist(&self, token: &str, ttl: Duration) -> Result<(), TokenStoreError>;

    /// Check whether a token has been revoked.
    ///
    /// # Errors
    /// * `Backend` - Store operation failed
    async fn is_blacklisted(&self, token: &str) -> Result<bool, TokenStoreError>;
}
