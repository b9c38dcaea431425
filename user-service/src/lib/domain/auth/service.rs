use std::sync::Arc;

use auth::AuthenticationError;
use auth::Authenticator;
use auth::TokenPair;
use auth::TokenType;
use chrono::Duration;
use chrono::Utc;

use crate::domain::auth::errors::AuthError;
use crate::domain::auth::models::NewUser;
use crate::domain::auth::models::RegisterUserCommand;
use crate::domain::auth::models::TokenMetadata;
use crate::domain::auth::models::TokenValidation;
use crate::domain::auth::models::UpdateProfileCommand;
use crate::domain::auth::models::User;
use crate::domain::auth::models::UserId;
use crate::domain::auth::ports::TokenStore;
use crate::domain::auth::ports::UserRepository;

/// Auth orchestration service.
///
/// Drives the token pair lifecycle: registration, login, cross-service
/// validation, refresh rotation, and logout revocation. All cross-request
/// state lives in the injected revocation store; this type itself is
/// stateless apart from configuration.
pub struct AuthService<UR, TS>
where
    UR: UserRepository,
    TS: TokenStore,
{
    repository: Arc<UR>,
    token_store: Arc<TS>,
    authenticator: Authenticator,
    access_ttl: Duration,
    refresh_ttl: Duration,
}

impl<UR, TS> AuthService<UR, TS>
where
    UR: UserRepository,
    TS: TokenStore,
{
    /// Create a new auth service with injected dependencies.
    ///
    /// # Arguments
    /// * `repository` - User persistence implementation
    /// * `token_store` - Shared revocation store implementation
    /// * `jwt_secret` - Process-wide token signing secret
    /// * `access_ttl` - Access token lifetime
    /// * `refresh_ttl` - Refresh token lifetime
    pub fn new(
        repository: Arc<UR>,
        token_store: Arc<TS>,
        jwt_secret: &[u8],
        access_ttl: Duration,
        refresh_ttl: Duration,
    ) -> Self {
        Self {
            repository,
            token_store,
            authenticator: Authenticator::new(jwt_secret),
            access_ttl,
            refresh_ttl,
        }
    }

    /// Register a new user.
    ///
    /// Duplicate email or username surfaces as `DuplicateIdentity` from the
    /// store's uniqueness constraint; there is no racy pre-check.
    ///
    /// # Errors
    /// * `DuplicateIdentity` - Email or username already registered
    /// * `Password` - Hashing failed
    /// * `Database` - Storage operation failed
    pub async fn register(&self, command: RegisterUserCommand) -> Result<User, AuthError> {
        let password_hash = self.authenticator.hash_password(&command.password)?;

        self.repository
            .create(NewUser {
                email: command.email,
                username: command.username,
                password_hash,
                first_name: command.first_name,
                last_name: command.last_name,
                phone: command.phone,
                address: command.address,
            })
            .await
    }

    /// Verify credentials and mint a fresh access/refresh pair.
    ///
    /// Both tokens are recorded as active metadata in the revocation store
    /// with TTLs equal to their lifetimes. Unknown email and wrong password
    /// are indistinguishable to the caller.
    ///
    /// # Errors
    /// * `InvalidCredentials` - Email unknown or password mismatch
    /// * `TokenIssuance` - Token encoding failed
    /// * `TokenStore` / `Database` - Infrastructure failure
    pub async fn login(&self, email: &str, password: &str) -> Result<TokenPair, AuthError> {
        let user = self
            .repository
            .find_by_email(email)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        self.authenticator
            .authenticate(password, &user.password_hash)
            .map_err(|e| match e {
                AuthenticationError::InvalidCredentials => AuthError::InvalidCredentials,
                AuthenticationError::PasswordError(err) => AuthError::Password(err),
                AuthenticationError::JwtError(err) => AuthError::TokenIssuance(err.to_string()),
            })?;

        let pair = self.mint_pair(&user)?;
        self.record_pair(&user, &pair).await?;

        Ok(pair)
    }

    /// Validate a token on behalf of another service.
    ///
    /// Never fails for validation reasons; every verdict is data. The check
    /// order is an observable contract: blacklist, then signature/expiry,
    /// then type, then subject resolution.
    ///
    /// # Errors
    /// * `TokenStore` / `Database` - Infrastructure failure only
    pub async fn validate(&self, token: &str) -> Result<TokenValidation, AuthError> {
        if self.token_store.is_blacklisted(token).await? {
            return Ok(TokenValidation::invalid("Token has been revoked"));
        }

        // Expired, bad-signature and malformed are deliberately collapsed so
        // the public endpoint does not leak which check failed.
        let claims = match self.authenticator.verify_token(token) {
            Ok(claims) => claims,
            Err(_) => return Ok(TokenValidation::invalid("Invalid or expired token")),
        };

        if claims.token_type != TokenType::Access {
            return Ok(TokenValidation::invalid("Invalid token type"));
        }

        match self.repository.find_by_email(&claims.sub).await? {
            Some(user) => Ok(TokenValidation::Valid {
                user_id: user.id.0,
                email: user.email.as_str().to_string(),
                username: user.username.as_str().to_string(),
            }),
            None => Ok(TokenValidation::invalid("User not found")),
        }
    }

    /// Resolve a bearer access token to its user, or fail with a 401-class
    /// error. Same checks as `validate`, but for in-service use.
    ///
    /// # Errors
    /// * `TokenRevoked` - Token is blacklisted
    /// * `InvalidToken` - Expired, malformed, wrong type, or unknown subject
    /// * `TokenStore` / `Database` - Infrastructure failure
    pub async fn authorize(&self, token: &str) -> Result<User, AuthError> {
        if self.token_store.is_blacklisted(token).await? {
            return Err(AuthError::TokenRevoked);
        }

        let claims = self
            .authenticator
            .verify_token(token)
            .map_err(|_| AuthError::InvalidToken("Invalid or expired token".to_string()))?;

        if claims.token_type != TokenType::Access {
            return Err(AuthError::InvalidToken("Invalid token type".to_string()));
        }

        self.repository
            .find_by_email(&claims.sub)
            .await?
            .ok_or_else(|| AuthError::InvalidToken("User not found".to_string()))
    }

    /// Exchange a refresh token for a new pair, rotating the old one.
    ///
    /// The presented token is blacklisted for its remaining lifetime before
    /// this method returns, so a captured refresh token is usable exactly
    /// once. Concurrent refreshes of one not-yet-blacklisted token remain
    /// racy; at most one effectively wins.
    ///
    /// # Errors
    /// * `TokenRevoked` - Token was already rotated or logged out
    /// * `InvalidToken` - Expired, malformed, wrong type, or unknown subject
    /// * `TokenIssuance` - Token encoding failed
    /// * `TokenStore` / `Database` - Infrastructure failure
    pub async fn refresh(&self, token: &str) -> Result<TokenPair, AuthError> {
        if self.token_store.is_blacklisted(token).await? {
            return Err(AuthError::TokenRevoked);
        }

        let claims = self
            .authenticator
            .verify_token(token)
            .map_err(|_| AuthError::InvalidToken("Invalid refresh token".to_string()))?;

        if claims.token_type != TokenType::Refresh {
            return Err(AuthError::InvalidToken("Invalid token type".to_string()));
        }

        let user = self
            .repository
            .find_by_email(&claims.sub)
            .await?
            .ok_or_else(|| AuthError::InvalidToken("User not found".to_string()))?;

        let pair = self.mint_pair(&user)?;

        // Rotation: the old token must be unusable before the new pair is
        // handed out.
        let remaining = claims.remaining_seconds(Utc::now().timestamp());
        self.token_store
            .blacklist(token, Duration::seconds(remaining))
            .await?;

        self.record_pair(&user, &pair).await?;

        tracing::info!(user_id = user.id.0, "Refresh token rotated");

        Ok(pair)
    }

    /// Revoke a token for its remaining lifetime.
    ///
    /// Idempotent: a malformed or already-expired token is already unusable,
    /// so logout still reports success.
    ///
    /// # Errors
    /// * `TokenStore` - Store operation failed
    pub async fn logout(&self, token: &str) -> Result<(), AuthError> {
        let claims = match self.authenticator.verify_token(token) {
            Ok(claims) => claims,
            // Goal is "this token cannot be used again", which already holds.
            Err(_) => return Ok(()),
        };

        let remaining = claims.remaining_seconds(Utc::now().timestamp());
        if remaining > 0 {
            self.token_store
                .blacklist(token, Duration::seconds(remaining))
                .await?;
        }

        Ok(())
    }

    /// Retrieve a user by id.
    ///
    /// # Errors
    /// * `NotFound` - User does not exist
    /// * `Database` - Storage operation failed
    pub async fn get_user(&self, id: UserId) -> Result<User, AuthError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(AuthError::NotFound(id.to_string()))
    }

    /// Apply a partial profile update.
    ///
    /// # Errors
    /// * `NotFound` - User does not exist
    /// * `Database` - Storage operation failed
    pub async fn update_profile(
        &self,
        id: UserId,
        command: UpdateProfileCommand,
    ) -> Result<User, AuthError> {
        self.repository.update_profile(id, command).await
    }

    fn mint_pair(&self, user: &User) -> Result<TokenPair, AuthError> {
        self.authenticator
            .issue_pair(user.email.as_str(), self.access_ttl, self.refresh_ttl)
            .map_err(|e| AuthError::TokenIssuance(e.to_string()))
    }

    async fn record_pair(&self, user: &User, pair: &TokenPair) -> Result<(), AuthError> {
        let access_metadata = TokenMetadata {
            user_id: user.id.0,
            email: user.email.as_str().to_string(),
            token_type: TokenType::Access,
        };
        self.token_store
            .record_active(&pair.access_token, &access_metadata, self.access_ttl)
            .await?;

        let refresh_metadata = TokenMetadata {
            token_type: TokenType::Refresh,
            ..access_metadata
        };
        self.token_store
            .record_active(&pair.refresh_token, &refresh_metadata, self.refresh_ttl)
            .await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use auth::JwtHandler;
    use auth::PasswordHasher;
    use chrono::Utc;
    use mockall::mock;
    use mockall::predicate::*;

    use super::*;
    use crate::domain::auth::models::EmailAddress;
    use crate::domain::auth::models::Username;

    const SECRET: &[u8] = b"test-secret-key-for-jwt-signing-at-least-32-bytes";

    mock! {
        pub TestUserRepository {}

        #[async_trait::async_trait]
        impl UserRepository for TestUserRepository {
            async fn create(&self, user: NewUser) -> Result<User, AuthError>;
            async fn find_by_email(&self, email: &str) -> Result<Option<User>, AuthError>;
            async fn find_by_id(&self, id: UserId) -> Result<Option<User>, AuthError>;
            async fn update_profile(
                &self,
                id: UserId,
                command: UpdateProfileCommand,
            ) -> Result<User, AuthError>;
        }
    }

    mock! {
        pub TestTokenStore {}

        #[async_trait::async_trait]
        impl TokenStore for TestTokenStore {
            async fn record_active(
                &self,
                token: &str,
                metadata: &TokenMetadata,
                ttl: Duration,
            ) -> Result<(), TokenStoreError>;
            async fn blacklist(&self, token: &str, ttl: Duration) -> Result<(), TokenStoreError>;
            async fn is_blacklisted(&self, token: &str) -> Result<bool, TokenStoreError>;
        }
    }

    use crate::domain::auth::errors::TokenStoreError;

    fn alice(password_hash: String) -> User {
        User {
            id: UserId(1),
            email: EmailAddress::new("a@x.com".to_string()).unwrap(),
            username: Username::new("alice".to_string()).unwrap(),
            password_hash,
            first_name: "Alice".to_string(),
            last_name: "Example".to_string(),
            phone: None,
            address: None,
            is_active: true,
            is_verified: false,
            created_at: Utc::now(),
            updated_at: None,
        }
    }

    fn hashed(password: &str) -> String {
        PasswordHasher::new().hash(password).unwrap()
    }

    fn service(
        repository: MockTestUserRepository,
        token_store: MockTestTokenStore,
    ) -> AuthService<MockTestUserRepository, MockTestTokenStore> {
        AuthService::new(
            Arc::new(repository),
            Arc::new(token_store),
            SECRET,
            Duration::minutes(30),
            Duration::days(7),
        )
    }

    #[tokio::test]
    async fn test_login_mints_distinct_pair_and_records_both() {
        let mut repository = MockTestUserRepository::new();
        let mut token_store = MockTestTokenStore::new();

        let user = alice(hashed("password123"));
        repository
            .expect_find_by_email()
            .with(eq("a@x.com"))
            .times(1)
            .returning(move |_| Ok(Some(user.clone())));

        token_store
            .expect_record_active()
            .withf(|_, metadata, _| {
                metadata.user_id == 1
                    && metadata.email == "a@x.com"
                    && metadata.token_type == TokenType::Access
            })
            .times(1)
            .returning(|_, _, _| Ok(()));
        token_store
            .expect_record_active()
            .withf(|_, metadata, _| metadata.token_type == TokenType::Refresh)
            .times(1)
            .returning(|_, _, _| Ok(()));

        let service = service(repository, token_store);

        let pair = service.login("a@x.com", "password123").await.unwrap();
        assert_ne!(pair.access_token, pair.refresh_token);
    }

    #[tokio::test]
    async fn test_login_unknown_email_is_invalid_credentials() {
        let mut repository = MockTestUserRepository::new();
        let token_store = MockTestTokenStore::new();

        repository
            .expect_find_by_email()
            .times(1)
            .returning(|_| Ok(None));

        let service = service(repository, token_store);

        let result = service.login("nobody@x.com", "password123").await;
        assert!(matches!(result, Err(AuthError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn test_login_wrong_password_is_invalid_credentials() {
        let mut repository = MockTestUserRepository::new();
        let token_store = MockTestTokenStore::new();

        let user = alice(hashed("password123"));
        repository
            .expect_find_by_email()
            .times(1)
            .returning(move |_| Ok(Some(user.clone())));

        let service = service(repository, token_store);

        let result = service.login("a@x.com", "wrong_password").await;
        assert!(matches!(result, Err(AuthError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn test_login_then_validate_resolves_identity() {
        let mut repository = MockTestUserRepository::new();
        let mut token_store = MockTestTokenStore::new();

        let user = alice(hashed("password123"));
        repository
            .expect_find_by_email()
            .with(eq("a@x.com"))
            .times(2)
            .returning(move |_| Ok(Some(user.clone())));

        token_store
            .expect_record_active()
            .times(2)
            .returning(|_, _, _| Ok(()));
        token_store
            .expect_is_blacklisted()
            .times(1)
            .returning(|_| Ok(false));

        let service = service(repository, token_store);

        let pair = service.login("a@x.com", "password123").await.unwrap();
        let verdict = service.validate(&pair.access_token).await.unwrap();

        assert_eq!(
            verdict,
            TokenValidation::Valid {
                user_id: 1,
                email: "a@x.com".to_string(),
                username: "alice".to_string(),
            }
        );
    }

    #[tokio::test]
    async fn test_validate_blacklisted_token_reports_revocation() {
        let repository = MockTestUserRepository::new();
        let mut token_store = MockTestTokenStore::new();

        // Blacklist is checked first, before any decoding, so even an
        // otherwise-valid (or garbage) token string gets the revoked verdict.
        token_store
            .expect_is_blacklisted()
            .times(1)
            .returning(|_| Ok(true));

        let service = service(repository, token_store);

        let verdict = service.validate("some-revoked-token").await.unwrap();
        assert_eq!(verdict, TokenValidation::invalid("Token has been revoked"));
    }

    #[tokio::test]
    async fn test_validate_expired_token_fails_without_blacklist_entry() {
        let repository = MockTestUserRepository::new();
        let mut token_store = MockTestTokenStore::new();

        token_store
            .expect_is_blacklisted()
            .times(1)
            .returning(|_| Ok(false));

        let expired = JwtHandler::new(SECRET)
            .issue("a@x.com", TokenType::Access, Duration::minutes(-5))
            .unwrap();

        let service = service(repository, token_store);

        let verdict = service.validate(&expired).await.unwrap();
        assert_eq!(
            verdict,
            TokenValidation::invalid("Invalid or expired token")
        );
    }

    #[tokio::test]
    async fn test_validate_rejects_refresh_token_type() {
        let repository = MockTestUserRepository::new();
        let mut token_store = MockTestTokenStore::new();

        token_store
            .expect_is_blacklisted()
            .times(1)
            .returning(|_| Ok(false));

        let refresh = JwtHandler::new(SECRET)
            .issue("a@x.com", TokenType::Refresh, Duration::days(7))
            .unwrap();

        let service = service(repository, token_store);

        let verdict = service.validate(&refresh).await.unwrap();
        assert_eq!(verdict, TokenValidation::invalid("Invalid token type"));
    }

    #[tokio::test]
    async fn test_validate_unknown_subject() {
        let mut repository = MockTestUserRepository::new();
        let mut token_store = MockTestTokenStore::new();

        token_store
            .expect_is_blacklisted()
            .times(1)
            .returning(|_| Ok(false));
        repository
            .expect_find_by_email()
            .times(1)
            .returning(|_| Ok(None));

        let token = JwtHandler::new(SECRET)
            .issue("ghost@x.com", TokenType::Access, Duration::minutes(30))
            .unwrap();

        let service = service(repository, token_store);

        let verdict = service.validate(&token).await.unwrap();
        assert_eq!(verdict, TokenValidation::invalid("User not found"));
    }

    #[tokio::test]
    async fn test_refresh_rotates_presented_token() {
        let mut repository = MockTestUserRepository::new();
        let mut token_store = MockTestTokenStore::new();

        let user = alice(hashed("password123"));
        repository
            .expect_find_by_email()
            .times(1)
            .returning(move |_| Ok(Some(user.clone())));

        let old_refresh = JwtHandler::new(SECRET)
            .issue("a@x.com", TokenType::Refresh, Duration::days(7))
            .unwrap();

        token_store
            .expect_is_blacklisted()
            .times(1)
            .returning(|_| Ok(false));

        // The presented token is blacklisted for its remaining lifetime.
        let rotated = old_refresh.clone();
        token_store
            .expect_blacklist()
            .withf(move |token, ttl| token == rotated && *ttl > Duration::zero())
            .times(1)
            .returning(|_, _| Ok(()));
        token_store
            .expect_record_active()
            .times(2)
            .returning(|_, _, _| Ok(()));

        let service = service(repository, token_store);

        let pair = service.refresh(&old_refresh).await.unwrap();
        assert_ne!(pair.refresh_token, old_refresh);
        assert_ne!(pair.access_token, pair.refresh_token);
    }

    #[tokio::test]
    async fn test_refresh_reuse_after_rotation_fails() {
        let repository = MockTestUserRepository::new();
        let mut token_store = MockTestTokenStore::new();

        // Second presentation of a rotated token: the blacklist now has it.
        token_store
            .expect_is_blacklisted()
            .times(1)
            .returning(|_| Ok(true));

        let old_refresh = JwtHandler::new(SECRET)
            .issue("a@x.com", TokenType::Refresh, Duration::days(7))
            .unwrap();

        let service = service(repository, token_store);

        let result = service.refresh(&old_refresh).await;
        assert!(matches!(result, Err(AuthError::TokenRevoked)));
    }

    #[tokio::test]
    async fn test_refresh_rejects_access_token() {
        let repository = MockTestUserRepository::new();
        let mut token_store = MockTestTokenStore::new();

        token_store
            .expect_is_blacklisted()
            .times(1)
            .returning(|_| Ok(false));

        let access = JwtHandler::new(SECRET)
            .issue("a@x.com", TokenType::Access, Duration::minutes(30))
            .unwrap();

        let service = service(repository, token_store);

        let result = service.refresh(&access).await;
        assert!(matches!(result, Err(AuthError::InvalidToken(_))));
    }

    #[tokio::test]
    async fn test_logout_blacklists_for_remaining_lifetime_only() {
        let repository = MockTestUserRepository::new();
        let mut token_store = MockTestTokenStore::new();

        token_store
            .expect_blacklist()
            .withf(|_, ttl| *ttl > Duration::zero() && *ttl <= Duration::minutes(30))
            .times(1)
            .returning(|_, _| Ok(()));

        let token = JwtHandler::new(SECRET)
            .issue("a@x.com", TokenType::Access, Duration::minutes(30))
            .unwrap();

        let service = service(repository, token_store);

        service.logout(&token).await.unwrap();
    }

    #[tokio::test]
    async fn test_logout_is_idempotent() {
        let repository = MockTestUserRepository::new();
        let mut token_store = MockTestTokenStore::new();

        token_store
            .expect_blacklist()
            .times(2)
            .returning(|_, _| Ok(()));

        let token = JwtHandler::new(SECRET)
            .issue("a@x.com", TokenType::Access, Duration::minutes(30))
            .unwrap();

        let service = service(repository, token_store);

        service.logout(&token).await.unwrap();
        service.logout(&token).await.unwrap();
    }

    #[tokio::test]
    async fn test_logout_expired_token_succeeds_without_store_write() {
        let repository = MockTestUserRepository::new();
        let mut token_store = MockTestTokenStore::new();

        token_store.expect_blacklist().times(0);

        let expired = JwtHandler::new(SECRET)
            .issue("a@x.com", TokenType::Access, Duration::minutes(-5))
            .unwrap();

        let service = service(repository, token_store);

        service.logout(&expired).await.unwrap();
        service.logout("garbage-token").await.unwrap();
    }

    #[tokio::test]
    async fn test_register_duplicate_identity() {
        let mut repository = MockTestUserRepository::new();
        let token_store = MockTestTokenStore::new();

        repository
            .expect_create()
            .times(1)
            .returning(|_| Err(AuthError::DuplicateIdentity));

        let service = service(repository, token_store);

        let command = RegisterUserCommand {
            email: EmailAddress::new("a@x.com".to_string()).unwrap(),
            username: Username::new("alice".to_string()).unwrap(),
            password: "password123".to_string(),
            first_name: "Alice".to_string(),
            last_name: "Example".to_string(),
            phone: None,
            address: None,
        };

        let result = service.register(command).await;
        assert!(matches!(result, Err(AuthError::DuplicateIdentity)));
    }

    #[tokio::test]
    async fn test_register_hashes_password() {
        let mut repository = MockTestUserRepository::new();
        let token_store = MockTestTokenStore::new();

        repository
            .expect_create()
            .withf(|new_user| {
                new_user.password_hash.starts_with("$argon2")
                    && new_user.password_hash != "password123"
            })
            .times(1)
            .returning(|new_user| {
                let mut user = alice(new_user.password_hash);
                user.email = new_user.email;
                user.username = new_user.username;
                Ok(user)
            });

        let service = service(repository, token_store);

        let command = RegisterUserCommand {
            email: EmailAddress::new("a@x.com".to_string()).unwrap(),
            username: Username::new("alice".to_string()).unwrap(),
            password: "password123".to_string(),
            first_name: "Alice".to_string(),
            last_name: "Example".to_string(),
            phone: None,
            address: None,
        };

        let user = service.register(command).await.unwrap();
        assert_eq!(user.username.as_str(), "alice");
    }

    #[tokio::test]
    async fn test_authorize_revoked_token() {
        let repository = MockTestUserRepository::new();
        let mut token_store = MockTestTokenStore::new();

        token_store
            .expect_is_blacklisted()
            .times(1)
            .returning(|_| Ok(true));

        let service = service(repository, token_store);

        let result = service.authorize("revoked-token").await;
        assert!(matches!(result, Err(AuthError::TokenRevoked)));
    }
}
