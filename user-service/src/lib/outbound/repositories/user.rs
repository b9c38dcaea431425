use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use sqlx::FromRow;
use sqlx::PgPool;

use crate::domain::auth::errors::AuthError;
use crate::domain::auth::models::EmailAddress;
use crate::domain::auth::models::NewUser;
use crate::domain::auth::models::UpdateProfileCommand;
use crate::domain::auth::models::User;
use crate::domain::auth::models::UserId;
use crate::domain::auth::models::Username;
use crate::domain::auth::ports::UserRepository;

pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct UserRow {
    id: i64,
    email: String,
    username: String,
    password_hash: String,
    first_name: String,
    last_name: String,
    phone: Option<String>,
    address: Option<String>,
    is_active: bool,
    is_verified: bool,
    created_at: DateTime<Utc>,
    updated_at: Option<DateTime<Utc>>,
}

impl UserRow {
    fn into_user(self) -> Result<User, AuthError> {
        Ok(User {
            id: UserId(self.id),
            email: EmailAddress::new(self.email)?,
            username: Username::new(self.username)?,
            password_hash: self.password_hash,
            first_name: self.first_name,
            last_name: self.last_name,
            phone: self.phone,
            address: self.address,
            is_active: self.is_active,
            is_verified: self.is_verified,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

const USER_COLUMNS: &str = "id, email, username, password_hash, first_name, last_name, \
                            phone, address, is_active, is_verified, created_at, updated_at";

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn create(&self, user: NewUser) -> Result<User, AuthError> {
        let query = format!(
            r#"
            INSERT INTO users (email, username, password_hash, first_name, last_name, phone, address)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {USER_COLUMNS}
            "#
        );

        let row = sqlx::query_as::<_, UserRow>(&query)
            .bind(user.email.as_str())
            .bind(user.username.as_str())
            .bind(&user.password_hash)
            .bind(&user.first_name)
            .bind(&user.last_name)
            .bind(&user.phone)
            .bind(&user.address)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                if let Some(db_err) = e.as_database_error() {
                    // Uniqueness lives in the schema so concurrent
                    // registrations cannot race past a pre-check.
                    if db_err.is_unique_violation() {
                        return AuthError::DuplicateIdentity;
                    }
                }
                AuthError::Database(e.to_string())
            })?;

        row.into_user()
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AuthError> {
        let query = format!("SELECT {USER_COLUMNS} FROM users WHERE email = $1");

        let row = sqlx::query_as::<_, UserRow>(&query)
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AuthError::Database(e.to_string()))?;

        row.map(UserRow::into_user).transpose()
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, AuthError> {
        let query = format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1");

        let row = sqlx::query_as::<_, UserRow>(&query)
            .bind(id.0)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AuthError::Database(e.to_string()))?;

        row.map(UserRow::into_user).transpose()
    }

    async fn update_profile(
        &self,
        id: UserId,
        command: UpdateProfileCommand,
    ) -> Result<User, AuthError> {
        let query = format!(
            r#"
            UPDATE users
            SET first_name = COALESCE($2, first_name),
                last_name = COALESCE($3, last_name),
                phone = COALESCE($4, phone),
                address = COALESCE($5, address),
                updated_at = NOW()
            WHERE id = $1
            RETURNING {USER_COLUMNS}
            "#
        );

        let row = sqlx::query_as::<_, UserRow>(&query)
            .bind(id.0)
            .bind(&command.first_name)
            .bind(&command.last_name)
            .bind(&command.phone)
            .bind(&command.address)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AuthError::Database(e.to_string()))?;

        match row {
            Some(row) => row.into_user(),
            None => Err(AuthError::NotFound(id.to_string())),
        }
    }
}
