use serde::Deserialize;
use serde::Serialize;

/// Identity confirmed by the auth service for the current request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthenticatedUser {
    pub user_id: i64,
    pub email: String,
    pub username: String,
}
