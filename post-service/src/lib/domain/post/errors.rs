use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PostError {
    #[error("Post not found")]
    NotFound,
    // Ownership checks never reveal whether the post exists.
    #[error("Post not found or not authorized")]
    NotFoundOrUnauthorized,
    #[error("Database error: {0}")]
    Database(String),
}

/// Cache failures are reported by the port but never surfaced to callers;
/// the service logs them and falls through to the database.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CacheError {
    #[error("Cache backend error: {0}")]
    Backend(String),
    #[error("Cache serialization error: {0}")]
    Serialization(String),
}
