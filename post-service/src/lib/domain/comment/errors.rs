use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommentError {
    #[error("Post not found")]
    PostNotFound,
    #[error("Comment not found or not authorized")]
    NotFoundOrUnauthorized,
    #[error("Database error: {0}")]
    Database(String),
}
