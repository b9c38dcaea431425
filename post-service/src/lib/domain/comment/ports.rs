use async_trait::async_trait;

use super::errors::CommentError;
use super::models::Comment;
use super::models::CommentId;
use super::models::NewComment;
use crate::domain::post::models::PostId;

#[async_trait]
pub trait CommentRepository: Send + Sync + 'static {
    async fn create(&self, comment: NewComment) -> Result<Comment, CommentError>;

    /// Approved comments only, newest first.
    async fn list_approved(&self, post_id: PostId) -> Result<Vec<Comment>, CommentError>;

    /// Deletes the comment if the caller wrote it; reports whether a row
    /// went away.
    async fn delete(&self, id: CommentId, author_id: i64) -> Result<bool, CommentError>;
}
