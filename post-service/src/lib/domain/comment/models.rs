use std::fmt::Display;

use chrono::DateTime;
use chrono::Utc;

use crate::domain::post::models::PostId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CommentId(pub i64);

impl Display for CommentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A comment on a post. Author identity is denormalized like on posts.
/// Comments are born approved; moderation only ever unapproves them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    pub id: CommentId,
    pub post_id: PostId,
    pub content: String,
    pub author_id: i64,
    pub author_email: String,
    pub author_username: String,
    pub is_approved: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewComment {
    pub post_id: PostId,
    pub content: String,
    pub author_id: i64,
    pub author_email: String,
    pub author_username: String,
}
