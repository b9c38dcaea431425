use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use sqlx::FromRow;
use sqlx::PgPool;

use crate::domain::comment::errors::CommentError;
use crate::domain::comment::models::Comment;
use crate::domain::comment::models::CommentId;
use crate::domain::comment::models::NewComment;
use crate::domain::comment::ports::CommentRepository;
use crate::domain::post::models::PostId;

pub struct PostgresCommentRepository {
    pool: PgPool,
}

impl PostgresCommentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct CommentRow {
    id: i64,
    post_id: i64,
    content: String,
    author_id: i64,
    author_email: String,
    author_username: String,
    is_approved: bool,
    created_at: DateTime<Utc>,
    updated_at: Option<DateTime<Utc>>,
}

impl CommentRow {
    fn into_comment(self) -> Comment {
        Comment {
            id: CommentId(self.id),
            post_id: PostId(self.post_id),
            content: self.content,
            author_id: self.author_id,
            author_email: self.author_email,
            author_username: self.author_username,
            is_approved: self.is_approved,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

const COMMENT_COLUMNS: &str = "id, post_id, content, author_id, author_email, \
                               author_username, is_approved, created_at, updated_at";

#[async_trait]
impl CommentRepository for PostgresCommentRepository {
    async fn create(&self, comment: NewComment) -> Result<Comment, CommentError> {
        let query = format!(
            r#"
            INSERT INTO comments (post_id, content, author_id, author_email, author_username)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {COMMENT_COLUMNS}
            "#
        );

        let row = sqlx::query_as::<_, CommentRow>(&query)
            .bind(comment.post_id.0)
            .bind(&comment.content)
            .bind(comment.author_id)
            .bind(&comment.author_email)
            .bind(&comment.author_username)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| CommentError::Database(e.to_string()))?;

        Ok(row.into_comment())
    }

    async fn list_approved(&self, post_id: PostId) -> Result<Vec<Comment>, CommentError> {
        let query = format!(
            r#"
            SELECT {COMMENT_COLUMNS}
            FROM comments
            WHERE post_id = $1 AND is_approved
            ORDER BY created_at DESC
            "#
        );

        let rows = sqlx::query_as::<_, CommentRow>(&query)
            .bind(post_id.0)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| CommentError::Database(e.to_string()))?;

        Ok(rows.into_iter().map(CommentRow::into_comment).collect())
    }

    async fn delete(&self, id: CommentId, author_id: i64) -> Result<bool, CommentError> {
        let result = sqlx::query("DELETE FROM comments WHERE id = $1 AND author_id = $2")
            .bind(id.0)
            .bind(author_id)
            .execute(&self.pool)
            .await
            .map_err(|e| CommentError::Database(e.to_string()))?;

        Ok(result.rows_affected() > 0)
    }
}
