use async_trait::async_trait;
use sqlx::PgPool;

use crate::domain::post::errors::PostError;
use crate::domain::post::models::PostId;
use crate::domain::post::ports::LikeRepository;

pub struct PostgresLikeRepository {
    pool: PgPool,
}

impl PostgresLikeRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LikeRepository for PostgresLikeRepository {
    async fn toggle(&self, post_id: PostId, user_id: i64) -> Result<bool, PostError> {
        let result = sqlx::query("DELETE FROM post_likes WHERE post_id = $1 AND user_id = $2")
            .bind(post_id.0)
            .bind(user_id)
            .execute(&self.pool)
            .await
            .map_err(|e| PostError::Database(e.to_string()))?;

        if result.rows_affected() > 0 {
            return Ok(false);
        }

        // Two concurrent toggles can both reach the insert; the unique
        // constraint makes the second one a no-op instead of an error.
        sqlx::query(
            "INSERT INTO post_likes (post_id, user_id) VALUES ($1, $2) ON CONFLICT DO NOTHING",
        )
        .bind(post_id.0)
        .bind(user_id)
        .execute(&self.pool)
        .await
        .map_err(|e| PostError::Database(e.to_string()))?;

        Ok(true)
    }

    async fn count(&self, post_id: PostId) -> Result<i64, PostError> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM post_likes WHERE post_id = $1")
            .bind(post_id.0)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| PostError::Database(e.to_string()))
    }
}
