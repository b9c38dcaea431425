use async_trait::async_trait;

use super::errors::CacheError;
use super::errors::PostError;
use super::models::NewPost;
use super::models::Post;
use super::models::PostChanges;
use super::models::PostFilter;
use super::models::PostId;
use super::models::PostListItem;

#[async_trait]
pub trait PostRepository: Send + Sync + 'static {
    async fn create(&self, post: NewPost) -> Result<Post, PostError>;

    /// Rewrites the slug after the id is known; creation is a two-step
    /// insert-then-suffix sequence.
    async fn update_slug(&self, id: PostId, slug: &str) -> Result<Post, PostError>;

    async fn list(
        &self,
        filter: &PostFilter,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<PostListItem>, PostError>;

    async fn count(&self, filter: &PostFilter) -> Result<i64, PostError>;

    async fn find_by_id(&self, id: PostId) -> Result<Option<Post>, PostError>;

    async fn find_by_id_and_author(
        &self,
        id: PostId,
        author_id: i64,
    ) -> Result<Option<Post>, PostError>;

    /// Bumps the view counter and returns the updated row, if any.
    async fn increment_views(&self, id: PostId) -> Result<Option<Post>, PostError>;

    async fn increment_views_by_slug(&self, slug: &str) -> Result<Option<Post>, PostError>;

    async fn update(&self, id: PostId, changes: PostChanges) -> Result<Post, PostError>;

    /// Deletes the post and returns its slug for cache invalidation.
    async fn delete(&self, id: PostId, author_id: i64) -> Result<Option<String>, PostError>;
}

#[async_trait]
pub trait LikeRepository: Send + Sync + 'static {
    /// Flips the like state for one (post, user) pair; returns the new
    /// state (`true` = now liked).
    async fn toggle(&self, post_id: PostId, user_id: i64) -> Result<bool, PostError>;

    async fn count(&self, post_id: PostId) -> Result<i64, PostError>;
}

/// Key-value read cache with TTL semantics.
#[async_trait]
pub trait CacheStore: Send + Sync + 'static {
    async fn get(&self, key: &str) -> Result<Option<String>, CacheError>;

    async fn set(&self, key: &str, value: &str, ttl_seconds: u64) -> Result<(), CacheError>;

    async fn delete(&self, key: &str) -> Result<(), CacheError>;

    async fn delete_prefix(&self, prefix: &str) -> Result<(), CacheError>;
}
