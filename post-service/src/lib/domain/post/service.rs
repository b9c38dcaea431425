use std::sync::Arc;

use super::errors::PostError;
use super::models::CreatePostCommand;
use super::models::LikeStatus;
use super::models::NewPost;
use super::models::Page;
use super::models::PageRequest;
use super::models::Post;
use super::models::PostChanges;
use super::models::PostFilter;
use super::models::PostId;
use super::models::PostListItem;
use super::models::UpdatePostCommand;
use super::ports::CacheStore;
use super::ports::LikeRepository;
use super::ports::PostRepository;
use super::slug::create_slug;
use super::slug::truncate_text;
use crate::domain::auth::models::AuthenticatedUser;

const LIST_CACHE_PREFIX: &str = "posts:";

fn slug_cache_key(slug: &str) -> String {
    format!("post:slug:{}", slug)
}

/// Post lifecycle, listing and like operations.
///
/// Generic over its repositories and the cache store for testability. The
/// cache is best-effort: failures are logged and the database answers.
pub struct PostService<PR, LR, CS>
where
    PR: PostRepository,
    LR: LikeRepository,
    CS: CacheStore,
{
    posts: Arc<PR>,
    likes: Arc<LR>,
    cache: Arc<CS>,
    cache_ttl_seconds: u64,
}

impl<PR, LR, CS> PostService<PR, LR, CS>
where
    PR: PostRepository,
    LR: LikeRepository,
    CS: CacheStore,
{
    pub fn new(posts: Arc<PR>, likes: Arc<LR>, cache: Arc<CS>, cache_ttl_seconds: u64) -> Self {
        Self {
            posts,
            likes,
            cache,
            cache_ttl_seconds,
        }
    }

    /// Create a post on behalf of the authenticated author.
    ///
    /// The slug needs the database-assigned id, so creation inserts with a
    /// provisional slug and immediately rewrites it with the id suffix.
    pub async fn create_post(
        &self,
        command: CreatePostCommand,
        author: &AuthenticatedUser,
    ) -> Result<Post, PostError> {
        let summary = command
            .summary
            .unwrap_or_else(|| truncate_text(&command.content));

        let new_post = NewPost {
            slug: create_slug(&command.title, None),
            title: command.title,
            content: command.content,
            summary,
            author_id: author.user_id,
            author_email: author.email.clone(),
            author_username: author.username.clone(),
            is_published: command.is_published,
            is_featured: command.is_featured,
        };

        let post = self.posts.create(new_post).await?;
        let slug = create_slug(&post.title, Some(post.id.0));
        let post = self.posts.update_slug(post.id, &slug).await?;

        tracing::info!(post_id = %post.id, slug = %post.slug, "Post created");

        self.invalidate_lists().await;

        Ok(post)
    }

    pub async fn list_posts(
        &self,
        filter: PostFilter,
        page: PageRequest,
    ) -> Result<Page<PostListItem>, PostError> {
        let items = self.posts.list(&filter, page.size, page.offset()).await?;
        let total = self.posts.count(&filter).await?;

        Ok(Page::new(items, total, page))
    }

    /// Fetch one post by id, counting the view.
    pub async fn get_post(&self, id: PostId) -> Result<Post, PostError> {
        self.posts
            .increment_views(id)
            .await?
            .ok_or(PostError::NotFound)
    }

    /// Fetch one post by slug through the read cache.
    ///
    /// A cache hit serves the snapshot as-is and does not count a view;
    /// only misses touch the database.
    pub async fn get_post_by_slug(&self, slug: &str) -> Result<Post, PostError> {
        let key = slug_cache_key(slug);

        match self.cache.get(&key).await {
            Ok(Some(raw)) => match serde_json::from_str::<Post>(&raw) {
                Ok(post) => return Ok(post),
                Err(e) => {
                    tracing::warn!(key = %key, error = %e, "Discarding unreadable cache entry")
                }
            },
            Ok(None) => {}
            Err(e) => tracing::warn!(key = %key, error = %e, "Cache read failed"),
        }

        let post = self
            .posts
            .increment_views_by_slug(slug)
            .await?
            .ok_or(PostError::NotFound)?;

        match serde_json::to_string(&post) {
            Ok(raw) => {
                if let Err(e) = self.cache.set(&key, &raw, self.cache_ttl_seconds).await {
                    tracing::warn!(key = %key, error = %e, "Cache write failed");
                }
            }
            Err(e) => tracing::warn!(key = %key, error = %e, "Cache encoding failed"),
        }

        Ok(post)
    }

    /// Update a post owned by the caller.
    ///
    /// A title change recomputes the slug; a content change without an
    /// explicit summary recomputes the summary. Both the old and new slug
    /// cache entries are dropped.
    pub async fn update_post(
        &self,
        id: PostId,
        command: UpdatePostCommand,
        author: &AuthenticatedUser,
    ) -> Result<Post, PostError> {
        let existing = self
            .posts
            .find_by_id_and_author(id, author.user_id)
            .await?
            .ok_or(PostError::NotFoundOrUnauthorized)?;

        let slug = command
            .title
            .as_deref()
            .map(|title| create_slug(title, Some(id.0)));

        let summary = match (&command.content, command.summary) {
            (_, Some(summary)) => Some(summary),
            (Some(content), None) => Some(truncate_text(content)),
            (None, None) => None,
        };

        let changes = PostChanges {
            title: command.title,
            content: command.content,
            summary,
            slug,
            is_published: command.is_published,
            is_featured: command.is_featured,
        };

        let updated = self.posts.update(id, changes).await?;

        self.invalidate_lists().await;
        self.invalidate_slug(&existing.slug).await;
        if updated.slug != existing.slug {
            self.invalidate_slug(&updated.slug).await;
        }

        Ok(updated)
    }

    pub async fn delete_post(
        &self,
        id: PostId,
        author: &AuthenticatedUser,
    ) -> Result<(), PostError> {
        let slug = self
            .posts
            .delete(id, author.user_id)
            .await?
            .ok_or(PostError::NotFoundOrUnauthorized)?;

        tracing::info!(post_id = %id, "Post deleted");

        self.invalidate_lists().await;
        self.invalidate_slug(&slug).await;

        Ok(())
    }

    /// Flip the caller's like on a post and report the new tally.
    pub async fn toggle_like(&self, id: PostId, user_id: i64) -> Result<LikeStatus, PostError> {
        self.posts
            .find_by_id(id)
            .await?
            .ok_or(PostError::NotFound)?;

        let liked = self.likes.toggle(id, user_id).await?;
        let likes_count = self.likes.count(id).await?;

        Ok(LikeStatus { liked, likes_count })
    }

    pub async fn likes_count(&self, id: PostId) -> Result<i64, PostError> {
        self.likes.count(id).await
    }

    async fn invalidate_lists(&self) {
        if let Err(e) = self.cache.delete_prefix(LIST_CACHE_PREFIX).await {
            tracing::warn!(error = %e, "List cache invalidation failed");
        }
    }

    async fn invalidate_slug(&self, slug: &str) {
        let key = slug_cache_key(slug);
        if let Err(e) = self.cache.delete(&key).await {
            tracing::warn!(key = %key, error = %e, "Slug cache invalidation failed");
        }
    }
}
