use std::sync::Arc;

use super::errors::CommentError;
use super::models::Comment;
use super::models::CommentId;
use super::models::NewComment;
use super::ports::CommentRepository;
use crate::domain::auth::models::AuthenticatedUser;
use crate::domain::post::models::PostId;
use crate::domain::post::ports::PostRepository;

/// Comment lifecycle. Needs the post repository only to refuse comments on
/// posts that do not exist.
pub struct CommentService<CR, PR>
where
    CR: CommentRepository,
    PR: PostRepository,
{
    comments: Arc<CR>,
    posts: Arc<PR>,
}

impl<CR, PR> CommentService<CR, PR>
where
    CR: CommentRepository,
    PR: PostRepository,
{
    pub fn new(comments: Arc<CR>, posts: Arc<PR>) -> Self {
        Self { comments, posts }
    }

    pub async fn create_comment(
        &self,
        post_id: PostId,
        content: String,
        author: &AuthenticatedUser,
    ) -> Result<Comment, CommentError> {
        self.posts
            .find_by_id(post_id)
            .await
            .map_err(|e| CommentError::Database(e.to_string()))?
            .ok_or(CommentError::PostNotFound)?;

        let comment = self
            .comments
            .create(NewComment {
                post_id,
                content,
                author_id: author.user_id,
                author_email: author.email.clone(),
                author_username: author.username.clone(),
            })
            .await?;

        tracing::info!(comment_id = %comment.id, post_id = %post_id, "Comment created");

        Ok(comment)
    }

    pub async fn list_comments(&self, post_id: PostId) -> Result<Vec<Comment>, CommentError> {
        self.comments.list_approved(post_id).await
    }

    pub async fn delete_comment(
        &self,
        id: CommentId,
        author: &AuthenticatedUser,
    ) -> Result<(), CommentError> {
        let deleted = self.comments.delete(id, author.user_id).await?;
        if !deleted {
            return Err(CommentError::NotFoundOrUnauthorized);
        }

        tracing::info!(comment_id = %id, "Comment deleted");

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use chrono::Utc;
    use mockall::mock;
    use mockall::predicate::*;

    use super::*;
    use crate::domain::post::errors::PostError;
    use crate::domain::post::models::NewPost;
    use crate::domain::post::models::Post;
    use crate::domain::post::models::PostChanges;
    use crate::domain::post::models::PostFilter;
    use crate::domain::post::models::PostListItem;

    mock! {
        pub TestCommentRepository {}

        #[async_trait]
        impl CommentRepository for TestCommentRepository {
            async fn create(&self, comment: NewComment) -> Result<Comment, CommentError>;
            async fn list_approved(&self, post_id: PostId) -> Result<Vec<Comment>, CommentError>;
            async fn delete(&self, id: CommentId, author_id: i64) -> Result<bool, CommentError>;
        }
    }

    mock! {
        pub TestPostRepository {}

        #[async_trait]
        impl PostRepository for TestPostRepository {
            async fn create(&self, post: NewPost) -> Result<Post, PostError>;
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
            async fn increment_views(&self, id: PostId) -> Result<Option<Post>, PostError>;
            async fn increment_views_by_slug(&self, slug: &str) -> Result<Option<Post>, PostError>;
            async fn update(&self, id: PostId, changes: PostChanges) -> Result<Post, PostError>;
            async fn delete(&self, id: PostId, author_id: i64) -> Result<Option<String>, PostError>;
        }
    }

    fn author() -> AuthenticatedUser {
        AuthenticatedUser {
            user_id: 1,
            email: "a@x.com".to_string(),
            username: "alice".to_string(),
        }
    }

    fn sample_post() -> Post {
        Post {
            id: PostId(3),
            title: "Hello World".to_string(),
            content: "Some content".to_string(),
            summary: None,
            author_id: 1,
            author_email: "a@x.com".to_string(),
            author_username: "alice".to_string(),
            slug: "hello-world-3".to_string(),
            is_published: true,
            is_featured: false,
            view_count: 0,
            created_at: Utc::now(),
            updated_at: None,
        }
    }

    #[tokio::test]
    async fn test_create_comment_denormalizes_author() {
        let mut comments = MockTestCommentRepository::new();
        let mut posts = MockTestPostRepository::new();

        posts
            .expect_find_by_id()
            .with(eq(PostId(3)))
            .times(1)
            .returning(|_| Ok(Some(sample_post())));
        comments
            .expect_create()
            .withf(|new_comment| {
                new_comment.post_id == PostId(3)
                    && new_comment.author_id == 1
                    && new_comment.author_username == "alice"
            })
            .times(1)
            .returning(|new_comment| {
                Ok(Comment {
                    id: CommentId(1),
                    post_id: new_comment.post_id,
                    content: new_comment.content,
                    author_id: new_comment.author_id,
                    author_email: new_comment.author_email,
                    author_username: new_comment.author_username,
                    is_approved: true,
                    created_at: Utc::now(),
                    updated_at: None,
                })
            });

        let service = CommentService::new(Arc::new(comments), Arc::new(posts));

        let comment = service
            .create_comment(PostId(3), "Nice post".to_string(), &author())
            .await
            .unwrap();
        assert!(comment.is_approved);
    }

    #[tokio::test]
    async fn test_create_comment_on_missing_post_fails() {
        let comments = MockTestCommentRepository::new();
        let mut posts = MockTestPostRepository::new();

        posts.expect_find_by_id().returning(|_| Ok(None));

        let service = CommentService::new(Arc::new(comments), Arc::new(posts));

        let result = service
            .create_comment(PostId(3), "Nice post".to_string(), &author())
            .await;
        assert_eq!(result.unwrap_err(), CommentError::PostNotFound);
    }

    #[tokio::test]
    async fn test_delete_comment_requires_authorship() {
        let mut comments = MockTestCommentRepository::new();

        comments
            .expect_delete()
            .with(eq(CommentId(9)), eq(1))
            .times(1)
            .returning(|_, _| Ok(false));

        let service =
            CommentService::new(Arc::new(comments), Arc::new(MockTestPostRepository::new()));

        let result = service.delete_comment(CommentId(9), &author()).await;
        assert_eq!(result.unwrap_err(), CommentError::NotFoundOrUnauthorized);
    }

    #[tokio::test]
    async fn test_delete_own_comment_succeeds() {
        let mut comments = MockTestCommentRepository::new();

        comments.expect_delete().returning(|_, _| Ok(true));

        let service =
            CommentService::new(Arc::new(comments), Arc::new(MockTestPostRepository::new()));

        assert!(service.delete_comment(CommentId(9), &author()).await.is_ok());
    }
}
