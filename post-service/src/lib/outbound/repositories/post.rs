use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use sqlx::FromRow;
use sqlx::PgPool;
use sqlx::Postgres;
use sqlx::QueryBuilder;

use crate::domain::post::errors::PostError;
use crate::domain::post::models::NewPost;
use crate::domain::post::models::Post;
use crate::domain::post::models::PostChanges;
use crate::domain::post::models::PostFilter;
use crate::domain::post::models::PostId;
use crate::domain::post::models::PostListItem;
use crate::domain::post::ports::PostRepository;

pub struct PostgresPostRepository {
    pool: PgPool,
}

impl PostgresPostRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct PostRow {
    id: i64,
    title: String,
    content: String,
    summary: Option<String>,
    author_id: i64,
    author_email: String,
    author_username: String,
    slug: String,
    is_published: bool,
    is_featured: bool,
    view_count: i32,
    created_at: DateTime<Utc>,
    updated_at: Option<DateTime<Utc>>,
}

impl PostRow {
    fn into_post(self) -> Post {
        Post {
            id: PostId(self.id),
            title: self.title,
            content: self.content,
            summary: self.summary,
            author_id: self.author_id,
            author_email: self.author_email,
            author_username: self.author_username,
            slug: self.slug,
            is_published: self.is_published,
            is_featured: self.is_featured,
            view_count: self.view_count,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

#[derive(Debug, FromRow)]
struct PostListRow {
    id: i64,
    title: String,
    summary: Option<String>,
    content: String,
    author_id: i64,
    author_username: String,
    slug: String,
    is_published: bool,
    is_featured: bool,
    view_count: i32,
    created_at: DateTime<Utc>,
    comments_count: i64,
}

impl PostListRow {
    fn into_item(self) -> PostListItem {
        PostListItem {
            id: PostId(self.id),
            title: self.title,
            summary: self.summary,
            content: self.content,
            author_id: self.author_id,
            author_username: self.author_username,
            slug: self.slug,
            is_published: self.is_published,
            is_featured: self.is_featured,
            view_count: self.view_count,
            created_at: self.created_at,
            comments_count: self.comments_count,
        }
    }
}

const POST_COLUMNS: &str = "id, title, content, summary, author_id, author_email, \
                            author_username, slug, is_published, is_featured, view_count, \
                            created_at, updated_at";

fn push_filters(builder: &mut QueryBuilder<Postgres>, filter: &PostFilter) {
    builder.push(" WHERE TRUE");

    if filter.published_only {
        builder.push(" AND is_published = TRUE");
    }
    if filter.featured_only {
        builder.push(" AND is_featured = TRUE");
    }
    if let Some(author_id) = filter.author_id {
        builder.push(" AND author_id = ");
        builder.push_bind(author_id);
    }
    if let Some(search) = &filter.search {
        let pattern = format!("%{}%", search);
        builder.push(" AND (title ILIKE ");
        builder.push_bind(pattern.clone());
        builder.push(" OR content ILIKE ");
        builder.push_bind(pattern);
        builder.push(")");
    }
}

#[async_trait]
impl PostRepository for PostgresPostRepository {
    async fn create(&self, post: NewPost) -> Result<Post, PostError> {
        let query = format!(
            r#"
            INSERT INTO posts (title, content, summary, author_id, author_email,
                               author_username, slug, is_published, is_featured)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING {POST_COLUMNS}
            "#
        );

        let row = sqlx::query_as::<_, PostRow>(&query)
            .bind(&post.title)
            .bind(&post.content)
            .bind(&post.summary)
            .bind(post.author_id)
            .bind(&post.author_email)
            .bind(&post.author_username)
            .bind(&post.slug)
            .bind(post.is_published)
            .bind(post.is_featured)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| PostError::Database(e.to_string()))?;

        Ok(row.into_post())
    }

    async fn update_slug(&self, id: PostId, slug: &str) -> Result<Post, PostError> {
        let query = format!("UPDATE posts SET slug = $2 WHERE id = $1 RETURNING {POST_COLUMNS}");

        let row = sqlx::query_as::<_, PostRow>(&query)
            .bind(id.0)
            .bind(slug)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| PostError::Database(e.to_string()))?;

        row.map(PostRow::into_post).ok_or(PostError::NotFound)
    }

    async fn list(
        &self,
        filter: &PostFilter,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<PostListItem>, PostError> {
        let mut builder = QueryBuilder::<Postgres>::new(
            "SELECT id, title, summary, content, author_id, author_username, slug, \
             is_published, is_featured, view_count, created_at, \
             (SELECT COUNT(*) FROM comments c \
              WHERE c.post_id = posts.id AND c.is_approved) AS comments_count \
             FROM posts",
        );
        push_filters(&mut builder, filter);
        builder.push(" ORDER BY created_at DESC LIMIT ");
        builder.push_bind(limit);
        builder.push(" OFFSET ");
        builder.push_bind(offset);

        let rows: Vec<PostListRow> = builder
            .build_query_as()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| PostError::Database(e.to_string()))?;

        Ok(rows.into_iter().map(PostListRow::into_item).collect())
    }

    async fn count(&self, filter: &PostFilter) -> Result<i64, PostError> {
        let mut builder = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM posts");
        push_filters(&mut builder, filter);

        builder
            .build_query_scalar()
            .fetch_one(&self.pool)
            .await
            .map_err(|e| PostError::Database(e.to_string()))
    }

    async fn find_by_id(&self, id: PostId) -> Result<Option<Post>, PostError> {
        let query = format!("SELECT {POST_COLUMNS} FROM posts WHERE id = $1");

        let row = sqlx::query_as::<_, PostRow>(&query)
            .bind(id.0)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| PostError::Database(e.to_string()))?;

        Ok(row.map(PostRow::into_post))
    }

    async fn find_by_id_and_author(
        &self,
        id: PostId,
        author_id: i64,
    ) -> Result<Option<Post>, PostError> {
        let query = format!("SELECT {POST_COLUMNS} FROM posts WHERE id = $1 AND author_id = $2");

        let row = sqlx::query_as::<_, PostRow>(&query)
            .bind(id.0)
            .bind(author_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| PostError::Database(e.to_string()))?;

        Ok(row.map(PostRow::into_post))
    }

    async fn increment_views(&self, id: PostId) -> Result<Option<Post>, PostError> {
        let query = format!(
            "UPDATE posts SET view_count = view_count + 1 WHERE id = $1 RETURNING {POST_COLUMNS}"
        );

        let row = sqlx::query_as::<_, PostRow>(&query)
            .bind(id.0)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| PostError::Database(e.to_string()))?;

        Ok(row.map(PostRow::into_post))
    }

    async fn increment_views_by_slug(&self, slug: &str) -> Result<Option<Post>, PostError> {
        let query = format!(
            "UPDATE posts SET view_count = view_count + 1 WHERE slug = $1 RETURNING {POST_COLUMNS}"
        );

        let row = sqlx::query_as::<_, PostRow>(&query)
            .bind(slug)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| PostError::Database(e.to_string()))?;

        Ok(row.map(PostRow::into_post))
    }

    async fn update(&self, id: PostId, changes: PostChanges) -> Result<Post, PostError> {
        let query = format!(
            r#"
            UPDATE posts
            SET title = COALESCE($2, title),
                content = COALESCE($3, content),
                summary = COALESCE($4, summary),
                slug = COALESCE($5, slug),
                is_published = COALESCE($6, is_published),
                is_featured = COALESCE($7, is_featured),
                updated_at = NOW()
            WHERE id = $1
            RETURNING {POST_COLUMNS}
            "#
        );

        let row = sqlx::query_as::<_, PostRow>(&query)
            .bind(id.0)
            .bind(&changes.title)
            .bind(&changes.content)
            .bind(&changes.summary)
            .bind(&changes.slug)
            .bind(changes.is_published)
            .bind(changes.is_featured)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| PostError::Database(e.to_string()))?;

        row.map(PostRow::into_post)
            .ok_or(PostError::NotFoundOrUnauthorized)
    }

    async fn delete(&self, id: PostId, author_id: i64) -> Result<Option<String>, PostError> {
        sqlx::query_scalar::<_, String>(
            "DELETE FROM posts WHERE id = $1 AND author_id = $2 RETURNING slug",
        )
        .bind(id.0)
        .bind(author_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| PostError::Database(e.to_string()))
    }
}
