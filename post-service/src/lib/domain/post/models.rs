use std::fmt::Display;

use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PostId(pub i64);

impl Display for PostId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A blog post. Author identity is denormalized at creation time from the
/// auth service verdict, so reads never call back into it.
///
/// Serializable because the slug read path caches whole posts in Redis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: PostId,
    pub title: String,
    pub content: String,
    pub summary: Option<String>,
    pub author_id: i64,
    pub author_email: String,
    pub author_username: String,
    pub slug: String,
    pub is_published: bool,
    pub is_featured: bool,
    pub view_count: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Validated input for creating a post.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatePostCommand {
    pub title: String,
    pub content: String,
    pub summary: Option<String>,
    pub is_published: bool,
    pub is_featured: bool,
}

/// Row ready for insertion; slug and summary already derived.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPost {
    pub title: String,
    pub content: String,
    pub summary: String,
    pub author_id: i64,
    pub author_email: String,
    pub author_username: String,
    pub slug: String,
    pub is_published: bool,
    pub is_featured: bool,
}

/// Partial update; `None` fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdatePostCommand {
    pub title: Option<String>,
    pub content: Option<String>,
    pub summary: Option<String>,
    pub is_published: Option<bool>,
    pub is_featured: Option<bool>,
}

/// Column-level changes handed to the repository after the service has
/// derived the slug and summary.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostChanges {
    pub title: Option<String>,
    pub content: Option<String>,
    pub summary: Option<String>,
    pub slug: Option<String>,
    pub is_published: Option<bool>,
    pub is_featured: Option<bool>,
}

/// Filters shared by the list and count queries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostFilter {
    pub published_only: bool,
    pub featured_only: bool,
    pub author_id: Option<i64>,
    pub search: Option<String>,
}

/// One-based page request; the HTTP layer clamps both fields before the
/// service sees them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: i64,
    pub size: i64,
}

impl PageRequest {
    pub fn offset(&self) -> i64 {
        (self.page - 1) * self.size
    }
}

/// A page of results with enough metadata to render pagination controls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: i64,
    pub page: i64,
    pub size: i64,
    pub pages: i64,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, total: i64, request: PageRequest) -> Self {
        let pages = if total == 0 {
            0
        } else {
            (total + request.size - 1) / request.size
        };

        Self {
            items,
            total,
            page: request.page,
            size: request.size,
            pages,
        }
    }
}

/// Listing projection; carries the approved-comment count so list pages
/// need a single query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostListItem {
    pub id: PostId,
    pub title: String,
    pub summary: Option<String>,
    pub content: String,
    pub author_id: i64,
    pub author_username: String,
    pub slug: String,
    pub is_published: bool,
    pub is_featured: bool,
    pub view_count: i32,
    pub created_at: DateTime<Utc>,
    pub comments_count: i64,
}

/// Result of toggling a like.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LikeStatus {
    pub liked: bool,
    pub likes_count: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_math() {
        let request = PageRequest { page: 3, size: 10 };
        assert_eq!(request.offset(), 20);

        let page = Page::new(vec![1, 2, 3], 21, request);
        assert_eq!(page.pages, 3);

        let empty: Page<i32> = Page::new(vec![], 0, PageRequest { page: 1, size: 10 });
        assert_eq!(empty.pages, 0);

        let exact: Page<i32> = Page::new(vec![], 20, PageRequest { page: 1, size: 10 });
        assert_eq!(exact.pages, 2);
    }
}
