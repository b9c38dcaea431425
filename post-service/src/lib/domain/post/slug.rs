const SLUG_MAX_LENGTH: usize = 100;
const SUMMARY_MAX_LENGTH: usize = 150;

/// Derives a URL slug from a title.
///
/// Lowercases, drops everything but ASCII alphanumerics, whitespace and
/// hyphens, then collapses whitespace runs into single hyphens. When the
/// post id is known it is appended, which is what makes slugs unique even
/// for identical titles.
pub fn create_slug(title: &str, post_id: Option<i64>) -> String {
    let cleaned: String = title
        .to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || c.is_whitespace() || *c == '-')
        .collect();

    let mut slug = cleaned
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
        .trim_matches('-')
        .to_string();

    if let Some(id) = post_id {
        slug = format!("{}-{}", slug, id);
    }

    slug.chars().take(SLUG_MAX_LENGTH).collect()
}

/// Shortens content into a summary, cutting at the last word boundary
/// inside the limit.
pub fn truncate_text(text: &str) -> String {
    if text.chars().count() <= SUMMARY_MAX_LENGTH {
        return text.to_string();
    }

    let head: String = text.chars().take(SUMMARY_MAX_LENGTH).collect();
    let truncated = match head.rfind(' ') {
        Some(idx) => &head[..idx],
        None => head.as_str(),
    };

    format!("{}...", truncated)
}
