use thiserror::Error;

use crate::config::PaginationConfig;
use crate::domain::post::models::PageRequest;

pub mod create_post;
pub mod delete_post;
pub mod get_post;
pub mod get_post_by_slug;
pub mod list_posts;
pub mod my_posts;
pub mod update_post;

const TITLE_MAX_LENGTH: usize = 255;
const SUMMARY_MAX_LENGTH: usize = 500;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParsePostRequestError {
    #[error("Title must be between 1 and 255 characters")]
    TitleLength,
    #[error("Content must not be empty")]
    ContentEmpty,
    #[error("Summary must be at most 500 characters")]
    SummaryLength,
}

fn validate_title(title: &str) -> Result<(), ParsePostRequestError> {
    let length = title.chars().count();
    if length == 0 || length > TITLE_MAX_LENGTH {
        return Err(ParsePostRequestError::TitleLength);
    }
    Ok(())
}

fn validate_content(content: &str) -> Result<(), ParsePostRequestError> {
    if content.is_empty() {
        return Err(ParsePostRequestError::ContentEmpty);
    }
    Ok(())
}

fn validate_summary(summary: &str) -> Result<(), ParsePostRequestError> {
    if summary.chars().count() > SUMMARY_MAX_LENGTH {
        return Err(ParsePostRequestError::SummaryLength);
    }
    Ok(())
}

/// Clamp raw query parameters into a well-formed page request.
fn page_request(config: &PaginationConfig, page: Option<i64>, size: Option<i64>) -> PageRequest {
    PageRequest {
        page: page.unwrap_or(1).max(1),
        size: size
            .unwrap_or(config.default_page_size)
            .clamp(1, config.max_page_size),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_request_clamping() {
        let config = PaginationConfig {
            default_page_size: 10,
            max_page_size: 100,
        };

        let request = page_request(&config, None, None);
        assert_eq!(request.page, 1);
        assert_eq!(request.size, 10);

        let request = page_request(&config, Some(-3), Some(500));
        assert_eq!(request.page, 1);
        assert_eq!(request.size, 100);

        let request = page_request(&config, Some(4), Some(0));
        assert_eq!(request.page, 4);
        assert_eq!(request.size, 1);
    }

    #[test]
    fn test_title_bounds() {
        assert!(validate_title("ok").is_ok());
        assert!(validate_title("").is_err());
        assert!(validate_title(&"x".repeat(256)).is_err());
    }
}
