pub mod get_likes;
pub mod toggle_like;
