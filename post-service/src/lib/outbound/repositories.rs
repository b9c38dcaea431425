pub mod comment;
pub mod like;
pub mod post;

pub use comment::PostgresCommentRepository;
pub use like::PostgresLikeRepository;
pub use post::PostgresPostRepository;
