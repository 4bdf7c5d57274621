//! 피드 / 댓글 / 해시태그 / 메시지 서비스

pub mod post_service;
pub mod comment_service;
pub mod message_service;

pub use post_service::PostService;
pub use comment_service::CommentService;
pub use message_service::MessageService;
