//! 게시물 / 댓글 / 해시태그 / 메시지 리포지토리

pub mod post_repo;
pub mod comment_repo;
pub mod hashtag_repo;
pub mod message_repo;
