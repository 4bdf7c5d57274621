//! 게시물 / 댓글 / 해시태그 / 메시지 DTO

pub mod request;
pub mod response;

pub use request::*;
pub use response::*;
