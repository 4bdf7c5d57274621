pub mod post;
pub mod comment;
pub mod hashtag;
pub mod message;
