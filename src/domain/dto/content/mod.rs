//! 논문/출판물, 일정 DTO

pub mod request;
pub mod response;

pub use request::*;
pub use response::*;
