//! 채용공고 / 지원서 DTO

pub mod request;
pub mod response;

pub use request::*;
pub use response::*;
