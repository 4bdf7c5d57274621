//! 퀴즈 / 응시 DTO

pub mod request;
pub mod response;

pub use request::*;
pub use response::*;
