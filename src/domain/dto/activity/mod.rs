//! 통합 검색 / 검색 기록 / 활동 로그 DTO

pub mod request;
pub mod response;

pub use request::*;
pub use response::*;
