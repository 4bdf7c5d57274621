//! 활동 로그 / 통합 검색 서비스

pub mod activity_service;
pub mod search_service;

pub use activity_service::ActivityService;
pub use search_service::SearchService;
