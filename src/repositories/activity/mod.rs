//! 활동 로그 / 검색 기록 리포지토리

pub mod activity_repo;
pub mod search_history_repo;
