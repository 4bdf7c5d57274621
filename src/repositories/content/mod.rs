//! 출판물 / 일정 리포지토리

pub mod publication_repo;
pub mod schedule_repo;
