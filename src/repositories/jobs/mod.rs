//! 채용공고 / 지원서 리포지토리

pub mod job_repo;
pub mod application_repo;
