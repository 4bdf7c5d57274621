//! 퀴즈 / 응시 기록 리포지토리

pub mod quiz_repo;
pub mod quiz_attempt_repo;
