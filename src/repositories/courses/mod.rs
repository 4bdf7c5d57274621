//! 강좌 / 리뷰 리포지토리

pub mod course_repo;
pub mod review_repo;
