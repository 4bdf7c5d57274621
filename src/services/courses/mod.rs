//! 강좌 / 리뷰 서비스

pub mod course_service;
pub mod review_service;

pub use course_service::CourseService;
pub use review_service::ReviewService;
