//! 출판물 / 학습 일정 서비스

pub mod publication_service;
pub mod schedule_service;

pub use publication_service::PublicationService;
pub use schedule_service::ScheduleService;
