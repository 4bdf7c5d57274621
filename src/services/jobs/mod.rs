//! 채용공고 / 지원서 서비스

pub mod job_service;
pub mod application_service;

pub use job_service::JobService;
pub use application_service::ApplicationService;
