pub mod job;
pub mod application;
