pub mod publication;
pub mod schedule;
