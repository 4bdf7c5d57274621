//! 캐싱 계층
//!
//! - [`redis`] - JSON 직렬화 기반 Redis 클라이언트

pub mod redis;
