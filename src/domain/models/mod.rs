//! # Domain Models Module
//!
//! 영속되지 않는 값 객체입니다.
//!
//! - [`auth`] - Clerk 세션 클레임, 검증된 호출자(`AuthenticatedUser`),
//!   라우트 스코프의 인증 모드와 필요 역할

pub mod auth;
