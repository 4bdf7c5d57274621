//! 요청/응답 DTO
//!
//! 영역별로 `request` / `response` 모듈을 두고, 목록 공통 타입은 [`common`]에 둡니다.
//! ID는 모두 24자리 hex 문자열, 시각은 RFC 3339(UTC)로 직렬화됩니다.

pub mod common;
pub mod users;
pub mod courses;
pub mod quizzes;
pub mod jobs;
pub mod commerce;
pub mod social;
pub mod content;
pub mod activity;
pub mod media;
pub mod admin;
