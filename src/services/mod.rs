//! 비즈니스 로직을 담당하는 서비스 계층 모듈
//!
//! `#[service]` 매크로로 싱글톤 등록되며, 필드의 `Arc<T>`는 초기화 시
//! `ServiceLocator`가 채웁니다.
//!
//! # 도메인
//!
//! - `users` - 프로필, 팔로우
//! - `courses` - 강좌, 수강신청, 리뷰
//! - `quizzes` - 퀴즈 출제, 채점
//! - `jobs` - 채용공고, 지원서
//! - `commerce` - 장바구니, 위시리스트, 주소
//! - `social` - 피드, 댓글, 해시태그, 메시지
//! - `content` - 출판물, 학습 일정
//! - `activity` - 활동 로그, 통합 검색
//! - `admin` - 관리자 통계
//! - `media` - Bunny Storage / Stream
//! - `auth` - Clerk 세션 토큰 검증
//!
//! # Examples
//!
//! ```rust,ignore
//! use crate::services::courses::CourseService;
//!
//! let course_service = CourseService::instance();
//! let page = course_service.list(&filter, &pagination).await?;
//! ```

pub mod access;
pub mod auth;
pub mod users;
pub mod courses;
pub mod quizzes;
pub mod jobs;
pub mod commerce;
pub mod social;
pub mod content;
pub mod activity;
pub mod admin;
pub mod media;
