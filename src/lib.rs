//! LearnHub 백엔드
//!
//! 강좌/퀴즈 중심의 학습 플랫폼과 채용, 커머스, 소셜 피드를 하나로 묶은 REST API 서버입니다.
//! 인증은 Clerk 세션 토큰, 저장소는 MongoDB와 Redis, 미디어는 Bunny.net을 사용합니다.
//!
//! # Features
//!
//! - **강좌/퀴즈**: 강좌 CRUD, 수강 신청, 리뷰, 퀴즈 응시와 채점
//! - **채용**: 공고 등록, 지원서 접수와 상태 관리
//! - **커머스**: 장바구니, 위시리스트, 배송지
//! - **소셜**: 게시글, 댓글, 좋아요, 해시태그 트렌드, 1:1 메시지
//! - **콘텐츠**: 출판물, 개인 일정
//! - **활동/검색**: 통합 검색, 검색 기록, 활동 로그, 관리자 통계
//! - **싱글톤 DI**: `#[service]` / `#[repository]` 매크로 기반 의존성 주입
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐
//! │   HTTP Routes   │ ← 스코프별 AuthMiddleware
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │    Handlers     │ ← 추출/검증/응답 코드
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │    Services     │ ← 비즈니스 규칙, 권한 검사
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │  Repositories   │ ← 컬렉션 단위 데이터 액세스
//! └─────────────────┘
//!          │
//!          ▼
//! ┌──────────────────────────────┐
//! │ MongoDB + Redis + Bunny.net  │
//! └──────────────────────────────┘
//! ```
//!
//! # Examples
//!
//! ```rust,ignore
//! use learnhub_backend::services::courses::CourseService;
//!
//! let course_service = CourseService::instance();
//! let course = course_service.get(&auth, &course_id).await?;
//! ```

pub mod core;
pub mod config;
pub mod db;
pub mod caching;
pub mod storage;
pub mod domain;
pub mod repositories;
pub mod services;
pub mod utils;
pub mod routes;
pub mod handlers;
pub mod middlewares;
pub mod docs;
