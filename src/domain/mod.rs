//! # Domain Layer Module
//!
//! 비즈니스 객체와 API 계약을 정의하는 계층입니다.
//!
//! ```text
//! Domain Layer (이 모듈)
//! ├── entities  - MongoDB 문서 (강좌, 퀴즈, 채용, 커머스, 소셜, 콘텐츠, 활동)
//! ├── dto       - 요청/응답 계약 (validator 검증 + utoipa 스키마)
//! └── models    - 인증 값 객체 (Clerk 클레임, 호출자, 인증 모드)
//!      │
//!      ▼
//! Services → Repositories → MongoDB / Redis
//! ```
//!
//! ## 규칙
//!
//! - 엔티티는 `Serialize`/`Deserialize`로 BSON과 직접 매핑됩니다.
//! - 파생 필드(카운터, 평균 평점, 총점)는 엔티티 메서드로만 바꿉니다.
//! - DTO는 엔티티를 그대로 노출하지 않고 `From` 변환으로 만듭니다.
//!
//! ```rust,ignore
//! use crate::domain::{entities::courses::course::Course, dto::courses::CourseResponse};
//!
//! let response = CourseResponse::from(course);
//! ```

pub mod entities;
pub mod dto;
pub mod models;

pub use entities::*;
pub use dto::*;
pub use models::*;
