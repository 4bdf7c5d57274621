//! 인증 서비스 모듈
//!
//! 사용자 가입/로그인/토큰 발급은 Clerk가 담당합니다.
//! 이 모듈은 요청마다 전달되는 Clerk 세션 JWT를 로컬에서 검증합니다.
//!
//! # Security
//!
//! - 운영: RS256 공개키 (`CLERK_JWT_PUBLIC_KEY`)
//! - 개발: HS256 공유 비밀키 (`CLERK_DEV_SECRET`)
//! - `exp` / `nbf` 검사, 선택적 `iss` / `azp` 검사
//!
//! # Examples
//!
//! ```rust,ignore
//! use crate::services::auth::TokenService;
//!
//! let user = TokenService::instance().authenticate("Bearer eyJ...")?;
//! ```

pub mod token_service;

pub use token_service::*;
