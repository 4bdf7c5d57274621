//! 미들웨어 모듈
//!
//! ### 인증 미들웨어 (AuthMiddleware)
//! - Clerk 세션 토큰(Bearer) 검증
//! - 검증된 호출자를 request extension에 저장
//! - 필수/선택 인증 모드, 관리자 역할 검사
//!
//! ```rust,ignore
//! web::scope("/api/admin")
//!     .wrap(AuthMiddleware::admin())
//!     .service(handlers::admin::get_analytics)
//! ```

pub mod auth_middleware;
mod auth_inner;

pub use auth_middleware::AuthMiddleware;
