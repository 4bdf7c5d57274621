//! 사용자 프로필 서비스 모듈
//!
//! # Examples
//!
//! ```rust,ignore
//! use crate::services::users::UserService;
//!
//! let user_service = UserService::instance();
//! let profile = user_service.get_me(&auth).await?;
//! ```

pub mod user_service;

pub use user_service::UserService;
