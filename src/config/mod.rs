//! # Configuration Module
//!
//! 환경 변수 기반 설정값을 중앙에서 관리합니다.
//! 설정값은 필요한 시점에 읽으며, 개발 환경에서 안전한 기본값을 제공합니다.
//!
//! ## 모듈 구성
//!
//! - [`data_config`] - 실행 환경, 서버 바인딩, Rate Limiting, 페이지네이션
//! - [`auth_config`] - Clerk 세션 토큰 검증
//! - [`bunny_config`] - Bunny.net Storage / Stream
//!
//! ## 필수 환경 변수 (프로덕션)
//!
//! ```bash
//! export MONGODB_URI="mongodb+srv://..."
//! export DATABASE_NAME="learnhub"
//! export REDIS_URL="redis://..."
//! export CLERK_JWT_PUBLIC_KEY="-----BEGIN PUBLIC KEY-----..."
//! export BUNNY_STORAGE_ZONE="..."
//! export BUNNY_STORAGE_API_KEY="..."
//! export BUNNY_STREAM_LIBRARY_ID="..."
//! export BUNNY_STREAM_API_KEY="..."
//! ```
//!
//! ## 선택적 환경 변수
//!
//! ```bash
//! export ENVIRONMENT="production"   # development, test, staging, production
//! export HOST="0.0.0.0"
//! export PORT="8080"
//! export SERVER_WORKERS="4"
//! export RATE_LIMIT_PER_SECOND="100"
//! export RATE_LIMIT_BURST_SIZE="200"
//! export CORS_ALLOWED_ORIGINS="https://app.example.com"
//! export MEDIA_MAX_UPLOAD_MB="100"
//! ```

pub mod data_config;
pub mod auth_config;
pub mod bunny_config;

pub use data_config::*;
pub use auth_config::*;
pub use bunny_config::*;
