//! # Core Framework Module
//!
//! 플랫폼 백엔드 전체가 공유하는 프레임워크 기능입니다.
//!
//! ## 모듈 구성
//!
//! ### [`registry`] - 의존성 주입 컨테이너
//! - **ServiceLocator**: 타입 기반 싱글톤 컨테이너
//! - **자동 레지스트리**: `inventory` 기반 컴파일 타임 서비스 등록
//! - **지연 초기화**: 첫 사용 시점에 인스턴스 생성, 순환 참조 감지
//!
//! ### [`errors`] - 통합 에러 처리
//! - **AppError**: 애플리케이션 전역 에러 타입
//! - **HTTP 통합**: Actix-Web `ResponseError` 구현
//!
//! ## 사용 패턴
//!
//! ```rust,ignore
//! #[repository(name = "course", collection = "courses")]
//! pub struct CourseRepository {
//!     db: Arc<Database>,
//!     redis: Arc<RedisClient>,
//! }
//!
//! #[service(name = "course")]
//! pub struct CourseService {
//!     course_repo: Arc<CourseRepository>,   // 자동 주입
//!     user_service: Arc<UserService>,       // 자동 주입
//! }
//!
//! let course_service = CourseService::instance();
//! ```
//!
//! ## 트러블슈팅
//!
//! ### 순환 참조 감지
//! ```text
//! ❌ Circular dependency detected for type: CourseService
//! ```
//! **해결**: 서비스 간 의존을 단방향으로 재구성합니다.
//! (예: `CartService` → `CourseService` 는 허용, 역방향은 금지)
//!
//! ### 미등록 타입 에러
//! ```text
//! panic: Service not found: BunnyClient. Make sure it's registered...
//! ```
//! **해결**: `main.rs`에서 `ServiceLocator::set()`으로 인프라 컴포넌트를 먼저 등록합니다.

pub mod errors;
pub mod registry;

pub use errors::*;
pub use registry::*;
