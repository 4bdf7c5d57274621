//! # HTTP Request Handlers Module
//!
//! 영역별 actix-web 핸들러입니다. 핸들러는 얇게 유지합니다.
//!
//! 1. 추출자로 호출자(`AuthenticatedUser` / `OptionalUser`), 경로, 쿼리, 본문을 받고
//! 2. 요청 DTO를 `validator`로 검증한 뒤
//! 3. 싱글톤 서비스(`XService::instance()`)에 위임하고
//! 4. 결과를 JSON으로 돌려줍니다. 실패는 `AppError`가 상태 코드로 바꿉니다.
//!
//! ```rust,ignore
//! #[post("")]
//! pub async fn create_course(
//!     auth: AuthenticatedUser,
//!     payload: web::Json<CourseRequest>,
//! ) -> Result<HttpResponse, AppError> {
//!     payload.validate().map_err(validation_error)?;
//!     let response = CourseService::instance().create(&auth, payload.into_inner()).await?;
//!     Ok(HttpResponse::Created().json(response))
//! }
//! ```
//!
//! 모든 핸들러에는 `#[utoipa::path]`가 붙어 있고 [`crate::docs::ApiDoc`]이 이를 모읍니다.
//! 스코프와 미들웨어 구성은 [`crate::routes`]에 있습니다.

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
