//! # Course / Review HTTP Handlers
//!
//! `/api/courses` 스코프와 리뷰 삭제용 `/api/reviews` 스코프의 핸들러입니다.
//! 목록은 공개된 강좌만, `/mine`은 내가 가르치는 강좌(초안 포함)를 돌려줍니다.

use actix_web::{delete, get, patch, post, put, web, HttpResponse};
use validator::Validate;
use crate::core::errors::{validation_error, AppError};
use crate::domain::dto::common::{PaginatedResponse, PaginationQuery};
use crate::domain::dto::courses::{
    CourseFilter, CourseRequest, CourseResponse, CreateReviewRequest, EnrollmentResponse,
    PatchCourseRequest, ReviewResponse,
};
use crate::domain::models::auth::AuthenticatedUser;
use crate::services::courses::{CourseService, ReviewService};

/// 공개 강좌 목록
///
/// `category`, `level`, `instructor_id` 필터와 제목/설명 `search`를 지원합니다.
#[utoipa::path(
    get,
    path = "/api/courses",
    tag = "courses",
    params(CourseFilter, PaginationQuery),
    responses((status = 200, body = PaginatedResponse<CourseResponse>))
)]
#[get("")]
pub async fn list_courses(
    filter: web::Query<CourseFilter>,
    page: web::Query<PaginationQuery>,
) -> Result<HttpResponse, AppError> {
    let response = CourseService::instance().list(&filter, &page).await?;
    Ok(HttpResponse::Ok().json(response))
}

#[utoipa::path(
    post,
    path = "/api/courses",
    tag = "courses",
    request_body = CourseRequest,
    responses((status = 201, body = CourseResponse), (status = 400, description = "제목 누락 등 검증 실패"))
)]
#[post("")]
pub async fn create_course(
    auth: AuthenticatedUser,
    payload: web::Json<CourseRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate().map_err(validation_error)?;

    let response = CourseService::instance().create(&auth, payload.into_inner()).await?;
    Ok(HttpResponse::Created().json(response))
}

#[utoipa::path(
    get,
    path = "/api/courses/mine",
    tag = "courses",
    params(PaginationQuery),
    responses((status = 200, body = PaginatedResponse<CourseResponse>))
)]
#[get("/mine")]
pub async fn my_courses(
    auth: AuthenticatedUser,
    page: web::Query<PaginationQuery>,
) -> Result<HttpResponse, AppError> {
    let response = CourseService::instance().mine(&auth, &page).await?;
    Ok(HttpResponse::Ok().json(response))
}

/// 강좌 상세. 비공개 강좌는 소유자와 관리자만 볼 수 있고 나머지는 404입니다.
#[utoipa::path(
    get,
    path = "/api/courses/{id}",
    tag = "courses",
    params(("id" = String, Path, description = "강좌 ID")),
    responses((status = 200, body = CourseResponse), (status = 404, description = "강좌 없음"))
)]
#[get("/{id}")]
pub async fn get_course(auth: AuthenticatedUser, path: web::Path<String>) -> Result<HttpResponse, AppError> {
    let response = CourseService::instance().get(&auth, &path).await?;
    Ok(HttpResponse::Ok().json(response))
}

/// 편집 가능한 필드 전체 교체. 빠진 선택 필드는 기본값으로 돌아갑니다.
#[utoipa::path(
    put,
    path = "/api/courses/{id}",
    tag = "courses",
    params(("id" = String, Path, description = "강좌 ID")),
    request_body = CourseRequest,
    responses((status = 200, body = CourseResponse), (status = 403, description = "소유자 아님"))
)]
#[put("/{id}")]
pub async fn replace_course(
    auth: AuthenticatedUser,
    path: web::Path<String>,
    payload: web::Json<CourseRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate().map_err(validation_error)?;

    let response = CourseService::instance().replace(&auth, &path, payload.into_inner()).await?;
    Ok(HttpResponse::Ok().json(response))
}

#[utoipa::path(
    patch,
    path = "/api/courses/{id}",
    tag = "courses",
    params(("id" = String, Path, description = "강좌 ID")),
    request_body = PatchCourseRequest,
    responses((status = 200, body = CourseResponse), (status = 403, description = "소유자 아님"))
)]
#[patch("/{id}")]
pub async fn patch_course(
    auth: AuthenticatedUser,
    path: web::Path<String>,
    payload: web::Json<PatchCourseRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate().map_err(validation_error)?;

    let response = CourseService::instance().patch(&auth, &path, payload.into_inner()).await?;
    Ok(HttpResponse::Ok().json(response))
}

#[utoipa::path(
    delete,
    path = "/api/courses/{id}",
    tag = "courses",
    params(("id" = String, Path, description = "강좌 ID")),
    responses((status = 204, description = "삭제됨"), (status = 403, description = "소유자 아님"))
)]
#[delete("/{id}")]
pub async fn delete_course(auth: AuthenticatedUser, path: web::Path<String>) -> Result<HttpResponse, AppError> {
    CourseService::instance().delete(&auth, &path).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// 수강 신청
///
/// 비공개 강좌는 400, 이미 수강 중이면 409입니다. 성공하면 장바구니에서도 빠집니다.
#[utoipa::path(
    post,
    path = "/api/courses/{id}/enroll",
    tag = "courses",
    params(("id" = String, Path, description = "강좌 ID")),
    responses(
        (status = 200, body = EnrollmentResponse),
        (status = 400, description = "비공개 강좌"),
        (status = 409, description = "이미 수강 중"),
    )
)]
#[post("/{id}/enroll")]
pub async fn enroll(auth: AuthenticatedUser, path: web::Path<String>) -> Result<HttpResponse, AppError> {
    let response = CourseService::instance().enroll(&auth, &path).await?;
    Ok(HttpResponse::Ok().json(response))
}

#[utoipa::path(
    get,
    path = "/api/courses/{id}/reviews",
    tag = "reviews",
    params(("id" = String, Path, description = "강좌 ID"), PaginationQuery),
    responses((status = 200, body = PaginatedResponse<ReviewResponse>))
)]
#[get("/{id}/reviews")]
pub async fn list_reviews(
    path: web::Path<String>,
    page: web::Query<PaginationQuery>,
) -> Result<HttpResponse, AppError> {
    let response = ReviewService::instance().list(&path, &page).await?;
    Ok(HttpResponse::Ok().json(response))
}

/// 리뷰 작성. 수강생만(403), 강좌당 한 번(409) 작성할 수 있습니다.
#[utoipa::path(
    post,
    path = "/api/courses/{id}/reviews",
    tag = "reviews",
    params(("id" = String, Path, description = "강좌 ID")),
    request_body = CreateReviewRequest,
    responses(
        (status = 201, body = ReviewResponse),
        (status = 403, description = "수강생 아님"),
        (status = 409, description = "이미 리뷰 작성"),
    )
)]
#[post("/{id}/reviews")]
pub async fn create_review(
    auth: AuthenticatedUser,
    path: web::Path<String>,
    payload: web::Json<CreateReviewRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate().map_err(validation_error)?;

    let response = ReviewService::instance().create(&auth, &path, payload.into_inner()).await?;
    Ok(HttpResponse::Created().json(response))
}

#[utoipa::path(
    delete,
    path = "/api/reviews/{id}",
    tag = "reviews",
    params(("id" = String, Path, description = "리뷰 ID")),
    responses((status = 204, description = "삭제됨"), (status = 403, description = "작성자 아님"))
)]
#[delete("/{id}")]
pub async fn delete_review(auth: AuthenticatedUser, path: web::Path<String>) -> Result<HttpResponse, AppError> {
    ReviewService::instance().delete(&auth, &path).await?;
    Ok(HttpResponse::NoContent().finish())
}
