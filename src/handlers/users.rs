//! # User Profile HTTP Handlers
//!
//! 프로필 생성/조회/수정과 팔로우 관계를 다루는 엔드포인트입니다.
//! 모두 `/api/users` 스코프(인증 필수)에 등록됩니다.
//!
//! | 메서드 | 경로 | 설명 |
//! |--------|------|------|
//! | `POST` | `/api/users` | 내 프로필 생성 |
//! | `GET` | `/api/users/me` | 내 프로필 |
//! | `PUT` | `/api/users/me` | 내 프로필 부분 수정 |
//! | `GET` | `/api/users/me/courses` | 수강 중인 강좌 |
//! | `GET` | `/api/users/{id}` | 공개 프로필 |
//! | `POST` / `DELETE` | `/api/users/{id}/follow` | 팔로우 / 언팔로우 |
//! | `GET` | `/api/users/{id}/followers` | 팔로워 목록 |
//! | `GET` | `/api/users/{id}/following` | 팔로잉 목록 |
//!
//! `/me` 경로는 `/{id}`보다 먼저 등록해야 합니다.

use actix_web::{delete, get, post, put, web, HttpResponse};
use validator::Validate;
use crate::core::errors::{validation_error, AppError};
use crate::domain::dto::common::{PaginatedResponse, PaginationQuery};
use crate::domain::dto::courses::CourseSummary;
use crate::domain::dto::users::{
    CreateProfileRequest, FollowResponse, ProfileResponse, UpdateProfileRequest, UserResponse, UserSummary,
};
use crate::domain::models::auth::AuthenticatedUser;
use crate::services::users::UserService;

/// 내 프로필 생성
///
/// Clerk 가입 직후 한 번 호출합니다. 이메일을 생략하면 세션 토큰의 이메일을 씁니다.
///
/// ```bash
/// curl -X POST http://localhost:8080/api/users \
///   -H "Authorization: Bearer $TOKEN" \
///   -H "Content-Type: application/json" \
///   -d '{ "username": "rustacean", "display_name": "Ferris" }'
/// ```
#[utoipa::path(
    post,
    path = "/api/users",
    tag = "users",
    request_body = CreateProfileRequest,
    responses(
        (status = 201, body = ProfileResponse),
        (status = 400, description = "입력 검증 실패"),
        (status = 409, description = "이미 프로필이 있거나 사용자명 중복"),
    )
)]
#[post("")]
pub async fn create_profile(
    auth: AuthenticatedUser,
    payload: web::Json<CreateProfileRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate().map_err(validation_error)?;

    let service = UserService::instance();
    let response = service.create_profile(&auth, payload.into_inner()).await?;

    Ok(HttpResponse::Created().json(response))
}

#[utoipa::path(
    get,
    path = "/api/users/me",
    tag = "users",
    responses((status = 200, body = ProfileResponse), (status = 404, description = "프로필 없음"))
)]
#[get("/me")]
pub async fn get_me(auth: AuthenticatedUser) -> Result<HttpResponse, AppError> {
    let response = UserService::instance().get_me(&auth).await?;
    Ok(HttpResponse::Ok().json(response))
}

/// 내 프로필 수정. 보낸 필드만 바뀝니다.
#[utoipa::path(
    put,
    path = "/api/users/me",
    tag = "users",
    request_body = UpdateProfileRequest,
    responses((status = 200, body = ProfileResponse), (status = 409, description = "사용자명 중복"))
)]
#[put("/me")]
pub async fn update_me(
    auth: AuthenticatedUser,
    payload: web::Json<UpdateProfileRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate().map_err(validation_error)?;

    let response = UserService::instance().update_me(&auth, payload.into_inner()).await?;
    Ok(HttpResponse::Ok().json(response))
}

#[utoipa::path(
    get,
    path = "/api/users/me/courses",
    tag = "users",
    responses((status = 200, body = Vec<CourseSummary>))
)]
#[get("/me/courses")]
pub async fn my_courses(auth: AuthenticatedUser) -> Result<HttpResponse, AppError> {
    let response = UserService::instance().my_courses(&auth).await?;
    Ok(HttpResponse::Ok().json(response))
}

#[utoipa::path(
    get,
    path = "/api/users/{id}",
    tag = "users",
    params(("id" = String, Path, description = "사용자 ID")),
    responses((status = 200, body = UserResponse), (status = 404, description = "사용자 없음"))
)]
#[get("/{id}")]
pub async fn get_user(path: web::Path<String>) -> Result<HttpResponse, AppError> {
    let response = UserService::instance().get_public(&path).await?;
    Ok(HttpResponse::Ok().json(response))
}

/// 팔로우
///
/// 자기 자신은 400, 이미 팔로우 중이면 409입니다.
#[utoipa::path(
    post,
    path = "/api/users/{id}/follow",
    tag = "users",
    params(("id" = String, Path, description = "팔로우할 사용자 ID")),
    responses(
        (status = 200, body = FollowResponse),
        (status = 400, description = "자기 자신"),
        (status = 404, description = "사용자 없음"),
        (status = 409, description = "이미 팔로우 중"),
    )
)]
#[post("/{id}/follow")]
pub async fn follow(auth: AuthenticatedUser, path: web::Path<String>) -> Result<HttpResponse, AppError> {
    let response = UserService::instance().follow(&auth, &path).await?;
    Ok(HttpResponse::Ok().json(response))
}

#[utoipa::path(
    delete,
    path = "/api/users/{id}/follow",
    tag = "users",
    params(("id" = String, Path, description = "언팔로우할 사용자 ID")),
    responses((status = 200, body = FollowResponse), (status = 400, description = "팔로우 중이 아님"))
)]
#[delete("/{id}/follow")]
pub async fn unfollow(auth: AuthenticatedUser, path: web::Path<String>) -> Result<HttpResponse, AppError> {
    let response = UserService::instance().unfollow(&auth, &path).await?;
    Ok(HttpResponse::Ok().json(response))
}

#[utoipa::path(
    get,
    path = "/api/users/{id}/followers",
    tag = "users",
    params(("id" = String, Path, description = "사용자 ID"), PaginationQuery),
    responses((status = 200, body = PaginatedResponse<UserSummary>))
)]
#[get("/{id}/followers")]
pub async fn followers(
    path: web::Path<String>,
    page: web::Query<PaginationQuery>,
) -> Result<HttpResponse, AppError> {
    let response = UserService::instance().followers(&path, &page).await?;
    Ok(HttpResponse::Ok().json(response))
}

#[utoipa::path(
    get,
    path = "/api/users/{id}/following",
    tag = "users",
    params(("id" = String, Path, description = "사용자 ID"), PaginationQuery),
    responses((status = 200, body = PaginatedResponse<UserSummary>))
)]
#[get("/{id}/following")]
pub async fn following(
    path: web::Path<String>,
    page: web::Query<PaginationQuery>,
) -> Result<HttpResponse, AppError> {
    let response = UserService::instance().following(&path, &page).await?;
    Ok(HttpResponse::Ok().json(response))
}
