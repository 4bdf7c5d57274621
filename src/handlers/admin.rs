//! # Admin HTTP Handlers
//!
//! `/api/admin` 스코프는 `AuthMiddleware::admin()`으로 감싸므로
//! 여기 도달한 요청은 이미 `admin` 역할이 확인된 상태입니다.

use actix_web::{get, web, HttpResponse};
use crate::core::errors::AppError;
use crate::domain::dto::activity::ActivityResponse;
use crate::domain::dto::admin::AnalyticsResponse;
use crate::domain::dto::common::{PaginatedResponse, PaginationQuery};
use crate::domain::dto::users::UserResponse;
use crate::services::activity::ActivityService;
use crate::services::admin::AnalyticsService;
use crate::services::users::UserService;

/// 플랫폼 지표
///
/// 사용자/강좌/게시물/공고 합계, 최근 30일 가입자, 수강 합계와 예상 매출,
/// 지원 상태별 개수, 수강생이 많은 강좌 5개를 돌려줍니다.
#[utoipa::path(
    get,
    path = "/api/admin/analytics",
    tag = "admin",
    responses((status = 200, body = AnalyticsResponse), (status = 403, description = "관리자 아님"))
)]
#[get("/analytics")]
pub async fn analytics() -> Result<HttpResponse, AppError> {
    let response = AnalyticsService::instance().overview().await?;
    Ok(HttpResponse::Ok().json(response))
}

#[utoipa::path(
    get,
    path = "/api/admin/users",
    tag = "admin",
    params(PaginationQuery),
    responses((status = 200, body = PaginatedResponse<UserResponse>))
)]
#[get("/users")]
pub async fn list_users(page: web::Query<PaginationQuery>) -> Result<HttpResponse, AppError> {
    let response = UserService::instance().list_users(&page).await?;
    Ok(HttpResponse::Ok().json(response))
}

#[utoipa::path(
    get,
    path = "/api/admin/activity",
    tag = "admin",
    params(PaginationQuery),
    responses((status = 200, body = PaginatedResponse<ActivityResponse>))
)]
#[get("/activity")]
pub async fn all_activity(page: web::Query<PaginationQuery>) -> Result<HttpResponse, AppError> {
    let response = ActivityService::instance().list_all(&page).await?;
    Ok(HttpResponse::Ok().json(response))
}
