//! # Search / Activity HTTP Handlers
//!
//! `/api/search`는 선택적 인증 스코프입니다. 익명 검색도 허용하지만
//! 검색 기록 조회/삭제는 `AuthenticatedUser` 추출자가 401을 돌려줍니다.

use actix_web::{delete, get, web, HttpResponse};
use crate::core::errors::AppError;
use crate::domain::dto::activity::{ActivityResponse, SearchHistoryResponse, SearchQuery, SearchResponse};
use crate::domain::dto::common::{MessageResponse, PaginatedResponse, PaginationQuery};
use crate::domain::models::auth::{AuthenticatedUser, OptionalUser};
use crate::services::activity::{ActivityService, SearchService};

/// 통합 검색
///
/// 강좌(공개), 사용자, 게시물, 공고(모집 중)를 대소문자 구분 없이 부분 일치로 찾습니다.
/// 로그인한 사용자의 검색어는 기록됩니다.
///
/// ```bash
/// curl "http://localhost:8080/api/search?q=rust&kind=courses"
/// ```
#[utoipa::path(
    get,
    path = "/api/search",
    tag = "search",
    params(SearchQuery),
    responses((status = 200, body = SearchResponse), (status = 400, description = "검색어 누락"))
)]
#[get("")]
pub async fn search(
    user: OptionalUser,
    query: web::Query<SearchQuery>,
) -> Result<HttpResponse, AppError> {
    let response = SearchService::instance().search(user.0.as_ref(), &query).await?;
    Ok(HttpResponse::Ok().json(response))
}

#[utoipa::path(
    get,
    path = "/api/search/history",
    tag = "search",
    responses((status = 200, body = Vec<SearchHistoryResponse>), (status = 401, description = "인증 필요"))
)]
#[get("/history")]
pub async fn search_history(auth: AuthenticatedUser) -> Result<HttpResponse, AppError> {
    let response = SearchService::instance().history(&auth).await?;
    Ok(HttpResponse::Ok().json(response))
}

#[utoipa::path(
    delete,
    path = "/api/search/history",
    tag = "search",
    responses((status = 200, body = MessageResponse), (status = 401, description = "인증 필요"))
)]
#[delete("/history")]
pub async fn clear_search_history(auth: AuthenticatedUser) -> Result<HttpResponse, AppError> {
    let removed = SearchService::instance().clear_history(&auth).await?;
    Ok(HttpResponse::Ok().json(MessageResponse::new(format!("검색 기록 {}건을 삭제했습니다", removed))))
}

/// 내 활동 로그 (최신순)
#[utoipa::path(
    get,
    path = "/api/activity",
    tag = "activity",
    params(PaginationQuery),
    responses((status = 200, body = PaginatedResponse<ActivityResponse>))
)]
#[get("")]
pub async fn my_activity(
    auth: AuthenticatedUser,
    page: web::Query<PaginationQuery>,
) -> Result<HttpResponse, AppError> {
    let response = ActivityService::instance().list_mine(&auth, &page).await?;
    Ok(HttpResponse::Ok().json(response))
}
