//! # Publication / Schedule HTTP Handlers

use actix_web::{delete, get, post, put, web, HttpResponse};
use validator::Validate;
use crate::core::errors::{validation_error, AppError};
use crate::domain::dto::common::{PaginatedResponse, PaginationQuery};
use crate::domain::dto::content::{
    PublicationFilter, PublicationRequest, PublicationResponse, ScheduleFilter, ScheduleRequest, ScheduleResponse,
};
use crate::domain::models::auth::AuthenticatedUser;
use crate::services::content::{PublicationService, ScheduleService};

#[utoipa::path(
    get,
    path = "/api/publications",
    tag = "publications",
    params(PublicationFilter, PaginationQuery),
    responses((status = 200, body = PaginatedResponse<PublicationResponse>))
)]
#[get("")]
pub async fn list_publications(
    filter: web::Query<PublicationFilter>,
    page: web::Query<PaginationQuery>,
) -> Result<HttpResponse, AppError> {
    let response = PublicationService::instance().list(&filter, &page).await?;
    Ok(HttpResponse::Ok().json(response))
}

#[utoipa::path(
    post,
    path = "/api/publications",
    tag = "publications",
    request_body = PublicationRequest,
    responses((status = 201, body = PublicationResponse), (status = 400, description = "입력 검증 실패"))
)]
#[post("")]
pub async fn create_publication(
    auth: AuthenticatedUser,
    payload: web::Json<PublicationRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate().map_err(validation_error)?;

    let response = PublicationService::instance().create(&auth, payload.into_inner()).await?;
    Ok(HttpResponse::Created().json(response))
}

#[utoipa::path(
    get,
    path = "/api/publications/{id}",
    tag = "publications",
    params(("id" = String, Path, description = "출판물 ID")),
    responses((status = 200, body = PublicationResponse), (status = 404, description = "출판물 없음"))
)]
#[get("/{id}")]
pub async fn get_publication(path: web::Path<String>) -> Result<HttpResponse, AppError> {
    let response = PublicationService::instance().get(&path).await?;
    Ok(HttpResponse::Ok().json(response))
}

#[utoipa::path(
    put,
    path = "/api/publications/{id}",
    tag = "publications",
    params(("id" = String, Path, description = "출판물 ID")),
    request_body = PublicationRequest,
    responses((status = 200, body = PublicationResponse), (status = 403, description = "작성자 아님"))
)]
#[put("/{id}")]
pub async fn update_publication(
    auth: AuthenticatedUser,
    path: web::Path<String>,
    payload: web::Json<PublicationRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate().map_err(validation_error)?;

    let response = PublicationService::instance().update(&auth, &path, payload.into_inner()).await?;
    Ok(HttpResponse::Ok().json(response))
}

#[utoipa::path(
    delete,
    path = "/api/publications/{id}",
    tag = "publications",
    params(("id" = String, Path, description = "출판물 ID")),
    responses((status = 204, description = "삭제됨"), (status = 403, description = "작성자 아님"))
)]
#[delete("/{id}")]
pub async fn delete_publication(auth: AuthenticatedUser, path: web::Path<String>) -> Result<HttpResponse, AppError> {
    PublicationService::instance().delete(&auth, &path).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// 내 일정 (시작 시각 순). `from` / `to`는 RFC 3339 시각입니다.
#[utoipa::path(
    get,
    path = "/api/schedules",
    tag = "schedules",
    params(ScheduleFilter),
    responses((status = 200, body = Vec<ScheduleResponse>))
)]
#[get("")]
pub async fn list_schedules(
    auth: AuthenticatedUser,
    filter: web::Query<ScheduleFilter>,
) -> Result<HttpResponse, AppError> {
    let response = ScheduleService::instance().list(&auth, &filter).await?;
    Ok(HttpResponse::Ok().json(response))
}

#[utoipa::path(
    post,
    path = "/api/schedules",
    tag = "schedules",
    request_body = ScheduleRequest,
    responses((status = 201, body = ScheduleResponse), (status = 400, description = "종료 시각이 시작보다 이름"))
)]
#[post("")]
pub async fn create_schedule(
    auth: AuthenticatedUser,
    payload: web::Json<ScheduleRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate().map_err(validation_error)?;

    let response = ScheduleService::instance().create(&auth, payload.into_inner()).await?;
    Ok(HttpResponse::Created().json(response))
}

#[utoipa::path(
    put,
    path = "/api/schedules/{id}",
    tag = "schedules",
    params(("id" = String, Path, description = "일정 ID")),
    request_body = ScheduleRequest,
    responses((status = 200, body = ScheduleResponse), (status = 404, description = "일정 없음"))
)]
#[put("/{id}")]
pub async fn update_schedule(
    auth: AuthenticatedUser,
    path: web::Path<String>,
    payload: web::Json<ScheduleRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate().map_err(validation_error)?;

    let response = ScheduleService::instance().update(&auth, &path, payload.into_inner()).await?;
    Ok(HttpResponse::Ok().json(response))
}

#[utoipa::path(
    delete,
    path = "/api/schedules/{id}",
    tag = "schedules",
    params(("id" = String, Path, description = "일정 ID")),
    responses((status = 204, description = "삭제됨"), (status = 404, description = "일정 없음"))
)]
#[delete("/{id}")]
pub async fn delete_schedule(auth: AuthenticatedUser, path: web::Path<String>) -> Result<HttpResponse, AppError> {
    ScheduleService::instance().delete(&auth, &path).await?;
    Ok(HttpResponse::NoContent().finish())
}
