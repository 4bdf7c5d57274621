//! # Job / Application HTTP Handlers
//!
//! 채용 공고(`/api/jobs`)와 지원서(`/api/applications`) 엔드포인트입니다.
//!
//! 지원서 상세는 역할에 따라 다르게 보입니다.
//! 지원자는 확인 토큰을 받고, 공고 작성자는 받지 않습니다.

use actix_web::{delete, get, patch, post, put, web, HttpResponse};
use validator::Validate;
use crate::core::errors::{validation_error, AppError};
use crate::domain::dto::common::{PaginatedResponse, PaginationQuery};
use crate::domain::dto::jobs::{
    ApplicationResponse, ApplyRequest, JobFilter, JobRequest, JobResponse, PatchJobRequest, UpdateStatusRequest,
};
use crate::domain::models::auth::AuthenticatedUser;
use crate::services::jobs::{ApplicationService, JobService};

/// 모집 중인 공고 목록 (`job_type`, `location`, `search` 필터)
#[utoipa::path(
    get,
    path = "/api/jobs",
    tag = "jobs",
    params(JobFilter, PaginationQuery),
    responses((status = 200, body = PaginatedResponse<JobResponse>))
)]
#[get("")]
pub async fn list_jobs(
    filter: web::Query<JobFilter>,
    page: web::Query<PaginationQuery>,
) -> Result<HttpResponse, AppError> {
    let response = JobService::instance().list(&filter, &page).await?;
    Ok(HttpResponse::Ok().json(response))
}

#[utoipa::path(
    post,
    path = "/api/jobs",
    tag = "jobs",
    request_body = JobRequest,
    responses((status = 201, body = JobResponse), (status = 400, description = "필수 필드 누락 또는 급여 범위 오류"))
)]
#[post("")]
pub async fn create_job(
    auth: AuthenticatedUser,
    payload: web::Json<JobRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate().map_err(validation_error)?;

    let response = JobService::instance().create(&auth, payload.into_inner()).await?;
    Ok(HttpResponse::Created().json(response))
}

#[utoipa::path(
    get,
    path = "/api/jobs/mine",
    tag = "jobs",
    params(PaginationQuery),
    responses((status = 200, body = PaginatedResponse<JobResponse>))
)]
#[get("/mine")]
pub async fn my_jobs(
    auth: AuthenticatedUser,
    page: web::Query<PaginationQuery>,
) -> Result<HttpResponse, AppError> {
    let response = JobService::instance().mine(&auth, &page).await?;
    Ok(HttpResponse::Ok().json(response))
}

#[utoipa::path(
    get,
    path = "/api/jobs/{id}",
    tag = "jobs",
    params(("id" = String, Path, description = "공고 ID")),
    responses((status = 200, body = JobResponse), (status = 404, description = "공고 없음"))
)]
#[get("/{id}")]
pub async fn get_job(path: web::Path<String>) -> Result<HttpResponse, AppError> {
    let response = JobService::instance().get(&path).await?;
    Ok(HttpResponse::Ok().json(response))
}

#[utoipa::path(
    put,
    path = "/api/jobs/{id}",
    tag = "jobs",
    params(("id" = String, Path, description = "공고 ID")),
    request_body = JobRequest,
    responses((status = 200, body = JobResponse), (status = 403, description = "작성자 아님"))
)]
#[put("/{id}")]
pub async fn replace_job(
    auth: AuthenticatedUser,
    path: web::Path<String>,
    payload: web::Json<JobRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate().map_err(validation_error)?;

    let response = JobService::instance().replace(&auth, &path, payload.into_inner()).await?;
    Ok(HttpResponse::Ok().json(response))
}

#[utoipa::path(
    patch,
    path = "/api/jobs/{id}",
    tag = "jobs",
    params(("id" = String, Path, description = "공고 ID")),
    request_body = PatchJobRequest,
    responses((status = 200, body = JobResponse), (status = 403, description = "작성자 아님"))
)]
#[patch("/{id}")]
pub async fn patch_job(
    auth: AuthenticatedUser,
    path: web::Path<String>,
    payload: web::Json<PatchJobRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate().map_err(validation_error)?;

    let response = JobService::instance().patch(&auth, &path, payload.into_inner()).await?;
    Ok(HttpResponse::Ok().json(response))
}

#[utoipa::path(
    delete,
    path = "/api/jobs/{id}",
    tag = "jobs",
    params(("id" = String, Path, description = "공고 ID")),
    responses((status = 204, description = "삭제됨"), (status = 403, description = "작성자 아님"))
)]
#[delete("/{id}")]
pub async fn delete_job(auth: AuthenticatedUser, path: web::Path<String>) -> Result<HttpResponse, AppError> {
    JobService::instance().delete(&auth, &path).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// 공고별 지원서 목록 (작성자 / 관리자)
#[utoipa::path(
    get,
    path = "/api/jobs/{id}/applications",
    tag = "applications",
    params(("id" = String, Path, description = "공고 ID"), PaginationQuery),
    responses((status = 200, body = PaginatedResponse<ApplicationResponse>), (status = 403, description = "작성자 아님"))
)]
#[get("/{id}/applications")]
pub async fn list_job_applications(
    auth: AuthenticatedUser,
    path: web::Path<String>,
    page: web::Query<PaginationQuery>,
) -> Result<HttpResponse, AppError> {
    let response = ApplicationService::instance().list_for_job(&auth, &path, &page).await?;
    Ok(HttpResponse::Ok().json(response))
}

/// 지원서 제출
///
/// 없는 공고는 404, 마감됐거나 본인 공고이거나 이미 지원했으면 400입니다.
/// 필수 질문에 답하지 않아도 400입니다.
#[utoipa::path(
    post,
    path = "/api/applications",
    tag = "applications",
    request_body = ApplyRequest,
    responses(
        (status = 201, body = ApplicationResponse),
        (status = 400, description = "마감, 중복 지원, 필수 답변 누락"),
        (status = 404, description = "공고 없음"),
    )
)]
#[post("")]
pub async fn apply(
    auth: AuthenticatedUser,
    payload: web::Json<ApplyRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate().map_err(validation_error)?;

    let response = ApplicationService::instance().apply(&auth, payload.into_inner()).await?;
    Ok(HttpResponse::Created().json(response))
}

#[utoipa::path(
    get,
    path = "/api/applications",
    tag = "applications",
    params(PaginationQuery),
    responses((status = 200, body = PaginatedResponse<ApplicationResponse>))
)]
#[get("")]
pub async fn my_applications(
    auth: AuthenticatedUser,
    page: web::Query<PaginationQuery>,
) -> Result<HttpResponse, AppError> {
    let response = ApplicationService::instance().mine(&auth, &page).await?;
    Ok(HttpResponse::Ok().json(response))
}

#[utoipa::path(
    get,
    path = "/api/applications/{id}",
    tag = "applications",
    params(("id" = String, Path, description = "지원서 ID")),
    responses((status = 200, body = ApplicationResponse), (status = 403, description = "지원자/작성자 아님"))
)]
#[get("/{id}")]
pub async fn get_application(auth: AuthenticatedUser, path: web::Path<String>) -> Result<HttpResponse, AppError> {
    let response = ApplicationService::instance().get(&auth, &path).await?;
    Ok(HttpResponse::Ok().json(response))
}

#[utoipa::path(
    patch,
    path = "/api/applications/{id}/status",
    tag = "applications",
    params(("id" = String, Path, description = "지원서 ID")),
    request_body = UpdateStatusRequest,
    responses((status = 200, body = ApplicationResponse), (status = 403, description = "작성자 아님"))
)]
#[patch("/{id}/status")]
pub async fn update_application_status(
    auth: AuthenticatedUser,
    path: web::Path<String>,
    payload: web::Json<UpdateStatusRequest>,
) -> Result<HttpResponse, AppError> {
    let response = ApplicationService::instance()
        .update_status(&auth, &path, payload.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(response))
}

/// 지원 철회 (지원자 본인)
#[utoipa::path(
    delete,
    path = "/api/applications/{id}",
    tag = "applications",
    params(("id" = String, Path, description = "지원서 ID")),
    responses((status = 204, description = "삭제됨"), (status = 403, description = "지원자 아님"))
)]
#[delete("/{id}")]
pub async fn withdraw_application(auth: AuthenticatedUser, path: web::Path<String>) -> Result<HttpResponse, AppError> {
    ApplicationService::instance().withdraw(&auth, &path).await?;
    Ok(HttpResponse::NoContent().finish())
}
