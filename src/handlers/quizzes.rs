//! # Quiz HTTP Handlers
//!
//! 퀴즈 CRUD와 응시(채점) 엔드포인트입니다.
//! 정답 키는 퀴즈 소유자와 관리자에게만 노출됩니다.

use actix_web::{delete, get, post, put, web, HttpResponse};
use validator::Validate;
use crate::core::errors::{validation_error, AppError};
use crate::domain::dto::common::{PaginatedResponse, PaginationQuery};
use crate::domain::dto::quizzes::{
    AttemptResponse, QuizFilter, QuizRequest, QuizResponse, QuizSummary, SubmitAttemptRequest,
};
use crate::domain::models::auth::AuthenticatedUser;
use crate::services::quizzes::QuizService;

#[utoipa::path(
    get,
    path = "/api/quizzes",
    tag = "quizzes",
    params(QuizFilter, PaginationQuery),
    responses((status = 200, body = PaginatedResponse<QuizSummary>))
)]
#[get("")]
pub async fn list_quizzes(
    filter: web::Query<QuizFilter>,
    page: web::Query<PaginationQuery>,
) -> Result<HttpResponse, AppError> {
    let response = QuizService::instance().list(&filter, &page).await?;
    Ok(HttpResponse::Ok().json(response))
}

/// 퀴즈 생성
///
/// 객관식은 선택지 2개 이상과 정답 정확히 1개, 주관식(TITA)은 비어 있지 않은
/// 정답이 필요합니다.
#[utoipa::path(
    post,
    path = "/api/quizzes",
    tag = "quizzes",
    request_body = QuizRequest,
    responses((status = 201, body = QuizResponse), (status = 400, description = "문항 구성 오류"))
)]
#[post("")]
pub async fn create_quiz(
    auth: AuthenticatedUser,
    payload: web::Json<QuizRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate().map_err(validation_error)?;

    let response = QuizService::instance().create(&auth, payload.into_inner()).await?;
    Ok(HttpResponse::Created().json(response))
}

#[utoipa::path(
    get,
    path = "/api/quizzes/{id}",
    tag = "quizzes",
    params(("id" = String, Path, description = "퀴즈 ID")),
    responses((status = 200, body = QuizResponse), (status = 404, description = "퀴즈 없음"))
)]
#[get("/{id}")]
pub async fn get_quiz(auth: AuthenticatedUser, path: web::Path<String>) -> Result<HttpResponse, AppError> {
    let response = QuizService::instance().get(&auth, &path).await?;
    Ok(HttpResponse::Ok().json(response))
}

#[utoipa::path(
    put,
    path = "/api/quizzes/{id}",
    tag = "quizzes",
    params(("id" = String, Path, description = "퀴즈 ID")),
    request_body = QuizRequest,
    responses((status = 200, body = QuizResponse), (status = 403, description = "소유자 아님"))
)]
#[put("/{id}")]
pub async fn update_quiz(
    auth: AuthenticatedUser,
    path: web::Path<String>,
    payload: web::Json<QuizRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate().map_err(validation_error)?;

    let response = QuizService::instance().update(&auth, &path, payload.into_inner()).await?;
    Ok(HttpResponse::Ok().json(response))
}

#[utoipa::path(
    delete,
    path = "/api/quizzes/{id}",
    tag = "quizzes",
    params(("id" = String, Path, description = "퀴즈 ID")),
    responses((status = 204, description = "삭제됨"), (status = 403, description = "소유자 아님"))
)]
#[delete("/{id}")]
pub async fn delete_quiz(auth: AuthenticatedUser, path: web::Path<String>) -> Result<HttpResponse, AppError> {
    QuizService::instance().delete(&auth, &path).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// 답안 제출
///
/// 정답은 `marks`, 오답은 `-negative_marks`, 미응답은 0점입니다.
#[utoipa::path(
    post,
    path = "/api/quizzes/{id}/attempts",
    tag = "quizzes",
    params(("id" = String, Path, description = "퀴즈 ID")),
    request_body = SubmitAttemptRequest,
    responses((status = 201, body = AttemptResponse))
)]
#[post("/{id}/attempts")]
pub async fn submit_attempt(
    auth: AuthenticatedUser,
    path: web::Path<String>,
    payload: web::Json<SubmitAttemptRequest>,
) -> Result<HttpResponse, AppError> {
    let response = QuizService::instance().submit_attempt(&auth, &path, payload.into_inner()).await?;
    Ok(HttpResponse::Created().json(response))
}

#[utoipa::path(
    get,
    path = "/api/quizzes/{id}/attempts/me",
    tag = "quizzes",
    params(("id" = String, Path, description = "퀴즈 ID")),
    responses((status = 200, body = Vec<AttemptResponse>))
)]
#[get("/{id}/attempts/me")]
pub async fn my_attempts(auth: AuthenticatedUser, path: web::Path<String>) -> Result<HttpResponse, AppError> {
    let response = QuizService::instance().my_attempts(&auth, &path).await?;
    Ok(HttpResponse::Ok().json(response))
}
