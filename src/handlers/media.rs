//! # Media HTTP Handlers
//!
//! Bunny.net Storage(파일)와 Stream(비디오)을 프록시합니다.
//! 파일 경로는 쿼리 `?path=`로 받고, 업로드 본문은 원시 바이트입니다.
//!
//! ```bash
//! curl -X PUT "http://localhost:8080/api/media/files?path=avatars/me.png" \
//!   -H "Authorization: Bearer $TOKEN" \
//!   --data-binary @me.png
//! ```

use actix_web::{delete, get, post, put, web, HttpResponse};
use validator::Validate;
use crate::core::errors::{validation_error, AppError};
use crate::domain::dto::media::{CreateVideoRequest, MediaPathQuery, StoredFileResponse, VideoResponse};
use crate::domain::models::auth::AuthenticatedUser;
use crate::services::media::MediaService;

#[utoipa::path(
    put,
    path = "/api/media/files",
    tag = "media",
    params(MediaPathQuery),
    request_body(content = Vec<u8>, content_type = "application/octet-stream"),
    responses(
        (status = 201, body = StoredFileResponse),
        (status = 400, description = "빈 본문 또는 잘못된 경로"),
        (status = 500, description = "Bunny Storage 오류"),
    )
)]
#[put("/files")]
pub async fn upload_file(
    auth: AuthenticatedUser,
    query: web::Query<MediaPathQuery>,
    body: web::Bytes,
) -> Result<HttpResponse, AppError> {
    let response = MediaService::instance()
        .upload_file(&auth, &query.path, body.to_vec())
        .await?;
    Ok(HttpResponse::Created().json(response))
}

/// 파일 다운로드. Bunny가 돌려준 Content-Type을 그대로 씁니다.
#[utoipa::path(
    get,
    path = "/api/media/files",
    tag = "media",
    params(MediaPathQuery),
    responses((status = 200, description = "파일 내용", body = Vec<u8>, content_type = "application/octet-stream"), (status = 404, description = "파일 없음"))
)]
#[get("/files")]
pub async fn download_file(
    auth: AuthenticatedUser,
    query: web::Query<MediaPathQuery>,
) -> Result<HttpResponse, AppError> {
    let (content, content_type) = MediaService::instance().download_file(&auth, &query.path).await?;

    Ok(HttpResponse::Ok()
        .content_type(content_type.unwrap_or_else(|| "application/octet-stream".to_string()))
        .body(content))
}

#[utoipa::path(
    delete,
    path = "/api/media/files",
    tag = "media",
    params(MediaPathQuery),
    responses((status = 204, description = "삭제됨"), (status = 404, description = "파일 없음"))
)]
#[delete("/files")]
pub async fn delete_file(
    auth: AuthenticatedUser,
    query: web::Query<MediaPathQuery>,
) -> Result<HttpResponse, AppError> {
    MediaService::instance().delete_file(&auth, &query.path).await?;
    Ok(HttpResponse::NoContent().finish())
}

#[utoipa::path(
    post,
    path = "/api/media/videos",
    tag = "media",
    request_body = CreateVideoRequest,
    responses((status = 201, body = VideoResponse))
)]
#[post("/videos")]
pub async fn create_video(
    auth: AuthenticatedUser,
    payload: web::Json<CreateVideoRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate().map_err(validation_error)?;

    let response = MediaService::instance().create_video(&auth, &payload.title).await?;
    Ok(HttpResponse::Created().json(response))
}

/// 비디오 원본 업로드. 등록자나 관리자만 가능하며, 업로드 후 인코딩 상태를 돌려줍니다.
#[utoipa::path(
    put,
    path = "/api/media/videos/{video_id}",
    tag = "media",
    params(("video_id" = String, Path, description = "Bunny Stream 비디오 GUID")),
    request_body(content = Vec<u8>, content_type = "application/octet-stream"),
    responses(
        (status = 200, body = VideoResponse),
        (status = 403, description = "등록자 아님"),
        (status = 404, description = "등록되지 않은 비디오"),
    )
)]
#[put("/videos/{video_id}")]
pub async fn upload_video(
    auth: AuthenticatedUser,
    path: web::Path<String>,
    body: web::Bytes,
) -> Result<HttpResponse, AppError> {
    let response = MediaService::instance()
        .upload_video(&auth, &path, body.to_vec())
        .await?;
    Ok(HttpResponse::Ok().json(response))
}

#[utoipa::path(
    get,
    path = "/api/media/videos/{video_id}",
    tag = "media",
    params(("video_id" = String, Path, description = "Bunny Stream 비디오 GUID")),
    responses((status = 200, body = VideoResponse), (status = 404, description = "등록되지 않은 비디오"))
)]
#[get("/videos/{video_id}")]
pub async fn get_video(path: web::Path<String>) -> Result<HttpResponse, AppError> {
    let response = MediaService::instance().get_video(&path).await?;
    Ok(HttpResponse::Ok().json(response))
}

#[utoipa::path(
    delete,
    path = "/api/media/videos/{video_id}",
    tag = "media",
    params(("video_id" = String, Path, description = "Bunny Stream 비디오 GUID")),
    responses(
        (status = 204, description = "삭제됨"),
        (status = 403, description = "등록자 아님"),
        (status = 404, description = "등록되지 않은 비디오"),
    )
)]
#[delete("/videos/{video_id}")]
pub async fn delete_video(auth: AuthenticatedUser, path: web::Path<String>) -> Result<HttpResponse, AppError> {
    MediaService::instance().delete_video(&auth, &path).await?;
    Ok(HttpResponse::NoContent().finish())
}
