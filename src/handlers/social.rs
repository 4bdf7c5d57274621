//! # Social HTTP Handlers
//!
//! 게시물 피드, 댓글, 해시태그, 1:1 메시지 엔드포인트입니다.
//!
//! ```text
//! /api/posts        피드, 작성, 좋아요, 댓글
//! /api/comments     댓글 삭제
//! /api/hashtags     인기 해시태그
//! /api/messages     대화 목록, 스레드, 안 읽은 수
//! ```

use actix_web::{delete, get, post, put, web, HttpResponse};
use validator::Validate;
use crate::core::errors::{validation_error, AppError};
use crate::domain::dto::common::{PaginatedResponse, PaginationQuery};
use crate::domain::dto::social::{
    CommentRequest, CommentResponse, ConversationResponse, DirectMessageResponse, HashtagResponse,
    LikeResponse, PostFilter, PostRequest, PostResponse, SendMessageRequest, TrendingQuery, UnreadCountResponse,
};
use crate::domain::models::auth::AuthenticatedUser;
use crate::services::social::{CommentService, MessageService, PostService};

/// 게시물 피드
///
/// `following=true`면 내가 팔로우하는 사용자의 게시물만 보여줍니다.
#[utoipa::path(
    get,
    path = "/api/posts",
    tag = "posts",
    params(PostFilter, PaginationQuery),
    responses((status = 200, body = PaginatedResponse<PostResponse>))
)]
#[get("")]
pub async fn feed(
    auth: AuthenticatedUser,
    filter: web::Query<PostFilter>,
    page: web::Query<PaginationQuery>,
) -> Result<HttpResponse, AppError> {
    let response = PostService::instance().feed(&auth, &filter, &page).await?;
    Ok(HttpResponse::Ok().json(response))
}

#[utoipa::path(
    post,
    path = "/api/posts",
    tag = "posts",
    request_body = PostRequest,
    responses((status = 201, body = PostResponse), (status = 400, description = "내용 없음"))
)]
#[post("")]
pub async fn create_post(
    auth: AuthenticatedUser,
    payload: web::Json<PostRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate().map_err(validation_error)?;

    let response = PostService::instance().create(&auth, payload.into_inner()).await?;
    Ok(HttpResponse::Created().json(response))
}

#[utoipa::path(
    get,
    path = "/api/posts/{id}",
    tag = "posts",
    params(("id" = String, Path, description = "게시물 ID")),
    responses((status = 200, body = PostResponse), (status = 404, description = "게시물 없음"))
)]
#[get("/{id}")]
pub async fn get_post(auth: AuthenticatedUser, path: web::Path<String>) -> Result<HttpResponse, AppError> {
    let response = PostService::instance().get(&auth, &path).await?;
    Ok(HttpResponse::Ok().json(response))
}

#[utoipa::path(
    put,
    path = "/api/posts/{id}",
    tag = "posts",
    params(("id" = String, Path, description = "게시물 ID")),
    request_body = PostRequest,
    responses((status = 200, body = PostResponse), (status = 403, description = "작성자 아님"))
)]
#[put("/{id}")]
pub async fn update_post(
    auth: AuthenticatedUser,
    path: web::Path<String>,
    payload: web::Json<PostRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate().map_err(validation_error)?;

    let response = PostService::instance().update(&auth, &path, payload.into_inner()).await?;
    Ok(HttpResponse::Ok().json(response))
}

#[utoipa::path(
    delete,
    path = "/api/posts/{id}",
    tag = "posts",
    params(("id" = String, Path, description = "게시물 ID")),
    responses((status = 204, description = "삭제됨"), (status = 403, description = "작성자 아님"))
)]
#[delete("/{id}")]
pub async fn delete_post(auth: AuthenticatedUser, path: web::Path<String>) -> Result<HttpResponse, AppError> {
    PostService::instance().delete(&auth, &path).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// 좋아요 토글
#[utoipa::path(
    post,
    path = "/api/posts/{id}/like",
    tag = "posts",
    params(("id" = String, Path, description = "게시물 ID")),
    responses((status = 200, body = LikeResponse))
)]
#[post("/{id}/like")]
pub async fn toggle_like(auth: AuthenticatedUser, path: web::Path<String>) -> Result<HttpResponse, AppError> {
    let response = PostService::instance().toggle_like(&auth, &path).await?;
    Ok(HttpResponse::Ok().json(response))
}

#[utoipa::path(
    get,
    path = "/api/posts/{id}/comments",
    tag = "comments",
    params(("id" = String, Path, description = "게시물 ID"), PaginationQuery),
    responses((status = 200, body = PaginatedResponse<CommentResponse>))
)]
#[get("/{id}/comments")]
pub async fn list_comments(
    path: web::Path<String>,
    page: web::Query<PaginationQuery>,
) -> Result<HttpResponse, AppError> {
    let response = CommentService::instance().list(&path, &page).await?;
    Ok(HttpResponse::Ok().json(response))
}

#[utoipa::path(
    post,
    path = "/api/posts/{id}/comments",
    tag = "comments",
    params(("id" = String, Path, description = "게시물 ID")),
    request_body = CommentRequest,
    responses((status = 201, body = CommentResponse), (status = 404, description = "게시물 없음"))
)]
#[post("/{id}/comments")]
pub async fn create_comment(
    auth: AuthenticatedUser,
    path: web::Path<String>,
    payload: web::Json<CommentRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate().map_err(validation_error)?;

    let response = CommentService::instance().create(&auth, &path, payload.into_inner()).await?;
    Ok(HttpResponse::Created().json(response))
}

/// 댓글 삭제 (댓글 작성자, 게시물 작성자, 관리자)
#[utoipa::path(
    delete,
    path = "/api/comments/{id}",
    tag = "comments",
    params(("id" = String, Path, description = "댓글 ID")),
    responses((status = 204, description = "삭제됨"), (status = 403, description = "권한 없음"))
)]
#[delete("/{id}")]
pub async fn delete_comment(auth: AuthenticatedUser, path: web::Path<String>) -> Result<HttpResponse, AppError> {
    CommentService::instance().delete(&auth, &path).await?;
    Ok(HttpResponse::NoContent().finish())
}

#[utoipa::path(
    get,
    path = "/api/hashtags/trending",
    tag = "hashtags",
    params(TrendingQuery),
    responses((status = 200, body = Vec<HashtagResponse>))
)]
#[get("/trending")]
pub async fn trending_hashtags(query: web::Query<TrendingQuery>) -> Result<HttpResponse, AppError> {
    let response = PostService::instance().trending(&query).await?;
    Ok(HttpResponse::Ok().json(response))
}

/// 메시지 보내기. 자기 자신에게는 400, 없는 수신자는 404입니다.
#[utoipa::path(
    post,
    path = "/api/messages",
    tag = "messages",
    request_body = SendMessageRequest,
    responses(
        (status = 201, body = DirectMessageResponse),
        (status = 400, description = "자기 자신에게 전송"),
        (status = 404, description = "수신자 없음"),
    )
)]
#[post("")]
pub async fn send_message(
    auth: AuthenticatedUser,
    payload: web::Json<SendMessageRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate().map_err(validation_error)?;

    let response = MessageService::instance().send(&auth, payload.into_inner()).await?;
    Ok(HttpResponse::Created().json(response))
}

#[utoipa::path(
    get,
    path = "/api/messages/conversations",
    tag = "messages",
    responses((status = 200, body = Vec<ConversationResponse>))
)]
#[get("/conversations")]
pub async fn conversations(auth: AuthenticatedUser) -> Result<HttpResponse, AppError> {
    let response = MessageService::instance().conversations(&auth).await?;
    Ok(HttpResponse::Ok().json(response))
}

/// 상대방과의 대화 (오래된 순). 조회하면 받은 메시지가 읽음 처리됩니다.
#[utoipa::path(
    get,
    path = "/api/messages/with/{user_id}",
    tag = "messages",
    params(("user_id" = String, Path, description = "상대 사용자 ID"), PaginationQuery),
    responses((status = 200, body = PaginatedResponse<DirectMessageResponse>))
)]
#[get("/with/{user_id}")]
pub async fn thread(
    auth: AuthenticatedUser,
    path: web::Path<String>,
    page: web::Query<PaginationQuery>,
) -> Result<HttpResponse, AppError> {
    let response = MessageService::instance().thread(&auth, &path, &page).await?;
    Ok(HttpResponse::Ok().json(response))
}

#[utoipa::path(
    get,
    path = "/api/messages/unread-count",
    tag = "messages",
    responses((status = 200, body = UnreadCountResponse))
)]
#[get("/unread-count")]
pub async fn unread_count(auth: AuthenticatedUser) -> Result<HttpResponse, AppError> {
    let response = MessageService::instance().unread_count(&auth).await?;
    Ok(HttpResponse::Ok().json(response))
}
