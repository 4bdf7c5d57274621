//! # Cart / Wishlist / Address HTTP Handlers
//!
//! 사용자별 커머스 문서를 다룹니다. 모든 경로는 호출자 자신의 문서만 대상으로 합니다.

use actix_web::{delete, get, patch, post, put, web, HttpResponse};
use validator::Validate;
use crate::core::errors::{validation_error, AppError};
use crate::domain::dto::commerce::{
    AddCourseRequest, AddressRequest, AddressResponse, CartResponse, WishlistResponse,
};
use crate::domain::models::auth::AuthenticatedUser;
use crate::services::commerce::{AddressService, CartService, WishlistService};

/// 장바구니 (강좌 제목/가격과 합계 포함)
#[utoipa::path(get, path = "/api/cart", tag = "cart", responses((status = 200, body = CartResponse)))]
#[get("")]
pub async fn get_cart(auth: AuthenticatedUser) -> Result<HttpResponse, AppError> {
    let response = CartService::instance().get(&auth).await?;
    Ok(HttpResponse::Ok().json(response))
}

#[utoipa::path(
    post,
    path = "/api/cart",
    tag = "cart",
    request_body = AddCourseRequest,
    responses(
        (status = 200, body = CartResponse),
        (status = 400, description = "이미 수강 중"),
        (status = 404, description = "강좌 없음"),
        (status = 409, description = "이미 장바구니에 있음"),
    )
)]
#[post("")]
pub async fn add_to_cart(
    auth: AuthenticatedUser,
    payload: web::Json<AddCourseRequest>,
) -> Result<HttpResponse, AppError> {
    let response = CartService::instance().add(&auth, payload.into_inner()).await?;
    Ok(HttpResponse::Ok().json(response))
}

#[utoipa::path(
    delete,
    path = "/api/cart/{course_id}",
    tag = "cart",
    params(("course_id" = String, Path, description = "강좌 ID")),
    responses((status = 200, body = CartResponse), (status = 404, description = "장바구니에 없음"))
)]
#[delete("/{course_id}")]
pub async fn remove_from_cart(auth: AuthenticatedUser, path: web::Path<String>) -> Result<HttpResponse, AppError> {
    let response = CartService::instance().remove(&auth, &path).await?;
    Ok(HttpResponse::Ok().json(response))
}

#[utoipa::path(delete, path = "/api/cart", tag = "cart", responses((status = 200, body = CartResponse)))]
#[delete("")]
pub async fn clear_cart(auth: AuthenticatedUser) -> Result<HttpResponse, AppError> {
    let response = CartService::instance().clear(&auth).await?;
    Ok(HttpResponse::Ok().json(response))
}

#[utoipa::path(get, path = "/api/wishlist", tag = "wishlist", responses((status = 200, body = WishlistResponse)))]
#[get("")]
pub async fn get_wishlist(auth: AuthenticatedUser) -> Result<HttpResponse, AppError> {
    let response = WishlistService::instance().get(&auth).await?;
    Ok(HttpResponse::Ok().json(response))
}

/// 위시리스트 추가. 최대 25개, 중복은 409입니다.
#[utoipa::path(
    post,
    path = "/api/wishlist",
    tag = "wishlist",
    request_body = AddCourseRequest,
    responses(
        (status = 200, body = WishlistResponse),
        (status = 400, description = "최대 개수 초과"),
        (status = 404, description = "강좌 없음"),
        (status = 409, description = "이미 위시리스트에 있음"),
    )
)]
#[post("")]
pub async fn add_to_wishlist(
    auth: AuthenticatedUser,
    payload: web::Json<AddCourseRequest>,
) -> Result<HttpResponse, AppError> {
    let response = WishlistService::instance().add(&auth, payload.into_inner()).await?;
    Ok(HttpResponse::Ok().json(response))
}

#[utoipa::path(
    delete,
    path = "/api/wishlist/{course_id}",
    tag = "wishlist",
    params(("course_id" = String, Path, description = "강좌 ID")),
    responses((status = 200, body = WishlistResponse), (status = 404, description = "위시리스트에 없음"))
)]
#[delete("/{course_id}")]
pub async fn remove_from_wishlist(auth: AuthenticatedUser, path: web::Path<String>) -> Result<HttpResponse, AppError> {
    let response = WishlistService::instance().remove(&auth, &path).await?;
    Ok(HttpResponse::Ok().json(response))
}

/// 내 주소 목록 (기본 주소 먼저)
#[utoipa::path(get, path = "/api/addresses", tag = "addresses", responses((status = 200, body = Vec<AddressResponse>)))]
#[get("")]
pub async fn list_addresses(auth: AuthenticatedUser) -> Result<HttpResponse, AppError> {
    let response = AddressService::instance().list(&auth).await?;
    Ok(HttpResponse::Ok().json(response))
}

/// 주소 추가. 첫 주소는 자동으로 기본 주소가 됩니다.
#[utoipa::path(
    post,
    path = "/api/addresses",
    tag = "addresses",
    request_body = AddressRequest,
    responses((status = 201, body = AddressResponse), (status = 400, description = "입력 검증 실패"))
)]
#[post("")]
pub async fn create_address(
    auth: AuthenticatedUser,
    payload: web::Json<AddressRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate().map_err(validation_error)?;

    let response = AddressService::instance().create(&auth, payload.into_inner()).await?;
    Ok(HttpResponse::Created().json(response))
}

#[utoipa::path(
    put,
    path = "/api/addresses/{id}",
    tag = "addresses",
    params(("id" = String, Path, description = "주소 ID")),
    request_body = AddressRequest,
    responses((status = 200, body = AddressResponse), (status = 404, description = "주소 없음"))
)]
#[put("/{id}")]
pub async fn update_address(
    auth: AuthenticatedUser,
    path: web::Path<String>,
    payload: web::Json<AddressRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate().map_err(validation_error)?;

    let response = AddressService::instance().update(&auth, &path, payload.into_inner()).await?;
    Ok(HttpResponse::Ok().json(response))
}

/// 기본 주소 지정. 다른 주소의 기본 표시는 모두 해제됩니다.
#[utoipa::path(
    patch,
    path = "/api/addresses/{id}/default",
    tag = "addresses",
    params(("id" = String, Path, description = "주소 ID")),
    responses((status = 200, body = AddressResponse), (status = 404, description = "주소 없음"))
)]
#[patch("/{id}/default")]
pub async fn set_default_address(auth: AuthenticatedUser, path: web::Path<String>) -> Result<HttpResponse, AppError> {
    let response = AddressService::instance().set_default(&auth, &path).await?;
    Ok(HttpResponse::Ok().json(response))
}

#[utoipa::path(
    delete,
    path = "/api/addresses/{id}",
    tag = "addresses",
    params(("id" = String, Path, description = "주소 ID")),
    responses((status = 204, description = "삭제됨"), (status = 404, description = "주소 없음"))
)]
#[delete("/{id}")]
pub async fn delete_address(auth: AuthenticatedUser, path: web::Path<String>) -> Result<HttpResponse, AppError> {
    AddressService::instance().delete(&auth, &path).await?;
    Ok(HttpResponse::NoContent().finish())
}
