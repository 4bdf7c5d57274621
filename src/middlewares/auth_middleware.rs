//! Clerk 세션 토큰 인증 미들웨어
//!
//! 스코프 단위로 적용하며, 검증된 호출자를 Request Extensions에 넣어
//! 핸들러가 `AuthenticatedUser` / `OptionalUser` 추출자로 꺼내 쓰게 합니다.

use std::future::{ready, Ready};
use std::rc::Rc;

use actix_web::{
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    Error, Result,
    body::EitherBody,
};
use crate::domain::models::auth::{AuthMode, RequiredRole};
use crate::middlewares::auth_inner::AuthMiddlewareService;

pub struct AuthMiddleware {
    mode: AuthMode,
    required_role: Option<RequiredRole>,
}

impl AuthMiddleware {
    pub fn new(mode: AuthMode) -> Self {
        Self {
            mode,
            required_role: None,
        }
    }

    /// 토큰 필수 (없으면 401)
    pub fn required() -> Self {
        Self::new(AuthMode::Required)
    }

    /// 토큰 선택 (있으면 검증, 없으면 익명)
    pub fn optional() -> Self {
        Self::new(AuthMode::Optional)
    }

    /// 토큰 필수 + `admin` 역할 (부족하면 403)
    pub fn admin() -> Self {
        Self {
            mode: AuthMode::Required,
            required_role: Some(RequiredRole::admin()),
        }
    }
}

impl<S, B> Transform<S, ServiceRequest> for AuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Transform = AuthMiddlewareService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthMiddlewareService {
            service: Rc::new(service),
            mode: self.mode,
            required_role: self.required_role.clone(),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{get, test, App, HttpResponse};
    use actix_web::http::StatusCode;
    use crate::domain::models::auth::OptionalUser;

    #[get("/ping")]
    async fn ping(user: OptionalUser) -> HttpResponse {
        HttpResponse::Ok().json(serde_json::json!({ "signed_in": user.0.is_some() }))
    }

    #[actix_web::test]
    async fn test_required_without_header_is_401() {
        let app = test::init_service(
            App::new().service(actix_web::web::scope("/api").wrap(AuthMiddleware::required()).service(ping))
        ).await;

        let req = test::TestRequest::get().uri("/api/ping").to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert!(body["error"].is_string());
    }

    #[actix_web::test]
    async fn test_malformed_header_is_401() {
        let app = test::init_service(
            App::new().service(actix_web::web::scope("/api").wrap(AuthMiddleware::admin()).service(ping))
        ).await;

        let req = test::TestRequest::get()
            .uri("/api/ping")
            .insert_header(("Authorization", "Basic Zm9vOmJhcg=="))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn test_optional_without_header_passes() {
        let app = test::init_service(
            App::new().service(actix_web::web::scope("/api").wrap(AuthMiddleware::optional()).service(ping))
        ).await;

        let req = test::TestRequest::get().uri("/api/ping").to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::OK);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["signed_in"], false);
    }
}
