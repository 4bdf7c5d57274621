use std::future::{ready, Ready};
use actix_web::{Error, FromRequest, HttpMessage, HttpRequest};
use serde::{Deserialize, Serialize};
use crate::core::errors::AppError;
use crate::domain::models::auth::clerk_claims::ClerkClaims;

/// 검증된 Clerk 세션 토큰에서 추출한 호출자 정보
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AuthenticatedUser {
    /// Clerk 사용자 ID (`sub`). 로컬 `User` 문서의 `clerk_id`와 대응합니다.
    pub user_id: String,

    pub email: Option<String>,

    /// 사용자 역할 목록 (항상 `user` 포함)
    pub roles: Vec<String>,
}

impl AuthenticatedUser {
    /// 특정 역할을 보유하고 있는지 확인
    pub fn has_role(&self, role: &str) -> bool {
        self.roles.iter().any(|r| r == role)
    }

    pub fn is_admin(&self) -> bool {
        self.has_role("admin")
    }
}

impl From<ClerkClaims> for AuthenticatedUser {
    fn from(claims: ClerkClaims) -> Self {
        let roles = claims.roles();
        Self {
            user_id: claims.sub,
            email: claims.email,
            roles,
        }
    }
}

/// ActixWeb FromRequest trait 구현
///
/// `AuthMiddleware`가 Request Extensions에 넣어 둔 값을 꺼냅니다.
impl FromRequest for AuthenticatedUser {
    type Error = Error;
    type Future = Ready<actix_web::Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut actix_web::dev::Payload) -> Self::Future {
        match req.extensions().get::<AuthenticatedUser>() {
            Some(user) => ready(Ok(user.clone())),
            None => ready(Err(AppError::AuthenticationError(
                "인증되지 않은 요청입니다".to_string()
            ).into())),
        }
    }
}

/// 선택적 인증 사용자 추출자
#[derive(Debug, Clone)]
pub struct OptionalUser(pub Option<AuthenticatedUser>);

impl FromRequest for OptionalUser {
    type Error = Error;
    type Future = Ready<actix_web::Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut actix_web::dev::Payload) -> Self::Future {
        let user = req.extensions().get::<AuthenticatedUser>().cloned();
        ready(Ok(OptionalUser(user)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_has_role() {
        let user = AuthenticatedUser {
            user_id: "user_1".to_string(),
            email: None,
            roles: vec!["admin".to_string(), "user".to_string()],
        };

        assert!(user.has_role("admin"));
        assert!(!user.has_role("moderator"));
        assert!(user.is_admin());
    }

    #[actix_web::test]
    async fn test_extractor_without_user_is_unauthorized() {
        let req = actix_web::test::TestRequest::default().to_http_request();
        let result = AuthenticatedUser::extract(&req).await;

        let err = result.expect_err("extensions are empty");
        assert_eq!(err.as_response_error().status_code(), actix_web::http::StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn test_optional_user_without_user() {
        let req = actix_web::test::TestRequest::default().to_http_request();
        let OptionalUser(user) = OptionalUser::extract(&req).await.unwrap();
        assert!(user.is_none());
    }
}
