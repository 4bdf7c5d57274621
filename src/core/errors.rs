//! # Application Error Handling System
//!
//! 플랫폼 API 전역에서 사용하는 통합 에러 타입입니다.
//! 모든 핸들러는 `Result<HttpResponse, AppError>`를 반환하며,
//! `actix_web::ResponseError` 구현을 통해 `{ "error": "..." }` 형식의
//! JSON 응답과 적절한 HTTP 상태 코드로 자동 변환됩니다.
//!
//! ## HTTP 응답 매핑
//!
//! | AppError | HTTP Status | 사용 시나리오 |
//! |----------|-------------|---------------|
//! | `ValidationError` | 400 Bad Request | 입력값 검증 실패, 위시리스트 한도 초과, 중복 지원 |
//! | `AuthenticationError` | 401 Unauthorized | Clerk 토큰 없음/만료/서명 오류 |
//! | `AuthorizationError` | 403 Forbidden | 소유자가 아닌 사용자의 수정, 관리자 전용 API |
//! | `NotFound` | 404 Not Found | 강좌, 게시물, 채용공고 등 리소스 없음 |
//! | `ConflictError` | 409 Conflict | 중복 수강신청, 중복 리뷰, 중복 팔로우 |
//! | `DatabaseError` | 500 Internal Server Error | MongoDB 오류 |
//! | `RedisError` | 500 Internal Server Error | 캐시 오류 |
//! | `ExternalServiceError` | 500 Internal Server Error | Bunny.net 호출 실패 |
//! | `InternalError` | 500 Internal Server Error | 예상치 못한 오류 |
//!
//! ## 사용 패턴
//!
//! ```rust,ignore
//! use crate::core::errors::AppError;
//!
//! async fn get_course(id: &str) -> Result<Course, AppError> {
//!     course_repo.find_by_id(id).await?
//!         .ok_or_else(|| AppError::NotFound("강좌를 찾을 수 없습니다".to_string()))
//! }
//! ```

use thiserror::Error;

/// 애플리케이션 전역 에러 타입
///
/// `thiserror`로 `Error` trait을 구현하고, `actix_web::ResponseError`를 구현하여
/// HTTP 응답으로 자동 변환됩니다. 재시도나 부분 실패 처리는 하지 않으며,
/// 외부 서비스 실패는 그대로 500으로 전달됩니다.
#[derive(Error, Debug)]
pub enum AppError {
    /// MongoDB 연산 실패 (500)
    #[error("Database error: {0}")]
    DatabaseError(String),

    /// Redis 캐시 연산 실패 (500)
    ///
    /// 캐시 조회/저장 실패는 대부분 로그만 남기고 무시되므로
    /// 실제로 클라이언트까지 전달되는 경우는 드뭅니다.
    #[error("Redis error: {0}")]
    RedisError(String),

    /// 입력값 검증 실패 (400)
    ///
    /// # 발생 시나리오
    /// - 필수 필드 누락 (예: 제목 없는 강좌 생성)
    /// - 잘못된 ObjectId 형식
    /// - 위시리스트 25개 한도 초과
    /// - 동일 채용공고 중복 지원
    /// - 퀴즈 문항 형식 오류
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// 리소스 없음 (404)
    #[error("Not found: {0}")]
    NotFound(String),

    /// 충돌/중복 (409)
    #[error("Conflict error: {0}")]
    ConflictError(String),

    /// 인증 실패 (401)
    ///
    /// Clerk 세션 토큰이 없거나 만료되었거나 서명이 올바르지 않은 경우입니다.
    #[error("Authentication error: {0}")]
    AuthenticationError(String),

    /// 권한 부족 (403)
    ///
    /// # 예제
    /// ```rust,ignore
    /// if course.instructor_id != user.id && !auth.is_admin() {
    ///     return Err(AppError::AuthorizationError(
    ///         "강좌를 수정할 권한이 없습니다".to_string()
    ///     ));
    /// }
    /// ```
    #[error("Authorization error: {0}")]
    AuthorizationError(String),

    /// 외부 서비스 호출 실패 (500)
    ///
    /// Bunny.net Storage/Stream API 호출이 실패하거나 2xx가 아닌 응답을
    /// 돌려준 경우입니다.
    #[error("External service error: {0}")]
    ExternalServiceError(String),

    /// 내부 서버 에러 (500)
    #[error("Internal server error: {0}")]
    InternalError(String),
}

impl AppError {
    /// 에러에 대응하는 HTTP 상태 코드
    pub fn status_code(&self) -> actix_web::http::StatusCode {
        use actix_web::http::StatusCode;

        match self {
            AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::ConflictError(_) => StatusCode::CONFLICT,
            AppError::AuthenticationError(_) => StatusCode::UNAUTHORIZED,
            AppError::AuthorizationError(_) => StatusCode::FORBIDDEN,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl actix_web::ResponseError for AppError {
    fn status_code(&self) -> actix_web::http::StatusCode {
        AppError::status_code(self)
    }

    /// 모든 에러 응답은 `{ "error": "..." }` 형식을 따릅니다.
    ///
    /// 5xx 에러는 서버 로그에 원인을 남깁니다.
    fn error_response(&self) -> actix_web::HttpResponse {
        let status = AppError::status_code(self);

        if status.is_server_error() {
            log::error!("❌ {}", self);
        }

        actix_web::HttpResponse::build(status)
            .json(serde_json::json!({
                "error": self.to_string()
            }))
    }
}

/// 편의성을 위한 Result 타입 별칭
pub type AppResult<T> = Result<T, AppError>;

/// 외부 라이브러리 에러를 AppError로 변환하는 확장 trait
///
/// ```rust,ignore
/// let json = serde_json::to_vec(&payload).context("페이로드 직렬화 실패")?;
/// ```
pub trait ErrorContext<T> {
    /// 컨텍스트 정보와 함께 에러를 변환합니다.
    fn context(self, msg: &str) -> AppResult<T>;

    /// 클로저를 사용하여 지연 평가된 컨텍스트를 제공합니다.
    fn with_context<F>(self, f: F) -> AppResult<T>
    where
        F: FnOnce() -> String;
}

impl<T, E> ErrorContext<T> for Result<T, E>
where
    E: std::fmt::Display,
{
    fn context(self, msg: &str) -> AppResult<T> {
        self.map_err(|e| AppError::InternalError(format!("{}: {}", msg, e)))
    }

    fn with_context<F>(self, f: F) -> AppResult<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| AppError::InternalError(format!("{}: {}", f(), e)))
    }
}

/// MongoDB 에러를 `DatabaseError`로 변환합니다.
///
/// 리포지토리 계층에서 `.map_err(db_error)` 형태로 사용합니다.
pub fn db_error(e: mongodb::error::Error) -> AppError {
    AppError::DatabaseError(e.to_string())
}

/// MongoDB 유니크 인덱스 위반 코드
pub const DUPLICATE_KEY_CODE: i32 = 11000;

/// 유니크 인덱스 위반(E11000)인지 확인합니다.
pub fn is_duplicate_key(e: &mongodb::error::Error) -> bool {
    use mongodb::error::{ErrorKind, WriteFailure};

    match e.kind.as_ref() {
        ErrorKind::Write(WriteFailure::WriteError(write_error)) => write_error.code == DUPLICATE_KEY_CODE,
        ErrorKind::Command(command_error) => command_error.code == DUPLICATE_KEY_CODE,
        _ => false,
    }
}

/// insert 실패를 변환합니다. 유니크 인덱스 위반은 `on_duplicate`, 나머지는 `DatabaseError`.
///
/// ```rust,ignore
/// collection.insert_one(&doc).await
///     .map_err(|e| insert_error(e, || AppError::ConflictError("중복".into())))?;
/// ```
pub fn insert_error(e: mongodb::error::Error, on_duplicate: impl FnOnce() -> AppError) -> AppError {
    if is_duplicate_key(&e) {
        on_duplicate()
    } else {
        db_error(e)
    }
}

/// `validator` 검증 결과를 `ValidationError`로 변환합니다.
pub fn validation_error(e: validator::ValidationErrors) -> AppError {
    AppError::ValidationError(e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::ResponseError;
    use actix_web::http::StatusCode;

    fn duplicate_key_error() -> mongodb::error::Error {
        use mongodb::error::{ErrorKind, WriteError, WriteFailure};

        let write_error: WriteError = mongodb::bson::from_document(mongodb::bson::doc! {
            "code": DUPLICATE_KEY_CODE,
            "codeName": "DuplicateKey",
            "errmsg": "E11000 duplicate key error collection: learnhub.applications",
        }).unwrap();

        mongodb::error::Error::from(ErrorKind::Write(WriteFailure::WriteError(write_error)))
    }

    #[test]
    fn test_duplicate_key_maps_to_caller_error() {
        let err = insert_error(duplicate_key_error(), || AppError::ValidationError("이미 지원한 공고입니다".to_string()));

        assert!(matches!(err, AppError::ValidationError(_)));
        assert_eq!(err.error_response().status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_other_insert_failures_stay_database_errors() {
        let other = mongodb::error::Error::custom("connection reset");

        assert!(!is_duplicate_key(&other));
        assert!(matches!(
            insert_error(other, || AppError::ConflictError("중복".to_string())),
            AppError::DatabaseError(_)
        ));
    }

    #[test]
    fn test_validation_error_response() {
        let error = AppError::ValidationError("제목은 필수입니다".to_string());
        let response = error.error_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_not_found_error_response() {
        let error = AppError::NotFound("강좌를 찾을 수 없습니다".to_string());
        assert_eq!(error.error_response().status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_conflict_error_response() {
        let error = AppError::ConflictError("이미 수강 중인 강좌입니다".to_string());
        assert_eq!(error.error_response().status(), StatusCode::CONFLICT);
    }

    #[test]
    fn test_auth_error_responses() {
        let unauthenticated = AppError::AuthenticationError("토큰 없음".to_string());
        let forbidden = AppError::AuthorizationError("권한 없음".to_string());

        assert_eq!(unauthenticated.error_response().status(), StatusCode::UNAUTHORIZED);
        assert_eq!(forbidden.error_response().status(), StatusCode::FORBIDDEN);
    }

    #[test]
    fn test_server_side_errors_map_to_500() {
        let errors = [
            AppError::DatabaseError("connection reset".to_string()),
            AppError::RedisError("timeout".to_string()),
            AppError::ExternalServiceError("bunny returned 502".to_string()),
            AppError::InternalError("unexpected".to_string()),
        ];

        for error in errors {
            assert_eq!(error.error_response().status(), StatusCode::INTERNAL_SERVER_ERROR);
        }
    }

    #[test]
    fn test_error_context_trait() {
        let result: Result<(), &str> = Err("original error");
        let app_result = result.context("Additional context");

        match app_result {
            Err(AppError::InternalError(msg)) => {
                assert!(msg.contains("Additional context"));
                assert!(msg.contains("original error"));
            }
            _ => panic!("Expected InternalError"),
        }
    }

    #[test]
    fn test_error_message_format() {
        let error = AppError::ValidationError("위시리스트는 최대 25개까지 담을 수 있습니다".to_string());
        assert_eq!(
            error.to_string(),
            "Validation error: 위시리스트는 최대 25개까지 담을 수 있습니다"
        );
    }
}
