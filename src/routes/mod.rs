//! API 라우트 설정 모듈
//!
//! 영역별 스코프를 등록하고 스코프마다 인증 레벨을 적용합니다.
//!
//! | 스코프 | 인증 |
//! |--------|------|
//! | `/health`, `/api/docs` | 없음 |
//! | `/api/search` | 선택 (`AuthMiddleware::optional()`) |
//! | `/api/admin` | 필수 + `admin` 역할 |
//! | 그 외 `/api/*` | 필수 |
//!
//! 같은 스코프 안에서는 고정 경로(`/me`, `/mine`)를 `/{id}`보다 먼저 등록합니다.
//!
//! # Examples
//!
//! ```rust,ignore
//! use actix_web::App;
//!
//! let app = App::new().configure(configure_all_routes);
//! ```

use actix_web::{error, web, HttpRequest, HttpResponse};
use serde_json::json;
use crate::config::UploadConfig;
use crate::core::errors::AppError;
use crate::docs;
use crate::handlers;
use crate::middlewares::AuthMiddleware;

/// 모든 라우트를 설정합니다
pub fn configure_all_routes(cfg: &mut web::ServiceConfig) {
    configure_extractors(cfg);

    cfg.service(health_check);
    cfg.service(web::scope("/api/docs").service(docs::openapi_json));

    configure_user_routes(cfg);
    configure_course_routes(cfg);
    configure_quiz_routes(cfg);
    configure_job_routes(cfg);
    configure_commerce_routes(cfg);
    configure_social_routes(cfg);
    configure_content_routes(cfg);
    configure_activity_routes(cfg);
    configure_admin_routes(cfg);
    configure_media_routes(cfg);
}

/// JSON / 쿼리 / 경로 추출 실패를 `{ "error": ... }` 400 응답으로 통일합니다.
fn configure_extractors(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(json_error))
        .app_data(web::QueryConfig::default().error_handler(query_error))
        .app_data(web::PathConfig::default().error_handler(path_error));
}

fn json_error(err: error::JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    AppError::ValidationError(format!("요청 본문을 해석할 수 없습니다: {}", err)).into()
}

fn query_error(err: error::QueryPayloadError, _req: &HttpRequest) -> actix_web::Error {
    AppError::ValidationError(format!("쿼리 파라미터가 올바르지 않습니다: {}", err)).into()
}

fn path_error(err: error::PathError, _req: &HttpRequest) -> actix_web::Error {
    AppError::ValidationError(format!("경로 파라미터가 올바르지 않습니다: {}", err)).into()
}

fn configure_user_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/users")
            .wrap(AuthMiddleware::required())
            .service(handlers::users::create_profile)
            .service(handlers::users::get_me)
            .service(handlers::users::update_me)
            .service(handlers::users::my_courses)
            .service(handlers::users::get_user)
            .service(handlers::users::follow)
            .service(handlers::users::unfollow)
            .service(handlers::users::followers)
            .service(handlers::users::following)
    );
}

fn configure_course_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/courses")
            .wrap(AuthMiddleware::required())
            .service(handlers::courses::list_courses)
            .service(handlers::courses::create_course)
            .service(handlers::courses::my_courses)
            .service(handlers::courses::get_course)
            .service(handlers::courses::replace_course)
            .service(handlers::courses::patch_course)
            .service(handlers::courses::delete_course)
            .service(handlers::courses::enroll)
            .service(handlers::courses::list_reviews)
            .service(handlers::courses::create_review)
    );

    cfg.service(
        web::scope("/api/reviews")
            .wrap(AuthMiddleware::required())
            .service(handlers::courses::delete_review)
    );
}

fn configure_quiz_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/quizzes")
            .wrap(AuthMiddleware::required())
            .service(handlers::quizzes::list_quizzes)
            .service(handlers::quizzes::create_quiz)
            .service(handlers::quizzes::get_quiz)
            .service(handlers::quizzes::update_quiz)
            .service(handlers::quizzes::delete_quiz)
            .service(handlers::quizzes::submit_attempt)
            .service(handlers::quizzes::my_attempts)
    );
}

fn configure_job_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/jobs")
            .wrap(AuthMiddleware::required())
            .service(handlers::jobs::list_jobs)
            .service(handlers::jobs::create_job)
            .service(handlers::jobs::my_jobs)
            .service(handlers::jobs::get_job)
            .service(handlers::jobs::replace_job)
            .service(handlers::jobs::patch_job)
            .service(handlers::jobs::delete_job)
            .service(handlers::jobs::list_job_applications)
    );

    cfg.service(
        web::scope("/api/applications")
            .wrap(AuthMiddleware::required())
            .service(handlers::jobs::apply)
            .service(handlers::jobs::my_applications)
            .service(handlers::jobs::get_application)
            .service(handlers::jobs::update_application_status)
            .service(handlers::jobs::withdraw_application)
    );
}

fn configure_commerce_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/cart")
            .wrap(AuthMiddleware::required())
            .service(handlers::commerce::get_cart)
            .service(handlers::commerce::add_to_cart)
            .service(handlers::commerce::clear_cart)
            .service(handlers::commerce::remove_from_cart)
    );

    cfg.service(
        web::scope("/api/wishlist")
            .wrap(AuthMiddleware::required())
            .service(handlers::commerce::get_wishlist)
            .service(handlers::commerce::add_to_wishlist)
            .service(handlers::commerce::remove_from_wishlist)
    );

    cfg.service(
        web::scope("/api/addresses")
            .wrap(AuthMiddleware::required())
            .service(handlers::commerce::list_addresses)
            .service(handlers::commerce::create_address)
            .service(handlers::commerce::update_address)
            .service(handlers::commerce::set_default_address)
            .service(handlers::commerce::delete_address)
    );
}

fn configure_social_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/posts")
            .wrap(AuthMiddleware::required())
            .service(handlers::social::feed)
            .service(handlers::social::create_post)
            .service(handlers::social::get_post)
            .service(handlers::social::update_post)
            .service(handlers::social::delete_post)
            .service(handlers::social::toggle_like)
            .service(handlers::social::list_comments)
            .service(handlers::social::create_comment)
    );

    cfg.service(
        web::scope("/api/comments")
            .wrap(AuthMiddleware::required())
            .service(handlers::social::delete_comment)
    );

    cfg.service(
        web::scope("/api/hashtags")
            .wrap(AuthMiddleware::required())
            .service(handlers::social::trending_hashtags)
    );

    cfg.service(
        web::scope("/api/messages")
            .wrap(AuthMiddleware::required())
            .service(handlers::social::send_message)
            .service(handlers::social::conversations)
            .service(handlers::social::unread_count)
            .service(handlers::social::thread)
    );
}

fn configure_content_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/publications")
            .wrap(AuthMiddleware::required())
            .service(handlers::content::list_publications)
            .service(handlers::content::create_publication)
            .service(handlers::content::get_publication)
            .service(handlers::content::update_publication)
            .service(handlers::content::delete_publication)
    );

    cfg.service(
        web::scope("/api/schedules")
            .wrap(AuthMiddleware::required())
            .service(handlers::content::list_schedules)
            .service(handlers::content::create_schedule)
            .service(handlers::content::update_schedule)
            .service(handlers::content::delete_schedule)
    );
}

fn configure_activity_routes(cfg: &mut web::ServiceConfig) {
    // 익명 검색 허용. 검색 기록은 핸들러의 AuthenticatedUser 추출자가 401 처리
    cfg.service(
        web::scope("/api/search")
            .wrap(AuthMiddleware::optional())
            .service(handlers::activity::search)
            .service(handlers::activity::search_history)
            .service(handlers::activity::clear_search_history)
    );

    cfg.service(
        web::scope("/api/activity")
            .wrap(AuthMiddleware::required())
            .service(handlers::activity::my_activity)
    );
}

fn configure_admin_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/admin")
            .wrap(AuthMiddleware::admin())
            .service(handlers::admin::analytics)
            .service(handlers::admin::list_users)
            .service(handlers::admin::all_activity)
    );
}

fn configure_media_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/media")
            .wrap(AuthMiddleware::required())
            .app_data(web::PayloadConfig::new(UploadConfig::max_bytes()))
            .service(handlers::media::upload_file)
            .service(handlers::media::download_file)
            .service(handlers::media::delete_file)
            .service(handlers::media::create_video)
            .service(handlers::media::upload_video)
            .service(handlers::media::get_video)
            .service(handlers::media::delete_video)
    );
}

/// 서비스 상태를 확인하는 헬스체크 엔드포인트
///
/// 로드밸런서나 모니터링 시스템에서 사용합니다. 데이터 스토어에는 접근하지 않습니다.
///
/// ```bash
/// curl http://localhost:8080/health
/// ```
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    security(()),
    responses((status = 200, description = "서비스 정상"))
)]
#[actix_web::get("/health")]
pub async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(json!({
        "status": "healthy",
        "service": "learnhub_backend",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "features": {
            "database": "MongoDB",
            "cache": "Redis",
            "auth": "Clerk",
            "media": "Bunny.net",
            "dependency_injection": "Singleton Macro"
        }
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;
    use actix_web::{test, App};

    #[actix_web::test]
    async fn test_health_check() {
        let app = test::init_service(App::new().configure(configure_all_routes)).await;

        let req = test::TestRequest::get().uri("/health").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["service"], "learnhub_backend");
    }

    #[actix_web::test]
    async fn test_protected_routes_require_token() {
        let app = test::init_service(App::new().configure(configure_all_routes)).await;

        for uri in ["/api/courses", "/api/users/me", "/api/cart", "/api/messages/unread-count"] {
            let req = test::TestRequest::get().uri(uri).to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::UNAUTHORIZED, "{}", uri);
        }
    }

    #[actix_web::test]
    async fn test_admin_routes_require_token() {
        let app = test::init_service(App::new().configure(configure_all_routes)).await;

        let req = test::TestRequest::get().uri("/api/admin/analytics").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn test_search_history_requires_token_even_in_optional_scope() {
        let app = test::init_service(App::new().configure(configure_all_routes)).await;

        let req = test::TestRequest::get().uri("/api/search/history").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn test_openapi_is_public() {
        let app = test::init_service(App::new().configure(configure_all_routes)).await;

        let req = test::TestRequest::get().uri("/api/docs/openapi.json").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
    }
}
