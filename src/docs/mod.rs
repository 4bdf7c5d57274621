//! OpenAPI 문서
//!
//! 핸들러의 `#[utoipa::path]`를 모아 하나의 OpenAPI 3 문서로 만들고
//! `GET /api/docs/openapi.json`으로 제공합니다. 스키마는 경로에서 참조된 타입이 자동 수집됩니다.

use actix_web::{get, HttpResponse};
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};
use crate::domain::dto::common::{ErrorResponse, MessageResponse};
use crate::handlers;
use crate::routes;

#[derive(OpenApi)]
#[openapi(
    info(title = "LearnHub API", description = "강좌, 퀴즈, 채용, 커머스, 소셜 피드 API"),
    paths(
        routes::health_check,
        handlers::users::create_profile,
        handlers::users::get_me,
        handlers::users::update_me,
        handlers::users::my_courses,
        handlers::users::get_user,
        handlers::users::follow,
        handlers::users::unfollow,
        handlers::users::followers,
        handlers::users::following,
        handlers::courses::list_courses,
        handlers::courses::create_course,
        handlers::courses::my_courses,
        handlers::courses::get_course,
        handlers::courses::replace_course,
        handlers::courses::patch_course,
        handlers::courses::delete_course,
        handlers::courses::enroll,
        handlers::courses::list_reviews,
        handlers::courses::create_review,
        handlers::courses::delete_review,
        handlers::quizzes::list_quizzes,
        handlers::quizzes::create_quiz,
        handlers::quizzes::get_quiz,
        handlers::quizzes::update_quiz,
        handlers::quizzes::delete_quiz,
        handlers::quizzes::submit_attempt,
        handlers::quizzes::my_attempts,
        handlers::jobs::list_jobs,
        handlers::jobs::create_job,
        handlers::jobs::my_jobs,
        handlers::jobs::get_job,
        handlers::jobs::replace_job,
        handlers::jobs::patch_job,
        handlers::jobs::delete_job,
        handlers::jobs::list_job_applications,
        handlers::jobs::apply,
        handlers::jobs::my_applications,
        handlers::jobs::get_application,
        handlers::jobs::update_application_status,
        handlers::jobs::withdraw_application,
        handlers::commerce::get_cart,
        handlers::commerce::add_to_cart,
        handlers::commerce::remove_from_cart,
        handlers::commerce::clear_cart,
        handlers::commerce::get_wishlist,
        handlers::commerce::add_to_wishlist,
        handlers::commerce::remove_from_wishlist,
        handlers::commerce::list_addresses,
        handlers::commerce::create_address,
        handlers::commerce::update_address,
        handlers::commerce::set_default_address,
        handlers::commerce::delete_address,
        handlers::social::feed,
        handlers::social::create_post,
        handlers::social::get_post,
        handlers::social::update_post,
        handlers::social::delete_post,
        handlers::social::toggle_like,
        handlers::social::list_comments,
        handlers::social::create_comment,
        handlers::social::delete_comment,
        handlers::social::trending_hashtags,
        handlers::social::send_message,
        handlers::social::conversations,
        handlers::social::thread,
        handlers::social::unread_count,
        handlers::content::list_publications,
        handlers::content::create_publication,
        handlers::content::get_publication,
        handlers::content::update_publication,
        handlers::content::delete_publication,
        handlers::content::list_schedules,
        handlers::content::create_schedule,
        handlers::content::update_schedule,
        handlers::content::delete_schedule,
        handlers::activity::search,
        handlers::activity::search_history,
        handlers::activity::clear_search_history,
        handlers::activity::my_activity,
        handlers::admin::analytics,
        handlers::admin::list_users,
        handlers::admin::all_activity,
        handlers::media::upload_file,
        handlers::media::download_file,
        handlers::media::delete_file,
        handlers::media::create_video,
        handlers::media::upload_video,
        handlers::media::get_video,
        handlers::media::delete_video,
        openapi_json,
    ),
    components(schemas(ErrorResponse, MessageResponse)),
    modifiers(&BearerAuth),
    security(("bearer_auth" = [])),
)]
pub struct ApiDoc;

/// Clerk 세션 토큰용 `bearer_auth` 보안 스킴
struct BearerAuth;

impl Modify for BearerAuth {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .description(Some("Clerk 세션 토큰"))
                    .build(),
            ),
        );
    }
}

#[utoipa::path(
    get,
    path = "/api/docs/openapi.json",
    tag = "docs",
    security(()),
    responses((status = 200, description = "OpenAPI 3 문서"))
)]
#[get("/openapi.json")]
pub async fn openapi_json() -> HttpResponse {
    HttpResponse::Ok().json(ApiDoc::openapi())
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{test, web, App};

    #[::core::prelude::v1::test]
    fn test_document_lists_routes() {
        let doc = ApiDoc::openapi();

        assert!(doc.paths.paths.contains_key("/api/courses"));
        assert!(doc.paths.paths.contains_key("/api/courses/{id}/enroll"));
        assert!(doc.paths.paths.contains_key("/api/admin/analytics"));
        assert!(doc.paths.paths.contains_key("/api/media/videos/{video_id}"));
    }

    #[::core::prelude::v1::test]
    fn test_bearer_scheme_registered() {
        let doc = ApiDoc::openapi();
        let components = doc.components.expect("components");

        assert!(components.security_schemes.contains_key("bearer_auth"));
        assert!(components.schemas.contains_key("CourseResponse"));
    }

    #[actix_web::test]
    async fn test_openapi_endpoint_serves_json() {
        let app = test::init_service(
            App::new().service(web::scope("/api/docs").service(openapi_json))
        ).await;

        let req = test::TestRequest::get().uri("/api/docs/openapi.json").to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body["info"]["title"], "LearnHub API");
        assert!(body["paths"]["/api/jobs"].is_object());
    }
}
