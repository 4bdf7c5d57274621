//! 강좌 리뷰 서비스
//!
//! 리뷰를 쓰거나 지우면 강좌 문서의 `ratings`도 함께 바뀌고,
//! `rating`/`reviews_count`는 엔티티가 다시 계산합니다.

use std::sync::Arc;
use mongodb::bson::doc;
use singleton_macro::service;
use crate::core::errors::AppError;
use crate::domain::dto::common::{PaginatedResponse, PaginationQuery};
use crate::domain::dto::courses::{CreateReviewRequest, ReviewResponse};
use crate::domain::dto::users::UserSummary;
use crate::domain::entities::courses::review::Review;
use crate::domain::models::auth::AuthenticatedUser;
use crate::repositories::courses::course_repo::CourseRepository;
use crate::repositories::courses::review_repo::ReviewRepository;
use crate::repositories::users::user_repo::UserRepository;
use crate::services::access::ensure_owner_or_admin;
use crate::services::activity::ActivityService;
use crate::utils::id_utils::{parse_object_id, require_id};
use crate::utils::string_utils::clean_optional_string;

#[service(name = "review")]
pub struct ReviewService {
    review_repo: Arc<ReviewRepository>,
    course_repo: Arc<CourseRepository>,
    user_repo: Arc<UserRepository>,
    activity_service: Arc<ActivityService>,
}

impl ReviewService {
    /// 강좌 리뷰 목록 (작성자 요약 포함)
    pub async fn list(&self, course_id: &str, page: &PaginationQuery) -> Result<PaginatedResponse<ReviewResponse>, AppError> {
        let course_id = parse_object_id(course_id, "course_id")?;
        self.course_repo.get(&course_id).await?;

        let reviews = self.review_repo.list_by_course(&course_id, page).await?;
        let author_ids: Vec<_> = reviews.items.iter().map(|review| review.user_id).collect();
        let authors = self.user_repo.find_by_ids(&author_ids).await?;

        Ok(reviews.map(|review| {
            let author = authors
                .iter()
                .find(|user| user.id.as_ref() == Some(&review.user_id))
                .map(UserSummary::from);
            ReviewResponse::new(review, author)
        }))
    }

    /// 리뷰 작성
    ///
    /// # Errors
    ///
    /// * `AuthorizationError` - 수강생이 아님
    /// * `ConflictError` - 이미 리뷰를 작성함
    pub async fn create(&self, auth: &AuthenticatedUser, course_id: &str, request: CreateReviewRequest) -> Result<ReviewResponse, AppError> {
        let course_id = parse_object_id(course_id, "course_id")?;
        let mut course = self.course_repo.get(&course_id).await?;
        let me = self.user_repo.find_profile(&auth.user_id).await?;
        let my_id = require_id(&me.id)?;

        if !course.has_student(&my_id) && !me.is_enrolled(&course_id) {
            return Err(AppError::AuthorizationError("수강 중인 강좌에만 리뷰를 작성할 수 있습니다".to_string()));
        }
        if self.review_repo.find_by_course_and_user(&course_id, &my_id).await?.is_some() {
            return Err(AppError::ConflictError("이미 리뷰를 작성한 강좌입니다".to_string()));
        }

        let review = Review::new(course_id, my_id, request.rating, clean_optional_string(request.comment));
        let created = self.review_repo.create(review).await?;

        course.add_rating(created.rating);
        course.touch();
        self.course_repo.save(&course).await?;

        self.activity_service
            .record_with(my_id, "review.create", "course", Some(course_id), doc! { "rating": created.rating })
            .await;

        Ok(ReviewResponse::new(created, Some(UserSummary::from(&me))))
    }

    /// 리뷰 삭제 (작성자 또는 관리자)
    pub async fn delete(&self, auth: &AuthenticatedUser, review_id: &str) -> Result<(), AppError> {
        let review_id = parse_object_id(review_id, "review_id")?;
        let review = self.review_repo.find_by_id(&review_id)
            .await?
            .ok_or_else(|| AppError::NotFound("리뷰를 찾을 수 없습니다".to_string()))?;
        let me = self.user_repo.find_profile(&auth.user_id).await?;
        let my_id = require_id(&me.id)?;

        ensure_owner_or_admin(review.user_id == my_id, auth, "리뷰를 삭제할 권한이 없습니다")?;

        self.review_repo.delete(&review_id).await?;

        // 강좌가 먼저 삭제됐다면 평점 정리는 건너뜁니다.
        if let Some(mut course) = self.course_repo.find_by_id(&review.course_id).await? {
            course.remove_rating(review.rating);
            course.touch();
            self.course_repo.save(&course).await?;
        }

        self.activity_service.record(my_id, "review.delete", "course", Some(review.course_id)).await;
        Ok(())
    }
}
