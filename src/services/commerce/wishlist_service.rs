//! 위시리스트 서비스 (최대 25개)

use std::sync::Arc;
use singleton_macro::service;
use crate::core::errors::AppError;
use crate::domain::dto::commerce::{AddCourseRequest, WishlistResponse};
use crate::domain::dto::courses::CourseSummary;
use crate::domain::entities::commerce::wishlist::{Wishlist, MAX_WISHLIST_ITEMS};
use crate::domain::models::auth::AuthenticatedUser;
use crate::repositories::commerce::wishlist_repo::WishlistRepository;
use crate::repositories::courses::course_repo::CourseRepository;
use crate::repositories::users::user_repo::UserRepository;
use crate::utils::id_utils::{parse_object_id, require_id};

#[service(name = "wishlist")]
pub struct WishlistService {
    wishlist_repo: Arc<WishlistRepository>,
    course_repo: Arc<CourseRepository>,
    user_repo: Arc<UserRepository>,
}

impl WishlistService {
    pub async fn get(&self, auth: &AuthenticatedUser) -> Result<WishlistResponse, AppError> {
        let me = self.user_repo.find_profile(&auth.user_id).await?;
        let wishlist = self.wishlist_repo.find_by_user(&require_id(&me.id)?).await?;
        self.render(&wishlist).await
    }

    /// # Errors
    ///
    /// * `NotFound` - 강좌 없음
    /// * `ConflictError` - 이미 담긴 강좌
    /// * `ValidationError` - 26번째 강좌
    pub async fn add(&self, auth: &AuthenticatedUser, request: AddCourseRequest) -> Result<WishlistResponse, AppError> {
        let course_id = parse_object_id(&request.course_id, "course_id")?;
        self.course_repo.get(&course_id).await?;
        let me = self.user_repo.find_profile(&auth.user_id).await?;

        let mut wishlist = self.wishlist_repo.find_by_user(&require_id(&me.id)?).await?;
        wishlist.add(course_id)?;
        self.wishlist_repo.save(&wishlist).await?;

        self.render(&wishlist).await
    }

    pub async fn remove(&self, auth: &AuthenticatedUser, course_id: &str) -> Result<WishlistResponse, AppError> {
        let course_id = parse_object_id(course_id, "course_id")?;
        let me = self.user_repo.find_profile(&auth.user_id).await?;

        let mut wishlist = self.wishlist_repo.find_by_user(&require_id(&me.id)?).await?;
        if !wishlist.remove(&course_id) {
            return Err(AppError::NotFound("위시리스트에 없는 강좌입니다".to_string()));
        }
        self.wishlist_repo.save(&wishlist).await?;

        self.render(&wishlist).await
    }

    async fn render(&self, wishlist: &Wishlist) -> Result<WishlistResponse, AppError> {
        let courses = self.course_repo.find_by_ids(&wishlist.courses).await?;

        let summaries: Vec<CourseSummary> = wishlist.courses
            .iter()
            .filter_map(|id| courses.iter().find(|course| course.id.as_ref() == Some(id)))
            .map(CourseSummary::from)
            .collect();

        Ok(WishlistResponse {
            count: summaries.len(),
            courses: summaries,
            limit: MAX_WISHLIST_ITEMS,
        })
    }
}
