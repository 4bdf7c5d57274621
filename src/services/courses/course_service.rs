//! # 강좌 서비스
//!
//! 강좌 CRUD와 수강신청을 담당합니다.
//!
//! - 목록(`GET /api/courses`)은 공개된 강좌만 보여줍니다.
//! - 비공개 강좌 상세는 강사와 관리자만 볼 수 있고, 그 외에는 404입니다.
//! - 수정/삭제는 강사 본인 또는 관리자만 가능합니다.
//!
//! 수강신청은 강좌의 `students`와 사용자의 `enrolled_courses`를 함께 갱신하고
//! 장바구니에 같은 강좌가 있으면 뺍니다.

use std::sync::Arc;
use mongodb::bson::{doc, oid::ObjectId, Document};
use singleton_macro::service;
use crate::core::errors::AppError;
use crate::domain::dto::common::{PaginatedResponse, PaginationQuery};
use crate::domain::dto::courses::{
    CourseFilter, CourseRequest, CourseResponse, EnrollmentResponse, LessonRequest, PatchCourseRequest,
};
use crate::domain::entities::courses::course::{Course, Lesson};
use crate::domain::models::auth::AuthenticatedUser;
use crate::repositories::commerce::cart_repo::CartRepository;
use crate::repositories::common::contains_ignore_case;
use crate::repositories::courses::course_repo::CourseRepository;
use crate::repositories::courses::review_repo::ReviewRepository;
use crate::repositories::users::user_repo::UserRepository;
use crate::services::access::ensure_owner_or_admin;
use crate::services::activity::ActivityService;
use crate::utils::id_utils::{parse_object_id, parse_optional_object_id, require_id};
use crate::utils::string_utils::clean_optional_string;

#[service(name = "course")]
pub struct CourseService {
    course_repo: Arc<CourseRepository>,
    review_repo: Arc<ReviewRepository>,
    user_repo: Arc<UserRepository>,
    cart_repo: Arc<CartRepository>,
    activity_service: Arc<ActivityService>,
}

/// 목록 필터 → MongoDB 조건 (공개 강좌만)
fn published_filter(filter: &CourseFilter) -> Result<Document, AppError> {
    let mut query = doc! { "is_published": true };

    if let Some(category) = clean_optional_string(filter.category.clone()) {
        query.insert("category", category);
    }
    if let Some(level) = filter.level {
        query.insert("level", level.as_str());
    }
    if let Some(instructor_id) = parse_optional_object_id(filter.instructor_id.as_deref(), "instructor_id")? {
        query.insert("instructor_id", instructor_id);
    }
    if let Some(search) = clean_optional_string(filter.search.clone()) {
        let pattern = contains_ignore_case(&search);
        query.insert("$or", vec![
            doc! { "title": pattern.clone() },
            doc! { "description": pattern },
        ]);
    }

    Ok(query)
}

fn lessons_from(requests: Vec<LessonRequest>) -> Vec<Lesson> {
    requests.into_iter().map(Lesson::from).collect()
}

/// PUT 요청으로 편집 가능한 필드를 모두 덮어씁니다.
fn apply_replace(course: &mut Course, request: CourseRequest) {
    course.title = request.title.trim().to_string();
    course.description = request.description.unwrap_or_default();
    course.category = clean_optional_string(request.category);
    course.level = request.level.unwrap_or_default();
    course.price = request.price.unwrap_or(0.0);
    course.thumbnail_url = clean_optional_string(request.thumbnail_url);
    course.lessons = lessons_from(request.lessons);
    course.tags = request.tags;
    course.is_published = request.is_published.unwrap_or(false);
    course.sync_derived();
}

fn apply_patch(course: &mut Course, request: PatchCourseRequest) {
    if let Some(title) = request.title {
        course.title = title.trim().to_string();
    }
    if let Some(description) = request.description {
        course.description = description;
    }
    if request.category.is_some() {
        course.category = clean_optional_string(request.category);
    }
    if let Some(level) = request.level {
        course.level = level;
    }
    if let Some(price) = request.price {
        course.price = price;
    }
    if request.thumbnail_url.is_some() {
        course.thumbnail_url = clean_optional_string(request.thumbnail_url);
    }
    if let Some(lessons) = request.lessons {
        course.lessons = lessons_from(lessons);
    }
    if let Some(tags) = request.tags {
        course.tags = tags;
    }
    if let Some(is_published) = request.is_published {
        course.is_published = is_published;
    }
    course.sync_derived();
}

impl CourseService {
    pub async fn list(&self, filter: &CourseFilter, page: &PaginationQuery) -> Result<PaginatedResponse<CourseResponse>, AppError> {
        let courses = self.course_repo.list(published_filter(filter)?, page).await?;
        Ok(courses.map(CourseResponse::from))
    }

    /// 내가 가르치는 강좌 (비공개 포함)
    pub async fn mine(&self, auth: &AuthenticatedUser, page: &PaginationQuery) -> Result<PaginatedResponse<CourseResponse>, AppError> {
        let me = self.user_repo.find_profile(&auth.user_id).await?;
        let my_id = require_id(&me.id)?;

        let courses = self.course_repo.list(doc! { "instructor_id": my_id }, page).await?;
        Ok(courses.map(CourseResponse::from))
    }

    pub async fn get(&self, auth: &AuthenticatedUser, course_id: &str) -> Result<CourseResponse, AppError> {
        let course = self.course_repo.get(&parse_object_id(course_id, "course_id")?).await?;

        if !course.is_published && !auth.is_admin() {
            let viewer = self.user_repo.find_by_clerk_id(&auth.user_id).await?;
            let is_owner = viewer
                .and_then(|user| user.id)
                .is_some_and(|id| course.is_owned_by(&id));

            if !is_owner {
                return Err(AppError::NotFound("강좌를 찾을 수 없습니다".to_string()));
            }
        }

        Ok(CourseResponse::from(course))
    }

    pub async fn create(&self, auth: &AuthenticatedUser, request: CourseRequest) -> Result<CourseResponse, AppError> {
        let me = self.user_repo.find_profile(&auth.user_id).await?;
        let my_id = require_id(&me.id)?;

        let mut course = Course::new(request.title.trim().to_string(), my_id);
        apply_replace(&mut course, request);

        let created = self.course_repo.create(course).await?;
        log::info!("📚 강좌 생성: {} by {}", created.title, me.username);

        self.activity_service.record(my_id, "course.create", "course", created.id).await;

        Ok(CourseResponse::from(created))
    }

    /// 전체 수정 (PUT)
    pub async fn replace(&self, auth: &AuthenticatedUser, course_id: &str, request: CourseRequest) -> Result<CourseResponse, AppError> {
        let (mut course, my_id) = self.load_for_write(auth, course_id).await?;

        apply_replace(&mut course, request);
        course.touch();
        self.course_repo.save(&course).await?;

        self.activity_service.record(my_id, "course.update", "course", course.id).await;
        Ok(CourseResponse::from(course))
    }

    /// 부분 수정 (PATCH)
    pub async fn patch(&self, auth: &AuthenticatedUser, course_id: &str, request: PatchCourseRequest) -> Result<CourseResponse, AppError> {
        let (mut course, my_id) = self.load_for_write(auth, course_id).await?;

        apply_patch(&mut course, request);
        course.touch();
        self.course_repo.save(&course).await?;

        self.activity_service.record(my_id, "course.update", "course", course.id).await;
        Ok(CourseResponse::from(course))
    }

    /// 강좌와 그 리뷰를 삭제합니다.
    pub async fn delete(&self, auth: &AuthenticatedUser, course_id: &str) -> Result<(), AppError> {
        let (course, my_id) = self.load_for_write(auth, course_id).await?;
        let id = require_id(&course.id)?;

        self.course_repo.delete(&id).await?;
        let removed_reviews = self.review_repo.delete_by_course(&id).await?;
        log::info!("🗑️ 강좌 삭제: {} (리뷰 {}건)", course.title, removed_reviews);

        self.activity_service.record(my_id, "course.delete", "course", Some(id)).await;
        Ok(())
    }

    /// 수강신청
    ///
    /// # Errors
    ///
    /// * `ValidationError` - 공개되지 않은 강좌
    /// * `ConflictError` - 이미 수강 중
    pub async fn enroll(&self, auth: &AuthenticatedUser, course_id: &str) -> Result<EnrollmentResponse, AppError> {
        let mut course = self.course_repo.get(&parse_object_id(course_id, "course_id")?).await?;
        let mut me = self.user_repo.find_profile(&auth.user_id).await?;
        let my_id = require_id(&me.id)?;
        let id = require_id(&course.id)?;

        if !course.is_published {
            return Err(AppError::ValidationError("공개되지 않은 강좌입니다".to_string()));
        }
        if course.has_student(&my_id) || me.is_enrolled(&id) {
            return Err(AppError::ConflictError("이미 수강 중인 강좌입니다".to_string()));
        }

        course.add_student(my_id);
        course.touch();
        me.enroll(id);
        me.touch();

        self.course_repo.save(&course).await?;
        self.user_repo.save(&me).await?;
        self.cart_repo.pull_course(&my_id, &id).await?;

        self.activity_service
            .record_with(my_id, "course.enroll", "course", Some(id), doc! { "price": course.price })
            .await;

        Ok(EnrollmentResponse {
            course_id: id.to_hex(),
            enrolled: true,
            total_students: course.total_students,
        })
    }

    /// 수정 권한 확인 후 강좌와 호출자 ID를 돌려줍니다.
    async fn load_for_write(&self, auth: &AuthenticatedUser, course_id: &str) -> Result<(Course, ObjectId), AppError> {
        let course = self.course_repo.get(&parse_object_id(course_id, "course_id")?).await?;
        let me = self.user_repo.find_profile(&auth.user_id).await?;
        let my_id = require_id(&me.id)?;

        ensure_owner_or_admin(course.is_owned_by(&my_id), auth, "강좌를 수정할 권한이 없습니다")?;
        Ok((course, my_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::courses::course::CourseLevel;

    #[test]
    fn test_published_filter() {
        let instructor = ObjectId::new();
        let filter = CourseFilter {
            category: Some(" web ".to_string()),
            level: Some(CourseLevel::Advanced),
            search: Some("rust".to_string()),
            instructor_id: Some(instructor.to_hex()),
        };

        let query = published_filter(&filter).unwrap();

        assert_eq!(query.get_bool("is_published").unwrap(), true);
        assert_eq!(query.get_str("category").unwrap(), "web");
        assert_eq!(query.get_str("level").unwrap(), "advanced");
        assert_eq!(query.get_object_id("instructor_id").unwrap(), instructor);
        assert_eq!(query.get_array("$or").unwrap().len(), 2);
    }

    #[test]
    fn test_published_filter_rejects_bad_instructor_id() {
        let filter = CourseFilter { instructor_id: Some("nope".to_string()), ..Default::default() };
        assert!(matches!(published_filter(&filter), Err(AppError::ValidationError(_))));
    }

    #[test]
    fn test_replace_resets_omitted_fields() {
        let mut course = Course::new("Old".to_string(), ObjectId::new());
        course.price = 50.0;
        course.is_published = true;

        apply_replace(&mut course, CourseRequest { title: " New ".to_string(), ..Default::default() });

        assert_eq!(course.title, "New");
        assert_eq!(course.price, 0.0);
        assert!(!course.is_published);
    }

    #[test]
    fn test_patch_keeps_omitted_fields() {
        let mut course = Course::new("Old".to_string(), ObjectId::new());
        course.price = 50.0;

        apply_patch(&mut course, PatchCourseRequest { is_published: Some(true), ..Default::default() });

        assert_eq!(course.title, "Old");
        assert_eq!(course.price, 50.0);
        assert!(course.is_published);
    }
}
