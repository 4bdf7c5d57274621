use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use crate::domain::dto::users::UserSummary;
use crate::domain::entities::courses::course::{Course, CourseLevel, Lesson};
use crate::domain::entities::courses::review::Review;
use crate::utils::id_utils::id_hex;
use crate::utils::time_utils::to_utc;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CourseResponse {
    pub id: String,
    pub title: String,
    pub description: String,
    pub instructor_id: String,
    pub category: Option<String>,
    pub level: CourseLevel,
    pub price: f64,
    pub thumbnail_url: Option<String>,
    pub lessons: Vec<Lesson>,
    pub tags: Vec<String>,
    pub total_students: i64,
    pub rating: f64,
    pub reviews_count: i64,
    pub is_published: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Course> for CourseResponse {
    fn from(course: Course) -> Self {
        Self {
            id: id_hex(&course.id),
            title: course.title,
            description: course.description,
            instructor_id: course.instructor_id.to_hex(),
            category: course.category,
            level: course.level,
            price: course.price,
            thumbnail_url: course.thumbnail_url,
            lessons: course.lessons,
            tags: course.tags,
            total_students: course.total_students,
            rating: course.rating,
            reviews_count: course.reviews_count,
            is_published: course.is_published,
            created_at: to_utc(course.created_at),
            updated_at: to_utc(course.updated_at),
        }
    }
}

/// 장바구니/위시리스트/분석 응답에 쓰이는 강좌 요약
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct CourseSummary {
    pub id: String,
    pub title: String,
    pub price: f64,
    pub thumbnail_url: Option<String>,
    pub total_students: i64,
    pub rating: f64,
}

impl From<&Course> for CourseSummary {
    fn from(course: &Course) -> Self {
        Self {
            id: id_hex(&course.id),
            title: course.title.clone(),
            price: course.price,
            thumbnail_url: course.thumbnail_url.clone(),
            total_students: course.total_students,
            rating: course.rating,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct EnrollmentResponse {
    pub course_id: String,
    pub enrolled: bool,
    pub total_students: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ReviewResponse {
    pub id: String,
    pub course_id: String,
    pub user_id: String,
    pub user: Option<UserSummary>,
    pub rating: i32,
    pub comment: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl ReviewResponse {
    pub fn new(review: Review, user: Option<UserSummary>) -> Self {
        Self {
            id: id_hex(&review.id),
            course_id: review.course_id.to_hex(),
            user_id: review.user_id.to_hex(),
            user,
            rating: review.rating,
            comment: review.comment,
            created_at: to_utc(review.created_at),
        }
    }
}
