use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::{Validate, ValidationError};
use crate::domain::entities::courses::course::{CourseLevel, Lesson};

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct LessonRequest {
    #[validate(length(min = 1, max = 200, message = "강의 제목은 1-200자 사이여야 합니다"))]
    pub title: String,
    pub video_id: Option<String>,
    #[serde(default)]
    pub duration_minutes: u32,
    #[serde(default)]
    pub order: u32,
    pub content: Option<String>,
}

impl From<LessonRequest> for Lesson {
    fn from(request: LessonRequest) -> Self {
        Self {
            title: request.title,
            video_id: request.video_id,
            duration_minutes: request.duration_minutes,
            order: request.order,
            content: request.content,
        }
    }
}

/// 강좌 생성 / 전체 수정(PUT) 요청
///
/// PUT에서 생략한 선택 필드는 기본값으로 되돌아갑니다.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct CourseRequest {
    /// 필수
    #[serde(default)]
    #[validate(custom(function = "validate_title"))]
    #[validate(length(max = 200, message = "제목은 200자 이하여야 합니다"))]
    pub title: String,

    #[validate(length(max = 10000, message = "설명은 10000자 이하여야 합니다"))]
    pub description: Option<String>,

    pub category: Option<String>,

    pub level: Option<CourseLevel>,

    #[validate(range(min = 0.0, message = "가격은 0 이상이어야 합니다"))]
    pub price: Option<f64>,

    #[validate(url(message = "유효한 썸네일 URL이 아닙니다"))]
    pub thumbnail_url: Option<String>,

    #[validate(nested)]
    #[serde(default)]
    pub lessons: Vec<LessonRequest>,

    #[serde(default)]
    pub tags: Vec<String>,

    pub is_published: Option<bool>,
}

/// 강좌 부분 수정(PATCH) 요청
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct PatchCourseRequest {
    #[validate(custom(function = "validate_title"))]
    #[validate(length(max = 200, message = "제목은 200자 이하여야 합니다"))]
    pub title: Option<String>,

    #[validate(length(max = 10000, message = "설명은 10000자 이하여야 합니다"))]
    pub description: Option<String>,

    pub category: Option<String>,

    pub level: Option<CourseLevel>,

    #[validate(range(min = 0.0, message = "가격은 0 이상이어야 합니다"))]
    pub price: Option<f64>,

    #[validate(url(message = "유효한 썸네일 URL이 아닙니다"))]
    pub thumbnail_url: Option<String>,

    #[validate(nested)]
    pub lessons: Option<Vec<LessonRequest>>,

    pub tags: Option<Vec<String>>,

    pub is_published: Option<bool>,
}

/// `GET /api/courses` 필터
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct CourseFilter {
    pub category: Option<String>,
    pub level: Option<CourseLevel>,
    /// 제목/설명 부분 일치
    pub search: Option<String>,
    pub instructor_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateReviewRequest {
    #[validate(range(min = 1, max = 5, message = "평점은 1-5 사이의 정수여야 합니다"))]
    pub rating: i32,

    #[validate(length(max = 2000, message = "리뷰는 2000자 이하여야 합니다"))]
    pub comment: Option<String>,
}

fn validate_title(title: &str) -> Result<(), ValidationError> {
    if title.trim().is_empty() {
        return Err(ValidationError::new("required")
            .with_message("강좌 제목은 필수입니다".into()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_title_is_invalid() {
        let request: CourseRequest = serde_json::from_str(r#"{ "price": 10.0 }"#).unwrap();
        assert!(request.validate().is_err());

        let blank = CourseRequest { title: "   ".to_string(), ..Default::default() };
        assert!(blank.validate().is_err());
    }

    #[test]
    fn test_negative_price_is_invalid() {
        let request = CourseRequest {
            title: "Rust".to_string(),
            price: Some(-1.0),
            ..Default::default()
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_nested_lessons_validated() {
        let request: CourseRequest = serde_json::from_str(
            r#"{ "title": "Rust", "lessons": [{ "title": "" }] }"#
        ).unwrap();
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_patch_allows_absent_title() {
        assert!(PatchCourseRequest::default().validate().is_ok());

        let blank = PatchCourseRequest { title: Some(String::new()), ..Default::default() };
        assert!(blank.validate().is_err());
    }

    #[test]
    fn test_review_rating_range() {
        let review = |rating| CreateReviewRequest { rating, comment: None };

        assert!(review(1).validate().is_ok());
        assert!(review(5).validate().is_ok());
        assert!(review(0).validate().is_err());
        assert!(review(6).validate().is_err());
        assert!(serde_json::from_str::<CreateReviewRequest>(r#"{ "rating": 4.5 }"#).is_err());
    }

    #[test]
    fn test_level_filter_parses_snake_case() {
        let filter: CourseFilter = serde_json::from_str(r#"{ "level": "intermediate" }"#).unwrap();
        assert_eq!(filter.level, Some(CourseLevel::Intermediate));
    }
}
