//! 강좌 엔티티

use mongodb::bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum CourseLevel {
    #[default]
    Beginner,
    Intermediate,
    Advanced,
}

impl CourseLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            CourseLevel::Beginner => "beginner",
            CourseLevel::Intermediate => "intermediate",
            CourseLevel::Advanced => "advanced",
        }
    }
}

/// 강좌 안의 강의 한 편. 영상은 Bunny Stream 비디오 ID로 참조합니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Lesson {
    pub title: String,
    #[serde(default)]
    pub video_id: Option<String>,
    #[serde(default)]
    pub duration_minutes: u32,
    #[serde(default)]
    pub order: u32,
    #[serde(default)]
    pub content: Option<String>,
}

/// `courses` 컬렉션 문서
///
/// 파생 필드 규칙 ([`Course::sync_derived`]):
/// - `total_students == students.len()`
/// - `rating` = `ratings` 평균 (비어 있으면 0)
/// - `reviews_count == ratings.len()`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Course {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub instructor_id: ObjectId,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub level: CourseLevel,
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub thumbnail_url: Option<String>,
    #[serde(default)]
    pub lessons: Vec<Lesson>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub students: Vec<ObjectId>,
    #[serde(default)]
    pub total_students: i64,
    #[serde(default)]
    pub ratings: Vec<i32>,
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub reviews_count: i64,
    #[serde(default)]
    pub is_published: bool,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

impl Course {
    pub fn new(title: String, instructor_id: ObjectId) -> Self {
        let now = DateTime::now();

        Self {
            id: None,
            title,
            description: String::new(),
            instructor_id,
            category: None,
            level: CourseLevel::default(),
            price: 0.0,
            thumbnail_url: None,
            lessons: Vec::new(),
            tags: Vec::new(),
            students: Vec::new(),
            total_students: 0,
            ratings: Vec::new(),
            rating: 0.0,
            reviews_count: 0,
            is_published: false,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn sync_derived(&mut self) {
        self.total_students = self.students.len() as i64;
        self.reviews_count = self.ratings.len() as i64;
        self.rating = mean_rating(&self.ratings);
        self.lessons.sort_by_key(|lesson| lesson.order);
    }

    pub fn touch(&mut self) {
        self.updated_at = DateTime::now();
    }

    pub fn is_owned_by(&self, user_id: &ObjectId) -> bool {
        &self.instructor_id == user_id
    }

    pub fn has_student(&self, user_id: &ObjectId) -> bool {
        self.students.contains(user_id)
    }

    pub fn add_student(&mut self, user_id: ObjectId) -> bool {
        if self.has_student(&user_id) {
            return false;
        }
        self.students.push(user_id);
        self.sync_derived();
        true
    }

    pub fn add_rating(&mut self, rating: i32) {
        self.ratings.push(rating);
        self.sync_derived();
    }

    /// 같은 값의 평점 하나를 제거합니다.
    pub fn remove_rating(&mut self, rating: i32) -> bool {
        let removed = match self.ratings.iter().position(|r| *r == rating) {
            Some(index) => {
                self.ratings.remove(index);
                true
            }
            None => false,
        };
        self.sync_derived();
        removed
    }
}

pub fn mean_rating(ratings: &[i32]) -> f64 {
    if ratings.is_empty() {
        return 0.0;
    }
    ratings.iter().map(|r| *r as f64).sum::<f64>() / ratings.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    fn course() -> Course {
        Course::new("Rust 입문".to_string(), ObjectId::new())
    }

    #[test]
    fn test_rating_is_mean_of_ratings() {
        let mut course = course();
        assert_eq!(course.rating, 0.0);

        course.add_rating(5);
        course.add_rating(4);
        course.add_rating(2);

        assert!((course.rating - 11.0 / 3.0).abs() < f64::EPSILON);
        assert_eq!(course.reviews_count, 3);
    }

    #[test]
    fn test_remove_rating_removes_single_match() {
        let mut course = course();
        course.add_rating(4);
        course.add_rating(4);
        course.add_rating(2);

        assert!(course.remove_rating(4));
        assert_eq!(course.ratings, vec![4, 2]);
        assert_eq!(course.rating, 3.0);

        assert!(!course.remove_rating(5));
        assert_eq!(course.reviews_count, 2);
    }

    #[test]
    fn test_total_students_tracks_students() {
        let mut course = course();
        let student = ObjectId::new();

        assert!(course.add_student(student));
        assert!(!course.add_student(student));
        assert_eq!(course.total_students, 1);

        course.students.push(ObjectId::new());
        course.sync_derived();
        assert_eq!(course.total_students as usize, course.students.len());
    }

    #[test]
    fn test_lessons_sorted_by_order() {
        let mut course = course();
        for (title, order) in [("b", 2), ("a", 1)] {
            course.lessons.push(Lesson {
                title: title.to_string(),
                video_id: None,
                duration_minutes: 10,
                order,
                content: None,
            });
        }

        course.sync_derived();
        assert_eq!(course.lessons[0].title, "a");
    }
}
