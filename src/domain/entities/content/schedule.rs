use mongodb::bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};
use crate::core::errors::AppError;

/// `schedules` 컬렉션 문서 (개인 학습 일정)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Schedule {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub user_id: ObjectId,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub course_id: Option<ObjectId>,
    pub start_time: DateTime,
    pub end_time: DateTime,
    #[serde(default)]
    pub location: Option<String>,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

/// 종료 시각은 시작 시각보다 뒤여야 합니다.
pub fn validate_time_range(start: DateTime, end: DateTime) -> Result<(), AppError> {
    if end <= start {
        return Err(AppError::ValidationError("종료 시각은 시작 시각 이후여야 합니다".to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_time_range() {
        let start = DateTime::from_millis(1_000);

        assert!(validate_time_range(start, DateTime::from_millis(2_000)).is_ok());
        assert!(validate_time_range(start, start).is_err());
        assert!(validate_time_range(start, DateTime::from_millis(500)).is_err());
    }
}
