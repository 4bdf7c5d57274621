use mongodb::bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};
use crate::core::errors::AppError;

/// 위시리스트 최대 강좌 수
pub const MAX_WISHLIST_ITEMS: usize = 25;

/// `wishlists` 컬렉션 문서 (사용자당 하나)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Wishlist {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub user_id: ObjectId,
    #[serde(default)]
    pub courses: Vec<ObjectId>,
    pub updated_at: DateTime,
}

impl Wishlist {
    pub fn empty(user_id: ObjectId) -> Self {
        Self {
            id: None,
            user_id,
            courses: Vec::new(),
            updated_at: DateTime::now(),
        }
    }

    /// 중복이면 409, 한도(25개)를 넘으면 400
    pub fn add(&mut self, course_id: ObjectId) -> Result<(), AppError> {
        if self.courses.contains(&course_id) {
            return Err(AppError::ConflictError("이미 위시리스트에 있는 강좌입니다".to_string()));
        }
        if self.courses.len() >= MAX_WISHLIST_ITEMS {
            return Err(AppError::ValidationError(format!(
                "위시리스트에는 최대 {}개까지 담을 수 있습니다", MAX_WISHLIST_ITEMS
            )));
        }

        self.courses.push(course_id);
        self.updated_at = DateTime::now();
        Ok(())
    }

    pub fn remove(&mut self, course_id: &ObjectId) -> bool {
        let before = self.courses.len();
        self.courses.retain(|id| id != course_id);
        self.updated_at = DateTime::now();
        before != self.courses.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_twenty_sixth_item_rejected() {
        let mut wishlist = Wishlist::empty(ObjectId::new());
        for _ in 0..MAX_WISHLIST_ITEMS {
            wishlist.add(ObjectId::new()).unwrap();
        }

        let result = wishlist.add(ObjectId::new());
        assert!(matches!(result, Err(AppError::ValidationError(_))));
        assert_eq!(wishlist.courses.len(), 25);
    }

    #[test]
    fn test_duplicate_is_conflict() {
        let mut wishlist = Wishlist::empty(ObjectId::new());
        let course = ObjectId::new();
        wishlist.add(course).unwrap();

        assert!(matches!(wishlist.add(course), Err(AppError::ConflictError(_))));
        assert!(wishlist.remove(&course));
        assert!(wishlist.add(course).is_ok());
    }
}
