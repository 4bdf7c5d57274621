use mongodb::bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    pub course_id: ObjectId,
    pub added_at: DateTime,
}

/// `carts` 컬렉션 문서 (사용자당 하나)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cart {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub user_id: ObjectId,
    #[serde(default)]
    pub items: Vec<CartItem>,
    pub updated_at: DateTime,
}

impl Cart {
    pub fn empty(user_id: ObjectId) -> Self {
        Self {
            id: None,
            user_id,
            items: Vec::new(),
            updated_at: DateTime::now(),
        }
    }

    pub fn contains(&self, course_id: &ObjectId) -> bool {
        self.items.iter().any(|item| &item.course_id == course_id)
    }

    pub fn add(&mut self, course_id: ObjectId) -> bool {
        if self.contains(&course_id) {
            return false;
        }
        self.items.push(CartItem { course_id, added_at: DateTime::now() });
        self.updated_at = DateTime::now();
        true
    }

    pub fn remove(&mut self, course_id: &ObjectId) -> bool {
        let before = self.items.len();
        self.items.retain(|item| &item.course_id != course_id);
        self.updated_at = DateTime::now();
        before != self.items.len()
    }

    pub fn clear(&mut self) {
        self.items.clear();
        self.updated_at = DateTime::now();
    }

    pub fn course_ids(&self) -> Vec<ObjectId> {
        self.items.iter().map(|item| item.course_id).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_remove() {
        let mut cart = Cart::empty(ObjectId::new());
        let course = ObjectId::new();

        assert!(cart.add(course));
        assert!(!cart.add(course));
        assert_eq!(cart.course_ids(), vec![course]);

        assert!(cart.remove(&course));
        assert!(!cart.remove(&course));
        assert!(cart.items.is_empty());
    }
}
