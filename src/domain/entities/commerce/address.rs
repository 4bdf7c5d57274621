//! 배송/청구 주소 엔티티
//!
//! 사용자당 기본 주소는 최대 하나입니다.
//! - 첫 주소는 자동으로 기본 주소
//! - 기본 주소로 지정하면 나머지의 `is_default`를 해제
//! - 기본 주소를 삭제하면 남은 주소 중 가장 최근에 만든 주소를 기본으로 승격

use mongodb::bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Address {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub user_id: ObjectId,
    pub full_name: String,
    #[serde(default)]
    pub phone: Option<String>,
    pub line1: String,
    #[serde(default)]
    pub line2: Option<String>,
    pub city: String,
    #[serde(default)]
    pub state: Option<String>,
    pub postal_code: String,
    pub country: String,
    #[serde(default)]
    pub is_default: bool,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

impl Address {
    pub fn touch(&mut self) {
        self.updated_at = DateTime::now();
    }
}

/// 기본 주소 삭제 후 승격할 주소 (가장 최근 생성)
pub fn promotion_candidate(remaining: &[Address]) -> Option<ObjectId> {
    remaining
        .iter()
        .max_by_key(|address| address.created_at.timestamp_millis())
        .and_then(|address| address.id)
}

/// `default_id`만 기본 주소로 남기도록 플래그를 정리합니다.
pub fn apply_default(addresses: &mut [Address], default_id: &ObjectId) {
    for address in addresses.iter_mut() {
        address.is_default = address.id.as_ref() == Some(default_id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn address(created_millis: i64, is_default: bool) -> Address {
        let created = DateTime::from_millis(created_millis);
        Address {
            id: Some(ObjectId::new()),
            user_id: ObjectId::new(),
            full_name: "홍길동".to_string(),
            phone: None,
            line1: "세종대로 1".to_string(),
            line2: None,
            city: "서울".to_string(),
            state: None,
            postal_code: "04524".to_string(),
            country: "KR".to_string(),
            is_default,
            created_at: created,
            updated_at: created,
        }
    }

    #[test]
    fn test_apply_default_leaves_single_default() {
        let mut addresses = vec![address(1, true), address(2, false), address(3, true)];
        let chosen = addresses[1].id.unwrap();

        apply_default(&mut addresses, &chosen);

        let defaults: Vec<_> = addresses.iter().filter(|a| a.is_default).collect();
        assert_eq!(defaults.len(), 1);
        assert_eq!(defaults[0].id, Some(chosen));
    }

    #[test]
    fn test_promotion_picks_most_recent() {
        let addresses = vec![address(10, false), address(30, false), address(20, false)];

        assert_eq!(promotion_candidate(&addresses), addresses[1].id);
        assert_eq!(promotion_candidate(&[]), None);
    }
}
