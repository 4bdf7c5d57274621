use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use crate::domain::dto::courses::CourseSummary;
use crate::domain::entities::commerce::address::Address;
use crate::utils::id_utils::id_hex;
use crate::utils::time_utils::to_utc;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CartItemResponse {
    pub course: CourseSummary,
    pub added_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CartResponse {
    pub items: Vec<CartItemResponse>,
    pub total_price: f64,
}

impl CartResponse {
    pub fn new(items: Vec<CartItemResponse>) -> Self {
        let total_price = items.iter().map(|item| item.course.price).sum();
        Self { items, total_price }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct WishlistResponse {
    pub courses: Vec<CourseSummary>,
    pub count: usize,
    pub limit: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AddressResponse {
    pub id: String,
    pub full_name: String,
    pub phone: Option<String>,
    pub line1: String,
    pub line2: Option<String>,
    pub city: String,
    pub state: Option<String>,
    pub postal_code: String,
    pub country: String,
    pub is_default: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Address> for AddressResponse {
    fn from(address: Address) -> Self {
        Self {
            id: id_hex(&address.id),
            full_name: address.full_name,
            phone: address.phone,
            line1: address.line1,
            line2: address.line2,
            city: address.city,
            state: address.state,
            postal_code: address.postal_code,
            country: address.country,
            is_default: address.is_default,
            created_at: to_utc(address.created_at),
            updated_at: to_utc(address.updated_at),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(price: f64) -> CartItemResponse {
        CartItemResponse {
            course: CourseSummary {
                id: "c".to_string(),
                title: "강좌".to_string(),
                price,
                thumbnail_url: None,
                total_students: 0,
                rating: 0.0,
            },
            added_at: Utc::now(),
        }
    }

    #[test]
    fn test_total_price_sums_items() {
        let cart = CartResponse::new(vec![item(10.0), item(25.5)]);
        assert_eq!(cart.total_price, 35.5);

        assert_eq!(CartResponse::new(Vec::new()).total_price, 0.0);
    }
}
