//! 장바구니 서비스
//!
//! 장바구니 문서는 사용자당 하나이며 처음 담을 때 만들어집니다.
//! 응답에는 강좌 요약과 합계 금액이 붙습니다. 그사이 삭제된 강좌는 응답에서 빠집니다.

use std::sync::Arc;
use singleton_macro::service;
use crate::core::errors::AppError;
use crate::domain::dto::commerce::{AddCourseRequest, CartItemResponse, CartResponse};
use crate::domain::dto::courses::CourseSummary;
use crate::domain::entities::commerce::cart::Cart;
use crate::domain::entities::courses::course::Course;
use crate::domain::models::auth::AuthenticatedUser;
use crate::repositories::commerce::cart_repo::CartRepository;
use crate::repositories::courses::course_repo::CourseRepository;
use crate::repositories::users::user_repo::UserRepository;
use crate::utils::id_utils::{parse_object_id, require_id};
use crate::utils::time_utils::to_utc;

#[service(name = "cart")]
pub struct CartService {
    cart_repo: Arc<CartRepository>,
    course_repo: Arc<CourseRepository>,
    user_repo: Arc<UserRepository>,
}

/// 담은 순서대로 강좌 정보를 붙입니다.
fn build_response(cart: &Cart, courses: &[Course]) -> CartResponse {
    let items = cart.items
        .iter()
        .filter_map(|item| {
            courses
                .iter()
                .find(|course| course.id.as_ref() == Some(&item.course_id))
                .map(|course| CartItemResponse {
                    course: CourseSummary::from(course),
                    added_at: to_utc(item.added_at),
                })
        })
        .collect();

    CartResponse::new(items)
}

impl CartService {
    pub async fn get(&self, auth: &AuthenticatedUser) -> Result<CartResponse, AppError> {
        let me = self.user_repo.find_profile(&auth.user_id).await?;
        let cart = self.cart_repo.find_by_user(&require_id(&me.id)?).await?;
        self.render(&cart).await
    }

    /// 강좌 담기
    ///
    /// # Errors
    ///
    /// * `NotFound` - 강좌 없음
    /// * `ValidationError` - 이미 수강 중
    /// * `ConflictError` - 이미 장바구니에 있음
    pub async fn add(&self, auth: &AuthenticatedUser, request: AddCourseRequest) -> Result<CartResponse, AppError> {
        let course_id = parse_object_id(&request.course_id, "course_id")?;
        let course = self.course_repo.get(&course_id).await?;
        let me = self.user_repo.find_profile(&auth.user_id).await?;
        let my_id = require_id(&me.id)?;

        if me.is_enrolled(&course_id) || course.has_student(&my_id) {
            return Err(AppError::ValidationError("이미 수강 중인 강좌입니다".to_string()));
        }

        let mut cart = self.cart_repo.find_by_user(&my_id).await?;
        if !cart.add(course_id) {
            return Err(AppError::ConflictError("이미 장바구니에 있는 강좌입니다".to_string()));
        }
        self.cart_repo.save(&cart).await?;

        self.render(&cart).await
    }

    /// 강좌 빼기. 없던 강좌면 404.
    pub async fn remove(&self, auth: &AuthenticatedUser, course_id: &str) -> Result<CartResponse, AppError> {
        let course_id = parse_object_id(course_id, "course_id")?;
        let me = self.user_repo.find_profile(&auth.user_id).await?;

        let mut cart = self.cart_repo.find_by_user(&require_id(&me.id)?).await?;
        if !cart.remove(&course_id) {
            return Err(AppError::NotFound("장바구니에 없는 강좌입니다".to_string()));
        }
        self.cart_repo.save(&cart).await?;

        self.render(&cart).await
    }

    pub async fn clear(&self, auth: &AuthenticatedUser) -> Result<CartResponse, AppError> {
        let me = self.user_repo.find_profile(&auth.user_id).await?;

        let mut cart = self.cart_repo.find_by_user(&require_id(&me.id)?).await?;
        cart.clear();
        self.cart_repo.save(&cart).await?;

        Ok(CartResponse::new(Vec::new()))
    }

    async fn render(&self, cart: &Cart) -> Result<CartResponse, AppError> {
        let courses = self.course_repo.find_by_ids(&cart.course_ids()).await?;
        Ok(build_response(cart, &courses))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::oid::ObjectId;

    fn course(title: &str, price: f64) -> Course {
        let mut course = Course::new(title.to_string(), ObjectId::new());
        course.id = Some(ObjectId::new());
        course.price = price;
        course
    }

    #[test]
    fn test_build_response_keeps_cart_order_and_sums_prices() {
        let rust = course("Rust", 30.0);
        let go = course("Go", 20.5);

        let mut cart = Cart::empty(ObjectId::new());
        cart.add(go.id.unwrap());
        cart.add(rust.id.unwrap());

        let response = build_response(&cart, &[rust.clone(), go.clone()]);

        assert_eq!(response.items[0].course.title, "Go");
        assert_eq!(response.items[1].course.title, "Rust");
        assert_eq!(response.total_price, 50.5);
    }

    #[test]
    fn test_build_response_skips_deleted_courses() {
        let rust = course("Rust", 30.0);

        let mut cart = Cart::empty(ObjectId::new());
        cart.add(rust.id.unwrap());
        cart.add(ObjectId::new());

        let response = build_response(&cart, &[rust]);

        assert_eq!(response.items.len(), 1);
        assert_eq!(response.total_price, 30.0);
    }
}
