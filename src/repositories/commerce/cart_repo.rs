//! 사용자당 하나의 `carts` 문서를 다룹니다. 문서가 없으면 빈 장바구니로 취급합니다.

use std::sync::Arc;
use mongodb::{bson::{doc, oid::ObjectId, DateTime}, options::IndexOptions, IndexModel};
use crate::{
    caching::redis::RedisClient,
    core::registry::Repository,
    db::Database,
    domain::entities::commerce::cart::Cart,
};
use singleton_macro::repository;
use crate::core::errors::{db_error, AppError};

#[repository(name = "cart", collection = "carts")]
pub struct CartRepository {
    db: Arc<Database>,
    redis: Arc<RedisClient>,
}

impl CartRepository {
    pub async fn find_by_user(&self, user_id: &ObjectId) -> Result<Cart, AppError> {
        let cart = self.collection::<Cart>()
            .find_one(doc! { "user_id": *user_id })
            .await
            .map_err(db_error)?;

        Ok(cart.unwrap_or_else(|| Cart::empty(*user_id)))
    }

    /// `user_id` 기준 upsert
    pub async fn save(&self, cart: &Cart) -> Result<(), AppError> {
        self.collection::<Cart>()
            .replace_one(doc! { "user_id": cart.user_id }, cart)
            .upsert(true)
            .await
            .map_err(db_error)?;

        Ok(())
    }

    /// 수강신청한 강좌를 장바구니에서 뺍니다.
    pub async fn pull_course(&self, user_id: &ObjectId, course_id: &ObjectId) -> Result<(), AppError> {
        self.collection::<Cart>()
            .update_one(
                doc! { "user_id": *user_id },
                doc! {
                    "$pull": { "items": { "course_id": *course_id } },
                    "$set": { "updated_at": DateTime::now() },
                },
            )
            .await
            .map_err(db_error)?;

        Ok(())
    }

    pub async fn create_indexes(&self) -> Result<(), AppError> {
        let user_index = IndexModel::builder()
            .keys(doc! { "user_id": 1 })
            .options(IndexOptions::builder()
                .unique(true)
                .name("user_id_unique".to_string())
                .build())
            .build();

        self.collection::<Cart>()
            .create_indexes([user_index])
            .await
            .map_err(db_error)?;

        Ok(())
    }
}
