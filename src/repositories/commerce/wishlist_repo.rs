use std::sync::Arc;
use mongodb::{bson::{doc, oid::ObjectId}, options::IndexOptions, IndexModel};
use crate::{
    caching::redis::RedisClient,
    core::registry::Repository,
    db::Database,
    domain::entities::commerce::wishlist::Wishlist,
};
use singleton_macro::repository;
use crate::core::errors::{db_error, AppError};

#[repository(name = "wishlist", collection = "wishlists")]
pub struct WishlistRepository {
    db: Arc<Database>,
    redis: Arc<RedisClient>,
}

impl WishlistRepository {
    pub async fn find_by_user(&self, user_id: &ObjectId) -> Result<Wishlist, AppError> {
        let wishlist = self.collection::<Wishlist>()
            .find_one(doc! { "user_id": *user_id })
            .await
            .map_err(db_error)?;

        Ok(wishlist.unwrap_or_else(|| Wishlist::empty(*user_id)))
    }

    pub async fn save(&self, wishlist: &Wishlist) -> Result<(), AppError> {
        self.collection::<Wishlist>()
            .replace_one(doc! { "user_id": wishlist.user_id }, wishlist)
            .upsert(true)
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

        self.collection::<Wishlist>()
            .create_indexes([user_index])
            .await
            .map_err(db_error)?;

        Ok(())
    }
}
