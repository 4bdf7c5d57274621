use std::sync::Arc;
use mongodb::{bson::{doc, oid::ObjectId}, options::IndexOptions, IndexModel};
use crate::{
    caching::redis::RedisClient,
    core::registry::Repository,
    db::Database,
    domain::entities::commerce::address::Address,
};
use singleton_macro::repository;
use crate::core::errors::{db_error, AppError};
use crate::repositories::common::{find_all, inserted_object_id};

#[repository(name = "address", collection = "addresses")]
pub struct AddressRepository {
    db: Arc<Database>,
    redis: Arc<RedisClient>,
}

impl AddressRepository {
    pub async fn find_by_id(&self, id: &ObjectId) -> Result<Option<Address>, AppError> {
        self.collection::<Address>()
            .find_one(doc! { "_id": *id })
            .await
            .map_err(db_error)
    }

    /// 기본 주소가 먼저, 나머지는 최신순
    pub async fn list_by_user(&self, user_id: &ObjectId) -> Result<Vec<Address>, AppError> {
        find_all(
            &self.collection::<Address>(),
            doc! { "user_id": *user_id },
            doc! { "is_default": -1, "created_at": -1 },
            None,
        ).await
    }

    pub async fn count_by_user(&self, user_id: &ObjectId) -> Result<u64, AppError> {
        self.collection::<Address>()
            .count_documents(doc! { "user_id": *user_id })
            .await
            .map_err(db_error)
    }

    pub async fn create(&self, mut address: Address) -> Result<Address, AppError> {
        let result = self.collection::<Address>()
            .insert_one(&address)
            .await
            .map_err(db_error)?;

        address.id = Some(inserted_object_id(&result)?);
        Ok(address)
    }

    pub async fn save(&self, address: &Address) -> Result<(), AppError> {
        let id = address.id
            .ok_or_else(|| AppError::InternalError("저장되지 않은 주소입니다".to_string()))?;

        self.collection::<Address>()
            .replace_one(doc! { "_id": id }, address)
            .await
            .map_err(db_error)?;

        Ok(())
    }

    pub async fn delete(&self, id: &ObjectId) -> Result<bool, AppError> {
        let result = self.collection::<Address>()
            .delete_one(doc! { "_id": *id })
            .await
            .map_err(db_error)?;

        Ok(result.deleted_count > 0)
    }

    pub async fn create_indexes(&self) -> Result<(), AppError> {
        let user_index = IndexModel::builder()
            .keys(doc! { "user_id": 1, "created_at": -1 })
            .options(IndexOptions::builder()
                .name("user_created_at".to_string())
                .build())
            .build();

        self.collection::<Address>()
            .create_indexes([user_index])
            .await
            .map_err(db_error)?;

        Ok(())
    }
}
