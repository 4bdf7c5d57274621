use std::sync::Arc;
use mongodb::{bson::{doc, oid::ObjectId}, options::IndexOptions, IndexModel};
use crate::{
    caching::redis::RedisClient,
    core::registry::Repository,
    db::Database,
    domain::entities::courses::review::Review,
};
use singleton_macro::repository;
use crate::core::errors::{db_error, insert_error, AppError};
use crate::domain::dto::common::{PaginatedResponse, PaginationQuery};
use crate::repositories::common::{find_page, inserted_object_id};

#[repository(name = "review", collection = "reviews")]
pub struct ReviewRepository {
    db: Arc<Database>,
    redis: Arc<RedisClient>,
}

impl ReviewRepository {
    pub async fn find_by_id(&self, id: &ObjectId) -> Result<Option<Review>, AppError> {
        self.collection::<Review>()
            .find_one(doc! { "_id": *id })
            .await
            .map_err(db_error)
    }

    pub async fn find_by_course_and_user(&self, course_id: &ObjectId, user_id: &ObjectId) -> Result<Option<Review>, AppError> {
        self.collection::<Review>()
            .find_one(doc! { "course_id": *course_id, "user_id": *user_id })
            .await
            .map_err(db_error)
    }

    pub async fn create(&self, mut review: Review) -> Result<Review, AppError> {
        let result = self.collection::<Review>()
            .insert_one(&review)
            .await
            .map_err(|e| insert_error(e, || AppError::ConflictError("이미 리뷰를 작성한 강좌입니다".to_string())))?;

        review.id = Some(inserted_object_id(&result)?);
        Ok(review)
    }

    pub async fn delete(&self, id: &ObjectId) -> Result<bool, AppError> {
        let result = self.collection::<Review>()
            .delete_one(doc! { "_id": *id })
            .await
            .map_err(db_error)?;

        Ok(result.deleted_count > 0)
    }

    pub async fn delete_by_course(&self, course_id: &ObjectId) -> Result<u64, AppError> {
        let result = self.collection::<Review>()
            .delete_many(doc! { "course_id": *course_id })
            .await
            .map_err(db_error)?;

        Ok(result.deleted_count)
    }

    /// 최신순
    pub async fn list_by_course(&self, course_id: &ObjectId, page: &PaginationQuery) -> Result<PaginatedResponse<Review>, AppError> {
        find_page(&self.collection::<Review>(), doc! { "course_id": *course_id }, doc! { "created_at": -1 }, page).await
    }

    pub async fn create_indexes(&self) -> Result<(), AppError> {
        let one_per_user = IndexModel::builder()
            .keys(doc! { "course_id": 1, "user_id": 1 })
            .options(IndexOptions::builder()
                .unique(true)
                .name("course_user_unique".to_string())
                .build())
            .build();

        self.collection::<Review>()
            .create_indexes([one_per_user])
            .await
            .map_err(db_error)?;

        Ok(())
    }
}
