use std::sync::Arc;
use mongodb::{bson::{doc, oid::ObjectId}, options::IndexOptions, IndexModel};
use crate::{
    caching::redis::RedisClient,
    core::registry::Repository,
    db::Database,
    domain::entities::social::comment::Comment,
};
use singleton_macro::repository;
use crate::core::errors::{db_error, AppError};
use crate::domain::dto::common::{PaginatedResponse, PaginationQuery};
use crate::repositories::common::{find_page, inserted_object_id};

#[repository(name = "comment", collection = "comments")]
pub struct CommentRepository {
    db: Arc<Database>,
    redis: Arc<RedisClient>,
}

impl CommentRepository {
    pub async fn find_by_id(&self, id: &ObjectId) -> Result<Option<Comment>, AppError> {
        self.collection::<Comment>()
            .find_one(doc! { "_id": *id })
            .await
            .map_err(db_error)
    }

    pub async fn create(&self, mut comment: Comment) -> Result<Comment, AppError> {
        let result = self.collection::<Comment>()
            .insert_one(&comment)
            .await
            .map_err(db_error)?;

        comment.id = Some(inserted_object_id(&result)?);
        Ok(comment)
    }

    pub async fn delete(&self, id: &ObjectId) -> Result<bool, AppError> {
        let result = self.collection::<Comment>()
            .delete_one(doc! { "_id": *id })
            .await
            .map_err(db_error)?;

        Ok(result.deleted_count > 0)
    }

    pub async fn delete_by_post(&self, post_id: &ObjectId) -> Result<u64, AppError> {
        let result = self.collection::<Comment>()
            .delete_many(doc! { "post_id": *post_id })
            .await
            .map_err(db_error)?;

        Ok(result.deleted_count)
    }

    /// 오래된 순
    pub async fn list_by_post(&self, post_id: &ObjectId, page: &PaginationQuery) -> Result<PaginatedResponse<Comment>, AppError> {
        find_page(&self.collection::<Comment>(), doc! { "post_id": *post_id }, doc! { "created_at": 1 }, page).await
    }

    pub async fn create_indexes(&self) -> Result<(), AppError> {
        let post_index = IndexModel::builder()
            .keys(doc! { "post_id": 1, "created_at": 1 })
            .options(IndexOptions::builder()
                .name("post_created_at".to_string())
                .build())
            .build();

        self.collection::<Comment>()
            .create_indexes([post_index])
            .await
            .map_err(db_error)?;

        Ok(())
    }
}
