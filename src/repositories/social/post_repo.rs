use std::sync::Arc;
use mongodb::{bson::{doc, oid::ObjectId, Document}, options::IndexOptions, IndexModel};
use crate::{
    caching::redis::RedisClient,
    core::registry::Repository,
    db::Database,
    domain::entities::social::post::Post,
};
use singleton_macro::repository;
use crate::core::errors::{db_error, AppError};
use crate::domain::dto::common::{PaginatedResponse, PaginationQuery};
use crate::repositories::common::{contains_ignore_case, find_all, find_page, inserted_object_id};

#[repository(name = "post", collection = "posts")]
pub struct PostRepository {
    db: Arc<Database>,
    redis: Arc<RedisClient>,
}

impl PostRepository {
    pub async fn find_by_id(&self, id: &ObjectId) -> Result<Option<Post>, AppError> {
        self.collection::<Post>()
            .find_one(doc! { "_id": *id })
            .await
            .map_err(db_error)
    }

    pub async fn get(&self, id: &ObjectId) -> Result<Post, AppError> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("게시물을 찾을 수 없습니다".to_string()))
    }

    pub async fn create(&self, mut post: Post) -> Result<Post, AppError> {
        let result = self.collection::<Post>()
            .insert_one(&post)
            .await
            .map_err(db_error)?;

        post.id = Some(inserted_object_id(&result)?);
        Ok(post)
    }

    pub async fn save(&self, post: &Post) -> Result<(), AppError> {
        let id = post.id
            .ok_or_else(|| AppError::InternalError("저장되지 않은 게시물입니다".to_string()))?;

        self.collection::<Post>()
            .replace_one(doc! { "_id": id }, post)
            .await
            .map_err(db_error)?;

        Ok(())
    }

    pub async fn delete(&self, id: &ObjectId) -> Result<bool, AppError> {
        let result = self.collection::<Post>()
            .delete_one(doc! { "_id": *id })
            .await
            .map_err(db_error)?;

        Ok(result.deleted_count > 0)
    }

    /// `comments_count`를 `delta`만큼 조정합니다. 0 아래로는 내려가지 않습니다.
    pub async fn adjust_comments_count(&self, id: &ObjectId, delta: i64) -> Result<(), AppError> {
        let filter = if delta < 0 {
            doc! { "_id": *id, "comments_count": { "$gte": -delta } }
        } else {
            doc! { "_id": *id }
        };

        let result = self.collection::<Post>()
            .update_one(filter, doc! { "$inc": { "comments_count": delta } })
            .await
            .map_err(db_error)?;

        if delta < 0 && result.matched_count == 0 {
            self.collection::<Post>()
                .update_one(doc! { "_id": *id }, doc! { "$set": { "comments_count": 0_i64 } })
                .await
                .map_err(db_error)?;
        }

        Ok(())
    }

    /// 최신순 피드
    pub async fn feed(&self, filter: Document, page: &PaginationQuery) -> Result<PaginatedResponse<Post>, AppError> {
        find_page(&self.collection::<Post>(), filter, doc! { "created_at": -1 }, page).await
    }

    pub async fn search(&self, term: &str, limit: i64) -> Result<Vec<Post>, AppError> {
        find_all(
            &self.collection::<Post>(),
            doc! { "content": contains_ignore_case(term) },
            doc! { "created_at": -1 },
            Some(limit),
        ).await
    }

    pub async fn count(&self, filter: Document) -> Result<u64, AppError> {
        self.collection::<Post>()
            .count_documents(filter)
            .await
            .map_err(db_error)
    }

    pub async fn create_indexes(&self) -> Result<(), AppError> {
        let author_index = IndexModel::builder()
            .keys(doc! { "author_id": 1, "created_at": -1 })
            .options(IndexOptions::builder()
                .name("author_created_at".to_string())
                .build())
            .build();

        let hashtag_index = IndexModel::builder()
            .keys(doc! { "hashtags": 1, "created_at": -1 })
            .options(IndexOptions::builder()
                .name("hashtags_created_at".to_string())
                .build())
            .build();

        self.collection::<Post>()
            .create_indexes([author_index, hashtag_index])
            .await
            .map_err(db_error)?;

        Ok(())
    }
}
