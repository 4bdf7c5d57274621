use std::sync::Arc;
use mongodb::{bson::{doc, oid::ObjectId, Document}, options::IndexOptions, IndexModel};
use crate::{
    caching::redis::RedisClient,
    core::registry::Repository,
    db::Database,
    domain::entities::jobs::job::Job,
};
use singleton_macro::repository;
use crate::core::errors::{db_error, AppError};
use crate::domain::dto::common::{PaginatedResponse, PaginationQuery};
use crate::repositories::common::{contains_ignore_case, find_all, find_page, inserted_object_id};

#[repository(name = "job", collection = "jobs")]
pub struct JobRepository {
    db: Arc<Database>,
    redis: Arc<RedisClient>,
}

impl JobRepository {
    pub async fn find_by_id(&self, id: &ObjectId) -> Result<Option<Job>, AppError> {
        self.collection::<Job>()
            .find_one(doc! { "_id": *id })
            .await
            .map_err(db_error)
    }

    pub async fn get(&self, id: &ObjectId) -> Result<Job, AppError> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("채용공고를 찾을 수 없습니다".to_string()))
    }

    pub async fn create(&self, mut job: Job) -> Result<Job, AppError> {
        let result = self.collection::<Job>()
            .insert_one(&job)
            .await
            .map_err(db_error)?;

        job.id = Some(inserted_object_id(&result)?);
        Ok(job)
    }

    pub async fn save(&self, job: &Job) -> Result<(), AppError> {
        let id = job.id
            .ok_or_else(|| AppError::InternalError("저장되지 않은 채용공고입니다".to_string()))?;

        self.collection::<Job>()
            .replace_one(doc! { "_id": id }, job)
            .await
            .map_err(db_error)?;

        Ok(())
    }

    pub async fn delete(&self, id: &ObjectId) -> Result<bool, AppError> {
        let result = self.collection::<Job>()
            .delete_one(doc! { "_id": *id })
            .await
            .map_err(db_error)?;

        Ok(result.deleted_count > 0)
    }

    pub async fn list(&self, filter: Document, page: &PaginationQuery) -> Result<PaginatedResponse<Job>, AppError> {
        find_page(&self.collection::<Job>(), filter, doc! { "created_at": -1 }, page).await
    }

    /// 모집 중인 공고의 제목/회사/설명 부분 일치
    pub async fn search_active(&self, term: &str, limit: i64) -> Result<Vec<Job>, AppError> {
        let pattern = contains_ignore_case(term);
        let filter = doc! {
            "is_active": true,
            "$or": [
                { "title": pattern.clone() },
                { "company": pattern.clone() },
                { "description": pattern },
            ]
        };

        find_all(&self.collection::<Job>(), filter, doc! { "created_at": -1 }, Some(limit)).await
    }

    pub async fn count(&self, filter: Document) -> Result<u64, AppError> {
        self.collection::<Job>()
            .count_documents(filter)
            .await
            .map_err(db_error)
    }

    pub async fn create_indexes(&self) -> Result<(), AppError> {
        let active_index = IndexModel::builder()
            .keys(doc! { "is_active": 1, "created_at": -1 })
            .options(IndexOptions::builder()
                .name("active_created_at".to_string())
                .build())
            .build();

        let poster_index = IndexModel::builder()
            .keys(doc! { "posted_by": 1 })
            .options(IndexOptions::builder()
                .name("posted_by".to_string())
                .build())
            .build();

        self.collection::<Job>()
            .create_indexes([active_index, poster_index])
            .await
            .map_err(db_error)?;

        Ok(())
    }
}
