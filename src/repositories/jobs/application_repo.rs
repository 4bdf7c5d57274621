use std::sync::Arc;
use mongodb::{bson::{doc, oid::ObjectId, Document}, options::IndexOptions, IndexModel};
use crate::{
    caching::redis::RedisClient,
    core::registry::Repository,
    db::Database,
    domain::entities::jobs::application::{Application, ApplicationStatus},
};
use singleton_macro::repository;
use crate::core::errors::{db_error, insert_error, AppError};
use crate::domain::dto::common::{PaginatedResponse, PaginationQuery};
use crate::repositories::common::{find_page, inserted_object_id};

#[repository(name = "application", collection = "applications")]
pub struct ApplicationRepository {
    db: Arc<Database>,
    redis: Arc<RedisClient>,
}

impl ApplicationRepository {
    pub async fn find_by_id(&self, id: &ObjectId) -> Result<Option<Application>, AppError> {
        self.collection::<Application>()
            .find_one(doc! { "_id": *id })
            .await
            .map_err(db_error)
    }

    pub async fn get(&self, id: &ObjectId) -> Result<Application, AppError> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("지원서를 찾을 수 없습니다".to_string()))
    }

    pub async fn find_by_job_and_applicant(&self, job_id: &ObjectId, applicant_id: &ObjectId) -> Result<Option<Application>, AppError> {
        self.collection::<Application>()
            .find_one(doc! { "job_id": *job_id, "applicant_id": *applicant_id })
            .await
            .map_err(db_error)
    }

    pub async fn create(&self, mut application: Application) -> Result<Application, AppError> {
        let result = self.collection::<Application>()
            .insert_one(&application)
            .await
            .map_err(|e| insert_error(e, || AppError::ValidationError("이미 지원한 공고입니다".to_string())))?;

        application.id = Some(inserted_object_id(&result)?);
        Ok(application)
    }

    pub async fn save(&self, application: &Application) -> Result<(), AppError> {
        let id = application.id
            .ok_or_else(|| AppError::InternalError("저장되지 않은 지원서입니다".to_string()))?;

        self.collection::<Application>()
            .replace_one(doc! { "_id": id }, application)
            .await
            .map_err(db_error)?;

        Ok(())
    }

    pub async fn delete(&self, id: &ObjectId) -> Result<bool, AppError> {
        let result = self.collection::<Application>()
            .delete_one(doc! { "_id": *id })
            .await
            .map_err(db_error)?;

        Ok(result.deleted_count > 0)
    }

    pub async fn delete_by_job(&self, job_id: &ObjectId) -> Result<u64, AppError> {
        let result = self.collection::<Application>()
            .delete_many(doc! { "job_id": *job_id })
            .await
            .map_err(db_error)?;

        Ok(result.deleted_count)
    }

    pub async fn list(&self, filter: Document, page: &PaginationQuery) -> Result<PaginatedResponse<Application>, AppError> {
        find_page(&self.collection::<Application>(), filter, doc! { "created_at": -1 }, page).await
    }

    pub async fn count_by_status(&self, status: ApplicationStatus) -> Result<u64, AppError> {
        self.collection::<Application>()
            .count_documents(doc! { "status": status.as_str() })
            .await
            .map_err(db_error)
    }

    pub async fn create_indexes(&self) -> Result<(), AppError> {
        let one_per_applicant = IndexModel::builder()
            .keys(doc! { "job_id": 1, "applicant_id": 1 })
            .options(IndexOptions::builder()
                .unique(true)
                .name("job_applicant_unique".to_string())
                .build())
            .build();

        let applicant_index = IndexModel::builder()
            .keys(doc! { "applicant_id": 1, "created_at": -1 })
            .options(IndexOptions::builder()
                .name("applicant_created_at".to_string())
                .build())
            .build();

        self.collection::<Application>()
            .create_indexes([one_per_applicant, applicant_index])
            .await
            .map_err(db_error)?;

        Ok(())
    }
}
