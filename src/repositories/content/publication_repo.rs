use std::sync::Arc;
use mongodb::{bson::{doc, oid::ObjectId, Document}, options::IndexOptions, IndexModel};
use crate::{
    caching::redis::RedisClient,
    core::registry::Repository,
    db::Database,
    domain::entities::content::publication::Publication,
};
use singleton_macro::repository;
use crate::core::errors::{db_error, AppError};
use crate::domain::dto::common::{PaginatedResponse, PaginationQuery};
use crate::repositories::common::{find_page, inserted_object_id};

#[repository(name = "publication", collection = "publications")]
pub struct PublicationRepository {
    db: Arc<Database>,
    redis: Arc<RedisClient>,
}

impl PublicationRepository {
    pub async fn find_by_id(&self, id: &ObjectId) -> Result<Option<Publication>, AppError> {
        self.collection::<Publication>()
            .find_one(doc! { "_id": *id })
            .await
            .map_err(db_error)
    }

    pub async fn get(&self, id: &ObjectId) -> Result<Publication, AppError> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("출판물을 찾을 수 없습니다".to_string()))
    }

    pub async fn create(&self, mut publication: Publication) -> Result<Publication, AppError> {
        let result = self.collection::<Publication>()
            .insert_one(&publication)
            .await
            .map_err(db_error)?;

        publication.id = Some(inserted_object_id(&result)?);
        Ok(publication)
    }

    pub async fn save(&self, publication: &Publication) -> Result<(), AppError> {
        let id = publication.id
            .ok_or_else(|| AppError::InternalError("저장되지 않은 출판물입니다".to_string()))?;

        self.collection::<Publication>()
            .replace_one(doc! { "_id": id }, publication)
            .await
            .map_err(db_error)?;

        Ok(())
    }

    pub async fn delete(&self, id: &ObjectId) -> Result<bool, AppError> {
        let result = self.collection::<Publication>()
            .delete_one(doc! { "_id": *id })
            .await
            .map_err(db_error)?;

        Ok(result.deleted_count > 0)
    }

    /// 출판일 최신순 (출판일 없는 항목은 뒤로)
    pub async fn list(&self, filter: Document, page: &PaginationQuery) -> Result<PaginatedResponse<Publication>, AppError> {
        find_page(&self.collection::<Publication>(), filter, doc! { "published_on": -1, "created_at": -1 }, page).await
    }

    pub async fn create_indexes(&self) -> Result<(), AppError> {
        let author_index = IndexModel::builder()
            .keys(doc! { "author_id": 1, "published_on": -1 })
            .options(IndexOptions::builder()
                .name("author_published_on".to_string())
                .build())
            .build();

        self.collection::<Publication>()
            .create_indexes([author_index])
            .await
            .map_err(db_error)?;

        Ok(())
    }
}
