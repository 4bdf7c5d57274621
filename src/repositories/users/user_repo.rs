//! # 사용자 리포지토리
//!
//! `users` 컬렉션 데이터 액세스 계층입니다.
//! 요청마다 Clerk ID → 로컬 프로필 조회가 일어나므로 이 조회는 Redis에 캐싱합니다.
//!
//! ## 캐시 키
//!
//! - `user:clerk:{clerk_id}` - Clerk ID 조회
//! - `user:{id}` - ObjectId 조회 (매크로의 `cache_key()`)
//!
//! 저장([`UserRepository::save`]) 시 두 키를 모두 무효화합니다.

use std::sync::Arc;
use mongodb::{bson::{doc, oid::ObjectId, DateTime, Document}, options::IndexOptions, IndexModel};
use crate::{
    caching::redis::RedisClient,
    core::registry::Repository,
    db::Database,
    domain::entities::users::user::User,
};
use singleton_macro::repository;
use crate::core::errors::{db_error, insert_error, AppError};
use crate::domain::dto::common::{PaginatedResponse, PaginationQuery};
use crate::repositories::common::{contains_ignore_case, find_all, find_page, inserted_object_id};

#[repository(name = "user", collection = "users")]
pub struct UserRepository {
    db: Arc<Database>,
    redis: Arc<RedisClient>,
}

fn clerk_cache_key(clerk_id: &str) -> String {
    format!("user:clerk:{}", clerk_id)
}

impl UserRepository {
    /// Clerk ID로 프로필 조회 (캐시 우선)
    pub async fn find_by_clerk_id(&self, clerk_id: &str) -> Result<Option<User>, AppError> {
        let cache_key = clerk_cache_key(clerk_id);

        if let Some(cached) = self.redis.get_cached::<User>(&cache_key).await {
            return Ok(Some(cached));
        }

        let user = self.collection::<User>()
            .find_one(doc! { "clerk_id": clerk_id })
            .await
            .map_err(db_error)?;

        if let Some(ref user) = user {
            self.redis.cache(&cache_key, user).await;
        }

        Ok(user)
    }

    /// 인증된 호출자의 프로필. 아직 만들지 않았다면 404입니다.
    pub async fn find_profile(&self, clerk_id: &str) -> Result<User, AppError> {
        self.find_by_clerk_id(clerk_id)
            .await?
            .ok_or_else(|| AppError::NotFound(
                "프로필을 찾을 수 없습니다. 먼저 프로필을 생성해주세요".to_string()
            ))
    }

    pub async fn find_by_id(&self, id: &ObjectId) -> Result<Option<User>, AppError> {
        let cache_key = self.cache_key(&id.to_hex());

        if let Some(cached) = self.redis.get_cached::<User>(&cache_key).await {
            return Ok(Some(cached));
        }

        let user = self.collection::<User>()
            .find_one(doc! { "_id": *id })
            .await
            .map_err(db_error)?;

        if let Some(ref user) = user {
            self.redis.cache(&cache_key, user).await;
        }

        Ok(user)
    }

    pub async fn find_by_username(&self, username: &str) -> Result<Option<User>, AppError> {
        self.collection::<User>()
            .find_one(doc! { "username": username })
            .await
            .map_err(db_error)
    }

    /// 여러 ID의 사용자를 한 번에 조회 (순서 보장 없음)
    pub async fn find_by_ids(&self, ids: &[ObjectId]) -> Result<Vec<User>, AppError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        find_all(&self.collection::<User>(), doc! { "_id": { "$in": ids.to_vec() } }, doc! { "username": 1 }, None).await
    }

    pub async fn create(&self, mut user: User) -> Result<User, AppError> {
        if self.find_by_clerk_id(&user.clerk_id).await?.is_some() {
            return Err(AppError::ConflictError("이미 프로필이 존재합니다".to_string()));
        }

        if self.find_by_username(&user.username).await?.is_some() {
            return Err(AppError::ConflictError("이미 사용 중인 사용자명입니다".to_string()));
        }

        let result = self.collection::<User>()
            .insert_one(&user)
            .await
            .map_err(|e| insert_error(e, || AppError::ConflictError("이미 프로필이 있거나 사용 중인 사용자명입니다".to_string())))?;

        user.id = Some(inserted_object_id(&result)?);

        let _ = self.invalidate_collection_cache(None).await;

        Ok(user)
    }

    /// 문서 전체를 덮어씁니다. (마지막 쓰기 우선)
    pub async fn save(&self, user: &User) -> Result<(), AppError> {
        let id = user.id
            .ok_or_else(|| AppError::InternalError("저장되지 않은 사용자입니다".to_string()))?;

        self.collection::<User>()
            .replace_one(doc! { "_id": id }, user)
            .await
            .map_err(db_error)?;

        self.redis.evict(&[clerk_cache_key(&user.clerk_id)]).await;
        let _ = self.invalidate_cache(&id.to_hex()).await;

        Ok(())
    }

    pub async fn list(&self, filter: Document, page: &PaginationQuery) -> Result<PaginatedResponse<User>, AppError> {
        find_page(&self.collection::<User>(), filter, doc! { "created_at": -1 }, page).await
    }

    /// 사용자명 / 표시 이름 부분 일치 검색
    pub async fn search(&self, term: &str, page: &PaginationQuery) -> Result<PaginatedResponse<User>, AppError> {
        let pattern = contains_ignore_case(term);
        let filter = doc! {
            "$or": [
                { "username": pattern.clone() },
                { "display_name": pattern },
            ]
        };

        find_page(&self.collection::<User>(), filter, doc! { "followers_count": -1 }, page).await
    }

    pub async fn count(&self, filter: Document) -> Result<u64, AppError> {
        self.collection::<User>()
            .count_documents(filter)
            .await
            .map_err(db_error)
    }

    pub async fn count_created_since(&self, since: DateTime) -> Result<u64, AppError> {
        self.count(doc! { "created_at": { "$gte": since } }).await
    }

    pub async fn create_indexes(&self) -> Result<(), AppError> {
        let clerk_index = IndexModel::builder()
            .keys(doc! { "clerk_id": 1 })
            .options(IndexOptions::builder()
                .unique(true)
                .name("clerk_id_unique".to_string())
                .build())
            .build();

        let username_index = IndexModel::builder()
            .keys(doc! { "username": 1 })
            .options(IndexOptions::builder()
                .unique(true)
                .name("username_unique".to_string())
                .build())
            .build();

        let created_at_index = IndexModel::builder()
            .keys(doc! { "created_at": -1 })
            .options(IndexOptions::builder()
                .name("created_at_desc".to_string())
                .build())
            .build();

        self.collection::<User>()
            .create_indexes([clerk_index, username_index, created_at_index])
            .await
            .map_err(db_error)?;

        Ok(())
    }
}
