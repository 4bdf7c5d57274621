//! 해시태그 사용 횟수 집계
//!
//! 게시물 생성/수정/삭제 시 서비스가 추가·제거된 태그 목록을 넘기면
//! `posts_count`를 올리거나 내립니다. 카운트는 0 아래로 내려가지 않습니다.

use std::sync::Arc;
use mongodb::{bson::{doc, DateTime}, options::IndexOptions, IndexModel};
use crate::{
    caching::redis::RedisClient,
    core::registry::Repository,
    db::Database,
    domain::entities::social::hashtag::Hashtag,
};
use singleton_macro::repository;
use crate::core::errors::{db_error, AppError};
use crate::repositories::common::find_all;

#[repository(name = "hashtag", collection = "hashtags")]
pub struct HashtagRepository {
    db: Arc<Database>,
    redis: Arc<RedisClient>,
}

const TRENDING_CACHE_PREFIX: &str = "hashtag:trending";
const TRENDING_CACHE_TTL_SECONDS: usize = 60;

impl HashtagRepository {
    async fn evict_trending(&self) {
        match self.redis.keys(&format!("{}:*", TRENDING_CACHE_PREFIX)).await {
            Ok(keys) => self.redis.evict(&keys).await,
            Err(e) => log::warn!("⚠️ 트렌딩 캐시 키 조회 실패: {}", e),
        }
    }

    pub async fn increment(&self, names: &[String]) -> Result<(), AppError> {
        let now = DateTime::now();

        for name in names {
            self.collection::<Hashtag>()
                .update_one(
                    doc! { "name": name },
                    doc! {
                        "$inc": { "posts_count": 1_i64 },
                        "$set": { "last_used_at": now },
                    },
                )
                .upsert(true)
                .await
                .map_err(db_error)?;
        }

        if !names.is_empty() {
            self.evict_trending().await;
        }
        Ok(())
    }

    pub async fn decrement(&self, names: &[String]) -> Result<(), AppError> {
        if names.is_empty() {
            return Ok(());
        }

        self.collection::<Hashtag>()
            .update_many(
                doc! { "name": { "$in": names.to_vec() }, "posts_count": { "$gt": 0 } },
                doc! { "$inc": { "posts_count": -1_i64 } },
            )
            .await
            .map_err(db_error)?;

        self.evict_trending().await;
        Ok(())
    }

    /// 사용 횟수 내림차순, 같으면 최근 사용 순
    pub async fn trending(&self, limit: i64) -> Result<Vec<Hashtag>, AppError> {
        let cache_key = format!("{}:{}", TRENDING_CACHE_PREFIX, limit);

        if let Some(cached) = self.redis.get_cached::<Vec<Hashtag>>(&cache_key).await {
            return Ok(cached);
        }

        let hashtags = find_all(
            &self.collection::<Hashtag>(),
            doc! { "posts_count": { "$gt": 0 } },
            doc! { "posts_count": -1, "last_used_at": -1 },
            Some(limit),
        ).await?;

        if let Err(e) = self.redis.set_with_expiry(&cache_key, &hashtags, TRENDING_CACHE_TTL_SECONDS).await {
            log::warn!("⚠️ 트렌딩 캐시 저장 실패: {}", e);
        }
        Ok(hashtags)
    }

    pub async fn create_indexes(&self) -> Result<(), AppError> {
        let name_index = IndexModel::builder()
            .keys(doc! { "name": 1 })
            .options(IndexOptions::builder()
                .unique(true)
                .name("name_unique".to_string())
                .build())
            .build();

        let trending_index = IndexModel::builder()
            .keys(doc! { "posts_count": -1, "last_used_at": -1 })
            .options(IndexOptions::builder()
                .name("trending".to_string())
                .build())
            .build();

        self.collection::<Hashtag>()
            .create_indexes([name_index, trending_index])
            .await
            .map_err(db_error)?;

        Ok(())
    }
}
