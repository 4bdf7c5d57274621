//! Redis 캐시 클라이언트
//!
//! 값은 JSON 문자열로 저장합니다. 사용자 프로필(Clerk ID 기준)과
//! 강좌 상세 조회 결과를 짧은 TTL로 캐싱하는 데 사용합니다.
//!
//! 캐시는 보조 수단이므로 리포지토리에서는 [`RedisClient::get_cached`] /
//! [`RedisClient::cache`]처럼 실패를 삼키는 메서드를 주로 사용합니다.
//!
//! 연결은 하나의 `ConnectionManager`를 복제해 공유하며, 끊기면 매니저가 재연결합니다.
//!
//! ```bash
//! export REDIS_URL="redis://localhost:6379"
//! ```

use redis::aio::ConnectionManager;
use redis::{AsyncCommands, Client};
use serde::{Serialize, de::DeserializeOwned};
use std::env;

/// 기본 캐시 TTL (10분)
pub const DEFAULT_CACHE_TTL_SECONDS: usize = 600;

fn serde_failure(context: &'static str, e: serde_json::Error) -> redis::RedisError {
    redis::RedisError::from((redis::ErrorKind::TypeError, context, e.to_string()))
}

#[derive(Clone)]
pub struct RedisClient {
    manager: ConnectionManager,
}

impl RedisClient {
    /// `REDIS_URL`로 연결하고 `PING`으로 가용성을 확인합니다.
    pub async fn new() -> Result<Self, Box<dyn std::error::Error>> {
        let redis_url = env::var("REDIS_URL")
            .unwrap_or_else(|_| "redis://localhost:6379".to_string());

        Self::connect(&redis_url).await
    }

    /// 주어진 URL로 `ConnectionManager`를 만듭니다.
    pub async fn connect(redis_url: &str) -> Result<Self, Box<dyn std::error::Error>> {
        let client = Client::open(redis_url)?;
        let mut manager = client.get_connection_manager().await?;
        redis::cmd("PING").query_async::<()>(&mut manager).await?;

        log::info!("✅ Redis 연결 성공");

        Ok(Self { manager })
    }

    pub async fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, redis::RedisError> {
        let mut conn = self.manager.clone();
        let value: Option<String> = conn.get(key).await?;

        value
            .map(|json| serde_json::from_str(&json).map_err(|e| serde_failure("Deserialization failed", e)))
            .transpose()
    }

    pub async fn set_with_expiry<T: Serialize>(&self, key: &str, value: &T, seconds: usize) -> Result<(), redis::RedisError> {
        let mut conn = self.manager.clone();
        let json = serde_json::to_string(value).map_err(|e| serde_failure("Serialization failed", e))?;
        conn.set_ex(key, json, seconds as u64).await
    }

    pub async fn del(&self, key: &str) -> Result<(), redis::RedisError> {
        let mut conn = self.manager.clone();
        conn.del(key).await
    }

    pub async fn del_multiple(&self, keys: &[String]) -> Result<(), redis::RedisError> {
        if keys.is_empty() {
            return Ok(());
        }
        let mut conn = self.manager.clone();
        conn.del(keys).await
    }

    pub async fn keys(&self, pattern: &str) -> Result<Vec<String>, redis::RedisError> {
        let mut conn = self.manager.clone();
        conn.keys(pattern).await
    }

    /// 캐시 조회. 실패하면 경고만 남기고 `None`을 반환합니다.
    pub async fn get_cached<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        match self.get::<T>(key).await {
            Ok(value) => value,
            Err(e) => {
                log::warn!("⚠️ 캐시 조회 실패 ({}): {}", key, e);
                None
            }
        }
    }

    /// 기본 TTL로 캐시에 저장합니다. 실패는 경고만 남깁니다.
    pub async fn cache<T: Serialize>(&self, key: &str, value: &T) {
        if let Err(e) = self.set_with_expiry(key, value, DEFAULT_CACHE_TTL_SECONDS).await {
            log::warn!("⚠️ 캐시 저장 실패 ({}): {}", key, e);
        }
    }

    /// 캐시 키를 삭제합니다. 실패는 경고만 남깁니다.
    pub async fn evict(&self, keys: &[String]) {
        if let Err(e) = self.del_multiple(keys).await {
            log::warn!("⚠️ 캐시 무효화 실패 ({:?}): {}", keys, e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[actix_web::test]
    async fn test_connect_rejects_malformed_url() {
        assert!(RedisClient::connect("not a redis url").await.is_err());
    }

    #[test]
    fn test_serde_failure_is_type_error() {
        let err = serde_json::from_str::<u32>("x").unwrap_err();
        assert_eq!(serde_failure("Deserialization failed", err).kind(), redis::ErrorKind::TypeError);
    }
}
