//! Bunny.net Storage / Stream 설정
//!
//! ```bash
//! export BUNNY_STORAGE_ZONE="learnhub-files"
//! export BUNNY_STORAGE_API_KEY="storage-zone-password"
//! export BUNNY_STORAGE_HOST="storage.bunnycdn.com"   # 리전별 호스트 (선택)
//! export BUNNY_CDN_URL="https://learnhub.b-cdn.net"
//! export BUNNY_STREAM_LIBRARY_ID="123456"
//! export BUNNY_STREAM_API_KEY="stream-library-api-key"
//! ```

use std::env;

/// Bunny.net 연결 설정 값
#[derive(Debug, Clone, PartialEq)]
pub struct BunnyConfig {
    pub storage_zone: String,
    pub storage_api_key: String,
    pub storage_host: String,
    pub cdn_url: String,
    pub stream_library_id: String,
    pub stream_api_key: String,
    pub stream_host: String,
}

impl BunnyConfig {
    /// 환경 변수에서 설정을 읽습니다.
    ///
    /// 값이 비어 있어도 서버는 시작되며, 해당 API 호출 시점에
    /// `ExternalServiceError`로 실패합니다.
    pub fn from_env() -> Self {
        let storage_zone = env::var("BUNNY_STORAGE_ZONE").unwrap_or_default();
        let cdn_url = env::var("BUNNY_CDN_URL")
            .unwrap_or_else(|_| format!("https://{}.b-cdn.net", storage_zone));

        Self {
            storage_api_key: env::var("BUNNY_STORAGE_API_KEY").unwrap_or_default(),
            storage_host: env::var("BUNNY_STORAGE_HOST")
                .unwrap_or_else(|_| "storage.bunnycdn.com".to_string()),
            cdn_url: cdn_url.trim_end_matches('/').to_string(),
            stream_library_id: env::var("BUNNY_STREAM_LIBRARY_ID").unwrap_or_default(),
            stream_api_key: env::var("BUNNY_STREAM_API_KEY").unwrap_or_default(),
            stream_host: env::var("BUNNY_STREAM_HOST")
                .unwrap_or_else(|_| "video.bunnycdn.com".to_string()),
            storage_zone,
        }
    }

    pub fn storage_configured(&self) -> bool {
        !self.storage_zone.is_empty() && !self.storage_api_key.is_empty()
    }

    pub fn stream_configured(&self) -> bool {
        !self.stream_library_id.is_empty() && !self.stream_api_key.is_empty()
    }
}
