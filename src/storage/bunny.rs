//! Bunny.net HTTP 클라이언트
//!
//! Storage API(경로 단위 PUT/GET/DELETE)와 Stream API(비디오 생성/조회/업로드/삭제)를
//! 얇게 감싼 클라이언트입니다. 재시도는 하지 않으며, 2xx가 아닌 응답은 모두
//! `AppError::ExternalServiceError`로 변환됩니다.

use reqwest::{Client, RequestBuilder, Response};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use crate::config::BunnyConfig;
use crate::core::errors::AppError;

/// Stream 비디오 메타데이터 (Bunny 응답 중 사용하는 필드만)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BunnyVideo {
    pub guid: String,
    #[serde(default)]
    pub title: String,
    /// 0=생성됨, 1=업로드됨, 2=처리중, 3=인코딩중, 4=완료, 5=오류
    #[serde(default)]
    pub status: i32,
    #[serde(default)]
    pub length: i64,
    #[serde(default)]
    pub encode_progress: i32,
    #[serde(default)]
    pub thumbnail_file_name: Option<String>,
}

/// Storage 업로드 결과
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct StoredFile {
    pub path: String,
    pub url: String,
    pub checksum: String,
}

#[derive(Clone)]
pub struct BunnyClient {
    http: Client,
    config: BunnyConfig,
}

impl BunnyClient {
    pub fn new(config: BunnyConfig) -> Self {
        if !config.storage_configured() {
            log::warn!("⚠️ Bunny Storage 설정이 비어 있습니다. 파일 API 호출은 실패합니다");
        }
        if !config.stream_configured() {
            log::warn!("⚠️ Bunny Stream 설정이 비어 있습니다. 비디오 API 호출은 실패합니다");
        }

        Self { http: Client::new(), config }
    }

    pub fn from_env() -> Self {
        Self::new(BunnyConfig::from_env())
    }

    /// 저장 경로에 대응하는 공개 CDN URL
    pub fn cdn_url(&self, path: &str) -> String {
        format!("{}/{}", self.config.cdn_url, encode_path(path))
    }

    fn storage_url(&self, path: &str) -> String {
        format!(
            "https://{}/{}/{}",
            self.config.storage_host,
            self.config.storage_zone,
            encode_path(path)
        )
    }

    fn stream_url(&self, suffix: &str) -> String {
        format!(
            "https://{}/library/{}/videos{}",
            self.config.stream_host, self.config.stream_library_id, suffix
        )
    }

    fn storage_request(&self, builder: RequestBuilder) -> Result<RequestBuilder, AppError> {
        if !self.config.storage_configured() {
            return Err(AppError::ExternalServiceError("Bunny Storage가 설정되지 않았습니다".to_string()));
        }
        Ok(builder.header("AccessKey", &self.config.storage_api_key))
    }

    fn stream_request(&self, builder: RequestBuilder) -> Result<RequestBuilder, AppError> {
        if !self.config.stream_configured() {
            return Err(AppError::ExternalServiceError("Bunny Stream이 설정되지 않았습니다".to_string()));
        }
        Ok(builder
            .header("AccessKey", &self.config.stream_api_key)
            .header("accept", "application/json"))
    }

    /// 파일 업로드. SHA-256 체크섬을 함께 보내 전송 중 손상을 Bunny가 거부하도록 합니다.
    pub async fn upload_file(&self, path: &str, content: Vec<u8>) -> Result<StoredFile, AppError> {
        let checksum = sha256_hex(&content);

        let request = self
            .storage_request(self.http.put(self.storage_url(path)))?
            .header("Checksum", &checksum)
            .header("Content-Type", "application/octet-stream")
            .body(content);

        send(request, "Storage 업로드").await?;
        log::info!("📦 Bunny Storage 업로드: {}", path);

        Ok(StoredFile {
            path: path.to_string(),
            url: self.cdn_url(path),
            checksum,
        })
    }

    /// 파일 다운로드. 원본 `Content-Type`을 함께 돌려줍니다.
    pub async fn download_file(&self, path: &str) -> Result<(Vec<u8>, Option<String>), AppError> {
        let request = self.storage_request(self.http.get(self.storage_url(path)))?;
        let response = send(request, "Storage 다운로드").await?;

        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);

        let bytes = response
            .bytes()
            .await
            .map_err(|e| AppError::ExternalServiceError(format!("Bunny Storage 응답 읽기 실패: {}", e)))?;

        Ok((bytes.to_vec(), content_type))
    }

    pub async fn delete_file(&self, path: &str) -> Result<(), AppError> {
        let request = self.storage_request(self.http.delete(self.storage_url(path)))?;
        send(request, "Storage 삭제").await?;
        log::info!("🗑️ Bunny Storage 삭제: {}", path);
        Ok(())
    }

    pub async fn create_video(&self, title: &str) -> Result<BunnyVideo, AppError> {
        let request = self
            .stream_request(self.http.post(self.stream_url("")))?
            .json(&serde_json::json!({ "title": title }));

        let video = parse_json::<BunnyVideo>(send(request, "Stream 비디오 생성").await?).await?;
        log::info!("🎬 Bunny Stream 비디오 생성: {} ({})", video.guid, title);
        Ok(video)
    }

    pub async fn upload_video(&self, video_id: &str, content: Vec<u8>) -> Result<(), AppError> {
        let request = self
            .stream_request(self.http.put(self.stream_url(&format!("/{}", urlencoding::encode(video_id)))))?
            .header("Content-Type", "application/octet-stream")
            .body(content);

        send(request, "Stream 비디오 업로드").await?;
        log::info!("🎬 Bunny Stream 업로드 완료: {}", video_id);
        Ok(())
    }

    pub async fn get_video(&self, video_id: &str) -> Result<BunnyVideo, AppError> {
        let request = self
            .stream_request(self.http.get(self.stream_url(&format!("/{}", urlencoding::encode(video_id)))))?;

        parse_json::<BunnyVideo>(send(request, "Stream 비디오 조회").await?).await
    }

    pub async fn delete_video(&self, video_id: &str) -> Result<(), AppError> {
        let request = self
            .stream_request(self.http.delete(self.stream_url(&format!("/{}", urlencoding::encode(video_id)))))?;

        send(request, "Stream 비디오 삭제").await?;
        log::info!("🗑️ Bunny Stream 비디오 삭제: {}", video_id);
        Ok(())
    }
}

async fn send(request: RequestBuilder, action: &str) -> Result<Response, AppError> {
    let response = request
        .send()
        .await
        .map_err(|e| AppError::ExternalServiceError(format!("Bunny {} 요청 실패: {}", action, e)))?;

    if !response.status().is_success() {
        let status = response.status();
        let error_text = response.text().await.unwrap_or_default();
        return Err(AppError::ExternalServiceError(format!(
            "Bunny {} 실패 ({}): {}", action, status, error_text
        )));
    }

    Ok(response)
}

async fn parse_json<T: serde::de::DeserializeOwned>(response: Response) -> Result<T, AppError> {
    response
        .json::<T>()
        .await
        .map_err(|e| AppError::ExternalServiceError(format!("Bunny 응답 파싱 실패: {}", e)))
}

/// 경로 세그먼트별로 퍼센트 인코딩합니다. 구분자 `/`는 유지합니다.
pub fn encode_path(path: &str) -> String {
    path.split('/')
        .filter(|segment| !segment.is_empty())
        .map(|segment| urlencoding::encode(segment).into_owned())
        .collect::<Vec<_>>()
        .join("/")
}

/// Bunny `Checksum` 헤더 형식 (대문자 16진수 SHA-256)
pub fn sha256_hex(content: &[u8]) -> String {
    Sha256::digest(content)
        .iter()
        .map(|b| format!("{:02X}", b))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> BunnyConfig {
        BunnyConfig {
            storage_zone: "zone".to_string(),
            storage_api_key: "key".to_string(),
            storage_host: "storage.bunnycdn.com".to_string(),
            cdn_url: "https://zone.b-cdn.net".to_string(),
            stream_library_id: "42".to_string(),
            stream_api_key: "stream".to_string(),
            stream_host: "video.bunnycdn.com".to_string(),
        }
    }

    #[test]
    fn test_encode_path_keeps_separators() {
        assert_eq!(encode_path("/user/my file.png"), "user/my%20file.png");
        assert_eq!(encode_path("a//b"), "a/b");
    }

    #[test]
    fn test_urls() {
        let client = BunnyClient::new(test_config());

        assert_eq!(
            client.storage_url("u1/a b.txt"),
            "https://storage.bunnycdn.com/zone/u1/a%20b.txt"
        );
        assert_eq!(client.cdn_url("u1/a.txt"), "https://zone.b-cdn.net/u1/a.txt");
        assert_eq!(
            client.stream_url("/abc"),
            "https://video.bunnycdn.com/library/42/videos/abc"
        );
    }

    #[test]
    fn test_sha256_hex_uppercase() {
        assert_eq!(
            sha256_hex(b"abc"),
            "BA7816BF8F01CFEA414140DE5DAE2223B00361A396177A9CB410FF61F20015AD"
        );
    }

    #[test]
    fn test_video_deserialize_camel_case() {
        let video: BunnyVideo = serde_json::from_str(
            r#"{"guid":"g1","title":"intro","status":4,"length":120,"encodeProgress":100,"thumbnailFileName":"thumb.jpg","videoLibraryId":42}"#,
        ).unwrap();

        assert_eq!(video.guid, "g1");
        assert_eq!(video.encode_progress, 100);
        assert_eq!(video.thumbnail_file_name.as_deref(), Some("thumb.jpg"));
    }

    #[test]
    fn test_unconfigured_storage_fails() {
        let mut config = test_config();
        config.storage_api_key.clear();
        let client = BunnyClient::new(config);

        let result = client.storage_request(client.http.get("https://example.com"));
        assert!(matches!(result, Err(AppError::ExternalServiceError(_))));
    }
}
