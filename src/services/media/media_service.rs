//! # 미디어 서비스
//!
//! Bunny Storage 경로는 호출자 프로필 ID 아래로 강제합니다.
//!
//! ```text
//! ?path=avatars/me.png  →  {user_id}/avatars/me.png
//! ```
//!
//! `..` 세그먼트나 빈 경로는 400입니다. 업스트림 실패는 500으로 그대로 전달됩니다.
//!
//! Stream 비디오는 `videos` 컬렉션에 생성자를 기록하고, 업로드/삭제는 생성자나 관리자만 할 수 있습니다.
//! 상태 조회는 등록된 비디오에 한해 로그인한 사용자 누구나 가능합니다.

use std::sync::Arc;
use mongodb::bson::{doc, oid::ObjectId};
use singleton_macro::service;
use crate::core::errors::AppError;
use crate::domain::dto::media::{StoredFileResponse, VideoResponse};
use crate::domain::entities::media::video::Video;
use crate::domain::models::auth::AuthenticatedUser;
use crate::repositories::media::video_repo::VideoRepository;
use crate::repositories::users::user_repo::UserRepository;
use crate::services::access::ensure_owner_or_admin;
use crate::services::activity::ActivityService;
use crate::storage::BunnyClient;
use crate::utils::id_utils::require_id;

#[service(name = "media")]
pub struct MediaService {
    bunny_client: Arc<BunnyClient>,
    user_repo: Arc<UserRepository>,
    video_repo: Arc<VideoRepository>,
    activity_service: Arc<ActivityService>,
}

/// 사용자 네임스페이스를 붙인 저장 경로
fn namespaced_path(user_id: &str, path: &str) -> Result<String, AppError> {
    let segments: Vec<&str> = path
        .trim()
        .split('/')
        .filter(|segment| !segment.is_empty())
        .collect();

    if segments.is_empty() {
        return Err(AppError::ValidationError("파일 경로가 비어 있습니다".to_string()));
    }
    if segments.iter().any(|segment| *segment == ".." || *segment == ".") {
        return Err(AppError::ValidationError("파일 경로에 '..'를 사용할 수 없습니다".to_string()));
    }

    Ok(format!("{}/{}", user_id, segments.join("/")))
}

/// 비디오 변경(업로드/삭제) 권한: 생성자 또는 관리자
fn ensure_video_writer(video: &Video, my_id: &ObjectId, auth: &AuthenticatedUser) -> Result<(), AppError> {
    ensure_owner_or_admin(video.is_owned_by(my_id), auth, "본인이 등록한 비디오만 변경할 수 있습니다")
}

fn require_body(content: &[u8]) -> Result<(), AppError> {
    if content.is_empty() {
        return Err(AppError::ValidationError("업로드할 내용이 비어 있습니다".to_string()));
    }
    Ok(())
}

impl MediaService {
    pub async fn upload_file(&self, auth: &AuthenticatedUser, path: &str, content: Vec<u8>) -> Result<StoredFileResponse, AppError> {
        require_body(&content)?;
        let (user_id, path) = self.resolve(auth, path).await?;

        let size = content.len();
        let stored = self.bunny_client.upload_file(&path, content).await?;
        log::debug!("업로드 체크섬 {}: {}", stored.path, stored.checksum);

        self.activity_service
            .record_with(user_id, "media.upload", "file", None, doc! { "path": stored.path.as_str(), "bytes": size as i64 })
            .await;

        Ok(StoredFileResponse::from(stored))
    }

    /// 파일 내용과 Content-Type
    pub async fn download_file(&self, auth: &AuthenticatedUser, path: &str) -> Result<(Vec<u8>, Option<String>), AppError> {
        let (_, path) = self.resolve(auth, path).await?;
        self.bunny_client.download_file(&path).await
    }

    pub async fn delete_file(&self, auth: &AuthenticatedUser, path: &str) -> Result<(), AppError> {
        let (user_id, path) = self.resolve(auth, path).await?;
        self.bunny_client.delete_file(&path).await?;

        self.activity_service
            .record_with(user_id, "media.delete", "file", None, doc! { "path": path.as_str() })
            .await;
        Ok(())
    }

    pub async fn create_video(&self, auth: &AuthenticatedUser, title: &str) -> Result<VideoResponse, AppError> {
        let user_id = self.caller_id(auth).await?;
        let video = self.bunny_client.create_video(title.trim()).await?;

        self.video_repo
            .create(Video::new(video.guid.clone(), user_id, video.title.clone()))
            .await?;

        self.activity_service
            .record_with(user_id, "video.create", "video", None, doc! { "video_id": video.guid.as_str() })
            .await;

        Ok(VideoResponse::from(video))
    }

    pub async fn upload_video(&self, auth: &AuthenticatedUser, video_id: &str, content: Vec<u8>) -> Result<VideoResponse, AppError> {
        require_body(&content)?;
        let user_id = self.caller_id(auth).await?;
        let video = self.video_repo.get_by_guid(video_id).await?;
        ensure_video_writer(&video, &user_id, auth)?;

        self.bunny_client.upload_video(video_id, content).await?;
        let video = self.bunny_client.get_video(video_id).await?;
        Ok(VideoResponse::from(video))
    }

    pub async fn get_video(&self, video_id: &str) -> Result<VideoResponse, AppError> {
        self.video_repo.get_by_guid(video_id).await?;
        let video = self.bunny_client.get_video(video_id).await?;
        Ok(VideoResponse::from(video))
    }

    pub async fn delete_video(&self, auth: &AuthenticatedUser, video_id: &str) -> Result<(), AppError> {
        let user_id = self.caller_id(auth).await?;
        let video = self.video_repo.get_by_guid(video_id).await?;
        ensure_video_writer(&video, &user_id, auth)?;

        self.bunny_client.delete_video(video_id).await?;
        self.video_repo.delete_by_guid(video_id).await?;

        self.activity_service
            .record_with(user_id, "video.delete", "video", None, doc! { "video_id": video_id })
            .await;
        Ok(())
    }

    async fn resolve(&self, auth: &AuthenticatedUser, path: &str) -> Result<(ObjectId, String), AppError> {
        let user_id = self.caller_id(auth).await?;
        let path = namespaced_path(&user_id.to_hex(), path)?;
        Ok((user_id, path))
    }

    async fn caller_id(&self, auth: &AuthenticatedUser) -> Result<ObjectId, AppError> {
        let me = self.user_repo.find_profile(&auth.user_id).await?;
        require_id(&me.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_namespaced_path() {
        assert_eq!(namespaced_path("u1", "avatars/me.png").unwrap(), "u1/avatars/me.png");
        assert_eq!(namespaced_path("u1", "/docs//cv.pdf").unwrap(), "u1/docs/cv.pdf");
    }

    #[test]
    fn test_namespaced_path_rejects_traversal_and_empty() {
        assert!(matches!(namespaced_path("u1", "../u2/secret"), Err(AppError::ValidationError(_))));
        assert!(matches!(namespaced_path("u1", "a/../../b"), Err(AppError::ValidationError(_))));
        assert!(matches!(namespaced_path("u1", "  "), Err(AppError::ValidationError(_))));
        assert!(matches!(namespaced_path("u1", "///"), Err(AppError::ValidationError(_))));
    }

    fn auth(roles: &[&str]) -> AuthenticatedUser {
        AuthenticatedUser {
            user_id: "user_clerk".to_string(),
            email: None,
            roles: roles.iter().map(|r| r.to_string()).collect(),
        }
    }

    #[test]
    fn test_video_writer_must_own_or_be_admin() {
        let (owner, stranger) = (ObjectId::new(), ObjectId::new());
        let video = Video::new("guid-1".to_string(), owner, "1강".to_string());

        assert!(ensure_video_writer(&video, &owner, &auth(&["user"])).is_ok());
        assert!(matches!(
            ensure_video_writer(&video, &stranger, &auth(&["user"])),
            Err(AppError::AuthorizationError(_))
        ));
        assert!(ensure_video_writer(&video, &stranger, &auth(&["user", "admin"])).is_ok());
    }

    #[test]
    fn test_empty_body_rejected() {
        assert!(require_body(b"").is_err());
        assert!(require_body(b"x").is_ok());
    }
}
