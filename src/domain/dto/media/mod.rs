//! 미디어(Bunny Storage / Stream) DTO

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;
use crate::storage::{BunnyVideo, StoredFile};
use crate::utils::string_utils::not_blank;

/// `?path=` (호출자 네임스페이스 기준 상대 경로)
#[derive(Debug, Clone, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct MediaPathQuery {
    pub path: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateVideoRequest {
    #[validate(custom(function = "not_blank"))]
    #[validate(length(max = 200, message = "제목은 200자 이하여야 합니다"))]
    pub title: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct StoredFileResponse {
    pub path: String,
    pub url: String,
}

impl From<StoredFile> for StoredFileResponse {
    fn from(file: StoredFile) -> Self {
        Self { path: file.path, url: file.url }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct VideoResponse {
    pub video_id: String,
    pub title: String,
    /// 0=생성됨, 1=업로드됨, 2=처리중, 3=인코딩중, 4=완료, 5=오류
    pub status: i32,
    pub length_seconds: i64,
    pub encode_progress: i32,
}

impl From<BunnyVideo> for VideoResponse {
    fn from(video: BunnyVideo) -> Self {
        Self {
            video_id: video.guid,
            title: video.title,
            status: video.status,
            length_seconds: video.length,
            encode_progress: video.encode_progress,
        }
    }
}
