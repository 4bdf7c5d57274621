//! 비디오 소유 기록 리포지토리

pub mod video_repo;
