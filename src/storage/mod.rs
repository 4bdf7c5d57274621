//! 외부 파일/비디오 저장소
//!
//! - [`bunny`] - Bunny.net Storage / Stream 클라이언트

pub mod bunny;

pub use bunny::{BunnyClient, BunnyVideo, StoredFile};
