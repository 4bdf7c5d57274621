//! ObjectId 파싱 유틸리티

use mongodb::bson::oid::ObjectId;
use crate::core::errors::AppError;

/// 경로/본문으로 받은 24자리 hex 문자열을 ObjectId로 변환합니다.
///
/// # Errors
///
/// 형식이 잘못되면 `ValidationError` (400)
pub fn parse_object_id(id: &str, field_name: &str) -> Result<ObjectId, AppError> {
    ObjectId::parse_str(id.trim())
        .map_err(|_| AppError::ValidationError(format!("유효하지 않은 {} 형식입니다", field_name)))
}

/// 선택적 ID 문자열을 파싱합니다. 공백뿐이면 `None`.
pub fn parse_optional_object_id(id: Option<&str>, field_name: &str) -> Result<Option<ObjectId>, AppError> {
    match id.map(str::trim).filter(|s| !s.is_empty()) {
        Some(id) => parse_object_id(id, field_name).map(Some),
        None => Ok(None),
    }
}

/// 응답용 hex 문자열. 저장 전 문서면 빈 문자열입니다.
pub fn id_hex(id: &Option<ObjectId>) -> String {
    id.map(|id| id.to_hex()).unwrap_or_default()
}

/// 저장된 문서의 ID. 조회한 문서에는 항상 있으므로 없으면 내부 오류입니다.
pub fn require_id(id: &Option<ObjectId>) -> Result<ObjectId, AppError> {
    id.ok_or_else(|| AppError::InternalError("문서 ID가 없습니다".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_object_id() {
        let id = ObjectId::new();
        assert_eq!(parse_object_id(&id.to_hex(), "course_id").unwrap(), id);
        assert_eq!(parse_object_id(&format!(" {} ", id.to_hex()), "course_id").unwrap(), id);

        let err = parse_object_id("not-an-id", "course_id").unwrap_err();
        assert!(matches!(err, AppError::ValidationError(msg) if msg.contains("course_id")));
    }

    #[test]
    fn test_parse_optional_object_id() {
        assert_eq!(parse_optional_object_id(None, "course_id").unwrap(), None);
        assert_eq!(parse_optional_object_id(Some("  "), "course_id").unwrap(), None);
        assert!(parse_optional_object_id(Some("zzz"), "course_id").is_err());
    }

    #[test]
    fn test_id_hex() {
        let id = ObjectId::new();
        assert_eq!(id_hex(&Some(id)), id.to_hex());
        assert_eq!(id_hex(&None), "");
    }

    #[test]
    fn test_require_id() {
        let id = ObjectId::new();
        assert_eq!(require_id(&Some(id)).unwrap(), id);
        assert!(matches!(require_id(&None), Err(AppError::InternalError(_))));
    }
}
