use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

/// 프로필 생성 요청 (Clerk 가입 직후 한 번)
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateProfileRequest {
    #[validate(length(
        min = 3,
        max = 30,
        message = "사용자명은 3-30자 사이여야 합니다"
    ))]
    #[validate(custom(function = "validate_username"))]
    pub username: String,

    #[validate(length(
        min = 1,
        max = 50,
        message = "표시 이름은 1-50자 사이여야 합니다"
    ))]
    pub display_name: String,

    /// 생략하면 세션 토큰의 이메일을 사용합니다.
    #[validate(email(message = "유효한 이메일 주소를 입력해주세요"))]
    pub email: Option<String>,

    #[validate(length(max = 500, message = "자기소개는 500자 이하여야 합니다"))]
    pub bio: Option<String>,

    #[validate(url(message = "유효한 이미지 URL이 아닙니다"))]
    pub avatar_url: Option<String>,
}

/// 프로필 부분 수정 요청
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateProfileRequest {
    #[validate(length(
        min = 3,
        max = 30,
        message = "사용자명은 3-30자 사이여야 합니다"
    ))]
    #[validate(custom(function = "validate_username"))]
    pub username: Option<String>,

    #[validate(length(
        min = 1,
        max = 50,
        message = "표시 이름은 1-50자 사이여야 합니다"
    ))]
    pub display_name: Option<String>,

    #[validate(length(max = 500, message = "자기소개는 500자 이하여야 합니다"))]
    pub bio: Option<String>,

    #[validate(url(message = "유효한 이미지 URL이 아닙니다"))]
    pub avatar_url: Option<String>,
}

fn validate_username(username: &str) -> Result<(), ValidationError> {
    if !username.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return Err(ValidationError::new("invalid_username")
            .with_message("사용자명은 알파벳, 숫자, 언더스코어만 사용 가능합니다".into()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(username: &str) -> CreateProfileRequest {
        CreateProfileRequest {
            username: username.to_string(),
            display_name: "Alice".to_string(),
            email: None,
            bio: None,
            avatar_url: None,
        }
    }

    #[test]
    fn test_valid_profile() {
        assert!(request("alice_01").validate().is_ok());
    }

    #[test]
    fn test_username_rules() {
        assert!(request("al").validate().is_err());
        assert!(request("alice-01").validate().is_err());
        assert!(request("앨리스123").validate().is_err());
        assert!(request(&"a".repeat(31)).validate().is_err());
    }

    #[test]
    fn test_update_is_partial() {
        assert!(UpdateProfileRequest::default().validate().is_ok());

        let invalid = UpdateProfileRequest {
            avatar_url: Some("not a url".to_string()),
            ..Default::default()
        };
        assert!(invalid.validate().is_err());
    }
}
