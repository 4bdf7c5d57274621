use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;
use crate::utils::string_utils::not_blank;

/// 장바구니 / 위시리스트에 강좌 추가
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AddCourseRequest {
    pub course_id: String,
}

/// 주소 생성 / 수정 요청
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct AddressRequest {
    #[serde(default)]
    #[validate(custom(function = "not_blank"))]
    #[validate(length(max = 100, message = "이름은 100자 이하여야 합니다"))]
    pub full_name: String,

    #[validate(length(max = 30, message = "전화번호는 30자 이하여야 합니다"))]
    pub phone: Option<String>,

    #[serde(default)]
    #[validate(custom(function = "not_blank"))]
    #[validate(length(max = 200, message = "주소는 200자 이하여야 합니다"))]
    pub line1: String,

    #[validate(length(max = 200, message = "주소는 200자 이하여야 합니다"))]
    pub line2: Option<String>,

    #[serde(default)]
    #[validate(custom(function = "not_blank"))]
    pub city: String,

    pub state: Option<String>,

    #[serde(default)]
    #[validate(custom(function = "not_blank"))]
    #[validate(length(max = 20, message = "우편번호는 20자 이하여야 합니다"))]
    pub postal_code: String,

    #[serde(default)]
    #[validate(custom(function = "not_blank"))]
    pub country: String,

    /// `true`면 이 주소를 기본 주소로 지정
    pub is_default: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_address_requires_core_fields() {
        let request: AddressRequest = serde_json::from_str(
            r#"{ "full_name": "홍길동", "line1": "테헤란로 1", "city": "서울", "postal_code": "06000" }"#
        ).unwrap();
        assert!(request.validate().is_err());

        let complete = AddressRequest { country: "KR".to_string(), ..request };
        assert!(complete.validate().is_ok());
    }
}
