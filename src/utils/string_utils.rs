//! 문자열 검증 및 정리 유틸리티
//!
//! 요청 DTO와 서비스 계층에서 공통으로 쓰는 문자열 처리 함수들입니다.
//! 해시태그 추출, MongoDB `$regex` 검색어 이스케이프도 여기에 둡니다.

use serde::Deserialize;
use validator::ValidationError;
use crate::core::errors::AppError;

/// 게시물 본문에서 추출할 해시태그의 최대 길이
pub const MAX_HASHTAG_LENGTH: usize = 50;

/// 필수 문자열을 검증하고 앞뒤 공백을 제거합니다.
///
/// # Errors
///
/// 공백뿐인 문자열이면 `ValidationError`
///
/// # Examples
///
/// ```rust,ignore
/// let title = validate_required_string("  Rust 입문  ", "title")?;
/// assert_eq!(title, "Rust 입문");
/// ```
pub fn validate_required_string(value: &str, field_name: &str) -> Result<String, AppError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(AppError::ValidationError(
            format!("{}은(는) 필수입니다", field_name)
        ));
    }
    Ok(trimmed.to_string())
}

/// 선택적 문자열을 정리합니다. 공백뿐이면 `None`.
pub fn clean_optional_string(value: Option<String>) -> Option<String> {
    value.and_then(|s| {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}

pub fn is_valid_string(value: &str) -> bool {
    !value.trim().is_empty()
}

/// `#[validate(custom(function = "not_blank"))]` 용 검증 함수
pub fn not_blank(value: &str) -> Result<(), ValidationError> {
    if is_valid_string(value) {
        Ok(())
    } else {
        Err(ValidationError::new("required").with_message("필수 입력 항목입니다".into()))
    }
}

/// Serde 역직렬화 시 선택적 문자열을 정리합니다.
///
/// ```rust,ignore
/// #[derive(Deserialize)]
/// struct UpdateProfileRequest {
///     #[serde(default, deserialize_with = "deserialize_optional_string")]
///     bio: Option<String>,
/// }
/// ```
pub fn deserialize_optional_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(clean_optional_string(opt))
}

/// `$regex` 검색에 사용자 입력을 그대로 넣기 위해 정규식 메타문자를 이스케이프합니다.
pub fn escape_regex(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        if matches!(
            c,
            '\\' | '.' | '+' | '*' | '?' | '(' | ')' | '|' | '[' | ']' | '{' | '}' | '^' | '$' | '#' | '&' | '-' | '~'
        ) {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// 본문에서 `#태그`를 추출합니다.
///
/// - 소문자로 정규화
/// - 등장 순서를 유지하며 중복 제거
/// - 글자, 숫자, `_` 만 태그로 인정
///
/// # Examples
///
/// ```rust,ignore
/// let tags = extract_hashtags("#Rust 공부 중 #rust #웹개발!");
/// assert_eq!(tags, vec!["rust", "웹개발"]);
/// ```
pub fn extract_hashtags(content: &str) -> Vec<String> {
    let mut tags: Vec<String> = Vec::new();
    let mut chars = content.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '#' {
            continue;
        }

        let mut tag = String::new();
        while let Some(&next) = chars.peek() {
            if next.is_alphanumeric() || next == '_' {
                tag.extend(next.to_lowercase());
                chars.next();
            } else {
                break;
            }
        }

        if !tag.is_empty() && tag.chars().count() <= MAX_HASHTAG_LENGTH && !tags.contains(&tag) {
            tags.push(tag);
        }
    }

    tags
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_required_string() {
        assert_eq!(validate_required_string("Hello", "title").unwrap(), "Hello");
        assert_eq!(validate_required_string("  World  ", "title").unwrap(), "World");

        assert!(validate_required_string("", "title").is_err());
        assert!(validate_required_string("   ", "title").is_err());
        assert!(validate_required_string("\t\n", "title").is_err());
    }

    #[test]
    fn test_clean_optional_string() {
        assert_eq!(clean_optional_string(Some("  World  ".to_string())), Some("World".to_string()));
        assert_eq!(clean_optional_string(Some("   ".to_string())), None);
        assert_eq!(clean_optional_string(None), None);
    }

    #[test]
    fn test_is_valid_string() {
        assert!(is_valid_string("  Rust  "));
        assert!(!is_valid_string("\t\n"));
    }

    #[test]
    fn test_not_blank() {
        assert!(not_blank("Rust").is_ok());
        assert!(not_blank("  ").is_err());
    }

    #[test]
    fn test_deserialize_optional_string() {
        #[derive(Deserialize)]
        struct TestStruct {
            #[serde(default, deserialize_with = "deserialize_optional_string")]
            bio: Option<String>,
        }

        let result: TestStruct = serde_json::from_str(r#"{"bio": "  안녕하세요  "}"#).unwrap();
        assert_eq!(result.bio, Some("안녕하세요".to_string()));

        let result: TestStruct = serde_json::from_str(r#"{"bio": "   "}"#).unwrap();
        assert_eq!(result.bio, None);

        let result: TestStruct = serde_json::from_str(r#"{"bio": null}"#).unwrap();
        assert_eq!(result.bio, None);

        let result: TestStruct = serde_json::from_str(r#"{}"#).unwrap();
        assert_eq!(result.bio, None);
    }

    #[test]
    fn test_escape_regex() {
        assert_eq!(escape_regex("c++"), "c\\+\\+");
        assert_eq!(escape_regex("a.b*"), "a\\.b\\*");
        assert_eq!(escape_regex("러스트"), "러스트");
    }

    #[test]
    fn test_extract_hashtags_normalizes_and_dedups() {
        let tags = extract_hashtags("#Rust 공부 중 #rust #웹개발! #async_await");
        assert_eq!(tags, vec!["rust", "웹개발", "async_await"]);
    }

    #[test]
    fn test_extract_hashtags_ignores_bare_hash() {
        assert!(extract_hashtags("# 제목 ## 없음").is_empty());
        assert!(extract_hashtags("").is_empty());
    }

    #[test]
    fn test_extract_hashtags_rejects_overlong_tags() {
        let long = format!("#{}", "a".repeat(MAX_HASHTAG_LENGTH + 1));
        assert!(extract_hashtags(&long).is_empty());
    }
}
