//! Clerk 세션 토큰 클레임

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Clerk가 발급한 세션 JWT의 클레임
///
/// `metadata` / `public_metadata`는 Clerk 대시보드의 세션 토큰 템플릿에서
/// 추가한 커스텀 클레임입니다. 둘 중 어느 쪽에든 `role`이 있으면 역할로 사용합니다.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ClerkClaims {
    /// Clerk 사용자 ID (`user_...`)
    pub sub: String,
    pub exp: i64,
    #[serde(default)]
    pub iat: Option<i64>,
    #[serde(default)]
    pub nbf: Option<i64>,
    #[serde(default)]
    pub iss: Option<String>,
    /// 토큰을 요청한 프런트엔드 Origin
    #[serde(default)]
    pub azp: Option<String>,
    /// Clerk 세션 ID
    #[serde(default)]
    pub sid: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub metadata: Option<Value>,
    #[serde(default)]
    pub public_metadata: Option<Value>,
}

impl ClerkClaims {
    /// 토큰의 역할 목록. 모든 인증 사용자는 `user` 역할을 가집니다.
    ///
    /// `role`은 문자열 하나 또는 문자열 배열일 수 있습니다.
    pub fn roles(&self) -> Vec<String> {
        let mut roles = vec!["user".to_string()];

        for metadata in [&self.metadata, &self.public_metadata].into_iter().flatten() {
            match metadata.get("role") {
                Some(Value::String(role)) => roles.push(role.trim().to_lowercase()),
                Some(Value::Array(values)) => roles.extend(
                    values.iter()
                        .filter_map(Value::as_str)
                        .map(|role| role.trim().to_lowercase()),
                ),
                _ => {}
            }
        }

        roles.retain(|role| !role.is_empty());
        roles.sort();
        roles.dedup();
        roles
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn claims(metadata: Option<Value>, public_metadata: Option<Value>) -> ClerkClaims {
        ClerkClaims {
            sub: "user_2abc".to_string(),
            exp: 0,
            iat: None,
            nbf: None,
            iss: None,
            azp: None,
            sid: None,
            email: None,
            metadata,
            public_metadata,
        }
    }

    #[test]
    fn test_default_role_is_user() {
        assert_eq!(claims(None, None).roles(), vec!["user"]);
    }

    #[test]
    fn test_role_from_metadata() {
        let roles = claims(Some(json!({ "role": "Admin" })), None).roles();
        assert_eq!(roles, vec!["admin", "user"]);
    }

    #[test]
    fn test_role_array_from_public_metadata() {
        let roles = claims(None, Some(json!({ "role": ["admin", "instructor", "user"] }))).roles();
        assert_eq!(roles, vec!["admin", "instructor", "user"]);
    }

    #[test]
    fn test_deserialize_minimal_token() {
        let claims: ClerkClaims = serde_json::from_value(json!({
            "sub": "user_1",
            "exp": 1700000000,
            "azp": "http://localhost:5173"
        })).unwrap();

        assert_eq!(claims.sub, "user_1");
        assert_eq!(claims.azp.as_deref(), Some("http://localhost:5173"));
        assert!(claims.metadata.is_none());
    }
}
