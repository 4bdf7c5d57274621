//! Clerk 세션 토큰 검증 서비스
//!
//! 토큰 발급은 Clerk가 담당하고, 이 서비스는 `Authorization: Bearer <jwt>`로
//! 전달된 세션 토큰을 네트워크 호출 없이 검증합니다.
//!
//! - 운영: `CLERK_JWT_PUBLIC_KEY` (RS256 PEM)
//! - 개발/테스트: `CLERK_DEV_SECRET` (HS256)
//!
//! `CLERK_ISSUER`가 있으면 `iss`를, `CLERK_AUTHORIZED_PARTIES`가 있으면 `azp`를
//! 추가로 확인합니다.

use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use singleton_macro::service;
use crate::config::{ClerkConfig, JwtKeySource};
use crate::core::errors::{AppError, ErrorContext};
use crate::domain::models::auth::{AuthenticatedUser, ClerkClaims};

/// 토큰 검증 옵션
///
/// 환경 변수에서 읽은 값을 한 번에 전달하기 위한 묶음입니다.
#[derive(Debug, Clone)]
pub struct VerificationOptions {
    pub key_source: JwtKeySource,
    pub issuer: Option<String>,
    pub authorized_parties: Vec<String>,
    pub leeway_seconds: u64,
}

impl VerificationOptions {
    pub fn from_env() -> Result<Self, AppError> {
        let key_source = ClerkConfig::key_source().ok_or_else(|| {
            AppError::InternalError("Clerk 토큰 검증 키가 설정되지 않았습니다".to_string())
        })?;

        Ok(Self {
            key_source,
            issuer: ClerkConfig::issuer(),
            authorized_parties: ClerkConfig::authorized_parties(),
            leeway_seconds: ClerkConfig::leeway_seconds(),
        })
    }
}

#[service(name="token")]
pub struct TokenService {
    // 외부 의존성 없음
}

impl TokenService {
    /// `Authorization` 헤더 값을 검증하고 호출자 정보를 돌려줍니다.
    pub fn authenticate(&self, auth_header: &str) -> Result<AuthenticatedUser, AppError> {
        let token = self.extract_bearer_token(auth_header)?;
        let claims = self.verify_token(token)?;
        Ok(AuthenticatedUser::from(claims))
    }

    pub fn verify_token(&self, token: &str) -> Result<ClerkClaims, AppError> {
        let options = VerificationOptions::from_env()?;
        verify_with(token, &options)
    }

    /// "Bearer {token}" 형식에서 토큰 부분만 추출
    pub fn extract_bearer_token<'a>(&self, auth_header: &'a str) -> Result<&'a str, AppError> {
        bearer_token(auth_header)
    }
}

fn bearer_token(auth_header: &str) -> Result<&str, AppError> {
    match auth_header.strip_prefix("Bearer ").map(str::trim) {
        Some(token) if !token.is_empty() => Ok(token),
        _ => Err(AppError::AuthenticationError("유효하지 않은 인증 헤더 형식입니다".to_string())),
    }
}

/// 주어진 옵션으로 세션 토큰을 검증합니다.
pub fn verify_with(token: &str, options: &VerificationOptions) -> Result<ClerkClaims, AppError> {
    let (decoding_key, algorithm) = match &options.key_source {
        JwtKeySource::RsaPem(pem) => (
            DecodingKey::from_rsa_pem(pem.as_bytes()).context("Clerk 공개키 형식 오류")?,
            Algorithm::RS256,
        ),
        JwtKeySource::DevSecret(secret) => (DecodingKey::from_secret(secret.as_bytes()), Algorithm::HS256),
    };

    let mut validation = Validation::new(algorithm);
    validation.leeway = options.leeway_seconds;
    validation.validate_nbf = true;
    if let Some(issuer) = &options.issuer {
        validation.set_issuer(&[issuer]);
    }

    let claims = decode::<ClerkClaims>(token, &decoding_key, &validation)
        .map(|token_data| token_data.claims)
        .map_err(|e| match e.kind() {
            jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
                AppError::AuthenticationError("토큰이 만료되었습니다".to_string())
            },
            jsonwebtoken::errors::ErrorKind::ImmatureSignature => {
                AppError::AuthenticationError("아직 유효하지 않은 토큰입니다".to_string())
            },
            jsonwebtoken::errors::ErrorKind::InvalidIssuer => {
                AppError::AuthenticationError("토큰 발급자가 올바르지 않습니다".to_string())
            },
            _ => AppError::AuthenticationError(format!("유효하지 않은 토큰입니다: {}", e)),
        })?;

    if !options.authorized_parties.is_empty() {
        if let Some(azp) = &claims.azp {
            if !options.authorized_parties.iter().any(|party| party == azp) {
                return Err(AppError::AuthenticationError(format!(
                    "허용되지 않은 토큰 요청 출처입니다: {}", azp
                )));
            }
        }
    }

    Ok(claims)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use jsonwebtoken::{encode, EncodingKey, Header};
    use serde_json::json;

    const TEST_SECRET: &str = "test-clerk-secret";

    fn sign(claims: serde_json::Value) -> String {
        encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(TEST_SECRET.as_bytes()),
        ).unwrap()
    }

    fn options() -> VerificationOptions {
        VerificationOptions {
            key_source: JwtKeySource::DevSecret(TEST_SECRET.to_string()),
            issuer: None,
            authorized_parties: Vec::new(),
            leeway_seconds: 0,
        }
    }

    fn valid_claims() -> serde_json::Value {
        json!({
            "sub": "user_2abc",
            "exp": Utc::now().timestamp() + 600,
            "iat": Utc::now().timestamp(),
            "iss": "https://clerk.example.com",
            "azp": "http://localhost:5173",
            "public_metadata": { "role": "admin" }
        })
    }

    #[test]
    fn test_verify_valid_token() {
        let claims = verify_with(&sign(valid_claims()), &options()).unwrap();

        assert_eq!(claims.sub, "user_2abc");
        assert_eq!(claims.roles(), vec!["admin", "user"]);
    }

    #[test]
    fn test_expired_token_rejected() {
        let mut claims = valid_claims();
        claims["exp"] = json!(Utc::now().timestamp() - 3600);

        let result = verify_with(&sign(claims), &options());
        assert!(matches!(result, Err(AppError::AuthenticationError(_))));
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let mut options = options();
        options.key_source = JwtKeySource::DevSecret("another-secret".to_string());

        let result = verify_with(&sign(valid_claims()), &options);
        assert!(matches!(result, Err(AppError::AuthenticationError(_))));
    }

    #[test]
    fn test_issuer_checked() {
        let mut options = options();
        options.issuer = Some("https://clerk.other.com".to_string());
        assert!(verify_with(&sign(valid_claims()), &options).is_err());

        options.issuer = Some("https://clerk.example.com".to_string());
        assert!(verify_with(&sign(valid_claims()), &options).is_ok());
    }

    #[test]
    fn test_authorized_parties_checked() {
        let mut options = options();
        options.authorized_parties = vec!["https://app.example.com".to_string()];
        assert!(verify_with(&sign(valid_claims()), &options).is_err());

        options.authorized_parties.push("http://localhost:5173".to_string());
        assert!(verify_with(&sign(valid_claims()), &options).is_ok());
    }

    #[test]
    fn test_extract_bearer_token() {
        assert_eq!(bearer_token("Bearer abc.def").unwrap(), "abc.def");
        assert!(bearer_token("Basic abc").is_err());
        assert!(bearer_token("Bearer ").is_err());
    }
}
