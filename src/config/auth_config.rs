//! Clerk 인증 설정 관리 모듈
//!
//! 이 서비스는 직접 로그인/세션을 구현하지 않습니다. Clerk가 발급한
//! 세션 JWT를 Authorization 헤더로 받아 서명과 클레임만 검증합니다.
//!
//! ## 환경 변수
//!
//! ```bash
//! # Clerk 대시보드의 "JWT public key" (PEM, RS256)
//! export CLERK_JWT_PUBLIC_KEY="-----BEGIN PUBLIC KEY-----\n...\n-----END PUBLIC KEY-----"
//!
//! # 선택: 발급자(iss) 검증
//! export CLERK_ISSUER="https://clerk.example.com"
//!
//! # 선택: 허용할 azp (프론트엔드 Origin) 목록
//! export CLERK_AUTHORIZED_PARTIES="http://localhost:3000,https://app.example.com"
//!
//! # 개발/테스트 환경 전용: HS256 공유 비밀키로 서명한 토큰 허용
//! export CLERK_DEV_SECRET="local-dev-secret"
//! ```

use std::env;
use crate::config::data_config::{parse_csv, Environment};

/// 토큰 서명 검증에 사용할 키
#[derive(Debug, Clone, PartialEq)]
pub enum JwtKeySource {
    /// Clerk 공개키 (RS256)
    RsaPem(String),
    /// 개발용 공유 비밀키 (HS256)
    DevSecret(String),
}

/// Clerk 세션 토큰 검증 설정
pub struct ClerkConfig;

impl ClerkConfig {
    /// 서명 검증 키를 결정합니다.
    ///
    /// `CLERK_JWT_PUBLIC_KEY`가 있으면 항상 RS256을 사용합니다.
    /// 없을 때는 개발/테스트 환경에서만 `CLERK_DEV_SECRET`을 허용합니다.
    ///
    /// # Returns
    ///
    /// 사용할 키가 없으면 `None` (모든 보호된 요청이 401)
    pub fn key_source() -> Option<JwtKeySource> {
        Self::resolve_key_source(
            env::var("CLERK_JWT_PUBLIC_KEY").ok(),
            env::var("CLERK_DEV_SECRET").ok(),
            &Environment::current(),
        )
    }

    /// 환경 변수 값과 실행 환경으로부터 키를 결정합니다.
    pub fn resolve_key_source(
        public_key: Option<String>,
        dev_secret: Option<String>,
        environment: &Environment,
    ) -> Option<JwtKeySource> {
        if let Some(pem) = public_key.filter(|k| !k.trim().is_empty()) {
            // .env 파일에서는 줄바꿈을 \n 으로 적는 경우가 많습니다
            return Some(JwtKeySource::RsaPem(pem.replace("\\n", "\n")));
        }

        match dev_secret.filter(|s| !s.is_empty()) {
            Some(secret) if environment.allows_dev_shortcuts() => Some(JwtKeySource::DevSecret(secret)),
            Some(_) => {
                log::warn!("CLERK_DEV_SECRET은 개발/테스트 환경에서만 사용할 수 있습니다");
                None
            }
            None => None,
        }
    }

    /// 기대하는 발급자 (`iss`)
    pub fn issuer() -> Option<String> {
        env::var("CLERK_ISSUER").ok().filter(|s| !s.trim().is_empty())
    }

    /// 허용할 `azp` 목록. 비어 있으면 검사하지 않습니다.
    pub fn authorized_parties() -> Vec<String> {
        env::var("CLERK_AUTHORIZED_PARTIES")
            .map(|v| parse_csv(&v))
            .unwrap_or_default()
    }

    /// `exp`/`nbf` 검증 허용 오차 (초). 기본값: 5
    pub fn leeway_seconds() -> u64 {
        env::var("CLERK_LEEWAY_SECONDS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(5)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_public_key_takes_precedence() {
        let source = ClerkConfig::resolve_key_source(
            Some("-----BEGIN PUBLIC KEY-----\\nabc\\n-----END PUBLIC KEY-----".to_string()),
            Some("dev".to_string()),
            &Environment::Development,
        );

        assert_eq!(
            source,
            Some(JwtKeySource::RsaPem("-----BEGIN PUBLIC KEY-----\nabc\n-----END PUBLIC KEY-----".to_string()))
        );
    }

    #[test]
    fn test_dev_secret_only_in_dev_environments() {
        assert_eq!(
            ClerkConfig::resolve_key_source(None, Some("dev".to_string()), &Environment::Test),
            Some(JwtKeySource::DevSecret("dev".to_string()))
        );
        assert_eq!(
            ClerkConfig::resolve_key_source(None, Some("dev".to_string()), &Environment::Production),
            None
        );
    }

    #[test]
    fn test_no_key_configured() {
        assert_eq!(ClerkConfig::resolve_key_source(None, None, &Environment::Development), None);
        assert_eq!(
            ClerkConfig::resolve_key_source(Some("  ".to_string()), None, &Environment::Development),
            None
        );
    }
}
