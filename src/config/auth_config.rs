//! 인증 관련 설정 관리 모듈
//!
//! JWT 서명 키, 발급자, 토큰 수명, 세션 TTL 설정을 관리합니다.
//!
//! 서명 키는 프로세스 전역 상태가 아니라 시작 시점에 한 번 만들어져
//! [`JwtSettings`]를 통해 `JwtService`에 주입됩니다.

use std::env;
use std::fmt;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;

use crate::config::data_config::env_or;
use crate::errors::{AppError, AppResult};

/// HS256 최소 권장 키 길이 (바이트)
const MIN_SECRET_BYTES: usize = 32;

/// JWT 설정
///
/// ```bash
/// JWT_SECRET=<base64 32바이트 이상>   # 없으면 임시 키 생성
/// JWT_ISSUER=access-guard
/// JWT_KEY_ID=access-guard-hs256
/// JWT_EXPIRATION_SECONDS=3600
/// JWT_SESSION_TTL_SECONDS=1800
/// ```
pub struct JwtConfig;

impl JwtConfig {
    /// base64로 인코딩된 서명 키
    pub fn secret() -> Option<String> {
        env::var("JWT_SECRET").ok().filter(|s| !s.trim().is_empty())
    }

    pub fn issuer() -> String {
        env::var("JWT_ISSUER").unwrap_or_else(|_| "access-guard".to_string())
    }

    /// JWT 헤더의 `kid` 값
    pub fn key_id() -> String {
        env::var("JWT_KEY_ID").unwrap_or_else(|_| "access-guard-hs256".to_string())
    }

    /// 토큰에 포함되는 만료 시간 (초)
    pub fn expiration_seconds() -> i64 {
        env_or("JWT_EXPIRATION_SECONDS", 3600)
    }

    /// 세션 저장소 TTL (초)
    pub fn session_ttl_seconds() -> u64 {
        env_or("JWT_SESSION_TTL_SECONDS", 1800)
    }

    /// 짧은 TTL 로그인에 사용하는 세션 TTL (초)
    pub fn short_session_ttl_seconds() -> u64 {
        env_or("JWT_SHORT_SESSION_TTL_SECONDS", 10)
    }
}

/// HMAC 서명 키
///
/// `Debug` 출력에는 키 바이트가 노출되지 않습니다.
#[derive(Clone)]
pub struct SigningKey {
    bytes: Vec<u8>,
    ephemeral: bool,
}

impl SigningKey {
    /// base64 문자열에서 서명 키를 생성합니다.
    ///
    /// ## 에러 케이스
    ///
    /// - base64 디코딩 실패
    /// - 디코딩된 키가 32바이트 미만
    pub fn from_base64(encoded: &str) -> AppResult<Self> {
        let bytes = STANDARD
            .decode(encoded.trim())
            .map_err(|e| AppError::ConfigError(format!("JWT_SECRET base64 디코딩 실패: {}", e)))?;

        if bytes.len() < MIN_SECRET_BYTES {
            return Err(AppError::ConfigError(format!(
                "JWT_SECRET은 최소 {}바이트여야 합니다 (현재 {}바이트)",
                MIN_SECRET_BYTES,
                bytes.len()
            )));
        }

        Ok(Self { bytes, ephemeral: false })
    }

    /// 프로세스 수명 동안만 유효한 임의의 서명 키를 생성합니다.
    ///
    /// 재시작하면 이전에 발급된 모든 토큰이 무효화됩니다.
    pub fn generate_ephemeral() -> Self {
        let mut bytes = Vec::with_capacity(32);
        bytes.extend_from_slice(uuid::Uuid::new_v4().as_bytes());
        bytes.extend_from_slice(uuid::Uuid::new_v4().as_bytes());
        Self { bytes, ephemeral: true }
    }

    /// `JWT_SECRET`에서 키를 읽고, 없으면 임시 키를 생성합니다.
    pub fn from_env() -> AppResult<Self> {
        match JwtConfig::secret() {
            Some(encoded) => Self::from_base64(&encoded),
            None => {
                log::warn!("JWT_SECRET not set, generating ephemeral signing key (tokens will not survive restart)");
                Ok(Self::generate_ephemeral())
            }
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn is_ephemeral(&self) -> bool {
        self.ephemeral
    }
}

impl fmt::Debug for SigningKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SigningKey")
            .field("len", &self.bytes.len())
            .field("ephemeral", &self.ephemeral)
            .finish()
    }
}

/// 시작 시점에 확정되는 JWT 설정값 묶음
#[derive(Debug, Clone)]
pub struct JwtSettings {
    pub signing_key: SigningKey,
    pub issuer: String,
    pub key_id: String,
    pub expiration_seconds: i64,
    pub session_ttl_seconds: u64,
    pub short_session_ttl_seconds: u64,
}

impl JwtSettings {
    pub fn from_env() -> AppResult<Self> {
        Ok(Self {
            signing_key: SigningKey::from_env()?,
            issuer: JwtConfig::issuer(),
            key_id: JwtConfig::key_id(),
            expiration_seconds: JwtConfig::expiration_seconds(),
            session_ttl_seconds: JwtConfig::session_ttl_seconds(),
            short_session_ttl_seconds: JwtConfig::short_session_ttl_seconds(),
        })
    }

    /// 주어진 키와 기본 수명 값으로 설정을 만듭니다.
    pub fn with_key(signing_key: SigningKey) -> Self {
        Self {
            signing_key,
            issuer: "access-guard".to_string(),
            key_id: "access-guard-hs256".to_string(),
            expiration_seconds: 3600,
            session_ttl_seconds: 1800,
            short_session_ttl_seconds: 10,
        }
    }
}
