//! JWT 세션 토큰 클레임
//!
//! RFC 7519 표준 클레임과 역할(role) 클레임만 포함합니다.
use serde::{Deserialize, Serialize};

/// JWT 토큰의 클레임(Payload) 구조체
///
/// ## 클레임 구성
///
/// - `sub`: 토큰의 주체 (사용자 ID)
/// - `role`: 사용자 역할
/// - `iss`: 발급자
/// - `iat`: 토큰 발급 시간 (Unix timestamp)
/// - `exp`: 토큰 만료 시간 (Unix timestamp)
/// - `jti`: 토큰 고유 ID (같은 초에 발급된 토큰도 서로 다름)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionClaims {
    /// 토큰의 주체 (사용자 ID)
    pub sub: String,
    /// 사용자 역할
    pub role: String,
    /// 발급자
    pub iss: String,
    /// 토큰 발급 시간 (Unix timestamp)
    pub iat: i64,
    /// 토큰 만료 시간 (Unix timestamp)
    pub exp: i64,
    /// 토큰 고유 ID
    pub jti: String,
}

impl SessionClaims {
    /// 기준 시각으로부터 남은 수명 (초). 이미 만료되었으면 0 이하.
    pub fn remaining_seconds(&self, now: i64) -> i64 {
        self.exp - now
    }

    pub fn is_expired_at(&self, now: i64) -> bool {
        self.exp <= now
    }
}

/// 세션 저장소 키
///
/// 단일 세션은 `jwt:{subject}`, 기기별 세션은 `jwt:{subject}:{device}` 형식입니다.
pub fn session_key(subject: &str) -> String {
    format!("jwt:{}", subject)
}

/// 기기별 세션의 주체 문자열
pub fn device_subject(subject: &str, device_id: &str) -> String {
    format!("{}:{}", subject, device_id)
}

/// 로그아웃된 토큰의 블랙리스트 키
pub fn blacklist_key(token: &str) -> String {
    format!("blacklist:{}", token)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn claims(exp: i64) -> SessionClaims {
        SessionClaims {
            sub: "u1".to_string(),
            role: "USER".to_string(),
            iss: "access-guard".to_string(),
            iat: 1_000,
            exp,
            jti: "jti-1".to_string(),
        }
    }

    #[test]
    fn test_remaining_seconds() {
        let c = claims(4_600);
        assert_eq!(c.remaining_seconds(1_000), 3_600);
        assert!(!c.is_expired_at(4_599));
        assert!(c.is_expired_at(4_600));
    }

    #[test]
    fn test_key_formats() {
        assert_eq!(session_key("u1"), "jwt:u1");
        assert_eq!(session_key(&device_subject("u1", "device1")), "jwt:u1:device1");
        assert_eq!(blacklist_key("abc"), "blacklist:abc");
    }
}
