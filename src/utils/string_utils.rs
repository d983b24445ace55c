//! # 문자열 유틸리티
//!
//! 경로 파라미터 검증, Authorization 헤더 파싱, 토큰 로그 표현에
//! 사용하는 공통 함수들입니다.

use sha2::{Digest, Sha256};

use crate::errors::AppError;

/// 필수 문자열 필드 검증 및 정리
///
/// 빈 문자열이나 공백만 있는 경우 ValidationError를 반환하고,
/// 유효한 문자열인 경우 앞뒤 공백을 제거한 문자열을 반환합니다.
///
/// # 예제
/// ```rust,ignore
/// use crate::utils::string_utils::validate_required_string;
///
/// assert_eq!(validate_required_string("  10.0.0.1  ", "ip").unwrap(), "10.0.0.1");
/// assert!(validate_required_string("   ", "ip").is_err());
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

/// `Authorization` 헤더 값에서 Bearer 토큰을 추출합니다.
///
/// 스킴은 대소문자를 구분하지 않으며, 토큰이 비어 있으면 에러입니다.
pub fn extract_bearer_token(auth_header: &str) -> Result<&str, AppError> {
    let header = auth_header.trim();
    let (scheme, token) = header
        .split_once(' ')
        .ok_or_else(|| AppError::AuthenticationError("유효하지 않은 인증 헤더 형식입니다".to_string()))?;

    if !scheme.eq_ignore_ascii_case("bearer") {
        return Err(AppError::AuthenticationError(
            "Bearer 인증 스킴이 필요합니다".to_string(),
        ));
    }

    let token = token.trim();
    if token.is_empty() {
        return Err(AppError::AuthenticationError("토큰이 비어 있습니다".to_string()));
    }
    Ok(token)
}

/// 로그에 남길 토큰 지문 (SHA-256 앞 12자리)
///
/// 토큰 원문은 로그에 기록하지 않습니다.
pub fn token_fingerprint(token: &str) -> String {
    let digest = Sha256::digest(token.as_bytes());
    digest
        .iter()
        .take(6)
        .map(|b| format!("{:02x}", b))
        .collect()
}

/// 응답에 노출할 토큰 앞부분 (`max_chars`자 + `...`)
pub fn token_preview(token: &str, max_chars: usize) -> String {
    let preview: String = token.chars().take(max_chars).collect();
    format!("{}...", preview)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_required_string() {
        assert_eq!(validate_required_string("  u1 ", "user_id").unwrap(), "u1");
        assert!(matches!(
            validate_required_string(" ", "user_id"),
            Err(AppError::ValidationError(_))
        ));
    }

    #[test]
    fn test_extract_bearer_token() {
        assert_eq!(extract_bearer_token("Bearer abc.def").unwrap(), "abc.def");
        assert_eq!(extract_bearer_token("bearer   abc").unwrap(), "abc");
        assert!(extract_bearer_token("Basic abc").is_err());
        assert!(extract_bearer_token("Bearer ").is_err());
        assert!(extract_bearer_token("abc").is_err());
    }

    #[test]
    fn test_token_fingerprint_is_stable_and_short() {
        let a = token_fingerprint("header.payload.signature");
        let b = token_fingerprint("header.payload.signature");

        assert_eq!(a, b);
        assert_eq!(a.len(), 12);
        assert_ne!(a, token_fingerprint("other"));
    }

    #[test]
    fn test_token_fingerprint_hides_usage_token() {
        let fingerprint = token_fingerprint("pay_abc");

        assert!(!fingerprint.contains("pay_"));
        assert!(fingerprint.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_token_preview() {
        assert_eq!(token_preview("abcdefghij", 4), "abcd...");
        assert_eq!(token_preview("ab", 20), "ab...");
    }
}
