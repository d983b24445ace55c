//! JWT 발급 및 검증 서비스
//!
//! HS256으로 서명하며, 서명 키는 시작 시 [`JwtSettings`]로 주입됩니다.
//! 헤더에는 `typ=JWT`와 설정된 `kid`가 포함됩니다.
//!
//! 검증 실패(서명 불일치, 만료, 형식 오류)는 에러로 전파하지 않고
//! 로그를 남긴 뒤 `None`으로 처리합니다.

use chrono::Utc;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};

use crate::config::JwtSettings;
use crate::domain::models::token::SessionClaims;
use crate::errors::{AppError, AppResult};
use crate::utils::string_utils::token_fingerprint;

pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    issuer: String,
    key_id: String,
    default_lifetime_seconds: i64,
}

impl JwtService {
    pub fn new(settings: &JwtSettings) -> Self {
        let secret = settings.signing_key.as_bytes();
        if settings.signing_key.is_ephemeral() {
            log::warn!("임시 서명 키 사용 중 - 재시작 시 발급된 토큰이 모두 무효화됩니다");
        }

        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            issuer: settings.issuer.clone(),
            key_id: settings.key_id.clone(),
            default_lifetime_seconds: settings.expiration_seconds,
        }
    }

    /// 설정된 기본 수명 (초)
    pub fn default_lifetime(&self) -> i64 {
        self.default_lifetime_seconds
    }

    /// 서명된 토큰을 발급합니다.
    ///
    /// # Arguments
    ///
    /// * `subject` - 토큰 주체 (사용자 ID)
    /// * `role` - 사용자 역할
    /// * `lifetime_seconds` - 발급 시각부터 만료까지의 시간
    pub fn generate_token(&self, subject: &str, role: &str, lifetime_seconds: i64) -> AppResult<String> {
        let now = Utc::now().timestamp();
        let claims = SessionClaims {
            sub: subject.to_string(),
            role: role.to_string(),
            iss: self.issuer.clone(),
            iat: now,
            exp: now + lifetime_seconds,
            jti: uuid::Uuid::new_v4().to_string(),
        };

        let mut header = Header::new(Algorithm::HS256);
        header.kid = Some(self.key_id.clone());

        let token = encode(&header, &claims, &self.encoding_key)
            .map_err(|e| AppError::InternalError(format!("JWT 토큰 생성 실패: {}", e)))?;

        log::debug!(
            "토큰 발급 - subject: {}, role: {}, exp: {}, token: {}",
            subject,
            role,
            claims.exp,
            token_fingerprint(&token)
        );
        Ok(token)
    }

    /// 서명과 만료 시간을 검증하고 클레임을 반환합니다.
    ///
    /// 만료 판정에 여유 시간(leeway)을 두지 않습니다.
    pub fn parse_token(&self, token: &str) -> Option<SessionClaims> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.set_issuer(&[self.issuer.as_str()]);
        validation.set_required_spec_claims(&["exp", "sub", "iss"]);

        match decode::<SessionClaims>(token, &self.decoding_key, &validation) {
            Ok(data) => Some(data.claims),
            Err(e) => {
                log::info!("토큰 파싱 실패 - token: {}, 이유: {}", token_fingerprint(token), e);
                None
            }
        }
    }

    /// 토큰의 주체. 파싱에 실패하면 `None`.
    pub fn subject_of(&self, token: &str) -> Option<String> {
        self.parse_token(token).map(|claims| claims.sub)
    }

    /// 토큰에 포함된 만료 시간이 지났는지 확인합니다. 파싱 실패는 만료로 취급합니다.
    pub fn is_token_expired(&self, token: &str) -> bool {
        match self.parse_token(token) {
            Some(claims) => claims.is_expired_at(Utc::now().timestamp()),
            None => true,
        }
    }
}
