//! JWT 세션 레지스트리
//!
//! 주체마다 하나의 활성 토큰을 저장소에 보관합니다 (`jwt:{subject}`).
//! 세션 TTL은 토큰의 만료 시간과 별개이며, 토큰 검증은 저장된 토큰과의
//! 정확한 일치와 서명 검증을 모두 요구합니다.
//!
//! ## 검증 조합
//!
//! `validate_token`(저장 일치 + 서명)과 `is_token_expired`(세션 TTL + 토큰 만료)는
//! 독립적인 검사입니다. 보호된 요청에는 블랙리스트 검사까지 묶은
//! [`SessionService::authenticate`]를 사용합니다.

use std::sync::Arc;

use crate::caching::CounterStore;
use crate::config::JwtSettings;
use crate::domain::models::token::{device_subject, SessionClaims};
use crate::errors::AppResult;
use crate::repositories::TokenRepository;
use crate::services::auth::{BlacklistService, JwtService};
use crate::utils::string_utils::token_fingerprint;

/// 로그인 시 부여되는 기본 역할
pub const DEFAULT_ROLE: &str = "USER";

/// 발급 후 세션에 저장된 토큰
#[derive(Debug, Clone)]
pub struct IssuedSession {
    pub subject: String,
    pub token: String,
    pub session_ttl: u64,
}

pub struct SessionService {
    repository: TokenRepository,
    jwt_service: Arc<JwtService>,
    blacklist_service: Arc<BlacklistService>,
    session_ttl_seconds: u64,
    short_session_ttl_seconds: u64,
}

impl SessionService {
    pub fn new(
        store: Arc<dyn CounterStore>,
        jwt_service: Arc<JwtService>,
        blacklist_service: Arc<BlacklistService>,
        settings: &JwtSettings,
    ) -> Self {
        Self {
            repository: TokenRepository::new(store),
            jwt_service,
            blacklist_service,
            session_ttl_seconds: settings.session_ttl_seconds,
            short_session_ttl_seconds: settings.short_session_ttl_seconds,
        }
    }

    pub async fn store_token(&self, subject: &str, token: &str, ttl_seconds: u64) -> AppResult<()> {
        self.repository.store_session(subject, token, ttl_seconds).await
    }

    pub async fn get_token(&self, subject: &str) -> AppResult<Option<String>> {
        self.repository.find_session(subject).await
    }

    pub async fn remove_token(&self, subject: &str) -> AppResult<bool> {
        self.repository.delete_session(subject).await
    }

    /// 토큰의 주체를 클레임에서 찾아, 저장된 토큰이 같을 때만 세션을 삭제합니다.
    pub async fn remove_token_by_token(&self, token: &str) -> AppResult<bool> {
        let Some(subject) = self.jwt_service.subject_of(token) else {
            log::info!("토큰에서 주체 추출 실패 - token: {}", token_fingerprint(token));
            return Ok(false);
        };

        match self.repository.find_session(&subject).await? {
            Some(stored) if stored == token => self.repository.delete_session(&subject).await,
            _ => {
                log::debug!("저장된 세션 토큰과 일치하지 않음 - subject: {}", subject);
                Ok(false)
            }
        }
    }

    /// 저장된 토큰이 있고, 제시된 토큰과 정확히 같으며, 서명 검증을 통과해야 `true`.
    pub async fn validate_token(&self, subject: &str, presented: &str) -> AppResult<bool> {
        let Some(stored) = self.repository.find_session(subject).await? else {
            log::info!("세션 토큰 없음 (로그아웃 또는 만료) - subject: {}", subject);
            return Ok(false);
        };

        if stored != presented {
            log::info!(
                "토큰 불일치 - subject: {}, stored: {}, presented: {}",
                subject,
                token_fingerprint(&stored),
                token_fingerprint(presented)
            );
            return Ok(false);
        }

        Ok(self.jwt_service.parse_token(presented).is_some())
    }

    /// 세션 키의 남은 TTL (초). 없으면 `-2`.
    pub async fn token_ttl(&self, subject: &str) -> AppResult<i64> {
        self.repository.session_ttl(subject).await
    }

    /// 세션 TTL이 0 이하이거나 토큰 자체의 만료 시간이 지났으면 `true`.
    pub async fn is_token_expired(&self, subject: &str, token: &str) -> AppResult<bool> {
        let ttl = self.token_ttl(subject).await?;
        if ttl <= 0 {
            log::debug!("세션 TTL 만료 - subject: {}, ttl: {}", subject, ttl);
            return Ok(true);
        }
        Ok(self.jwt_service.is_token_expired(token))
    }

    /// 블랙리스트, 세션 일치, 만료 검사를 모두 통과한 토큰의 클레임을 반환합니다.
    pub async fn authenticate(&self, token: &str) -> AppResult<Option<SessionClaims>> {
        if self.blacklist_service.is_blacklisted(token).await? {
            log::info!("블랙리스트 토큰 거부 - token: {}", token_fingerprint(token));
            return Ok(None);
        }

        let Some(claims) = self.jwt_service.parse_token(token) else {
            return Ok(None);
        };

        if !self.validate_token(&claims.sub, token).await? {
            return Ok(None);
        }
        if self.is_token_expired(&claims.sub, token).await? {
            return Ok(None);
        }
        Ok(Some(claims))
    }

    async fn issue(&self, subject: &str, session_ttl: u64) -> AppResult<IssuedSession> {
        let token = self.jwt_service.generate_token(
            subject,
            DEFAULT_ROLE,
            self.jwt_service.default_lifetime(),
        )?;
        self.store_token(subject, &token, session_ttl).await?;

        Ok(IssuedSession {
            subject: subject.to_string(),
            token,
            session_ttl,
        })
    }

    /// 토큰을 발급하고 기본 세션 TTL로 저장합니다.
    pub async fn login(&self, subject: &str) -> AppResult<IssuedSession> {
        self.issue(subject, self.session_ttl_seconds).await
    }

    /// 세션 만료 동작 확인용으로 짧은 세션 TTL을 사용합니다.
    pub async fn login_short_ttl(&self, subject: &str) -> AppResult<IssuedSession> {
        self.issue(subject, self.short_session_ttl_seconds).await
    }

    /// 기기마다 별도의 세션(`jwt:{subject}:{device}`)을 발급합니다.
    pub async fn login_devices(&self, subject: &str, devices: &[String]) -> AppResult<Vec<(String, IssuedSession)>> {
        let mut sessions = Vec::with_capacity(devices.len());
        for device in devices {
            let session = self
                .issue(&device_subject(subject, device), self.session_ttl_seconds)
                .await?;
            sessions.push((device.clone(), session));
        }
        Ok(sessions)
    }

    pub async fn logout_device(&self, subject: &str, device_id: &str) -> AppResult<bool> {
        self.remove_token(&device_subject(subject, device_id)).await
    }

    /// 기존 토큰이 유효하면 새 토큰을 발급해 세션을 교체합니다.
    pub async fn refresh(&self, subject: &str, old_token: &str) -> AppResult<Option<IssuedSession>> {
        if !self.validate_token(subject, old_token).await? {
            return Ok(None);
        }
        self.login(subject).await.map(Some)
    }

    /// 토큰을 블랙리스트에 올리고 해당 세션을 제거합니다.
    ///
    /// 반환값은 (블랙리스트 등록 여부, 세션 삭제 여부)입니다.
    pub async fn logout(&self, token: &str) -> AppResult<(bool, bool)> {
        let blacklisted = self.blacklist_service.add_to_blacklist(token).await?;
        let removed = self.remove_token_by_token(token).await?;
        Ok((blacklisted, removed))
    }
}
