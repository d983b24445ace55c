//! 로그아웃된 토큰 블랙리스트
//!
//! 블랙리스트 항목은 토큰의 남은 수명만큼만 유지됩니다.
//! 만료 시점 이후의 토큰은 서명 검증 단계에서 거부됩니다.

use std::sync::Arc;

use chrono::Utc;

use crate::caching::CounterStore;
use crate::errors::AppResult;
use crate::repositories::TokenRepository;
use crate::services::auth::JwtService;
use crate::utils::string_utils::token_fingerprint;

pub struct BlacklistService {
    repository: TokenRepository,
    jwt_service: Arc<JwtService>,
}

impl BlacklistService {
    pub fn new(store: Arc<dyn CounterStore>, jwt_service: Arc<JwtService>) -> Self {
        Self {
            repository: TokenRepository::new(store),
            jwt_service,
        }
    }

    /// 토큰을 남은 수명 동안 블랙리스트에 등록합니다.
    ///
    /// 파싱할 수 없거나 남은 수명이 없는 토큰은 저장하지 않고 `false`를 반환합니다.
    pub async fn add_to_blacklist(&self, token: &str) -> AppResult<bool> {
        let Some(claims) = self.jwt_service.parse_token(token) else {
            log::info!("블랙리스트 등록 생략 (유효하지 않은 토큰) - token: {}", token_fingerprint(token));
            return Ok(false);
        };

        let remaining = claims.remaining_seconds(Utc::now().timestamp());
        if remaining <= 0 {
            log::info!("블랙리스트 등록 생략 (이미 만료) - token: {}", token_fingerprint(token));
            return Ok(false);
        }

        self.repository
            .store_blacklisted(token, remaining as u64)
            .await?;
        Ok(true)
    }

    pub async fn is_blacklisted(&self, token: &str) -> AppResult<bool> {
        self.repository.is_blacklisted(token).await
    }
}
