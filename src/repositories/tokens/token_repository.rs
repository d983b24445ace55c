use std::sync::Arc;

use crate::caching::CounterStore;
use crate::domain::models::token::{blacklist_key, session_key};
use crate::errors::AppResult;
use crate::utils::string_utils::token_fingerprint;

/// JWT 세션 토큰 관리를 위한 Repository
///
/// Redis를 사용하여 다음 기능을 제공합니다:
/// - 주체별 활성 세션 토큰 저장 (`jwt:{subject}`, TTL 지정)
/// - 로그아웃된 토큰 블랙리스트 (`blacklist:{token}`, TTL = 토큰 남은 수명)
///
/// 세션 TTL은 토큰에 포함된 만료 시간과 독립적으로 관리됩니다.
pub struct TokenRepository {
    store: Arc<dyn CounterStore>,
}

impl TokenRepository {
    pub fn new(store: Arc<dyn CounterStore>) -> Self {
        Self { store }
    }

    /// 주체의 세션 토큰을 저장합니다. 기존 토큰과 TTL은 덮어씁니다.
    ///
    /// # Example
    /// ```rust,ignore
    /// repo.store_session("user123", &token, 1800).await?;
    /// ```
    pub async fn store_session(&self, subject: &str, token: &str, ttl_seconds: u64) -> AppResult<()> {
        self.store
            .set_ex(&session_key(subject), token, ttl_seconds)
            .await?;

        log::info!(
            "세션 토큰 저장 완료 - subject: {}, ttl: {}초, token: {}",
            subject,
            ttl_seconds,
            token_fingerprint(token)
        );
        Ok(())
    }

    pub async fn find_session(&self, subject: &str) -> AppResult<Option<String>> {
        let token = self.store.get(&session_key(subject)).await?;
        if token.is_none() {
            log::debug!("저장된 세션 토큰 없음 - subject: {}", subject);
        }
        Ok(token)
    }

    /// 실제로 삭제되었으면 `true`
    pub async fn delete_session(&self, subject: &str) -> AppResult<bool> {
        let deleted = self.store.del(&session_key(subject)).await?;
        if deleted {
            log::info!("세션 토큰 삭제 - subject: {}", subject);
        } else {
            log::debug!("삭제할 세션 토큰 없음 - subject: {}", subject);
        }
        Ok(deleted)
    }

    /// 세션 키의 남은 TTL (초, 저장소 센티널 값 포함)
    pub async fn session_ttl(&self, subject: &str) -> AppResult<i64> {
        self.store.ttl(&session_key(subject)).await
    }

    /// 토큰을 블랙리스트에 등록합니다.
    ///
    /// 호출자는 0보다 큰 TTL만 전달해야 합니다.
    pub async fn store_blacklisted(&self, token: &str, ttl_seconds: u64) -> AppResult<()> {
        self.store
            .set_ex(&blacklist_key(token), token, ttl_seconds)
            .await?;

        log::info!(
            "토큰 블랙리스트 등록 - token: {}, ttl: {}초",
            token_fingerprint(token),
            ttl_seconds
        );
        Ok(())
    }

    pub async fn is_blacklisted(&self, token: &str) -> AppResult<bool> {
        self.store.exists(&blacklist_key(token)).await
    }
}
