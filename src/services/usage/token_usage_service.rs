//! API 토큰 사용 횟수 제한
//!
//! 토큰 접두사로 한도를 정하고 (`pay_` 10, `api_` 1000, `temp_` 1, 그 외 1000),
//! 첫 사용 시 한도와 첫 사용 시각을 기록한 뒤 1시간 만료를 설정합니다.
//! 한도 판정 절차와 동시성 특성은 IP 리미터와 같습니다.

use std::sync::Arc;

use chrono::Utc;

use crate::caching::CounterStore;
use crate::domain::models::token::{
    FIELD_FIRST_USED, FIELD_LAST_USED, FIELD_LIMIT, TokenClass, TokenUsageRecord,
};
use crate::errors::AppResult;
use crate::repositories::TokenUsageRepository;
use crate::utils::string_utils::token_fingerprint;

pub struct TokenUsageService {
    repository: TokenUsageRepository,
}

impl TokenUsageService {
    pub fn new(store: Arc<dyn CounterStore>) -> Self {
        Self {
            repository: TokenUsageRepository::new(store),
        }
    }

    /// 토큰 사용을 허용할지 판정하고, 허용하면 사용 횟수를 소비합니다.
    pub async fn is_allowed(&self, token: &str) -> AppResult<bool> {
        let limit = TokenClass::of(token).limit();
        let count = self.repository.count(token).await?;

        if count >= limit {
            log::warn!(
                "토큰 사용 횟수 초과 - token: {}, count: {}/{}",
                token_fingerprint(token),
                count,
                limit
            );
            return Ok(false);
        }

        let new_count = self.repository.increment_count(token).await?;
        let now = Utc::now().timestamp();

        if new_count == 1 {
            self.repository.put_field(token, FIELD_LIMIT, limit).await?;
            self.repository.put_field(token, FIELD_FIRST_USED, now).await?;
            self.repository.expire(token).await?;
            log::debug!("첫 번째 토큰 사용 - token: {}, limit: {}", token_fingerprint(token), limit);
        }

        self.repository.put_field(token, FIELD_LAST_USED, now).await?;

        log::debug!(
            "토큰 사용 허용 - token: {}, count: {}/{}",
            token_fingerprint(token),
            new_count,
            limit
        );
        Ok(true)
    }

    pub async fn current_usage(&self, token: &str) -> AppResult<i64> {
        self.repository.count(token).await
    }

    /// 저장된 한도. 기록이 없으면 분류별 기본값.
    pub async fn limit_of(&self, token: &str) -> AppResult<i64> {
        let stored = self.repository.numeric_field(token, FIELD_LIMIT).await?;
        Ok(stored.unwrap_or_else(|| TokenClass::of(token).limit()))
    }

    pub async fn ttl(&self, token: &str) -> AppResult<i64> {
        self.repository.ttl(token).await
    }

    pub async fn first_used(&self, token: &str) -> AppResult<i64> {
        Ok(self
            .repository
            .numeric_field(token, FIELD_FIRST_USED)
            .await?
            .unwrap_or(0))
    }

    pub async fn last_used(&self, token: &str) -> AppResult<i64> {
        Ok(self
            .repository
            .numeric_field(token, FIELD_LAST_USED)
            .await?
            .unwrap_or(0))
    }

    pub async fn usage_info(&self, token: &str) -> AppResult<TokenUsageRecord> {
        let fields = self.repository.fields(token).await?;
        let ttl = self.repository.ttl(token).await?;
        Ok(TokenUsageRecord::from_fields(token, &fields, ttl))
    }

    /// 현재 시각을 사용 이력에 추가합니다. 최근 10개만 유지됩니다.
    pub async fn add_usage_history(&self, token: &str) -> AppResult<()> {
        self.repository
            .push_history(token, Utc::now().timestamp())
            .await
    }

    pub async fn usage_history(&self, token: &str) -> AppResult<Vec<i64>> {
        self.repository.history(token).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::caching::{MemoryStore, TTL_NO_KEY};

    fn service() -> TokenUsageService {
        TokenUsageService::new(Arc::new(MemoryStore::new()))
    }

    #[actix_web::test]
    async fn test_temp_token_allowed_once() {
        let service = service();

        assert!(service.is_allowed("temp_once").await.unwrap());
        assert!(!service.is_allowed("temp_once").await.unwrap());
        assert_eq!(service.current_usage("temp_once").await.unwrap(), 1);
    }

    #[actix_web::test]
    async fn test_payment_token_limit() {
        let service = service();

        for _ in 0..10 {
            assert!(service.is_allowed("pay_card").await.unwrap());
        }
        assert!(!service.is_allowed("pay_card").await.unwrap());
        assert_eq!(service.current_usage("pay_card").await.unwrap(), 10);
    }

    #[actix_web::test]
    async fn test_first_use_records_metadata() {
        let service = service();
        let before = Utc::now().timestamp();

        service.is_allowed("api_key").await.unwrap();

        let info = service.usage_info("api_key").await.unwrap();
        assert_eq!(info.count, 1);
        assert_eq!(info.limit, 1000);
        assert!(info.first_used >= before);
        assert!(info.last_used >= info.first_used);
        assert!(info.ttl > 3590 && info.ttl <= 3600);
    }

    #[actix_web::test]
    async fn test_absent_token_reads_zero_defaults() {
        let service = service();

        assert_eq!(service.current_usage("pay_new").await.unwrap(), 0);
        assert_eq!(service.limit_of("pay_new").await.unwrap(), 10);
        assert_eq!(service.first_used("pay_new").await.unwrap(), 0);
        assert_eq!(service.last_used("pay_new").await.unwrap(), 0);
        assert_eq!(service.ttl("pay_new").await.unwrap(), TTL_NO_KEY);

        let info = service.usage_info("pay_new").await.unwrap();
        assert_eq!(info.count, 0);
        assert_eq!(info.limit, 10);
        assert_eq!(info.ttl, TTL_NO_KEY);
    }

    #[actix_web::test]
    async fn test_usage_history_is_bounded() {
        let service = service();

        for _ in 0..15 {
            service.add_usage_history("api_key").await.unwrap();
        }

        assert_eq!(service.usage_history("api_key").await.unwrap().len(), 10);
        assert!(service.usage_history("api_other").await.unwrap().is_empty());
    }
}
