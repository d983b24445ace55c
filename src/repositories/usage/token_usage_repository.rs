use std::collections::HashMap;
use std::sync::Arc;

use crate::caching::CounterStore;
use crate::domain::models::token::{
    FIELD_COUNT, USAGE_HISTORY_SIZE, USAGE_TTL_SECONDS, history_key, usage_key,
};
use crate::errors::{AppResult, ErrorContext};
use crate::repositories::parse_counter;

/// 토큰 사용량 해시와 사용 이력 리스트를 관리하는 Repository
///
/// - 사용량: `token:usage:{token}` 해시, 첫 사용 후 1시간 뒤 만료
/// - 이력: `token:usage:{token}:history` 리스트, 최근 10개만 유지
pub struct TokenUsageRepository {
    store: Arc<dyn CounterStore>,
}

impl TokenUsageRepository {
    pub fn new(store: Arc<dyn CounterStore>) -> Self {
        Self { store }
    }

    /// 숫자 필드 값. 필드가 없으면 `None`.
    pub async fn numeric_field(&self, token: &str, field: &str) -> AppResult<Option<i64>> {
        let key = usage_key(token);
        match self.store.hget(&key, field).await? {
            None => Ok(None),
            Some(raw) => parse_counter(&key, Some(raw)).map(Some),
        }
    }

    /// 사용 횟수. 기록이 없으면 0.
    pub async fn count(&self, token: &str) -> AppResult<i64> {
        Ok(self.numeric_field(token, FIELD_COUNT).await?.unwrap_or(0))
    }

    pub async fn increment_count(&self, token: &str) -> AppResult<i64> {
        self.store.hincr_by(&usage_key(token), FIELD_COUNT, 1).await
    }

    pub async fn put_field(&self, token: &str, field: &str, value: i64) -> AppResult<()> {
        self.store
            .hset(&usage_key(token), field, &value.to_string())
            .await
    }

    /// 사용량 해시에 1시간 만료를 설정합니다.
    pub async fn expire(&self, token: &str) -> AppResult<bool> {
        self.store.expire(&usage_key(token), USAGE_TTL_SECONDS).await
    }

    pub async fn ttl(&self, token: &str) -> AppResult<i64> {
        self.store.ttl(&usage_key(token)).await
    }

    pub async fn fields(&self, token: &str) -> AppResult<HashMap<String, String>> {
        self.store.hgetall(&usage_key(token)).await
    }

    /// 이력 끝에 시각을 추가하고 최근 10개만 남깁니다.
    pub async fn push_history(&self, token: &str, epoch_seconds: i64) -> AppResult<()> {
        let key = history_key(token);
        self.store.rpush(&key, &epoch_seconds.to_string()).await?;
        self.store.ltrim(&key, -USAGE_HISTORY_SIZE, -1).await
    }

    /// 오래된 순서의 사용 이력
    pub async fn history(&self, token: &str) -> AppResult<Vec<i64>> {
        let key = history_key(token);
        self.store
            .lrange(&key, 0, -1)
            .await?
            .into_iter()
            .map(|raw| {
                raw.parse::<i64>()
                    .with_context(|| format!("사용 이력 값이 정수가 아닙니다 ({})", key))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::caching::MemoryStore;

    #[actix_web::test]
    async fn test_history_keeps_last_ten() {
        let repo = TokenUsageRepository::new(Arc::new(MemoryStore::new()));

        for ts in 1..=12 {
            repo.push_history("api_t", ts).await.unwrap();
        }

        let history = repo.history("api_t").await.unwrap();
        assert_eq!(history, (3..=12).collect::<Vec<i64>>());
    }

    #[actix_web::test]
    async fn test_missing_field_is_none() {
        let repo = TokenUsageRepository::new(Arc::new(MemoryStore::new()));

        assert_eq!(repo.numeric_field("api_t", "limit").await.unwrap(), None);
        assert_eq!(repo.count("api_t").await.unwrap(), 0);
    }
}
