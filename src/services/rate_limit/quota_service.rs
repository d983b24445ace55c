//! 사용자 한도와 토큰 한도를 묶은 API 호출 판정

use std::sync::Arc;

use crate::domain::models::rate::{BulkOutcome, CombinedDecision};
use crate::errors::AppResult;
use crate::services::rate_limit::UserRateLimitService;
use crate::services::usage::TokenUsageService;
use crate::utils::string_utils::token_fingerprint;

/// 반복 시뮬레이션의 최대 요청 수
pub const MAX_SIMULATED_REQUESTS: u32 = 10_000;

/// 한 번의 API 호출에 사용자 시간당/일일 한도와 토큰 한도를 함께 적용합니다.
///
/// 세 검사는 단락 평가 없이 모두 수행되므로, 하나가 거부되어도
/// 나머지 허용된 카운터는 소비됩니다.
pub struct QuotaService {
    user_limits: Arc<UserRateLimitService>,
    token_usage: Arc<TokenUsageService>,
}

impl QuotaService {
    pub fn new(user_limits: Arc<UserRateLimitService>, token_usage: Arc<TokenUsageService>) -> Self {
        Self {
            user_limits,
            token_usage,
        }
    }

    pub async fn check(&self, user_id: &str, token: &str) -> AppResult<CombinedDecision> {
        let user_hourly_allowed = self.user_limits.is_allowed_per_hour(user_id).await?;
        let user_daily_allowed = self.user_limits.is_allowed_per_day(user_id).await?;
        let token_allowed = self.token_usage.is_allowed(token).await?;

        Ok(CombinedDecision {
            user_hourly_allowed,
            user_daily_allowed,
            token_allowed,
        })
    }

    /// `count`번 연속 호출하고 성공/실패 횟수를 집계합니다.
    pub async fn simulate_bulk(&self, user_id: &str, token: &str, count: u32) -> AppResult<BulkOutcome> {
        let mut outcome = BulkOutcome::default();
        for _ in 0..count {
            let decision = self.check(user_id, token).await?;
            outcome.record(&decision);
        }

        log::info!(
            "대량 요청 시뮬레이션 - user: {}, token: {}, 성공: {}, 실패: {}",
            user_id,
            token_fingerprint(token),
            outcome.success_count,
            outcome.failure_count
        );
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::caching::{CounterStore, MemoryStore};

    fn service() -> QuotaService {
        let store: Arc<dyn CounterStore> = Arc::new(MemoryStore::new());
        QuotaService::new(
            Arc::new(UserRateLimitService::new(store.clone())),
            Arc::new(TokenUsageService::new(store)),
        )
    }

    #[actix_web::test]
    async fn test_token_limit_denies_combined_check() {
        let service = service();

        let first = service.check("user1", "temp_t").await.unwrap();
        assert!(first.is_allowed());

        let second = service.check("user1", "temp_t").await.unwrap();
        assert!(!second.is_allowed());
        assert!(second.user_hourly_allowed);
        assert_eq!(second.denial_reasons(), vec!["토큰 사용 제한"]);
    }

    #[actix_web::test]
    async fn test_bulk_simulation_counts() {
        let service = service();

        let outcome = service.simulate_bulk("user1", "pay_t", 12).await.unwrap();

        assert_eq!(outcome.request_count, 12);
        assert_eq!(outcome.success_count, 10);
        assert_eq!(outcome.failure_count, 2);
        assert_eq!(outcome.success_rate(), "83.33%");
    }
}
