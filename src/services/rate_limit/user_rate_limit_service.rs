//! 사용자 등급별 시간당/일일 요청 제한
//!
//! 카운터는 한 해시 `user:rate:{user_id}`의 두 필드에 저장되며 만료는 해시 전체에 걸립니다.
//! 각 필드의 첫 증가 시점에 해당 윈도우 길이로 만료를 다시 설정하므로,
//! 마지막으로 처음 증가된 필드의 윈도우가 해시 전체의 수명을 결정합니다.

use std::sync::Arc;

use crate::caching::CounterStore;
use crate::domain::models::rate::{RateWindow, UserTier};
use crate::errors::AppResult;
use crate::repositories::{RateLimitRepository, USER_FIELD_DAILY, USER_FIELD_HOURLY};

pub struct UserRateLimitService {
    repository: RateLimitRepository,
}

impl UserRateLimitService {
    pub fn new(store: Arc<dyn CounterStore>) -> Self {
        Self {
            repository: RateLimitRepository::new(store),
        }
    }

    async fn consume(&self, user_id: &str, field: &str, limit: i64, window: RateWindow) -> AppResult<bool> {
        let count = self.repository.user_count(user_id, field).await?;
        if count >= limit {
            log::warn!(
                "사용자 요청 한도 초과 - user: {}, field: {}, count: {}/{}",
                user_id,
                field,
                count,
                limit
            );
            return Ok(false);
        }

        let new_count = self.repository.increment_user(user_id, field).await?;
        if new_count == 1 {
            self.repository.expire_user(user_id, window.seconds()).await?;
        }

        log::debug!("사용자 요청 허용 - user: {}, {}: {}/{}", user_id, field, new_count, limit);
        Ok(true)
    }

    pub async fn is_allowed_per_hour(&self, user_id: &str) -> AppResult<bool> {
        let limit = self.hourly_limit(user_id);
        self.consume(user_id, USER_FIELD_HOURLY, limit, RateWindow::Hour).await
    }

    pub async fn is_allowed_per_day(&self, user_id: &str) -> AppResult<bool> {
        let limit = self.daily_limit(user_id);
        self.consume(user_id, USER_FIELD_DAILY, limit, RateWindow::Day).await
    }

    pub async fn current_hourly_count(&self, user_id: &str) -> AppResult<i64> {
        self.repository.user_count(user_id, USER_FIELD_HOURLY).await
    }

    pub async fn current_daily_count(&self, user_id: &str) -> AppResult<i64> {
        self.repository.user_count(user_id, USER_FIELD_DAILY).await
    }

    pub fn hourly_limit(&self, user_id: &str) -> i64 {
        UserTier::of(user_id).hourly_limit()
    }

    pub fn daily_limit(&self, user_id: &str) -> i64 {
        UserTier::of(user_id).daily_limit()
    }

    pub async fn ttl(&self, user_id: &str) -> AppResult<i64> {
        self.repository.user_ttl(user_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::caching::MemoryStore;

    fn service() -> UserRateLimitService {
        UserRateLimitService::new(Arc::new(MemoryStore::new()))
    }

    #[actix_web::test]
    async fn test_standard_user_hourly_limit() {
        let service = service();

        for _ in 0..100 {
            assert!(service.is_allowed_per_hour("user1").await.unwrap());
        }
        assert!(!service.is_allowed_per_hour("user1").await.unwrap());
        assert_eq!(service.current_hourly_count("user1").await.unwrap(), 100);
        assert_eq!(service.current_daily_count("user1").await.unwrap(), 0);
    }

    #[actix_web::test]
    async fn test_first_increment_sets_ttl() {
        let service = service();

        service.is_allowed_per_hour("premium_kim").await.unwrap();
        let ttl = service.ttl("premium_kim").await.unwrap();
        assert!(ttl > 3590 && ttl <= 3600);

        service.is_allowed_per_day("premium_kim").await.unwrap();
        let ttl = service.ttl("premium_kim").await.unwrap();
        assert!(ttl > 86_390 && ttl <= 86_400);
    }

    #[test]
    fn test_limits_by_tier() {
        let service = service();

        assert_eq!(service.hourly_limit("user1"), 100);
        assert_eq!(service.daily_limit("premium_a"), 10_000);
        assert_eq!(service.hourly_limit("enterprise_a"), 10_000);
    }
}
