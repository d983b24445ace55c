use std::sync::Arc;

use crate::caching::CounterStore;
use crate::domain::models::rate::RateWindow;
use crate::errors::AppResult;
use crate::repositories::parse_counter;

pub const USER_FIELD_HOURLY: &str = "hourly";
pub const USER_FIELD_DAILY: &str = "daily";

/// 고정 윈도우 카운터 저장을 담당하는 Repository
///
/// 두 종류의 카운터를 다룹니다.
///
/// - IP 카운터: 윈도우마다 독립된 정수 키 `ip:rate:{window}:{ip}`
/// - 사용자 카운터: 한 해시 `user:rate:{user_id}`의 `hourly`, `daily` 필드
pub struct RateLimitRepository {
    store: Arc<dyn CounterStore>,
}

fn user_key(user_id: &str) -> String {
    format!("user:rate:{}", user_id)
}

impl RateLimitRepository {
    pub fn new(store: Arc<dyn CounterStore>) -> Self {
        Self { store }
    }

    /// 윈도우 카운터 현재 값. 키가 없으면 0.
    pub async fn window_count(&self, subject: &str, window: RateWindow) -> AppResult<i64> {
        let key = window.counter_key(subject);
        let raw = self.store.get(&key).await?;
        parse_counter(&key, raw)
    }

    /// 윈도우 카운터를 1 증가시키고 증가 후 값을 반환합니다.
    pub async fn increment_window(&self, subject: &str, window: RateWindow) -> AppResult<i64> {
        self.store.incr_by(&window.counter_key(subject), 1).await
    }

    /// 윈도우 카운터에 윈도우 길이만큼의 만료 시간을 설정합니다.
    pub async fn expire_window(&self, subject: &str, window: RateWindow) -> AppResult<bool> {
        self.store
            .expire(&window.counter_key(subject), window.seconds())
            .await
    }

    pub async fn window_ttl(&self, subject: &str, window: RateWindow) -> AppResult<i64> {
        self.store.ttl(&window.counter_key(subject)).await
    }

    pub async fn delete_window(&self, subject: &str, window: RateWindow) -> AppResult<bool> {
        self.store.del(&window.counter_key(subject)).await
    }

    /// 사용자 카운터 필드 값. 없으면 0.
    pub async fn user_count(&self, user_id: &str, field: &str) -> AppResult<i64> {
        let key = user_key(user_id);
        let raw = self.store.hget(&key, field).await?;
        parse_counter(&key, raw)
    }

    pub async fn increment_user(&self, user_id: &str, field: &str) -> AppResult<i64> {
        self.store.hincr_by(&user_key(user_id), field, 1).await
    }

    /// 사용자 카운터 해시 전체에 만료 시간을 설정합니다.
    pub async fn expire_user(&self, user_id: &str, seconds: i64) -> AppResult<bool> {
        self.store.expire(&user_key(user_id), seconds).await
    }

    pub async fn user_ttl(&self, user_id: &str) -> AppResult<i64> {
        self.store.ttl(&user_key(user_id)).await
    }
}
