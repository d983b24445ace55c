//! IP 단위 고정 윈도우 레이트 리미터
//!
//! ## 판정 절차
//!
//! 1. 윈도우 카운터를 읽습니다 (없으면 0).
//! 2. `count >= max_requests`이면 카운터를 건드리지 않고 거부합니다.
//! 3. 카운터를 1 증가시키고, 증가 후 값이 1이면 윈도우 길이만큼 만료를 설정합니다.
//!
//! 조회와 증가 사이에는 원자성이 없습니다. 동시에 들어온 요청들은 같은 값을 읽고
//! 모두 증가할 수 있으므로, 한도는 최대 (동시 요청 수 - 1)만큼 초과될 수 있습니다.
//! 만료는 증가 후 값 1을 관찰한 호출자만 설정합니다.

use std::sync::Arc;

use crate::caching::CounterStore;
use crate::domain::models::rate::RateWindow;
use crate::errors::AppResult;
use crate::repositories::RateLimitRepository;

pub struct IpRateLimitService {
    repository: RateLimitRepository,
}

impl IpRateLimitService {
    pub fn new(store: Arc<dyn CounterStore>) -> Self {
        Self {
            repository: RateLimitRepository::new(store),
        }
    }

    /// 주어진 윈도우에서 요청을 허용할지 판정하고, 허용하면 카운터를 소비합니다.
    ///
    /// 한도 초과는 에러가 아니라 `Ok(false)`입니다.
    pub async fn is_allowed(
        &self,
        subject: &str,
        window: RateWindow,
        max_requests: i64,
    ) -> AppResult<bool> {
        let count = self.repository.window_count(subject, window).await?;
        if count >= max_requests {
            log::warn!(
                "요청 한도 초과 - subject: {}, window: {}, count: {}/{}",
                subject,
                window,
                count,
                max_requests
            );
            return Ok(false);
        }

        let new_count = self.repository.increment_window(subject, window).await?;
        if new_count == 1 {
            self.repository.expire_window(subject, window).await?;
        }

        log::debug!(
            "요청 허용 - subject: {}, window: {}, count: {}/{}",
            subject,
            window,
            new_count,
            max_requests
        );
        Ok(true)
    }

    pub async fn is_allowed_per_minute(&self, subject: &str, max_requests: i64) -> AppResult<bool> {
        self.is_allowed(subject, RateWindow::Minute, max_requests).await
    }

    pub async fn is_allowed_per_hour(&self, subject: &str, max_requests: i64) -> AppResult<bool> {
        self.is_allowed(subject, RateWindow::Hour, max_requests).await
    }

    pub async fn is_allowed_per_day(&self, subject: &str, max_requests: i64) -> AppResult<bool> {
        self.is_allowed(subject, RateWindow::Day, max_requests).await
    }

    pub async fn current_count(&self, subject: &str, window: RateWindow) -> AppResult<i64> {
        self.repository.window_count(subject, window).await
    }

    /// 남은 TTL. 키가 없으면 `-2`, 만료가 없으면 `-1`.
    pub async fn ttl(&self, subject: &str, window: RateWindow) -> AppResult<i64> {
        self.repository.window_ttl(subject, window).await
    }

    pub async fn reset(&self, subject: &str, window: RateWindow) -> AppResult<()> {
        self.repository.delete_window(subject, window).await?;
        Ok(())
    }

    /// 분/시/일 윈도우 카운터를 모두 삭제합니다. 여러 번 호출해도 결과는 같습니다.
    pub async fn reset_all(&self, subject: &str) -> AppResult<()> {
        for window in RateWindow::ALL {
            self.reset(subject, window).await?;
        }
        log::info!("레이트 리밋 초기화 완료 - subject: {}", subject);
        Ok(())
    }
}
