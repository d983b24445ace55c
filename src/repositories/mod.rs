//! 데이터 액세스 계층을 담당하는 리포지토리 모듈
//!
//! 모든 리포지토리는 주입된 [`CounterStore`](crate::caching::CounterStore)를 공유하며,
//! 키 형식과 저장된 문자열의 타입 변환을 담당합니다.
//! 한도 판정 같은 비즈니스 규칙은 서비스 계층에 있습니다.
//!
//! # Examples
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use crate::caching::MemoryStore;
//! use crate::repositories::RateLimitRepository;
//!
//! let repo = RateLimitRepository::new(Arc::new(MemoryStore::new()));
//! let count = repo.window_count("10.0.0.1", RateWindow::Minute).await?;
//! ```

pub mod access;
pub mod rate_limits;
pub mod tokens;
pub mod usage;

pub use access::*;
pub use rate_limits::*;
pub use tokens::*;
pub use usage::*;

use crate::errors::{AppResult, ErrorContext};

/// 저장된 카운터 문자열을 정수로 변환합니다. 값이 없으면 0.
pub(crate) fn parse_counter(key: &str, raw: Option<String>) -> AppResult<i64> {
    match raw {
        None => Ok(0),
        Some(value) => value
            .parse::<i64>()
            .with_context(|| format!("저장된 카운터 값이 정수가 아닙니다 ({})", key)),
    }
}
