//! 레이트 리밋 서비스
//!
//! - [`IpRateLimitService`] - IP 단위 분/시/일 고정 윈도우
//! - [`UserRateLimitService`] - 사용자 등급별 시간당/일일 한도
//! - [`QuotaService`] - 사용자 한도와 토큰 한도 통합 판정

pub mod ip_rate_limit_service;
pub mod quota_service;
pub mod user_rate_limit_service;

pub use ip_rate_limit_service::*;
pub use quota_service::*;
pub use user_rate_limit_service::*;
