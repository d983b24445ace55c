//! 사용자 등급과 등급별 요청 한도

use serde::Serialize;

/// 사용자 ID 접두사로 결정되는 요금 등급
///
/// | 접두사 | 등급 | 시간당 | 일일 |
/// |--------|------|--------|------|
/// | `premium_` | Premium | 1,000 | 10,000 |
/// | `enterprise_` | Enterprise | 10,000 | 100,000 |
/// | 그 외 | Standard | 100 | 1,000 |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum UserTier {
    Standard,
    Premium,
    Enterprise,
}

impl UserTier {
    pub fn of(user_id: &str) -> Self {
        if user_id.starts_with("premium_") {
            UserTier::Premium
        } else if user_id.starts_with("enterprise_") {
            UserTier::Enterprise
        } else {
            UserTier::Standard
        }
    }

    pub fn hourly_limit(&self) -> i64 {
        match self {
            UserTier::Standard => 100,
            UserTier::Premium => 1_000,
            UserTier::Enterprise => 10_000,
        }
    }

    pub fn daily_limit(&self) -> i64 {
        match self {
            UserTier::Standard => 1_000,
            UserTier::Premium => 10_000,
            UserTier::Enterprise => 100_000,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_by_prefix() {
        assert_eq!(UserTier::of("premium_kim"), UserTier::Premium);
        assert_eq!(UserTier::of("enterprise_acme"), UserTier::Enterprise);
        assert_eq!(UserTier::of("user1"), UserTier::Standard);
        // 접두사는 정확히 일치해야 함
        assert_eq!(UserTier::of("Premium_kim"), UserTier::Standard);
    }

    #[test]
    fn test_tier_limits() {
        assert_eq!(UserTier::Standard.hourly_limit(), 100);
        assert_eq!(UserTier::Premium.daily_limit(), 10_000);
        assert_eq!(UserTier::Enterprise.hourly_limit(), 10_000);
        assert_eq!(UserTier::Enterprise.daily_limit(), 100_000);
    }
}
