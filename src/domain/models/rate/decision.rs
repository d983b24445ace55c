//! 사용자 한도와 토큰 한도를 함께 적용한 판정 결과

use serde::Serialize;

/// 한 번의 API 호출에 대한 통합 판정
///
/// 세 검사는 모두 실행되며, 허용된 검사는 각자의 카운터를 소비합니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CombinedDecision {
    pub user_hourly_allowed: bool,
    pub user_daily_allowed: bool,
    pub token_allowed: bool,
}

impl CombinedDecision {
    pub fn is_allowed(&self) -> bool {
        self.user_hourly_allowed && self.user_daily_allowed && self.token_allowed
    }

    /// 거부 사유 목록. 허용된 경우 비어 있습니다.
    pub fn denial_reasons(&self) -> Vec<&'static str> {
        let mut reasons = Vec::new();
        if !self.user_hourly_allowed {
            reasons.push("시간당 사용자 제한");
        }
        if !self.user_daily_allowed {
            reasons.push("일일 사용자 제한");
        }
        if !self.token_allowed {
            reasons.push("토큰 사용 제한");
        }
        reasons
    }
}

/// 반복 호출 시뮬레이션 집계
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkOutcome {
    pub request_count: u32,
    pub success_count: u32,
    pub failure_count: u32,
}

impl BulkOutcome {
    pub fn record(&mut self, decision: &CombinedDecision) {
        self.request_count += 1;
        if decision.is_allowed() {
            self.success_count += 1;
        } else {
            self.failure_count += 1;
        }
    }

    /// 성공률 (백분율, 소수점 둘째 자리 문자열)
    pub fn success_rate(&self) -> String {
        if self.request_count == 0 {
            return "0.00%".to_string();
        }
        let rate = self.success_count as f64 / self.request_count as f64 * 100.0;
        format!("{:.2}%", rate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_denial_reasons() {
        let decision = CombinedDecision {
            user_hourly_allowed: true,
            user_daily_allowed: false,
            token_allowed: false,
        };

        assert!(!decision.is_allowed());
        assert_eq!(decision.denial_reasons(), vec!["일일 사용자 제한", "토큰 사용 제한"]);
    }

    #[test]
    fn test_bulk_outcome_rate() {
        let allowed = CombinedDecision {
            user_hourly_allowed: true,
            user_daily_allowed: true,
            token_allowed: true,
        };
        let denied = CombinedDecision { token_allowed: false, ..allowed };

        let mut outcome = BulkOutcome::default();
        outcome.record(&allowed);
        outcome.record(&denied);
        outcome.record(&denied);

        assert_eq!(outcome.success_count, 1);
        assert_eq!(outcome.failure_count, 2);
        assert_eq!(outcome.success_rate(), "33.33%");
        assert_eq!(BulkOutcome::default().success_rate(), "0.00%");
    }
}
