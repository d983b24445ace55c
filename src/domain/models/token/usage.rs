//! API 토큰 사용량 모델
//!
//! 토큰 문자열의 접두사로 등급을 나누고, 저장소 해시에 기록된
//! 사용 횟수와 사용 시각을 타입이 있는 레코드로 변환합니다.

use std::collections::HashMap;

use serde::Serialize;

/// 사용량 해시의 만료 시간 (초)
pub const USAGE_TTL_SECONDS: i64 = 3_600;

/// 유지하는 사용 이력의 최대 개수
pub const USAGE_HISTORY_SIZE: isize = 10;

pub const FIELD_COUNT: &str = "count";
pub const FIELD_LIMIT: &str = "limit";
pub const FIELD_FIRST_USED: &str = "firstUsed";
pub const FIELD_LAST_USED: &str = "lastUsed";

/// 토큰 접두사별 분류
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenClass {
    /// `pay_` 결제 토큰
    Payment,
    /// `api_` API 토큰
    Api,
    /// `temp_` 일회용 토큰
    Temporary,
    /// 그 외
    Default,
}

impl TokenClass {
    pub fn of(token: &str) -> Self {
        if token.starts_with("pay_") {
            TokenClass::Payment
        } else if token.starts_with("api_") {
            TokenClass::Api
        } else if token.starts_with("temp_") {
            TokenClass::Temporary
        } else {
            TokenClass::Default
        }
    }

    /// 분류별 기본 사용 한도
    pub fn limit(&self) -> i64 {
        match self {
            TokenClass::Payment => 10,
            TokenClass::Api => 1_000,
            TokenClass::Temporary => 1,
            TokenClass::Default => 1_000,
        }
    }
}

pub fn usage_key(token: &str) -> String {
    format!("token:usage:{}", token)
}

pub fn history_key(token: &str) -> String {
    format!("token:usage:{}:history", token)
}

/// 토큰 사용량 레코드
///
/// 저장된 값이 없으면 사용 횟수와 시각은 0, 한도는 분류별 기본값입니다.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenUsageRecord {
    pub token: String,
    pub count: i64,
    pub limit: i64,
    /// 첫 사용 시각 (epoch 초)
    pub first_used: i64,
    /// 마지막 사용 시각 (epoch 초)
    pub last_used: i64,
    /// 남은 TTL (초, 저장소 센티널 값 포함)
    pub ttl: i64,
}

impl TokenUsageRecord {
    /// 해시 필드에서 레코드를 구성합니다.
    ///
    /// 숫자로 해석할 수 없는 필드는 없는 것으로 간주합니다.
    pub fn from_fields(token: &str, fields: &HashMap<String, String>, ttl: i64) -> Self {
        let field = |name: &str| fields.get(name).and_then(|v| v.parse::<i64>().ok());

        Self {
            token: token.to_string(),
            count: field(FIELD_COUNT).unwrap_or(0),
            limit: field(FIELD_LIMIT).unwrap_or_else(|| TokenClass::of(token).limit()),
            first_used: field(FIELD_FIRST_USED).unwrap_or(0),
            last_used: field(FIELD_LAST_USED).unwrap_or(0),
            ttl,
        }
    }

    pub fn remaining(&self) -> i64 {
        (self.limit - self.count).max(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_class_by_prefix() {
        assert_eq!(TokenClass::of("pay_abc").limit(), 10);
        assert_eq!(TokenClass::of("api_abc").limit(), 1000);
        assert_eq!(TokenClass::of("temp_abc").limit(), 1);
        assert_eq!(TokenClass::of("plain").limit(), 1000);
        assert_eq!(TokenClass::of("plain"), TokenClass::Default);
    }

    #[test]
    fn test_record_defaults_when_absent() {
        let record = TokenUsageRecord::from_fields("pay_x", &HashMap::new(), -2);

        assert_eq!(record.count, 0);
        assert_eq!(record.limit, 10);
        assert_eq!(record.first_used, 0);
        assert_eq!(record.last_used, 0);
        assert_eq!(record.ttl, -2);
        assert_eq!(record.remaining(), 10);
    }

    #[test]
    fn test_record_from_stored_fields() {
        let mut fields = HashMap::new();
        fields.insert("count".to_string(), "3".to_string());
        fields.insert("limit".to_string(), "10".to_string());
        fields.insert("firstUsed".to_string(), "1700000000".to_string());
        fields.insert("lastUsed".to_string(), "1700000100".to_string());

        let record = TokenUsageRecord::from_fields("pay_x", &fields, 3500);

        assert_eq!(record.count, 3);
        assert_eq!(record.first_used, 1_700_000_000);
        assert_eq!(record.last_used, 1_700_000_100);
        assert_eq!(record.remaining(), 7);
    }

    #[test]
    fn test_record_serializes_camel_case() {
        let record = TokenUsageRecord::from_fields("api_x", &HashMap::new(), -2);
        let json = serde_json::to_value(&record).unwrap();

        assert!(json.get("firstUsed").is_some());
        assert!(json.get("lastUsed").is_some());
    }

    #[test]
    fn test_keys() {
        assert_eq!(usage_key("pay_1"), "token:usage:pay_1");
        assert_eq!(history_key("pay_1"), "token:usage:pay_1:history");
    }
}
