use serde::Serialize;

use crate::domain::models::rate::{CombinedDecision, RateWindow};
use crate::domain::models::token::TokenUsageRecord;

/// IP 윈도우 판정 응답
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IpLimitResponse {
    pub ip: String,
    pub window: RateWindow,
    pub is_allowed: bool,
    pub current_count: i64,
    pub limit: i64,
}

/// IP 윈도우 카운터 조회 응답
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IpCountResponse {
    pub ip: String,
    pub window: RateWindow,
    pub count: i64,
    pub ttl: i64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IpResetResponse {
    pub ip: String,
    pub reset_windows: Vec<RateWindow>,
}

/// 사용자 시간당/일일 판정 응답
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserLimitResponse {
    pub user_id: String,
    pub is_allowed: bool,
    pub current_count: i64,
    pub limit: i64,
}

/// 사용자 카운터 조회 응답
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserCountResponse {
    pub user_id: String,
    pub count: i64,
    pub limit: i64,
    pub remaining: i64,
}

/// 토큰 사용 판정 응답
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenUsageResponse {
    pub token: String,
    pub is_allowed: bool,
    pub current_count: i64,
    pub limit: i64,
    pub ttl: i64,
    pub remaining: i64,
}

impl TokenUsageResponse {
    pub fn new(is_allowed: bool, record: TokenUsageRecord) -> Self {
        Self {
            is_allowed,
            current_count: record.count,
            limit: record.limit,
            ttl: record.ttl,
            remaining: record.remaining(),
            token: record.token,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenHistoryResponse {
    pub token: String,
    pub usage_history: Vec<i64>,
    pub history_count: usize,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CombinedDetails {
    pub user_hourly_count: i64,
    pub user_daily_count: i64,
    pub token_count: i64,
}

/// 사용자 + 토큰 통합 판정 응답
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CombinedLimitResponse {
    pub user_id: String,
    pub token: String,
    #[serde(flatten)]
    pub decision: CombinedDecision,
    pub overall_allowed: bool,
    pub details: CombinedDetails,
}

/// 단일 API 호출 시뮬레이션 응답
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiCallSimulationResponse {
    pub user_id: String,
    pub token: String,
    pub success: bool,
    pub reasons: Vec<&'static str>,
}

/// 반복 호출 시뮬레이션 응답
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkSimulationResponse {
    pub user_id: String,
    pub token: String,
    pub request_count: u32,
    pub success_count: u32,
    pub failure_count: u32,
    pub success_rate: String,
}
