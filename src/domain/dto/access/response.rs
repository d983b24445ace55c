use serde::Serialize;

use crate::domain::models::access::{AccessDecision, AccessList};

/// IP 접근 판정 응답
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessCheckResponse {
    pub ip: String,
    pub is_allowed: bool,
    pub decision: AccessDecision,
}

/// 목록 추가/제거 결과
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessListChangeResponse {
    pub ip: String,
    pub list: AccessList,
    /// 실제로 추가 또는 제거되었는지 여부
    pub changed: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessListResponse {
    pub list: AccessList,
    pub size: usize,
    pub ips: Vec<String>,
}
