use serde::Serialize;

/// 로그인 응답
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub user_id: String,
    pub token: String,
    pub token_type: String,
    /// 토큰 자체의 수명 (초)
    pub expires_in: i64,
    /// 세션 저장소 TTL (초)
    pub session_ttl: u64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceToken {
    pub device_id: String,
    pub token: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MultiLoginResponse {
    pub user_id: String,
    pub sessions: Vec<DeviceToken>,
    pub session_ttl: u64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenValidationResponse {
    pub user_id: String,
    pub is_valid: bool,
}

/// 저장된 세션 정보
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionInfoResponse {
    pub user_id: String,
    pub has_token: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token_preview: Option<String>,
    pub ttl: i64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenExpiryResponse {
    pub user_id: String,
    pub is_expired: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionStatsResponse {
    pub user_id: String,
    pub has_active_token: bool,
    pub ttl_seconds: i64,
    pub is_expired: bool,
    pub token_preview: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshResponse {
    pub user_id: String,
    pub new_token: String,
    pub session_ttl: u64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LogoutResponse {
    pub user_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub device_id: Option<String>,
    /// 실제로 세션이 삭제되었는지 여부
    pub removed: bool,
}

/// Bearer 토큰 로그아웃 응답
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BlacklistLogoutResponse {
    pub blacklisted: bool,
    pub session_removed: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BlacklistCheckResponse {
    pub is_blacklisted: bool,
}

/// 인증된 사용자 정보
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MeResponse {
    pub user_id: String,
    pub role: String,
    pub expires_at: i64,
}
