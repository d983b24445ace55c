use serde::Deserialize;
use validator::Validate;

/// 로그인 요청 DTO
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    #[validate(length(min = 1, max = 128, message = "사용자 ID는 1~128자여야 합니다"))]
    pub user_id: String,
}

/// 다중 기기 로그인 요청 DTO
///
/// `devices`를 생략하면 `device1`, `device2` 두 세션을 발급합니다.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct MultiLoginRequest {
    #[validate(length(min = 1, max = 128, message = "사용자 ID는 1~128자여야 합니다"))]
    pub user_id: String,

    #[validate(length(min = 1, max = 10, message = "기기는 1~10개까지 지정할 수 있습니다"))]
    pub devices: Option<Vec<String>>,
}

impl MultiLoginRequest {
    pub fn device_ids(&self) -> Vec<String> {
        self.devices
            .clone()
            .unwrap_or_else(|| vec!["device1".to_string(), "device2".to_string()])
    }
}
