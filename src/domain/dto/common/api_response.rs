use serde::Serialize;

/// API 응답 래퍼
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub message: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: None,
        }
    }

    /// 데이터와 함께 사람이 읽을 메시지를 담습니다.
    pub fn with_message(data: T, message: impl Into<String>) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: Some(message.into()),
        }
    }

    /// 판정 결과 거부된 요청 (`success: false`, 데이터 포함)
    pub fn denied(data: T, message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: Some(data),
            message: Some(message.into()),
        }
    }

    pub fn error(message: impl Into<String>) -> ApiResponse<()> {
        ApiResponse {
            success: false,
            data: None,
            message: Some(message.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_response_shape() {
        let json = serde_json::to_value(ApiResponse::<()>::error("한도 초과")).unwrap();

        assert_eq!(json["success"], false);
        assert!(json["data"].is_null());
        assert_eq!(json["message"], "한도 초과");
    }

    #[test]
    fn test_denied_keeps_data() {
        let json = serde_json::to_value(ApiResponse::denied(5, "거부")).unwrap();

        assert_eq!(json["success"], false);
        assert_eq!(json["data"], 5);
    }
}
