//! # HTTP Request Handlers Module
//!
//! HTTP 요청을 처리하는 핸들러 함수들을 정의하는 모듈입니다.
//! 각 핸들러는 `web::Data<ServiceContainer>`에서 서비스를 꺼내 사용하고,
//! 결과를 [`ApiResponse`](crate::domain::dto::ApiResponse)로 감싸 반환합니다.
//!
//! ## 아키텍처 위치
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//!   Middlewares - IP 가드, 세션 인증
//! ├─────────────────────────────────────────────┤
//!   Handlers (이 모듈) - HTTP 엔드포인트 처리        ← Web Layer
//! ├─────────────────────────────────────────────┤
//!   Services - 한도 판정, 세션 관리                 ← Service Layer
//! ├─────────────────────────────────────────────┤
//!   Repositories - 저장소 키와 값 변환              ← Repository Layer
//! ├─────────────────────────────────────────────┤
//!   CounterStore - Redis / Memory
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## 에러 처리
//!
//! 핸들러는 `AppResult<HttpResponse>`를 반환하며, `?`로 전파된
//! [`AppError`]는 `ResponseError` 구현을 통해 상태 코드로 변환됩니다.
//!
//! | AppError | 상태 코드 |
//! |----------|-----------|
//! | `ValidationError` | 400 |
//! | `AuthenticationError` | 401 |
//! | `AuthorizationError` | 403 |
//! | `TooManyRequests` | 429 |
//! | `RedisError` 등 | 500 |
//!
//! 한도 판정 결과 거부는 에러가 아니라 `success: false`인 정상 응답입니다.

use actix_web::http::header::AUTHORIZATION;
use actix_web::HttpRequest;

use crate::errors::{AppError, AppResult};
use crate::utils::string_utils::extract_bearer_token;

pub mod blacklist;
pub mod ip_rate_limit;
pub mod ip_restriction;
pub mod jwt;
pub mod rate_limit;
pub mod secure;

/// 요청의 `Authorization` 헤더에서 Bearer 토큰을 꺼냅니다.
///
/// 헤더가 없거나 형식이 잘못되면 `AuthenticationError` (401).
pub(crate) fn bearer_token(req: &HttpRequest) -> AppResult<&str> {
    let header = req
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| AppError::AuthenticationError("Authorization 헤더가 없습니다".to_string()))?;

    extract_bearer_token(header)
}
