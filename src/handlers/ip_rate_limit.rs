//! # IP 고정 윈도우 레이트 리밋 핸들러
//!
//! | 메서드 | 경로 | 설명 |
//! |--------|------|------|
//! | `GET` | `/api/v1/ip-rate-limit/minute/{ip}` | 분당 한도 판정 (카운트 증가) |
//! | `GET` | `/api/v1/ip-rate-limit/hour/{ip}` | 시간당 한도 판정 |
//! | `GET` | `/api/v1/ip-rate-limit/day/{ip}` | 일일 한도 판정 |
//! | `GET` | `/api/v1/ip-rate-limit/count/{ip}/{window}` | 현재 카운트와 TTL 조회 |
//! | `DELETE` | `/api/v1/ip-rate-limit/reset/{ip}` | 세 윈도우 모두 초기화 |
//!
//! 판정 엔드포인트는 허용 여부와 관계없이 `200 OK`를 반환하며,
//! 거부된 경우 `success: false`로 표시합니다.

use actix_web::{delete, get, web, HttpResponse};

use crate::core::ServiceContainer;
use crate::domain::dto::{ApiResponse, IpCountResponse, IpLimitResponse, IpResetResponse};
use crate::domain::models::RateWindow;
use crate::errors::{AppError, AppResult};

async fn check_window(
    container: &ServiceContainer,
    ip: String,
    window: RateWindow,
) -> AppResult<HttpResponse> {
    let limit = match window {
        RateWindow::Minute => container.ip_limits.per_minute,
        RateWindow::Hour => container.ip_limits.per_hour,
        RateWindow::Day => container.ip_limits.per_day,
    };

    let service = &container.ip_rate_limit;
    let is_allowed = service.is_allowed(&ip, window, limit).await?;
    let count_now = service.current_count(&ip, window).await?;

    let body = IpLimitResponse {
        ip,
        window,
        is_allowed,
        current_count: count_now,
        limit,
    };

    let response = if is_allowed {
        ApiResponse::with_message(body, format!("{} 요청 허용", window))
    } else {
        ApiResponse::denied(body, format!("{} 요청 제한 초과", window))
    };
    Ok(HttpResponse::Ok().json(response))
}

#[get("/minute/{ip}")]
pub async fn check_minute_limit(
    container: web::Data<ServiceContainer>,
    ip: web::Path<String>,
) -> AppResult<HttpResponse> {
    check_window(&container, ip.into_inner(), RateWindow::Minute).await
}

#[get("/hour/{ip}")]
pub async fn check_hour_limit(
    container: web::Data<ServiceContainer>,
    ip: web::Path<String>,
) -> AppResult<HttpResponse> {
    check_window(&container, ip.into_inner(), RateWindow::Hour).await
}

#[get("/day/{ip}")]
pub async fn check_day_limit(
    container: web::Data<ServiceContainer>,
    ip: web::Path<String>,
) -> AppResult<HttpResponse> {
    check_window(&container, ip.into_inner(), RateWindow::Day).await
}

/// 카운트를 증가시키지 않고 현재 값과 남은 TTL을 조회합니다.
///
/// 알 수 없는 윈도우 이름은 `400 Bad Request`.
#[get("/count/{ip}/{window}")]
pub async fn current_count(
    container: web::Data<ServiceContainer>,
    path: web::Path<(String, String)>,
) -> AppResult<HttpResponse> {
    let (ip, raw_window) = path.into_inner();
    let window = RateWindow::parse(&raw_window).ok_or_else(|| {
        AppError::ValidationError(format!(
            "알 수 없는 윈도우입니다: '{}' (minute, hour, day 중 하나)",
            raw_window
        ))
    })?;

    let count = container.ip_rate_limit.current_count(&ip, window).await?;
    let ttl = container.ip_rate_limit.ttl(&ip, window).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(IpCountResponse {
        ip,
        window,
        count,
        ttl,
    })))
}

#[delete("/reset/{ip}")]
pub async fn reset_limits(
    container: web::Data<ServiceContainer>,
    ip: web::Path<String>,
) -> AppResult<HttpResponse> {
    let ip = ip.into_inner();
    container.ip_rate_limit.reset_all(&ip).await?;

    log::info!("IP 레이트 리밋 초기화: {}", ip);
    Ok(HttpResponse::Ok().json(ApiResponse::with_message(
        IpResetResponse {
            ip,
            reset_windows: RateWindow::ALL.to_vec(),
        },
        "레이트 리밋 초기화 완료",
    )))
}
