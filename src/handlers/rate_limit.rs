//! # 사용자/토큰 사용량 한도 핸들러
//!
//! 사용자 등급별 시간당/일일 한도, 토큰 종류별 사용 한도,
//! 두 한도를 묶은 통합 판정과 시뮬레이션 엔드포인트를 제공합니다.
//!
//! 판정 엔드포인트는 카운트를 증가시킵니다. `*-count`, `info`, `history`는 조회만 합니다.

use actix_web::{get, post, web, HttpResponse};

use crate::core::ServiceContainer;
use crate::domain::dto::{
    ApiCallSimulationResponse, ApiResponse, BulkSimulationResponse, CombinedDetails,
    CombinedLimitResponse, TokenHistoryResponse, TokenUsageResponse, UserCountResponse,
    UserLimitResponse,
};
use crate::errors::{AppError, AppResult};
use crate::services::rate_limit::MAX_SIMULATED_REQUESTS;

fn limit_response(body: UserLimitResponse, label: &str) -> HttpResponse {
    let response = if body.is_allowed {
        ApiResponse::with_message(body, format!("{} 요청 허용", label))
    } else {
        ApiResponse::denied(body, format!("{} 요청 제한 초과", label))
    };
    HttpResponse::Ok().json(response)
}

#[get("/user/hour/{user_id}")]
pub async fn check_user_hourly(
    container: web::Data<ServiceContainer>,
    user_id: web::Path<String>,
) -> AppResult<HttpResponse> {
    let user_id = user_id.into_inner();
    let service = &container.user_rate_limit;

    let is_allowed = service.is_allowed_per_hour(&user_id).await?;
    let current_count = service.current_hourly_count(&user_id).await?;
    let limit = service.hourly_limit(&user_id);

    Ok(limit_response(
        UserLimitResponse {
            user_id,
            is_allowed,
            current_count,
            limit,
        },
        "시간당",
    ))
}

#[get("/user/day/{user_id}")]
pub async fn check_user_daily(
    container: web::Data<ServiceContainer>,
    user_id: web::Path<String>,
) -> AppResult<HttpResponse> {
    let user_id = user_id.into_inner();
    let service = &container.user_rate_limit;

    let is_allowed = service.is_allowed_per_day(&user_id).await?;
    let current_count = service.current_daily_count(&user_id).await?;
    let limit = service.daily_limit(&user_id);

    Ok(limit_response(
        UserLimitResponse {
            user_id,
            is_allowed,
            current_count,
            limit,
        },
        "일일",
    ))
}

#[get("/user/hourly-count/{user_id}")]
pub async fn user_hourly_count(
    container: web::Data<ServiceContainer>,
    user_id: web::Path<String>,
) -> AppResult<HttpResponse> {
    let user_id = user_id.into_inner();
    let count = container.user_rate_limit.current_hourly_count(&user_id).await?;
    let limit = container.user_rate_limit.hourly_limit(&user_id);

    Ok(HttpResponse::Ok().json(ApiResponse::success(UserCountResponse {
        user_id,
        count,
        limit,
        remaining: (limit - count).max(0),
    })))
}

#[get("/user/daily-count/{user_id}")]
pub async fn user_daily_count(
    container: web::Data<ServiceContainer>,
    user_id: web::Path<String>,
) -> AppResult<HttpResponse> {
    let user_id = user_id.into_inner();
    let count = container.user_rate_limit.current_daily_count(&user_id).await?;
    let limit = container.user_rate_limit.daily_limit(&user_id);

    Ok(HttpResponse::Ok().json(ApiResponse::success(UserCountResponse {
        user_id,
        count,
        limit,
        remaining: (limit - count).max(0),
    })))
}

/// 토큰 사용을 한 번 기록하고 판정 결과를 반환합니다.
///
/// 허용된 사용은 최근 사용 이력에도 남습니다.
#[get("/token/{token}")]
pub async fn check_token_usage(
    container: web::Data<ServiceContainer>,
    token: web::Path<String>,
) -> AppResult<HttpResponse> {
    let token = token.into_inner();
    let service = &container.token_usage;

    let is_allowed = service.is_allowed(&token).await?;
    if is_allowed {
        service.add_usage_history(&token).await?;
    }
    let record = service.usage_info(&token).await?;

    let body = TokenUsageResponse::new(is_allowed, record);
    let response = if is_allowed {
        ApiResponse::with_message(body, "토큰 사용 허용")
    } else {
        ApiResponse::denied(body, "토큰 사용 제한 초과")
    };
    Ok(HttpResponse::Ok().json(response))
}

#[get("/token/info/{token}")]
pub async fn token_info(
    container: web::Data<ServiceContainer>,
    token: web::Path<String>,
) -> AppResult<HttpResponse> {
    let record = container.token_usage.usage_info(&token).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(record)))
}

#[get("/token/history/{token}")]
pub async fn token_history(
    container: web::Data<ServiceContainer>,
    token: web::Path<String>,
) -> AppResult<HttpResponse> {
    let token = token.into_inner();
    let usage_history = container.token_usage.usage_history(&token).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(TokenHistoryResponse {
        history_count: usage_history.len(),
        token,
        usage_history,
    })))
}

#[get("/combined/{user_id}/{token}")]
pub async fn check_combined(
    container: web::Data<ServiceContainer>,
    path: web::Path<(String, String)>,
) -> AppResult<HttpResponse> {
    let (user_id, token) = path.into_inner();
    let decision = container.quota.check(&user_id, &token).await?;

    let details = CombinedDetails {
        user_hourly_count: container.user_rate_limit.current_hourly_count(&user_id).await?,
        user_daily_count: container.user_rate_limit.current_daily_count(&user_id).await?,
        token_count: container.token_usage.current_usage(&token).await?,
    };

    Ok(HttpResponse::Ok().json(ApiResponse::success(CombinedLimitResponse {
        user_id,
        token,
        overall_allowed: decision.is_allowed(),
        decision,
        details,
    })))
}

#[post("/simulate/api-call/{user_id}/{token}")]
pub async fn simulate_api_call(
    container: web::Data<ServiceContainer>,
    path: web::Path<(String, String)>,
) -> AppResult<HttpResponse> {
    let (user_id, token) = path.into_inner();
    let decision = container.quota.check(&user_id, &token).await?;
    let success = decision.is_allowed();

    let body = ApiCallSimulationResponse {
        user_id,
        token,
        success,
        reasons: decision.denial_reasons(),
    };
    let response = if success {
        ApiResponse::with_message(body, "API 호출 성공")
    } else {
        ApiResponse::denied(body, "API 호출 실패 - 제한 초과")
    };
    Ok(HttpResponse::Ok().json(response))
}

/// `count`번의 통합 판정을 연속으로 수행합니다.
///
/// `count`는 1 이상 [`MAX_SIMULATED_REQUESTS`] 이하여야 합니다.
#[post("/simulate/bulk-requests/{user_id}/{token}/{count}")]
pub async fn simulate_bulk_requests(
    container: web::Data<ServiceContainer>,
    path: web::Path<(String, String, u32)>,
) -> AppResult<HttpResponse> {
    let (user_id, token, count) = path.into_inner();
    if count == 0 || count > MAX_SIMULATED_REQUESTS {
        return Err(AppError::ValidationError(format!(
            "요청 수는 1~{} 사이여야 합니다 (입력: {})",
            MAX_SIMULATED_REQUESTS, count
        )));
    }

    let outcome = container.quota.simulate_bulk(&user_id, &token, count).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(BulkSimulationResponse {
        user_id,
        token,
        request_count: outcome.request_count,
        success_count: outcome.success_count,
        failure_count: outcome.failure_count,
        success_rate: outcome.success_rate(),
    })))
}
