//! # JWT 세션 핸들러
//!
//! 로그인 시 발급된 토큰은 `jwt:{userId}` 키에 세션 TTL과 함께 저장됩니다.
//! 검증, 만료 확인, 갱신은 `Authorization: Bearer <token>` 헤더의 토큰을
//! 저장된 세션과 비교합니다.
//!
//! ## 엔드포인트
//!
//! | 메서드 | 경로 | 설명 | 실패 시 |
//! |--------|------|------|---------|
//! | `POST` | `/login` | 토큰 발급 및 세션 저장 | 400 |
//! | `POST` | `/login-short-ttl` | 짧은 세션 TTL로 발급 | 400 |
//! | `POST` | `/login-multiple` | 기기별 세션 발급 | 400 |
//! | `GET` | `/validate/{userId}` | 저장 일치 + 서명 검증 | 401 |
//! | `GET` | `/info/{userId}` | 세션 존재 여부와 TTL | - |
//! | `GET` | `/expired/{userId}` | 세션/토큰 만료 여부 | - |
//! | `GET` | `/stats/{userId}` | 세션 통계 | - |
//! | `POST` | `/refresh/{userId}` | 기존 토큰 검증 후 재발급 | 401 |
//! | `DELETE` | `/logout/{userId}` | 세션 삭제 | - |
//! | `DELETE` | `/logout-device/{userId}/{deviceId}` | 기기 세션 삭제 | - |

use actix_web::{delete, get, post, web, HttpRequest, HttpResponse};
use validator::Validate;

use crate::core::ServiceContainer;
use crate::domain::dto::{
    ApiResponse, DeviceToken, LoginRequest, LoginResponse, LogoutResponse, MultiLoginRequest,
    MultiLoginResponse, RefreshResponse, SessionInfoResponse, SessionStatsResponse,
    TokenExpiryResponse, TokenValidationResponse,
};
use crate::errors::AppResult;
use crate::handlers::bearer_token;
use crate::services::auth::IssuedSession;
use crate::utils::string_utils::{token_fingerprint, token_preview};

/// 세션 정보 응답의 토큰 미리보기 길이
const INFO_PREVIEW_CHARS: usize = 50;

/// 세션 통계 응답의 토큰 미리보기 길이
const STATS_PREVIEW_CHARS: usize = 20;

fn login_response(container: &ServiceContainer, session: IssuedSession) -> LoginResponse {
    LoginResponse {
        user_id: session.subject,
        token: session.token,
        token_type: "Bearer".to_string(),
        expires_in: container.jwt.default_lifetime(),
        session_ttl: session.session_ttl,
    }
}

#[post("/login")]
pub async fn login(
    container: web::Data<ServiceContainer>,
    payload: web::Json<LoginRequest>,
) -> AppResult<HttpResponse> {
    payload.validate()?;

    let session = container.sessions.login(&payload.user_id).await?;
    log::info!(
        "로그인 성공 - user: {}, token: {}",
        session.subject,
        token_fingerprint(&session.token)
    );

    Ok(HttpResponse::Ok().json(ApiResponse::with_message(
        login_response(&container, session),
        "로그인 성공",
    )))
}

#[post("/login-short-ttl")]
pub async fn login_short_ttl(
    container: web::Data<ServiceContainer>,
    payload: web::Json<LoginRequest>,
) -> AppResult<HttpResponse> {
    payload.validate()?;

    let session = container.sessions.login_short_ttl(&payload.user_id).await?;
    let message = format!("짧은 TTL로 로그인 성공 ({}초 후 만료)", session.session_ttl);

    Ok(HttpResponse::Ok().json(ApiResponse::with_message(
        login_response(&container, session),
        message,
    )))
}

#[post("/login-multiple")]
pub async fn login_multiple(
    container: web::Data<ServiceContainer>,
    payload: web::Json<MultiLoginRequest>,
) -> AppResult<HttpResponse> {
    payload.validate()?;

    let devices = payload.device_ids();
    let issued = container
        .sessions
        .login_devices(&payload.user_id, &devices)
        .await?;

    let session_ttl = issued
        .first()
        .map(|(_, session)| session.session_ttl)
        .unwrap_or_default();
    let sessions = issued
        .into_iter()
        .map(|(device_id, session)| DeviceToken {
            device_id,
            token: session.token,
        })
        .collect();

    Ok(HttpResponse::Ok().json(ApiResponse::with_message(
        MultiLoginResponse {
            user_id: payload.user_id.clone(),
            sessions,
            session_ttl,
        },
        "다중 세션 로그인 성공",
    )))
}

#[get("/validate/{user_id}")]
pub async fn validate(
    req: HttpRequest,
    container: web::Data<ServiceContainer>,
    user_id: web::Path<String>,
) -> AppResult<HttpResponse> {
    let token = bearer_token(&req)?;
    let user_id = user_id.into_inner();
    let is_valid = container.sessions.validate_token(&user_id, token).await?;

    let body = TokenValidationResponse { user_id, is_valid };
    if is_valid {
        Ok(HttpResponse::Ok().json(ApiResponse::with_message(body, "토큰이 유효합니다")))
    } else {
        Ok(HttpResponse::Unauthorized().json(ApiResponse::denied(body, "토큰이 유효하지 않습니다")))
    }
}

#[get("/info/{user_id}")]
pub async fn session_info(
    container: web::Data<ServiceContainer>,
    user_id: web::Path<String>,
) -> AppResult<HttpResponse> {
    let user_id = user_id.into_inner();
    let token = container.sessions.get_token(&user_id).await?;
    let ttl = container.sessions.token_ttl(&user_id).await?;

    let body = SessionInfoResponse {
        has_token: token.is_some(),
        token_preview: token.as_deref().map(|t| token_preview(t, INFO_PREVIEW_CHARS)),
        user_id,
        ttl,
    };
    let response = if body.has_token {
        ApiResponse::success(body)
    } else {
        ApiResponse::with_message(body, "토큰이 존재하지 않습니다")
    };
    Ok(HttpResponse::Ok().json(response))
}

#[get("/expired/{user_id}")]
pub async fn check_expired(
    req: HttpRequest,
    container: web::Data<ServiceContainer>,
    user_id: web::Path<String>,
) -> AppResult<HttpResponse> {
    let token = bearer_token(&req)?;
    let user_id = user_id.into_inner();
    let is_expired = container.sessions.is_token_expired(&user_id, token).await?;

    let message = if is_expired {
        "토큰이 만료되었습니다"
    } else {
        "토큰이 유효합니다"
    };
    Ok(HttpResponse::Ok().json(ApiResponse::with_message(
        TokenExpiryResponse { user_id, is_expired },
        message,
    )))
}

#[get("/stats/{user_id}")]
pub async fn session_stats(
    container: web::Data<ServiceContainer>,
    user_id: web::Path<String>,
) -> AppResult<HttpResponse> {
    let user_id = user_id.into_inner();
    let token = container.sessions.get_token(&user_id).await?;
    let ttl_seconds = container.sessions.token_ttl(&user_id).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(SessionStatsResponse {
        has_active_token: token.is_some(),
        is_expired: ttl_seconds <= 0,
        token_preview: token
            .as_deref()
            .map(|t| token_preview(t, STATS_PREVIEW_CHARS))
            .unwrap_or_else(|| "N/A".to_string()),
        user_id,
        ttl_seconds,
    })))
}

#[post("/refresh/{user_id}")]
pub async fn refresh(
    req: HttpRequest,
    container: web::Data<ServiceContainer>,
    user_id: web::Path<String>,
) -> AppResult<HttpResponse> {
    let old_token = bearer_token(&req)?;
    let user_id = user_id.into_inner();

    match container.sessions.refresh(&user_id, old_token).await? {
        Some(session) => {
            log::info!("토큰 갱신 성공 - user: {}", user_id);
            Ok(HttpResponse::Ok().json(ApiResponse::with_message(
                RefreshResponse {
                    user_id,
                    new_token: session.token,
                    session_ttl: session.session_ttl,
                },
                "토큰 갱신 성공",
            )))
        }
        None => {
            log::warn!("토큰 갱신 거부 - user: {}", user_id);
            Ok(HttpResponse::Unauthorized().json(ApiResponse::<()>::error(
                "기존 토큰이 유효하지 않습니다",
            )))
        }
    }
}

#[delete("/logout/{user_id}")]
pub async fn logout(
    container: web::Data<ServiceContainer>,
    user_id: web::Path<String>,
) -> AppResult<HttpResponse> {
    let user_id = user_id.into_inner();
    let removed = container.sessions.remove_token(&user_id).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::with_message(
        LogoutResponse {
            user_id,
            device_id: None,
            removed,
        },
        "로그아웃 완료",
    )))
}

#[delete("/logout-device/{user_id}/{device_id}")]
pub async fn logout_device(
    container: web::Data<ServiceContainer>,
    path: web::Path<(String, String)>,
) -> AppResult<HttpResponse> {
    let (user_id, device_id) = path.into_inner();
    let removed = container.sessions.logout_device(&user_id, &device_id).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::with_message(
        LogoutResponse {
            user_id,
            device_id: Some(device_id),
            removed,
        },
        "특정 기기 로그아웃 완료",
    )))
}
