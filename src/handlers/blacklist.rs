//! 토큰 블랙리스트 핸들러
//!
//! 두 엔드포인트 모두 `Authorization: Bearer <token>` 헤더의 토큰을 대상으로 합니다.

use actix_web::{get, post, web, HttpRequest, HttpResponse};

use crate::core::ServiceContainer;
use crate::domain::dto::{ApiResponse, BlacklistCheckResponse, BlacklistLogoutResponse};
use crate::errors::AppResult;
use crate::handlers::bearer_token;

/// 토큰을 남은 수명 동안 블랙리스트에 올리고 해당 세션을 삭제합니다.
///
/// 이미 만료되었거나 검증할 수 없는 토큰은 블랙리스트에 올리지 않지만,
/// 일치하는 세션이 있으면 삭제합니다.
#[post("/logout")]
pub async fn logout(
    req: HttpRequest,
    container: web::Data<ServiceContainer>,
) -> AppResult<HttpResponse> {
    let token = bearer_token(&req)?;
    let (blacklisted, session_removed) = container.sessions.logout(token).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::with_message(
        BlacklistLogoutResponse {
            blacklisted,
            session_removed,
        },
        "블랙리스트 등록 및 로그아웃 완료",
    )))
}

#[get("/check")]
pub async fn check(
    req: HttpRequest,
    container: web::Data<ServiceContainer>,
) -> AppResult<HttpResponse> {
    let token = bearer_token(&req)?;
    let is_blacklisted = container.blacklist.is_blacklisted(token).await?;

    let message = if is_blacklisted { "블랙리스트 토큰" } else { "정상 토큰" };
    Ok(HttpResponse::Ok().json(ApiResponse::with_message(
        BlacklistCheckResponse { is_blacklisted },
        message,
    )))
}
