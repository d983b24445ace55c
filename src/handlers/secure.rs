//! 인증이 필요한 엔드포인트
//!
//! `AuthMiddleware`가 블랙리스트, 세션 일치, 만료 검사를 모두 통과시킨 요청만 도달합니다.

use actix_web::{get, HttpResponse};

use crate::domain::dto::{ApiResponse, MeResponse};
use crate::domain::models::AuthenticatedUser;
use crate::errors::AppResult;

#[get("/me")]
pub async fn me(user: AuthenticatedUser) -> AppResult<HttpResponse> {
    log::debug!("인증 사용자 조회 - user: {}, token: {}", user.user_id, user.token_fingerprint);

    Ok(HttpResponse::Ok().json(ApiResponse::success(MeResponse {
        user_id: user.user_id,
        role: user.role,
        expires_at: user.expires_at,
    })))
}
