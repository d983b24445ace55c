//! AuthMiddleware 인증 로직의 핵심적인 기능
use std::rc::Rc;
use actix_web::body::EitherBody;
use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse};
use actix_web::{web, Error, HttpMessage, HttpResponse};
use futures_util::future::LocalBoxFuture;

use crate::core::ServiceContainer;
use crate::domain::dto::ApiResponse;
use crate::domain::models::{AuthMode, AuthenticatedUser, RequiredRole};
use crate::errors::{AppError, AppResult};
use crate::utils::string_utils::{extract_bearer_token, token_fingerprint};

/// 실제 인증 로직을 수행하는 서비스
pub struct AuthMiddlewareService<S> {
    pub service: Rc<S>,
    pub mode: AuthMode,
    pub required_role: Option<RequiredRole>,
}

impl<S, B> Service<ServiceRequest> for AuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, actix_web::Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = self.service.clone();
        let mode = self.mode.clone();
        let required_role = self.required_role.clone();

        Box::pin(async move {
            let container = req
                .app_data::<web::Data<ServiceContainer>>()
                .cloned()
                .ok_or_else(|| AppError::InternalError("ServiceContainer가 등록되지 않았습니다".to_string()))?;

            let auth_result = authenticate_request(&req, &container).await;

            match (&mode, auth_result) {
                // 저장소 장애는 인증 실패와 구분해서 그대로 전파
                (_, Err(AppError::RedisError(msg))) => {
                    return Err(AppError::RedisError(msg).into());
                }
                (AuthMode::Required, Err(err)) => {
                    log::warn!("인증 실패: {}", err);
                    let response = HttpResponse::Unauthorized()
                        .json(ApiResponse::<()>::error("유효한 인증 토큰이 필요합니다"));
                    let (req, _) = req.into_parts();
                    let res = ServiceResponse::new(req, response)
                        .map_into_right_body();
                    return Ok(res);
                }
                (AuthMode::Required, Ok(user)) => {
                    if let Some(ref required) = required_role {
                        if !required.is_satisfied(&user.role) {
                            log::warn!("권한 부족: 사용자 ID {} ({}), 필요 권한: {:?}",
                                user.user_id, user.role, required);
                            let response = HttpResponse::Forbidden()
                                .json(ApiResponse::<()>::error("접근 권한이 부족합니다"));
                            let (req, _) = req.into_parts();
                            let res = ServiceResponse::new(req, response)
                                .map_into_right_body();
                            return Ok(res);
                        }
                    }

                    log::debug!("인증 성공: 사용자 ID {}", user.user_id);
                    req.extensions_mut().insert(user);
                }
                (AuthMode::Optional, Ok(user)) => {
                    let satisfied = required_role
                        .as_ref()
                        .map_or(true, |required| required.is_satisfied(&user.role));
                    if satisfied {
                        log::debug!("선택적 인증 성공: 사용자 ID {}", user.user_id);
                        req.extensions_mut().insert(user);
                    } else {
                        log::debug!("선택적 인증: 권한 부족하지만 진행 허용");
                    }
                }
                (AuthMode::Optional, Err(_)) => {
                    log::debug!("선택적 인증: 토큰 없음, 요청 진행");
                }
            }

            let res = service.call(req).await?;
            Ok(res.map_into_left_body())
        })
    }
}

/// Bearer 토큰을 꺼내 블랙리스트, 세션 일치, 만료 검사를 수행합니다.
async fn authenticate_request(
    req: &ServiceRequest,
    container: &ServiceContainer,
) -> AppResult<AuthenticatedUser> {
    let auth_header = req.headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| AppError::AuthenticationError("Authorization 헤더가 없습니다".to_string()))?;

    let token = extract_bearer_token(auth_header)?;

    let claims = container
        .sessions
        .authenticate(token)
        .await?
        .ok_or_else(|| AppError::AuthenticationError("유효하지 않거나 만료된 세션입니다".to_string()))?;

    Ok(AuthenticatedUser::from_claims(claims, token_fingerprint(token)))
}
