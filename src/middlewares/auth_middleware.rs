//! JWT 세션 인증 미들웨어
//!
//! ActixWeb 요청 파이프라인에서 Bearer 토큰을 세션 저장소와 대조하고
//! 통과한 사용자 정보를 요청 확장에 저장합니다.

use std::future::{ready, Ready};
use std::rc::Rc;

use actix_web::{
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    Error, Result,
    body::EitherBody,
};
use crate::domain::models::{AuthMode, RequiredRole};
use crate::middlewares::auth_inner::AuthMiddlewareService;

/// JWT 세션 인증 미들웨어
pub struct AuthMiddleware {
    /// 인증 모드 (Required/Optional)
    mode: AuthMode,
    /// 접근에 필요한 역할 (선택사항)
    required_role: Option<RequiredRole>,
}

impl AuthMiddleware {
    pub fn new(mode: AuthMode) -> Self {
        Self {
            mode,
            required_role: None,
        }
    }

    pub fn new_with_role(mode: AuthMode, required_role: RequiredRole) -> Self {
        Self {
            mode,
            required_role: Some(required_role),
        }
    }

    /// 필수 인증 미들웨어 생성
    pub fn required() -> Self {
        Self::new(AuthMode::Required)
    }

    /// 선택적 인증 미들웨어 생성
    pub fn optional() -> Self {
        Self::new(AuthMode::Optional)
    }

    pub fn required_with_role(role: &str) -> Self {
        Self::new_with_role(
            AuthMode::Required,
            RequiredRole::Single(role.to_string())
        )
    }
}

impl<S, B> Transform<S, ServiceRequest> for AuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Transform = AuthMiddlewareService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthMiddlewareService {
            service: Rc::new(service),
            mode: self.mode.clone(),
            required_role: self.required_role.clone(),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{test, web, App, HttpResponse};

    use crate::config::{JwtSettings, SigningKey};
    use crate::core::ServiceContainer;
    use crate::domain::models::{AuthenticatedUser, OptionalUser};

    async fn whoami(user: AuthenticatedUser) -> HttpResponse {
        HttpResponse::Ok().body(user.user_id)
    }

    async fn maybe_whoami(user: OptionalUser) -> HttpResponse {
        match user.0 {
            Some(user) => HttpResponse::Ok().body(user.user_id),
            None => HttpResponse::Ok().body("anonymous"),
        }
    }

    fn container() -> web::Data<ServiceContainer> {
        let settings = JwtSettings::with_key(SigningKey::generate_ephemeral());
        web::Data::new(ServiceContainer::in_memory(&settings))
    }

    #[actix_web::test]
    async fn test_required_auth_accepts_live_session() {
        let data = container();
        let session = data.sessions.login("alice").await.unwrap();

        let app = test::init_service(
            App::new()
                .app_data(data.clone())
                .service(web::scope("/secure").wrap(AuthMiddleware::required()).route("/me", web::get().to(whoami))),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/secure/me")
            .insert_header(("Authorization", format!("Bearer {}", session.token)))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 200);
        assert_eq!(test::read_body(resp).await, "alice");
    }

    #[actix_web::test]
    async fn test_required_auth_rejects_missing_or_revoked_token() {
        let data = container();
        let session = data.sessions.login("bob").await.unwrap();

        let app = test::init_service(
            App::new()
                .app_data(data.clone())
                .service(web::scope("/secure").wrap(AuthMiddleware::required()).route("/me", web::get().to(whoami))),
        )
        .await;

        let missing = test::TestRequest::get().uri("/secure/me").to_request();
        assert_eq!(test::call_service(&app, missing).await.status(), 401);

        data.sessions.logout(&session.token).await.unwrap();
        let revoked = test::TestRequest::get()
            .uri("/secure/me")
            .insert_header(("Authorization", format!("Bearer {}", session.token)))
            .to_request();
        assert_eq!(test::call_service(&app, revoked).await.status(), 401);
    }

    #[actix_web::test]
    async fn test_role_requirement_forbids_other_roles() {
        let data = container();
        let session = data.sessions.login("carol").await.unwrap();

        let app = test::init_service(
            App::new()
                .app_data(data.clone())
                .service(
                    web::scope("/admin")
                        .wrap(AuthMiddleware::required_with_role("ADMIN"))
                        .route("/me", web::get().to(whoami)),
                ),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/admin/me")
            .insert_header(("Authorization", format!("Bearer {}", session.token)))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), 403);
    }

    #[actix_web::test]
    async fn test_optional_auth_lets_anonymous_through() {
        let data = container();

        let app = test::init_service(
            App::new()
                .app_data(data.clone())
                .service(web::scope("/open").wrap(AuthMiddleware::optional()).route("/me", web::get().to(maybe_whoami))),
        )
        .await;

        let req = test::TestRequest::get().uri("/open/me").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 200);
        assert_eq!(test::read_body(resp).await, "anonymous");
    }
}
