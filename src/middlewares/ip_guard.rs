//! IP 접근 목록 및 분당 요청 한도 미들웨어
//!
//! 요청의 클라이언트 IP를 기준으로 다음 순서로 검사합니다.
//!
//! 1. 접근 목록 판정이 거부이면 `403 Forbidden`
//! 2. 분당 IP 한도를 초과하면 `429 Too Many Requests`
//!
//! 접근 목록에서 차단된 요청은 레이트 리밋 카운터를 증가시키지 않습니다.
//!
//! 클라이언트 IP는 TCP 피어 주소입니다. 피어가 `TRUSTED_PROXIES`에 있을 때만
//! 전달 헤더의 주소를 사용합니다.

use std::future::{ready, Ready};
use std::net::IpAddr;
use std::rc::Rc;

use actix_web::body::EitherBody;
use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::{web, Error, HttpResponse, ResponseError};
use futures_util::future::LocalBoxFuture;

use crate::core::ServiceContainer;
use crate::domain::dto::ApiResponse;
use crate::errors::AppError;

/// 클라이언트 IP를 확인할 수 없을 때 사용하는 주체
const UNKNOWN_CLIENT: &str = "unknown";

/// 요청의 클라이언트 IP를 결정합니다.
///
/// 신뢰하지 않는 피어가 보낸 `X-Forwarded-For`는 무시합니다.
fn client_ip(req: &ServiceRequest, trusted_proxies: &[IpAddr]) -> String {
    let Some(peer) = req.peer_addr().map(|addr| addr.ip()) else {
        return UNKNOWN_CLIENT.to_string();
    };

    if !trusted_proxies.contains(&peer) {
        return peer.to_string();
    }

    req.connection_info()
        .realip_remote_addr()
        .and_then(|raw| raw.parse::<IpAddr>().ok())
        .unwrap_or(peer)
        .to_string()
}

/// IP 가드 미들웨어
///
/// ```rust,ignore
/// web::scope("/api/v1/jwt")
///     .wrap(IpGuardMiddleware)
///     .service(handlers::jwt::login)
/// ```
pub struct IpGuardMiddleware;

impl<S, B> Transform<S, ServiceRequest> for IpGuardMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Transform = IpGuardService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(IpGuardService {
            service: Rc::new(service),
        }))
    }
}

pub struct IpGuardService<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for IpGuardService<S>
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

        Box::pin(async move {
            let container = req
                .app_data::<web::Data<ServiceContainer>>()
                .cloned()
                .ok_or_else(|| AppError::InternalError("ServiceContainer가 등록되지 않았습니다".to_string()))?;

            let client_ip = client_ip(&req, &container.ip_limits.trusted_proxies);

            let decision = container.ip_restriction.decide(&client_ip).await?;
            if !decision.is_allowed() {
                log::warn!("IP 접근 차단: {} ({:?})", client_ip, decision);
                let response = HttpResponse::Forbidden()
                    .json(ApiResponse::<()>::error(format!("접근이 차단된 IP입니다: {}", client_ip)));
                let (req, _) = req.into_parts();
                return Ok(ServiceResponse::new(req, response).map_into_right_body());
            }

            let allowed = container
                .ip_rate_limit
                .is_allowed_per_minute(&client_ip, container.ip_limits.per_minute)
                .await?;
            if !allowed {
                log::warn!("IP 분당 요청 한도 초과: {}", client_ip);
                let error = AppError::TooManyRequests(format!("분당 요청 한도를 초과했습니다: {}", client_ip));
                let (req, _) = req.into_parts();
                return Ok(ServiceResponse::new(req, error.error_response()).map_into_right_body());
            }

            let res = service.call(req).await?;
            Ok(res.map_into_left_body())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{test, App};

    use crate::config::{IpLimits, JwtSettings, SigningKey};
    use crate::caching::MemoryStore;
    use crate::domain::models::RateWindow;
    use std::net::SocketAddr;
    use std::sync::Arc;

    async fn ok() -> HttpResponse {
        HttpResponse::Ok().finish()
    }

    fn container_with(limits: IpLimits) -> web::Data<ServiceContainer> {
        let settings = JwtSettings::with_key(SigningKey::generate_ephemeral());
        web::Data::new(ServiceContainer::new(Arc::new(MemoryStore::new()), &settings, limits))
    }

    fn container(per_minute: i64) -> web::Data<ServiceContainer> {
        container_with(IpLimits {
            per_minute,
            ..IpLimits::default()
        })
    }

    fn request_from(ip: &str) -> test::TestRequest {
        let peer: SocketAddr = format!("{}:5555", ip).parse().unwrap();
        test::TestRequest::get().uri("/guarded/ping").peer_addr(peer)
    }

    macro_rules! guarded_app {
        ($data:expr) => {
            test::init_service(
                App::new()
                    .app_data($data.clone())
                    .service(web::scope("/guarded").wrap(IpGuardMiddleware).route("/ping", web::get().to(ok))),
            )
            .await
        };
    }

    #[actix_web::test]
    async fn test_blacklisted_ip_is_forbidden() {
        let data = container(5);
        data.ip_restriction.add_to_blacklist("10.0.0.66").await.unwrap();

        let app = guarded_app!(data);

        assert_eq!(test::call_service(&app, request_from("10.0.0.66").to_request()).await.status(), 403);
        assert_eq!(test::call_service(&app, request_from("10.0.0.7").to_request()).await.status(), 200);

        // 차단된 요청은 카운트되지 않음
        let count = data
            .ip_rate_limit
            .current_count("10.0.0.66", RateWindow::Minute)
            .await
            .unwrap();
        assert_eq!(count, 0);
    }

    #[actix_web::test]
    async fn test_minute_limit_returns_too_many_requests() {
        let data = container(2);

        let app = guarded_app!(data);

        assert_eq!(test::call_service(&app, request_from("10.0.0.8").to_request()).await.status(), 200);
        assert_eq!(test::call_service(&app, request_from("10.0.0.8").to_request()).await.status(), 200);

        let denied = test::call_service(&app, request_from("10.0.0.8").to_request()).await;
        assert_eq!(denied.status(), 429);
        let body: serde_json::Value = test::read_body_json(denied).await;
        assert!(body["error"].as_str().unwrap().contains("10.0.0.8"));
        assert_eq!(test::call_service(&app, request_from("10.0.0.9").to_request()).await.status(), 200);
    }

    #[actix_web::test]
    async fn test_forwarded_header_from_untrusted_peer_is_ignored() {
        let data = container(5);
        data.ip_restriction.add_to_blacklist("10.0.0.66").await.unwrap();
        let app = guarded_app!(data);

        let spoofed = request_from("10.0.0.66")
            .insert_header(("X-Forwarded-For", "1.2.3.4"))
            .to_request();
        assert_eq!(test::call_service(&app, spoofed).await.status(), 403);

        // 헤더 주소로 카운트되지 않음
        let count = data.ip_rate_limit.current_count("1.2.3.4", RateWindow::Minute).await.unwrap();
        assert_eq!(count, 0);
    }

    #[actix_web::test]
    async fn test_forwarded_header_from_trusted_proxy_is_used() {
        let data = container_with(IpLimits {
            trusted_proxies: vec!["10.0.0.1".parse().unwrap()],
            ..IpLimits::default()
        });
        data.ip_restriction.add_to_blacklist("10.0.0.66").await.unwrap();
        let app = guarded_app!(data);

        let blocked = request_from("10.0.0.1")
            .insert_header(("X-Forwarded-For", "10.0.0.66"))
            .to_request();
        assert_eq!(test::call_service(&app, blocked).await.status(), 403);

        let allowed = request_from("10.0.0.1")
            .insert_header(("X-Forwarded-For", "10.0.0.7"))
            .to_request();
        assert_eq!(test::call_service(&app, allowed).await.status(), 200);

        let count = data.ip_rate_limit.current_count("10.0.0.7", RateWindow::Minute).await.unwrap();
        assert_eq!(count, 1);
        let proxy_count = data.ip_rate_limit.current_count("10.0.0.1", RateWindow::Minute).await.unwrap();
        assert_eq!(proxy_count, 0);
    }

    #[actix_web::test]
    async fn test_request_without_peer_uses_unknown_client() {
        let data = container(1);
        let app = guarded_app!(data);

        let first = test::TestRequest::get().uri("/guarded/ping").to_request();
        assert_eq!(test::call_service(&app, first).await.status(), 200);

        let count = data.ip_rate_limit.current_count(UNKNOWN_CLIENT, RateWindow::Minute).await.unwrap();
        assert_eq!(count, 1);
    }
}
