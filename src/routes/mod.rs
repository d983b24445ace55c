//! API 라우트 설정 모듈
//!
//! RESTful API 엔드포인트들을 기능별로 그룹화하여 제공합니다.
//!
//! # Route Groups
//!
//! | 스코프 | 미들웨어 | 핸들러 |
//! |--------|----------|--------|
//! | `/health` | - | 저장소 상태 확인 |
//! | `/api/v1/ip-rate-limit` | - | [`handlers::ip_rate_limit`] |
//! | `/api/v1/rate-limit` | - | [`handlers::rate_limit`] |
//! | `/api/v1/ip-restriction` | - | [`handlers::ip_restriction`] |
//! | `/api/v1/jwt` | `IpGuardMiddleware` | [`handlers::jwt`] |
//! | `/api/v1/blacklist` | - | [`handlers::blacklist`] |
//! | `/api/v1/secure` | `AuthMiddleware::required()` | [`handlers::secure`] |
//!
//! # Examples
//!
//! ```rust,ignore
//! use actix_web::{web, App};
//!
//! let app = App::new()
//!     .app_data(container)
//!     .configure(configure_all_routes);
//! ```

use actix_web::{get, web, HttpResponse};
use serde_json::json;

use crate::core::ServiceContainer;
use crate::handlers;
use crate::middlewares::{AuthMiddleware, IpGuardMiddleware};

/// 모든 라우트를 설정합니다
pub fn configure_all_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(health_check);

    configure_rate_limit_routes(cfg);
    configure_access_routes(cfg);
    configure_session_routes(cfg);
}

/// IP, 사용자, 토큰 한도 라우트
///
/// ```bash
/// curl http://localhost:8080/api/v1/ip-rate-limit/minute/10.0.0.1
/// curl http://localhost:8080/api/v1/rate-limit/combined/premium_kim/api_abc
/// curl -X POST http://localhost:8080/api/v1/rate-limit/simulate/bulk-requests/u1/temp_x/20
/// ```
fn configure_rate_limit_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/ip-rate-limit")
            .service(handlers::ip_rate_limit::check_minute_limit)
            .service(handlers::ip_rate_limit::check_hour_limit)
            .service(handlers::ip_rate_limit::check_day_limit)
            .service(handlers::ip_rate_limit::current_count)
            .service(handlers::ip_rate_limit::reset_limits)
    );

    // 고정 경로(/token/info, /token/history)가 /token/{token}보다 먼저 등록되어야 함
    cfg.service(
        web::scope("/api/v1/rate-limit")
            .service(handlers::rate_limit::check_user_hourly)
            .service(handlers::rate_limit::check_user_daily)
            .service(handlers::rate_limit::user_hourly_count)
            .service(handlers::rate_limit::user_daily_count)
            .service(handlers::rate_limit::token_info)
            .service(handlers::rate_limit::token_history)
            .service(handlers::rate_limit::check_token_usage)
            .service(handlers::rate_limit::check_combined)
            .service(handlers::rate_limit::simulate_api_call)
            .service(handlers::rate_limit::simulate_bulk_requests)
    );
}

fn configure_access_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/ip-restriction")
            .service(handlers::ip_restriction::check_access)
            .service(handlers::ip_restriction::get_whitelist)
            .service(handlers::ip_restriction::get_blacklist)
            .service(handlers::ip_restriction::add_to_whitelist)
            .service(handlers::ip_restriction::add_to_blacklist)
            .service(handlers::ip_restriction::remove_from_whitelist)
            .service(handlers::ip_restriction::remove_from_blacklist)
    );
}

/// 세션, 블랙리스트, 보호 라우트
///
/// ```bash
/// TOKEN=$(curl -s -X POST http://localhost:8080/api/v1/jwt/login \
///   -H "Content-Type: application/json" -d '{"userId":"alice"}' | jq -r .data.token)
///
/// curl http://localhost:8080/api/v1/secure/me -H "Authorization: Bearer $TOKEN"
/// curl -X POST http://localhost:8080/api/v1/blacklist/logout -H "Authorization: Bearer $TOKEN"
/// ```
fn configure_session_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/jwt")
            .wrap(IpGuardMiddleware)
            .service(handlers::jwt::login)
            .service(handlers::jwt::login_short_ttl)
            .service(handlers::jwt::login_multiple)
            .service(handlers::jwt::validate)
            .service(handlers::jwt::session_info)
            .service(handlers::jwt::check_expired)
            .service(handlers::jwt::session_stats)
            .service(handlers::jwt::refresh)
            .service(handlers::jwt::logout)
            .service(handlers::jwt::logout_device)
    );

    cfg.service(
        web::scope("/api/v1/blacklist")
            .service(handlers::blacklist::logout)
            .service(handlers::blacklist::check)
    );

    cfg.service(
        web::scope("/api/v1/secure")
            .wrap(AuthMiddleware::required())
            .service(handlers::secure::me)
    );
}

/// 서비스 상태를 확인하는 헬스체크 엔드포인트
///
/// 카운터 저장소에 `PING`을 보내 응답하지 않으면 `503 Service Unavailable`을 반환합니다.
///
/// ```json
/// {
///   "status": "healthy",
///   "service": "access_guard",
///   "version": "0.1.0",
///   "timestamp": "2026-01-01T00:00:00Z",
///   "store": { "backend": "redis", "reachable": true }
/// }
/// ```
#[get("/health")]
async fn health_check(container: web::Data<ServiceContainer>) -> HttpResponse {
    let backend = container.store.backend_name();
    let reachable = match container.store.ping().await {
        Ok(()) => true,
        Err(e) => {
            log::error!("저장소 헬스체크 실패 ({}): {}", backend, e);
            false
        }
    };

    let body = json!({
        "status": if reachable { "healthy" } else { "degraded" },
        "service": "access_guard",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "store": {
            "backend": backend,
            "reachable": reachable
        }
    });

    if reachable {
        HttpResponse::Ok().json(body)
    } else {
        HttpResponse::ServiceUnavailable().json(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{test, App};
    use serde_json::Value;

    use crate::config::{JwtSettings, SigningKey};

    fn container() -> web::Data<ServiceContainer> {
        let settings = JwtSettings::with_key(SigningKey::generate_ephemeral());
        web::Data::new(ServiceContainer::in_memory(&settings))
    }

    macro_rules! app {
        ($data:expr) => {
            test::init_service(
                App::new()
                    .app_data($data.clone())
                    .configure(configure_all_routes),
            )
            .await
        };
    }

    #[actix_web::test]
    async fn test_health_reports_store_backend() {
        let data = container();
        let app = app!(data);

        let req = test::TestRequest::get().uri("/health").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body["status"], "healthy");
        assert_eq!(body["store"]["backend"], "memory");
    }

    #[actix_web::test]
    async fn test_ip_minute_limit_flow() {
        let data = container();
        let app = app!(data);

        for expected in 1..=5 {
            let req = test::TestRequest::get().uri("/api/v1/ip-rate-limit/minute/10.1.1.1").to_request();
            let body: Value = test::call_and_read_body_json(&app, req).await;
            assert_eq!(body["success"], true);
            assert_eq!(body["data"]["currentCount"], expected);
        }

        let req = test::TestRequest::get().uri("/api/v1/ip-rate-limit/minute/10.1.1.1").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["success"], false);
        assert_eq!(body["data"]["isAllowed"], false);
        assert_eq!(body["data"]["currentCount"], 5);

        let req = test::TestRequest::get().uri("/api/v1/ip-rate-limit/count/10.1.1.1/minute").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["data"]["count"], 5);
        assert!(body["data"]["ttl"].as_i64().unwrap() > 0);

        let req = test::TestRequest::delete().uri("/api/v1/ip-rate-limit/reset/10.1.1.1").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["data"]["resetWindows"], serde_json::json!(["minute", "hour", "day"]));

        let req = test::TestRequest::get().uri("/api/v1/ip-rate-limit/count/10.1.1.1/minute").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["data"]["count"], 0);
        assert_eq!(body["data"]["ttl"], -2);
    }

    #[actix_web::test]
    async fn test_window_checks_report_count_and_limit() {
        let data = container();
        let app = app!(data);

        let req = test::TestRequest::get().uri("/api/v1/ip-rate-limit/hour/10.1.1.2").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["data"]["window"], "hour");
        assert_eq!(body["data"]["currentCount"], 1);
        assert_eq!(body["data"]["limit"], 100);

        let req = test::TestRequest::get().uri("/api/v1/ip-rate-limit/day/10.1.1.2").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["data"]["currentCount"], 1);
        assert_eq!(body["data"]["limit"], 1000);

        // 윈도우별 카운터는 서로 독립
        let req = test::TestRequest::get().uri("/api/v1/ip-rate-limit/count/10.1.1.2/minute").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["data"]["count"], 0);
    }

    #[actix_web::test]
    async fn test_unknown_window_is_bad_request() {
        let data = container();
        let app = app!(data);

        let req = test::TestRequest::get().uri("/api/v1/ip-rate-limit/count/10.1.1.1/week").to_request();
        assert_eq!(test::call_service(&app, req).await.status(), 400);
    }

    #[actix_web::test]
    async fn test_token_usage_and_history() {
        let data = container();
        let app = app!(data);

        for _ in 0..10 {
            let req = test::TestRequest::get().uri("/api/v1/rate-limit/token/pay_abc").to_request();
            let body: Value = test::call_and_read_body_json(&app, req).await;
            assert_eq!(body["success"], true);
        }

        let req = test::TestRequest::get().uri("/api/v1/rate-limit/token/pay_abc").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["success"], false);
        assert_eq!(body["data"]["limit"], 10);
        assert_eq!(body["data"]["remaining"], 0);

        let req = test::TestRequest::get().uri("/api/v1/rate-limit/token/history/pay_abc").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["data"]["historyCount"], 10);

        let req = test::TestRequest::get().uri("/api/v1/rate-limit/token/info/pay_abc").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["data"]["count"], 10);
    }

    #[actix_web::test]
    async fn test_bulk_simulation_and_count_bounds() {
        let data = container();
        let app = app!(data);

        let req = test::TestRequest::post()
            .uri("/api/v1/rate-limit/simulate/bulk-requests/u1/pay_x/12")
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["data"]["requestCount"], 12);
        assert_eq!(body["data"]["successCount"], 10);
        assert_eq!(body["data"]["failureCount"], 2);
        assert_eq!(body["data"]["successRate"], "83.33%");

        let req = test::TestRequest::post()
            .uri("/api/v1/rate-limit/simulate/bulk-requests/u1/temp_x/0")
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), 400);
    }

    #[actix_web::test]
    async fn test_simulated_api_call_reports_reasons() {
        let data = container();
        let app = app!(data);

        let req = test::TestRequest::post().uri("/api/v1/rate-limit/simulate/api-call/u2/temp_y").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["data"]["success"], true);

        let req = test::TestRequest::post().uri("/api/v1/rate-limit/simulate/api-call/u2/temp_y").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["data"]["success"], false);
        assert_eq!(body["data"]["reasons"], serde_json::json!(["토큰 사용 제한"]));
    }

    #[actix_web::test]
    async fn test_access_list_routes() {
        let data = container();
        let app = app!(data);

        let req = test::TestRequest::post().uri("/api/v1/ip-restriction/whitelist/10.0.0.1").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["data"]["changed"], true);

        let req = test::TestRequest::get().uri("/api/v1/ip-restriction/check/10.0.0.2").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["data"]["isAllowed"], false);
        assert_eq!(body["data"]["decision"], "not_whitelisted");

        let req = test::TestRequest::post().uri("/api/v1/ip-restriction/blacklist/10.0.0.1").to_request();
        test::call_service(&app, req).await;

        let req = test::TestRequest::get().uri("/api/v1/ip-restriction/check/10.0.0.1").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["data"]["decision"], "blacklisted");

        let req = test::TestRequest::get().uri("/api/v1/ip-restriction/whitelist").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["data"]["ips"], serde_json::json!(["10.0.0.1"]));
    }

    #[actix_web::test]
    async fn test_login_validate_and_secure_me() {
        let data = container();
        let app = app!(data);

        let req = test::TestRequest::post()
            .uri("/api/v1/jwt/login")
            .peer_addr("192.168.0.10:40000".parse().unwrap())
            .set_json(serde_json::json!({ "userId": "alice" }))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        let token = body["data"]["token"].as_str().unwrap().to_string();
        assert_eq!(body["data"]["sessionTtl"], 1800);

        let req = test::TestRequest::get()
            .uri("/api/v1/jwt/validate/alice")
            .peer_addr("192.168.0.10:40000".parse().unwrap())
            .insert_header(("Authorization", format!("Bearer {}", token)))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), 200);

        let req = test::TestRequest::get()
            .uri("/api/v1/jwt/validate/bob")
            .peer_addr("192.168.0.10:40000".parse().unwrap())
            .insert_header(("Authorization", format!("Bearer {}", token)))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), 401);

        let req = test::TestRequest::get()
            .uri("/api/v1/secure/me")
            .insert_header(("Authorization", format!("Bearer {}", token)))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["data"]["userId"], "alice");
        assert_eq!(body["data"]["role"], "USER");
    }

    #[actix_web::test]
    async fn test_login_rejects_empty_user_id() {
        let data = container();
        let app = app!(data);

        let req = test::TestRequest::post()
            .uri("/api/v1/jwt/login")
            .peer_addr("192.168.0.11:40000".parse().unwrap())
            .set_json(serde_json::json!({ "userId": "" }))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), 400);
    }

    #[actix_web::test]
    async fn test_blacklist_logout_revokes_token() {
        let data = container();
        let app = app!(data);
        let session = data.sessions.login("dave").await.unwrap();
        let bearer = format!("Bearer {}", session.token);

        let req = test::TestRequest::post()
            .uri("/api/v1/blacklist/logout")
            .insert_header(("Authorization", bearer.clone()))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["data"]["blacklisted"], true);
        assert_eq!(body["data"]["sessionRemoved"], true);

        let req = test::TestRequest::get()
            .uri("/api/v1/blacklist/check")
            .insert_header(("Authorization", bearer.clone()))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["data"]["isBlacklisted"], true);

        let req = test::TestRequest::get()
            .uri("/api/v1/secure/me")
            .insert_header(("Authorization", bearer))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), 401);
    }

    #[actix_web::test]
    async fn test_refresh_requires_current_token() {
        let data = container();
        let app = app!(data);
        let session = data.sessions.login("erin").await.unwrap();

        let req = test::TestRequest::post()
            .uri("/api/v1/jwt/refresh/erin")
            .peer_addr("192.168.0.12:40000".parse().unwrap())
            .insert_header(("Authorization", format!("Bearer {}", session.token)))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        let new_token = body["data"]["newToken"].as_str().unwrap().to_string();
        assert_ne!(new_token, session.token);

        // 교체된 이전 토큰으로는 다시 갱신할 수 없음
        let req = test::TestRequest::post()
            .uri("/api/v1/jwt/refresh/erin")
            .peer_addr("192.168.0.12:40000".parse().unwrap())
            .insert_header(("Authorization", format!("Bearer {}", session.token)))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), 401);
    }

    #[actix_web::test]
    async fn test_session_stats_without_token() {
        let data = container();
        let app = app!(data);

        let req = test::TestRequest::get()
            .uri("/api/v1/jwt/stats/nobody")
            .peer_addr("192.168.0.13:40000".parse().unwrap())
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body["data"]["hasActiveToken"], false);
        assert_eq!(body["data"]["isExpired"], true);
        assert_eq!(body["data"]["tokenPreview"], "N/A");
    }
}
