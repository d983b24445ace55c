//! 미들웨어 모듈
//!
//! ActixWeb 애플리케이션의 요청 처리 파이프라인에서 사용되는 미들웨어들을 제공합니다.
//!
//! # 제공 미들웨어
//!
//! ### 1. 인증 미들웨어 (AuthMiddleware)
//! - Bearer 토큰 추출
//! - 블랙리스트, 세션 일치, 만료 검사
//! - 사용자 정보를 request extension에 저장
//! - 선택적/강제 인증 모드와 역할 요구 지원
//!
//! ### 2. IP 가드 (IpGuardMiddleware)
//! - IP 접근 목록 판정 (403)
//! - IP 분당 요청 한도 (429)
//!
//! # 사용 방법
//!
//! ```rust,ignore
//! App::new()
//!     .service(
//!         web::scope("/api/v1/jwt")
//!             .wrap(IpGuardMiddleware)
//!             .service(handlers::jwt::login)
//!     )
//!     .service(
//!         web::scope("/api/v1/secure")
//!             .wrap(AuthMiddleware::required())
//!             .service(handlers::secure::me)
//!     )
//! ```

pub mod auth_middleware;
mod auth_inner;
pub mod ip_guard;

pub use auth_middleware::AuthMiddleware;
pub use ip_guard::IpGuardMiddleware;
