//! 액세스 가드 서비스
//!
//! 공유 키-값 저장소(Redis)를 기반으로 다음 기능을 제공하는 HTTP 서비스입니다.
//!
//! # Features
//!
//! - **IP 레이트 리밋**: 분/시간/일 고정 윈도우 카운터
//! - **사용자 한도**: 사용자 등급별 시간당/일일 한도
//! - **토큰 사용량**: 토큰 종류별 사용 횟수와 최근 사용 이력
//! - **IP 접근 목록**: 블랙리스트 우선, 화이트리스트가 비면 전체 허용
//! - **JWT 세션**: 주체별 단일 활성 토큰, 세션 TTL, 로그아웃 블랙리스트
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐
//! │   HTTP Routes   │ ← REST API 엔드포인트, 미들웨어
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │    Handlers     │ ← 요청/응답 처리
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │    Services     │ ← 한도 판정, 세션 관리
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │  Repositories   │ ← 키 규칙과 값 변환
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │  CounterStore   │ ← Redis 또는 인메모리
//! └─────────────────┘
//! ```
//!
//! # Examples
//!
//! ```rust,ignore
//! use access_guard_service::core::ServiceContainer;
//!
//! let container = ServiceContainer::initialize().await?;
//! let allowed = container.ip_rate_limit.is_allowed_per_minute("10.0.0.1", 5).await?;
//! let session = container.sessions.login("alice").await?;
//! ```

pub mod core;
pub mod config;
pub mod caching;
pub mod domain;
pub mod repositories;
pub mod services;
pub mod utils;
pub mod routes;
pub mod handlers;
pub mod errors;
pub mod middlewares;
