//! # Configuration Module
//!
//! 서비스의 설정 관리를 담당하는 모듈입니다.
//! 환경 변수 기반의 설정값들을 중앙집중식으로 관리합니다.
//!
//! ## 모듈 구성
//!
//! - [`data_config`] - 실행 환경, 서버, 카운터 저장소, 레이트 리밋 설정
//! - [`auth_config`] - JWT 서명 키, 발급자, 토큰 수명 설정
//!
//! ## 설계 원칙
//!
//! - 민감한 정보(서명 키)는 환경 변수로만 제공
//! - 잘못된 숫자 값은 기본값으로 대체하고 에러 로그를 남김
//! - 서명 키는 시작 시 한 번 만들어 서비스에 주입
//!
//! ## 사용 예제
//!
//! ```rust,ignore
//! use crate::config::{JwtSettings, RateLimitConfig, ServerConfig, StoreConfig};
//!
//! let host = ServerConfig::host();
//! let port = ServerConfig::port();
//! let backend = StoreConfig::backend();
//! let limits = RateLimitConfig::ip_limits();
//! let jwt = JwtSettings::from_env()?;
//! ```
//!
//! ## 환경 변수 설정 가이드
//!
//! ```bash
//! # 서버 설정
//! export HOST="0.0.0.0"
//! export PORT="8080"
//! export ENVIRONMENT="production"  # development, test, staging, production
//!
//! # 저장소
//! export REDIS_URL="redis://localhost:6379"
//! export STORE_BACKEND="redis"     # redis, memory
//!
//! # JWT
//! export JWT_SECRET="<base64>"
//! export JWT_EXPIRATION_SECONDS="3600"
//! export JWT_SESSION_TTL_SECONDS="1800"
//!
//! # 레이트 리밋
//! export IP_LIMIT_PER_MINUTE="5"
//! export IP_LIMIT_PER_HOUR="100"
//! export IP_LIMIT_PER_DAY="1000"
//! export RATE_LIMIT_PER_SECOND="10"
//! export RATE_LIMIT_BURST_SIZE="50"
//! ```

pub mod data_config;
pub mod auth_config;

pub use data_config::*;
pub use auth_config::*;
