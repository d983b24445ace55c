//! 비즈니스 로직을 담당하는 서비스 계층 모듈
//!
//! 각 서비스는 생성 시 주입된 카운터 저장소와 설정만 사용하며,
//! 프로세스 내부에 가변 상태를 두지 않습니다.
//!
//! # 구성
//!
//! - [`rate_limit`] - IP/사용자 고정 윈도우 제한, 통합 판정
//! - [`usage`] - API 토큰 사용 횟수 제한과 이력
//! - [`access`] - IP 화이트리스트/블랙리스트
//! - [`auth`] - JWT, 세션 레지스트리, 토큰 블랙리스트
//!
//! # Examples
//!
//! ```rust,ignore
//! use crate::core::ServiceContainer;
//!
//! let container = ServiceContainer::initialize().await?;
//! let allowed = container.ip_rate_limit.is_allowed_per_minute("10.0.0.1", 5).await?;
//! ```

pub mod access;
pub mod auth;
pub mod rate_limit;
pub mod usage;
