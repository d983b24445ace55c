//! 인증 및 세션 서비스 모듈
//!
//! JWT 발급/검증, 저장소 기반 세션 레지스트리, 로그아웃 토큰 블랙리스트를 제공합니다.
//!
//! # Security
//!
//! - HMAC-SHA256 토큰 서명, 키는 시작 시 주입
//! - 만료 판정에 여유 시간 없음
//! - 로그에는 토큰 원문 대신 SHA-256 지문만 기록
//!
//! # Examples
//!
//! ```rust,ignore
//! use crate::services::auth::SessionService;
//!
//! let session = sessions.login("user123").await?;
//! let claims = sessions.authenticate(&session.token).await?;
//! sessions.logout(&session.token).await?;
//! ```

pub mod jwt_service;
pub mod blacklist_service;
pub mod session_service;

pub use jwt_service::*;
pub use blacklist_service::*;
pub use session_service::*;
