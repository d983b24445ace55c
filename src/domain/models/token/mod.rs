//! 토큰 관련 도메인 모델
//!
//! - [`token`] - JWT 세션 클레임과 세션/블랙리스트 키
//! - [`usage`] - API 토큰 사용량 레코드

pub mod token;
pub mod usage;

pub use token::*;
pub use usage::*;
