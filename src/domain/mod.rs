//! # Domain Layer Module
//!
//! 레이트 리밋, 토큰 사용량, 접근 목록, 세션 도메인의 값 객체와 DTO를 담습니다.
//!
//! ```text
//! Domain Layer
//! ├── models/  ← 값 객체와 저장소 키 규칙
//! └── dto/     ← HTTP 요청/응답 계약
//! ```

pub mod dto;
pub mod models;

pub use dto::*;
pub use models::*;
