//! 에러 처리 모듈
//!
//! [`errors`] 모듈의 `AppError`, `AppResult`, `ErrorContext`를 재export 합니다.

pub mod errors;

pub use errors::*;
