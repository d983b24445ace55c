//! # Data Transfer Objects (DTO) Module
//!
//! API 경계에서 데이터를 전송하기 위한 객체들을 정의하는 모듈입니다.
//! 클라이언트와 서버 간의 데이터 계약을 명확히 정의합니다.
//!
//! ## 설계 원칙
//!
//! - 모든 응답은 [`ApiResponse`]로 감싸서 `success`, `data`, `message` 형태로 반환
//! - JSON 필드는 camelCase
//! - 요청 본문은 `validator`로 검증 후 서비스 계층에 전달
//! - 토큰 원문은 발급 응답에서만 노출하고, 조회 응답에는 미리보기만 포함
//!
//! ## 모듈 구조
//!
//! ```text
//! dto/
//! ├── common/        # ApiResponse 래퍼
//! ├── rate_limits/   # IP/사용자/토큰 한도 응답
//! ├── access/        # IP 접근 목록 응답
//! └── sessions/      # 로그인 요청, 세션 응답
//! ```

pub mod access;
pub mod common;
pub mod rate_limits;
pub mod sessions;

pub use access::*;
pub use common::*;
pub use rate_limits::*;
pub use sessions::*;
