//! # Domain Models Module
//!
//! 저장소에 기록되는 문자열 값을 타입이 있는 값 객체로 다루기 위한 모듈입니다.
//! 키 형식, 윈도우 길이, 등급별 한도 같은 도메인 규칙이 이곳에 모여 있습니다.
//!
//! ## 모듈 구성
//!
//! ```text
//! models/
//! ├── rate/    ← RateWindow, UserTier
//! ├── token/   ← SessionClaims, TokenClass, TokenUsageRecord
//! ├── access/  ← AccessList, AccessDecision
//! └── auth/    ← AuthenticatedUser, AuthMode, RequiredRole
//! ```
//!
//! ## 저장소 키 형식
//!
//! | 용도 | 키 | 자료형 |
//! |------|----|--------|
//! | IP 윈도우 카운터 | `ip:rate:{window}:{ip}` | 문자열 정수 |
//! | 사용자 카운터 | `user:rate:{user_id}` | 해시 (`hourly`, `daily`) |
//! | 토큰 사용량 | `token:usage:{token}` | 해시 |
//! | 토큰 사용 이력 | `token:usage:{token}:history` | 리스트 |
//! | 접근 목록 | `ip:whitelist`, `ip:blacklist` | 집합 |
//! | 세션 | `jwt:{subject}` | 문자열 |
//! | 로그아웃 토큰 | `blacklist:{token}` | 문자열 |

pub mod access;
pub mod auth;
pub mod rate;
pub mod token;

pub use access::*;
pub use auth::*;
pub use rate::*;
pub use token::*;
