//! 공통 유틸리티 모듈
//!
//! - [`string_utils`] - 경로 파라미터 검증, Bearer 토큰 추출, 토큰 지문
//! - [`display_terminal`] - 시작 시 터미널 진행 상황 출력

pub mod string_utils;
pub mod display_terminal;
