//! # Core Module
//!
//! 애플리케이션 구성 요소를 조립하는 모듈입니다.
//!
//! ## 모듈 구성
//!
//! ### [`container`] - 의존성 컨테이너
//! - 설정에 따라 Redis 또는 인메모리 카운터 저장소 선택
//! - 리포지토리와 서비스를 한 번 생성하여 `Arc`로 공유
//! - 전역 싱글톤 대신 `web::Data`로 핸들러에 주입
//!
//! ## 사용 패턴
//!
//! ```rust,ignore
//! use actix_web::{web, App};
//! use crate::core::ServiceContainer;
//!
//! let container = web::Data::new(ServiceContainer::initialize().await?);
//! App::new().app_data(container.clone());
//! ```

pub mod container;

pub use container::*;
