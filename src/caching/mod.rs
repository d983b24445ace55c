//! 캐싱 계층 모듈
//!
//! 레이트 리밋 카운터, 토큰 사용량, 접근 목록, 세션 토큰을 보관하는
//! 키-값 저장소를 제공합니다.
//!
//! # 구성
//!
//! - [`store::CounterStore`]: 저장소 인터페이스
//! - [`redis::RedisStore`]: Redis 구현 (운영)
//! - [`memory::MemoryStore`]: 인메모리 구현 (테스트, 단일 인스턴스)
//!
//! # 사용 예제
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use crate::caching::{CounterStore, RedisStore};
//!
//! let store: Arc<dyn CounterStore> = Arc::new(RedisStore::connect(&url).await?);
//! store.incr_by("ip:rate:minute:10.0.0.1", 1).await?;
//! ```
//!
//! # 환경 설정
//!
//! ```bash
//! REDIS_URL=redis://localhost:6379  # 기본값
//! STORE_BACKEND=redis               # redis | memory
//! ```

pub mod memory;
pub mod redis;
pub mod store;

pub use memory::MemoryStore;
pub use self::redis::RedisStore;
pub use store::{CounterStore, TTL_NO_EXPIRY, TTL_NO_KEY};
