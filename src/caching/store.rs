//! # 카운터 저장소 추상화
//!
//! 레이트 리밋 카운터, 토큰 사용량 해시, IP 접근 목록, 세션 토큰이 모두
//! 저장되는 외부 키-값 저장소의 인터페이스입니다.
//!
//! 운영 환경에서는 [`RedisStore`](super::redis::RedisStore)를,
//! 테스트와 단일 프로세스 실행에서는 [`MemoryStore`](super::memory::MemoryStore)를 사용합니다.
//!
//! ## TTL 센티널
//!
//! Redis `TTL` 명령과 동일한 값을 반환합니다.
//!
//! | 값 | 의미 |
//! |----|------|
//! | `-2` | 키가 존재하지 않음 |
//! | `-1` | 키는 존재하지만 만료 시간이 없음 |
//! | `n >= 0` | 남은 초 |
//!
//! ## 원자성
//!
//! 개별 명령(`incr_by`, `hincr_by`, `sadd` 등)은 원자적이지만,
//! 여러 명령을 묶은 시퀀스(조회 후 증가, 증가 후 만료 설정)는 원자적이지 않습니다.

use std::collections::HashMap;

use async_trait::async_trait;

use crate::errors::AppResult;

/// 키가 존재하지 않을 때 `ttl`이 반환하는 값
pub const TTL_NO_KEY: i64 = -2;

/// 키에 만료 시간이 없을 때 `ttl`이 반환하는 값
pub const TTL_NO_EXPIRY: i64 = -1;

/// 외부 카운터 저장소 인터페이스
///
/// 모든 값은 UTF-8 문자열로 저장되며, 타입 변환은 리포지토리 계층에서 수행합니다.
#[async_trait]
pub trait CounterStore: Send + Sync {
    /// 저장소 구현 이름 (로그용)
    fn backend_name(&self) -> &'static str;

    /// 연결 상태를 확인합니다.
    async fn ping(&self) -> AppResult<()>;

    /// 문자열 값을 조회합니다. 키가 없으면 `None`.
    async fn get(&self, key: &str) -> AppResult<Option<String>>;

    /// 만료 시간과 함께 값을 저장합니다. 기존 값과 TTL은 덮어씁니다.
    async fn set_ex(&self, key: &str, value: &str, seconds: u64) -> AppResult<()>;

    /// 정수 카운터를 `delta`만큼 증가시키고 증가 후 값을 반환합니다.
    ///
    /// 키가 없으면 0에서 시작하며 만료 시간은 설정되지 않습니다.
    async fn incr_by(&self, key: &str, delta: i64) -> AppResult<i64>;

    /// 키의 만료 시간을 설정합니다. 키가 없으면 `false`.
    async fn expire(&self, key: &str, seconds: i64) -> AppResult<bool>;

    /// 남은 TTL(초)을 반환합니다. 센티널 값은 모듈 문서 참고.
    async fn ttl(&self, key: &str) -> AppResult<i64>;

    /// 키를 삭제합니다. 실제로 삭제되었으면 `true`.
    async fn del(&self, key: &str) -> AppResult<bool>;

    /// 키 존재 여부
    async fn exists(&self, key: &str) -> AppResult<bool>;

    async fn hget(&self, key: &str, field: &str) -> AppResult<Option<String>>;

    async fn hset(&self, key: &str, field: &str, value: &str) -> AppResult<()>;

    /// 해시 필드를 `delta`만큼 증가시키고 증가 후 값을 반환합니다.
    async fn hincr_by(&self, key: &str, field: &str, delta: i64) -> AppResult<i64>;

    async fn hgetall(&self, key: &str) -> AppResult<HashMap<String, String>>;

    /// 집합에 멤버를 추가합니다. 새로 추가되었으면 `true`.
    async fn sadd(&self, key: &str, member: &str) -> AppResult<bool>;

    /// 집합에서 멤버를 제거합니다. 실제로 제거되었으면 `true`.
    async fn srem(&self, key: &str, member: &str) -> AppResult<bool>;

    async fn smembers(&self, key: &str) -> AppResult<Vec<String>>;

    async fn sismember(&self, key: &str, member: &str) -> AppResult<bool>;

    async fn scard(&self, key: &str) -> AppResult<u64>;

    /// 리스트 끝에 값을 추가하고 추가 후 길이를 반환합니다.
    async fn rpush(&self, key: &str, value: &str) -> AppResult<u64>;

    /// Redis `LRANGE` 의미론 (음수 인덱스는 끝에서부터).
    async fn lrange(&self, key: &str, start: isize, stop: isize) -> AppResult<Vec<String>>;

    /// Redis `LTRIM` 의미론 (음수 인덱스는 끝에서부터).
    async fn ltrim(&self, key: &str, start: isize, stop: isize) -> AppResult<()>;
}
