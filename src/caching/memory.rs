//! # 인메모리 카운터 저장소
//!
//! Redis 없이 동작하는 [`CounterStore`] 구현입니다.
//! 단위 테스트와 `STORE_BACKEND=memory` 설정의 단일 인스턴스 실행에 사용됩니다.
//!
//! Redis와 동일한 의미론을 따릅니다.
//!
//! - 만료된 키는 접근 시점에 제거되어 존재하지 않는 키로 취급
//! - 다시 접근되지 않는 만료 키는 [`SWEEP_INTERVAL`]마다 일괄 제거
//! - `TTL` 센티널 값 (`-2`, `-1`)
//! - 다른 타입의 키에 접근하면 `WRONGTYPE` 에러
//! - 정수가 아닌 값에 `INCRBY`/`HINCRBY` 시 에러
//! - `LRANGE`/`LTRIM`의 음수 인덱스

use std::collections::{HashMap, HashSet};
use std::sync::{Mutex, MutexGuard};
use std::time::{Duration, Instant};

use async_trait::async_trait;

use crate::caching::store::{CounterStore, TTL_NO_EXPIRY, TTL_NO_KEY};
use crate::errors::{AppError, AppResult};

/// 만료 항목 일괄 정리 주기
pub const SWEEP_INTERVAL: Duration = Duration::from_secs(1);

/// 저장된 값의 자료형
#[derive(Debug, Clone)]
enum Value {
    Str(String),
    Hash(HashMap<String, String>),
    Set(HashSet<String>),
    List(Vec<String>),
}

#[derive(Debug, Clone)]
struct Entry {
    value: Value,
    expires_at: Option<Instant>,
}

impl Entry {
    fn new(value: Value) -> Self {
        Self { value, expires_at: None }
    }

    fn is_expired(&self, now: Instant) -> bool {
        matches!(self.expires_at, Some(at) if at <= now)
    }
}

/// 프로세스 내부 카운터 저장소
#[derive(Debug)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, Entry>>,
    last_sweep: Mutex<Instant>,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            last_sweep: Mutex::new(Instant::now()),
        }
    }
}

fn lock_failed() -> AppError {
    AppError::InternalError("메모리 저장소 잠금 실패".to_string())
}

fn remove_expired(entries: &mut HashMap<String, Entry>, now: Instant) -> usize {
    let before = entries.len();
    entries.retain(|_, entry| !entry.is_expired(now));
    before - entries.len()
}

fn wrong_type(key: &str) -> AppError {
    AppError::RedisError(format!(
        "WRONGTYPE Operation against a key holding the wrong kind of value: {}",
        key
    ))
}

fn not_integer(key: &str) -> AppError {
    AppError::RedisError(format!("ERR value is not an integer or out of range: {}", key))
}

/// Redis 범위 인덱스를 `[start, end)` 슬라이스 범위로 변환합니다.
fn normalize_range(len: usize, start: isize, stop: isize) -> Option<(usize, usize)> {
    let len = len as isize;
    let start = if start < 0 { (len + start).max(0) } else { start };
    let stop = if stop < 0 { len + stop } else { stop.min(len - 1) };

    if len == 0 || start > stop || start >= len {
        return None;
    }
    Some((start as usize, stop as usize + 1))
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// 만료된 항목을 제거한 뒤 잠금을 반환합니다.
    ///
    /// 마지막 정리 이후 [`SWEEP_INTERVAL`]이 지났으면 전체 만료 항목도 함께 제거합니다.
    fn lock(&self, key: &str) -> AppResult<MutexGuard<'_, HashMap<String, Entry>>> {
        let mut entries = self.entries.lock().map_err(|_| lock_failed())?;

        let now = Instant::now();
        let mut last_sweep = self.last_sweep.lock().map_err(|_| lock_failed())?;
        if now.duration_since(*last_sweep) >= SWEEP_INTERVAL {
            let removed = remove_expired(&mut entries, now);
            if removed > 0 {
                log::debug!("메모리 저장소 만료 항목 {}개 정리", removed);
            }
            *last_sweep = now;
        } else if entries.get(key).is_some_and(|entry| entry.is_expired(now)) {
            entries.remove(key);
        }
        Ok(entries)
    }

    /// 만료된 모든 항목을 즉시 제거하고 제거된 개수를 반환합니다.
    pub fn cleanup_expired(&self) -> AppResult<usize> {
        let mut entries = self.entries.lock().map_err(|_| lock_failed())?;
        let now = Instant::now();
        let removed = remove_expired(&mut entries, now);

        let mut last_sweep = self.last_sweep.lock().map_err(|_| lock_failed())?;
        *last_sweep = now;
        Ok(removed)
    }

    /// 키의 만료 시점을 즉시 지나게 합니다.
    ///
    /// 실제 시간 경과 없이 TTL 만료 이후의 동작을 재현할 때 사용합니다.
    pub fn expire_now(&self, key: &str) -> AppResult<bool> {
        let mut entries = self.lock(key)?;
        Ok(entries.remove(key).is_some())
    }
}

#[async_trait]
impl CounterStore for MemoryStore {
    fn backend_name(&self) -> &'static str {
        "memory"
    }

    async fn ping(&self) -> AppResult<()> {
        Ok(())
    }

    async fn get(&self, key: &str) -> AppResult<Option<String>> {
        let entries = self.lock(key)?;
        match entries.get(key).map(|e| &e.value) {
            None => Ok(None),
            Some(Value::Str(s)) => Ok(Some(s.clone())),
            Some(_) => Err(wrong_type(key)),
        }
    }

    async fn set_ex(&self, key: &str, value: &str, seconds: u64) -> AppResult<()> {
        if seconds == 0 {
            return Err(AppError::RedisError(
                "ERR invalid expire time in 'setex' command".to_string(),
            ));
        }
        let mut entries = self.lock(key)?;
        entries.insert(
            key.to_string(),
            Entry {
                value: Value::Str(value.to_string()),
                expires_at: Some(Instant::now() + Duration::from_secs(seconds)),
            },
        );
        Ok(())
    }

    async fn incr_by(&self, key: &str, delta: i64) -> AppResult<i64> {
        let mut entries = self.lock(key)?;
        let entry = entries
            .entry(key.to_string())
            .or_insert_with(|| Entry::new(Value::Str("0".to_string())));

        match &mut entry.value {
            Value::Str(s) => {
                let current: i64 = s.parse().map_err(|_| not_integer(key))?;
                let next = current.checked_add(delta).ok_or_else(|| not_integer(key))?;
                *s = next.to_string();
                Ok(next)
            }
            _ => Err(wrong_type(key)),
        }
    }

    async fn expire(&self, key: &str, seconds: i64) -> AppResult<bool> {
        let mut entries = self.lock(key)?;
        if seconds <= 0 {
            return Ok(entries.remove(key).is_some());
        }
        match entries.get_mut(key) {
            Some(entry) => {
                entry.expires_at = Some(Instant::now() + Duration::from_secs(seconds as u64));
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn ttl(&self, key: &str) -> AppResult<i64> {
        let entries = self.lock(key)?;
        let ttl = match entries.get(key) {
            None => TTL_NO_KEY,
            Some(Entry { expires_at: None, .. }) => TTL_NO_EXPIRY,
            Some(Entry { expires_at: Some(at), .. }) => {
                let remaining = at.saturating_duration_since(Instant::now());
                ((remaining.as_millis() + 500) / 1000) as i64
            }
        };
        Ok(ttl)
    }

    async fn del(&self, key: &str) -> AppResult<bool> {
        let mut entries = self.lock(key)?;
        Ok(entries.remove(key).is_some())
    }

    async fn exists(&self, key: &str) -> AppResult<bool> {
        let entries = self.lock(key)?;
        Ok(entries.contains_key(key))
    }

    async fn hget(&self, key: &str, field: &str) -> AppResult<Option<String>> {
        let entries = self.lock(key)?;
        match entries.get(key).map(|e| &e.value) {
            None => Ok(None),
            Some(Value::Hash(h)) => Ok(h.get(field).cloned()),
            Some(_) => Err(wrong_type(key)),
        }
    }

    async fn hset(&self, key: &str, field: &str, value: &str) -> AppResult<()> {
        let mut entries = self.lock(key)?;
        let entry = entries
            .entry(key.to_string())
            .or_insert_with(|| Entry::new(Value::Hash(HashMap::new())));

        match &mut entry.value {
            Value::Hash(h) => {
                h.insert(field.to_string(), value.to_string());
                Ok(())
            }
            _ => Err(wrong_type(key)),
        }
    }

    async fn hincr_by(&self, key: &str, field: &str, delta: i64) -> AppResult<i64> {
        let mut entries = self.lock(key)?;
        let entry = entries
            .entry(key.to_string())
            .or_insert_with(|| Entry::new(Value::Hash(HashMap::new())));

        match &mut entry.value {
            Value::Hash(h) => {
                let current: i64 = match h.get(field) {
                    Some(raw) => raw.parse().map_err(|_| not_integer(key))?,
                    None => 0,
                };
                let next = current.checked_add(delta).ok_or_else(|| not_integer(key))?;
                h.insert(field.to_string(), next.to_string());
                Ok(next)
            }
            _ => Err(wrong_type(key)),
        }
    }

    async fn hgetall(&self, key: &str) -> AppResult<HashMap<String, String>> {
        let entries = self.lock(key)?;
        match entries.get(key).map(|e| &e.value) {
            None => Ok(HashMap::new()),
            Some(Value::Hash(h)) => Ok(h.clone()),
            Some(_) => Err(wrong_type(key)),
        }
    }

    async fn sadd(&self, key: &str, member: &str) -> AppResult<bool> {
        let mut entries = self.lock(key)?;
        let entry = entries
            .entry(key.to_string())
            .or_insert_with(|| Entry::new(Value::Set(HashSet::new())));

        match &mut entry.value {
            Value::Set(s) => Ok(s.insert(member.to_string())),
            _ => Err(wrong_type(key)),
        }
    }

    async fn srem(&self, key: &str, member: &str) -> AppResult<bool> {
        let mut entries = self.lock(key)?;
        let (removed, now_empty) = match entries.get_mut(key).map(|e| &mut e.value) {
            None => return Ok(false),
            Some(Value::Set(s)) => (s.remove(member), s.is_empty()),
            Some(_) => return Err(wrong_type(key)),
        };
        // Redis는 빈 집합을 보관하지 않는다
        if now_empty {
            entries.remove(key);
        }
        Ok(removed)
    }

    async fn smembers(&self, key: &str) -> AppResult<Vec<String>> {
        let entries = self.lock(key)?;
        match entries.get(key).map(|e| &e.value) {
            None => Ok(Vec::new()),
            Some(Value::Set(s)) => Ok(s.iter().cloned().collect()),
            Some(_) => Err(wrong_type(key)),
        }
    }

    async fn sismember(&self, key: &str, member: &str) -> AppResult<bool> {
        let entries = self.lock(key)?;
        match entries.get(key).map(|e| &e.value) {
            None => Ok(false),
            Some(Value::Set(s)) => Ok(s.contains(member)),
            Some(_) => Err(wrong_type(key)),
        }
    }

    async fn scard(&self, key: &str) -> AppResult<u64> {
        let entries = self.lock(key)?;
        match entries.get(key).map(|e| &e.value) {
            None => Ok(0),
            Some(Value::Set(s)) => Ok(s.len() as u64),
            Some(_) => Err(wrong_type(key)),
        }
    }

    async fn rpush(&self, key: &str, value: &str) -> AppResult<u64> {
        let mut entries = self.lock(key)?;
        let entry = entries
            .entry(key.to_string())
            .or_insert_with(|| Entry::new(Value::List(Vec::new())));

        match &mut entry.value {
            Value::List(l) => {
                l.push(value.to_string());
                Ok(l.len() as u64)
            }
            _ => Err(wrong_type(key)),
        }
    }

    async fn lrange(&self, key: &str, start: isize, stop: isize) -> AppResult<Vec<String>> {
        let entries = self.lock(key)?;
        match entries.get(key).map(|e| &e.value) {
            None => Ok(Vec::new()),
            Some(Value::List(l)) => Ok(normalize_range(l.len(), start, stop)
                .map(|(from, to)| l[from..to].to_vec())
                .unwrap_or_default()),
            Some(_) => Err(wrong_type(key)),
        }
    }

    async fn ltrim(&self, key: &str, start: isize, stop: isize) -> AppResult<()> {
        let mut entries = self.lock(key)?;
        let remove_key = match entries.get_mut(key).map(|e| &mut e.value) {
            None => return Ok(()),
            Some(Value::List(l)) => match normalize_range(l.len(), start, stop) {
                Some((from, to)) => {
                    *l = l[from..to].to_vec();
                    false
                }
                None => true,
            },
            Some(_) => return Err(wrong_type(key)),
        };
        if remove_key {
            entries.remove(key);
        }
        Ok(())
    }
}
