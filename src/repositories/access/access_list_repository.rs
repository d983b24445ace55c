use std::sync::Arc;

use crate::caching::CounterStore;
use crate::domain::models::access::AccessList;
use crate::errors::AppResult;

/// IP 화이트리스트/블랙리스트 집합을 관리하는 Repository
///
/// 집합 연산만 사용하므로 같은 IP를 여러 번 추가해도 한 번만 저장됩니다.
pub struct AccessListRepository {
    store: Arc<dyn CounterStore>,
}

impl AccessListRepository {
    pub fn new(store: Arc<dyn CounterStore>) -> Self {
        Self { store }
    }

    /// 새로 추가되었으면 `true`
    pub async fn add(&self, list: AccessList, ip: &str) -> AppResult<bool> {
        self.store.sadd(list.key(), ip).await
    }

    /// 실제로 제거되었으면 `true`
    pub async fn remove(&self, list: AccessList, ip: &str) -> AppResult<bool> {
        self.store.srem(list.key(), ip).await
    }

    pub async fn contains(&self, list: AccessList, ip: &str) -> AppResult<bool> {
        self.store.sismember(list.key(), ip).await
    }

    /// 정렬된 멤버 목록
    pub async fn members(&self, list: AccessList) -> AppResult<Vec<String>> {
        let mut members = self.store.smembers(list.key()).await?;
        members.sort();
        Ok(members)
    }

    pub async fn size(&self, list: AccessList) -> AppResult<u64> {
        self.store.scard(list.key()).await
    }
}
