//! IP 화이트리스트/블랙리스트 접근 제어
//!
//! ## 판정 규칙
//!
//! 1. 블랙리스트에 있으면 거부 (화이트리스트 등록 여부와 무관)
//! 2. 화이트리스트가 비어 있으면 허용
//! 3. 화이트리스트에 있으면 허용, 없으면 거부

use std::sync::Arc;

use crate::caching::CounterStore;
use crate::domain::models::access::{AccessDecision, AccessList};
use crate::errors::AppResult;
use crate::repositories::AccessListRepository;

pub struct IpRestrictionService {
    repository: AccessListRepository,
}

impl IpRestrictionService {
    pub fn new(store: Arc<dyn CounterStore>) -> Self {
        Self {
            repository: AccessListRepository::new(store),
        }
    }

    /// 접근 판정과 그 근거를 반환합니다.
    pub async fn decide(&self, ip: &str) -> AppResult<AccessDecision> {
        if self.repository.contains(AccessList::Blacklist, ip).await? {
            log::warn!("블랙리스트 IP 접근 차단: {}", ip);
            return Ok(AccessDecision::Blacklisted);
        }

        if self.repository.size(AccessList::Whitelist).await? == 0 {
            return Ok(AccessDecision::OpenAccess);
        }

        if self.repository.contains(AccessList::Whitelist, ip).await? {
            Ok(AccessDecision::Whitelisted)
        } else {
            log::warn!("화이트리스트에 없는 IP 접근 차단: {}", ip);
            Ok(AccessDecision::NotWhitelisted)
        }
    }

    pub async fn is_allowed(&self, ip: &str) -> AppResult<bool> {
        Ok(self.decide(ip).await?.is_allowed())
    }

    pub async fn add_to_whitelist(&self, ip: &str) -> AppResult<bool> {
        self.add(AccessList::Whitelist, ip).await
    }

    pub async fn add_to_blacklist(&self, ip: &str) -> AppResult<bool> {
        self.add(AccessList::Blacklist, ip).await
    }

    pub async fn remove_from_whitelist(&self, ip: &str) -> AppResult<bool> {
        self.remove(AccessList::Whitelist, ip).await
    }

    pub async fn remove_from_blacklist(&self, ip: &str) -> AppResult<bool> {
        self.remove(AccessList::Blacklist, ip).await
    }

    pub async fn is_whitelisted(&self, ip: &str) -> AppResult<bool> {
        self.repository.contains(AccessList::Whitelist, ip).await
    }

    pub async fn is_blacklisted(&self, ip: &str) -> AppResult<bool> {
        self.repository.contains(AccessList::Blacklist, ip).await
    }

    pub async fn whitelist(&self) -> AppResult<Vec<String>> {
        self.repository.members(AccessList::Whitelist).await
    }

    pub async fn blacklist(&self) -> AppResult<Vec<String>> {
        self.repository.members(AccessList::Blacklist).await
    }

    pub async fn whitelist_size(&self) -> AppResult<u64> {
        self.repository.size(AccessList::Whitelist).await
    }

    pub async fn blacklist_size(&self) -> AppResult<u64> {
        self.repository.size(AccessList::Blacklist).await
    }

    async fn add(&self, list: AccessList, ip: &str) -> AppResult<bool> {
        let added = self.repository.add(list, ip).await?;
        log::info!("{}에 IP 추가: {} (신규: {})", list.label(), ip, added);
        Ok(added)
    }

    async fn remove(&self, list: AccessList, ip: &str) -> AppResult<bool> {
        let removed = self.repository.remove(list, ip).await?;
        log::info!("{}에서 IP 제거: {} (존재: {})", list.label(), ip, removed);
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::caching::MemoryStore;

    fn service() -> IpRestrictionService {
        IpRestrictionService::new(Arc::new(MemoryStore::new()))
    }

    #[actix_web::test]
    async fn test_empty_whitelist_allows_everyone() {
        let service = service();

        assert!(service.is_allowed("1.2.3.4").await.unwrap());
        assert_eq!(service.decide("1.2.3.4").await.unwrap(), AccessDecision::OpenAccess);
    }

    #[actix_web::test]
    async fn test_blacklist_wins_over_whitelist() {
        let service = service();

        service.add_to_whitelist("1.2.3.4").await.unwrap();
        assert!(service.is_allowed("1.2.3.4").await.unwrap());

        service.add_to_blacklist("1.2.3.4").await.unwrap();
        assert!(!service.is_allowed("1.2.3.4").await.unwrap());
        assert_eq!(service.decide("1.2.3.4").await.unwrap(), AccessDecision::Blacklisted);
    }

    #[actix_web::test]
    async fn test_non_empty_whitelist_restricts_others() {
        let service = service();
        service.add_to_whitelist("10.0.0.1").await.unwrap();

        assert!(service.is_allowed("10.0.0.1").await.unwrap());
        assert!(!service.is_allowed("10.0.0.2").await.unwrap());

        service.remove_from_whitelist("10.0.0.1").await.unwrap();
        assert!(service.is_allowed("10.0.0.2").await.unwrap());
    }

    #[actix_web::test]
    async fn test_membership_queries() {
        let service = service();

        assert!(service.add_to_blacklist("10.0.0.9").await.unwrap());
        assert!(!service.add_to_blacklist("10.0.0.9").await.unwrap());
        service.add_to_blacklist("10.0.0.8").await.unwrap();

        assert!(service.is_blacklisted("10.0.0.9").await.unwrap());
        assert!(!service.is_whitelisted("10.0.0.9").await.unwrap());
        assert_eq!(service.blacklist_size().await.unwrap(), 2);
        assert_eq!(service.blacklist().await.unwrap(), vec!["10.0.0.8", "10.0.0.9"]);
        assert_eq!(service.whitelist_size().await.unwrap(), 0);
        assert!(service.whitelist().await.unwrap().is_empty());

        assert!(service.remove_from_blacklist("10.0.0.9").await.unwrap());
        assert!(!service.remove_from_blacklist("10.0.0.9").await.unwrap());
    }
}
