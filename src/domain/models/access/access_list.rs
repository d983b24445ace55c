//! IP 접근 목록 종류

use serde::Serialize;

/// IP 주소 집합의 종류
///
/// 두 목록 모두 만료 시간 없이 유지되며 명시적으로 제거해야 합니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AccessList {
    Whitelist,
    Blacklist,
}

impl AccessList {
    /// 목록이 저장되는 집합 키
    pub fn key(&self) -> &'static str {
        match self {
            AccessList::Whitelist => "ip:whitelist",
            AccessList::Blacklist => "ip:blacklist",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            AccessList::Whitelist => "화이트리스트",
            AccessList::Blacklist => "블랙리스트",
        }
    }
}

/// IP 접근 판정 결과
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AccessDecision {
    /// 블랙리스트에 등록됨
    Blacklisted,
    /// 화이트리스트가 비어 있어 모두 허용
    OpenAccess,
    /// 화이트리스트에 등록됨
    Whitelisted,
    /// 화이트리스트가 있지만 포함되지 않음
    NotWhitelisted,
}

impl AccessDecision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, AccessDecision::OpenAccess | AccessDecision::Whitelisted)
    }
}
