use std::future::{ready, Ready};
use actix_web::{Error, FromRequest, HttpMessage, HttpRequest};
use serde::{Deserialize, Serialize};

use crate::domain::models::token::SessionClaims;

/// 세션 검증을 통과한 요청의 사용자 정보
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthenticatedUser {
    /// 토큰 주체 (사용자 ID)
    pub user_id: String,

    /// 사용자 역할
    pub role: String,

    /// 토큰 만료 시간 (Unix timestamp)
    pub expires_at: i64,

    /// 로그용 토큰 지문
    pub token_fingerprint: String,
}

impl AuthenticatedUser {
    pub fn from_claims(claims: SessionClaims, token_fingerprint: String) -> Self {
        Self {
            user_id: claims.sub,
            role: claims.role,
            expires_at: claims.exp,
            token_fingerprint,
        }
    }

    /// 특정 역할을 보유하고 있는지 확인 (대소문자 무관)
    pub fn has_role(&self, role: &str) -> bool {
        self.role.eq_ignore_ascii_case(role)
    }

    /// 여러 역할 중 하나라도 보유하고 있는지 확인
    pub fn has_any_role(&self, roles: &[&str]) -> bool {
        roles.iter().any(|&role| self.has_role(role))
    }

    pub fn is_admin(&self) -> bool {
        self.has_role("ADMIN")
    }
}

/// ActixWeb FromRequest trait 구현
///
/// `AuthMiddleware`가 요청 확장에 넣어둔 사용자 정보를 꺼냅니다.
impl FromRequest for AuthenticatedUser {
    type Error = Error;
    type Future = Ready<actix_web::Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut actix_web::dev::Payload) -> Self::Future {
        match req.extensions().get::<AuthenticatedUser>() {
            Some(user) => ready(Ok(user.clone())),
            None => ready(Err(actix_web::error::ErrorUnauthorized(
                "인증되지 않은 요청입니다"
            ))),
        }
    }
}

/// 선택적 인증 사용자 추출자
#[derive(Debug, Clone)]
pub struct OptionalUser(pub Option<AuthenticatedUser>);

impl FromRequest for OptionalUser {
    type Error = Error;
    type Future = Ready<actix_web::Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut actix_web::dev::Payload) -> Self::Future {
        let user = req.extensions().get::<AuthenticatedUser>().cloned();
        ready(Ok(OptionalUser(user)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(role: &str) -> AuthenticatedUser {
        AuthenticatedUser::from_claims(
            SessionClaims {
                sub: "u1".to_string(),
                role: role.to_string(),
                iss: "access-guard".to_string(),
                iat: 0,
                exp: 3600,
                jti: "jti-1".to_string(),
            },
            "abcd1234".to_string(),
        )
    }

    #[test]
    fn test_role_checks() {
        let admin = user("ADMIN");
        assert!(admin.is_admin());
        assert!(admin.has_role("admin"));

        let member = user("USER");
        assert!(!member.is_admin());
        assert!(member.has_any_role(&["ADMIN", "USER"]));
        assert_eq!(member.user_id, "u1");
    }
}
