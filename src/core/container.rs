//! 서비스 컨테이너
//!
//! 시작 시 설정을 읽어 카운터 저장소와 서비스들을 한 번 생성하고,
//! `web::Data<ServiceContainer>`로 모든 핸들러와 미들웨어에 공유합니다.
//! 생성 이후 컨테이너의 어떤 필드도 변경되지 않습니다.

use std::sync::Arc;

use crate::caching::{CounterStore, MemoryStore, RedisStore};
use crate::config::{IpLimits, JwtSettings, RateLimitConfig, StoreBackend, StoreConfig};
use crate::errors::AppResult;
use crate::services::access::IpRestrictionService;
use crate::services::auth::{BlacklistService, JwtService, SessionService};
use crate::services::rate_limit::{IpRateLimitService, QuotaService, UserRateLimitService};
use crate::services::usage::TokenUsageService;
use crate::utils::display_terminal::{
    print_boxed_title, print_final_summary, print_step_complete, print_step_start, print_sub_task,
};

/// 애플리케이션 전역 의존성 묶음
pub struct ServiceContainer {
    pub store: Arc<dyn CounterStore>,
    pub ip_limits: IpLimits,
    pub ip_rate_limit: Arc<IpRateLimitService>,
    pub user_rate_limit: Arc<UserRateLimitService>,
    pub token_usage: Arc<TokenUsageService>,
    pub quota: Arc<QuotaService>,
    pub ip_restriction: Arc<IpRestrictionService>,
    pub jwt: Arc<JwtService>,
    pub blacklist: Arc<BlacklistService>,
    pub sessions: Arc<SessionService>,
}

impl ServiceContainer {
    /// 이미 만들어진 저장소와 설정으로 서비스들을 구성합니다.
    pub fn new(store: Arc<dyn CounterStore>, jwt_settings: &JwtSettings, ip_limits: IpLimits) -> Self {
        let user_rate_limit = Arc::new(UserRateLimitService::new(store.clone()));
        let token_usage = Arc::new(TokenUsageService::new(store.clone()));
        let jwt = Arc::new(JwtService::new(jwt_settings));
        let blacklist = Arc::new(BlacklistService::new(store.clone(), jwt.clone()));

        Self {
            ip_limits,
            ip_rate_limit: Arc::new(IpRateLimitService::new(store.clone())),
            quota: Arc::new(QuotaService::new(user_rate_limit.clone(), token_usage.clone())),
            ip_restriction: Arc::new(IpRestrictionService::new(store.clone())),
            sessions: Arc::new(SessionService::new(
                store.clone(),
                jwt.clone(),
                blacklist.clone(),
                jwt_settings,
            )),
            user_rate_limit,
            token_usage,
            jwt,
            blacklist,
            store,
        }
    }

    /// 인메모리 저장소와 임시 서명 키를 사용하는 컨테이너
    pub fn in_memory(jwt_settings: &JwtSettings) -> Self {
        Self::new(Arc::new(MemoryStore::new()), jwt_settings, IpLimits::default())
    }

    /// 환경 변수 설정으로 저장소에 연결하고 모든 서비스를 생성합니다.
    ///
    /// ## 에러 케이스
    ///
    /// - Redis 연결 실패
    /// - `JWT_SECRET` 형식 오류
    pub async fn initialize() -> AppResult<Self> {
        print_boxed_title("ACCESS GUARD STARTUP");

        print_step_start(1, "Counter store");
        let store = connect_store(StoreConfig::backend()).await?;
        print_sub_task(store.backend_name(), "connected");
        print_step_complete(1, "Counter store", 1);

        print_step_start(2, "Configuration");
        let jwt_settings = JwtSettings::from_env()?;
        let ip_limits = RateLimitConfig::ip_limits();
        print_sub_task(
            "signing key",
            if jwt_settings.signing_key.is_ephemeral() { "ephemeral" } else { "JWT_SECRET" },
        );
        print_sub_task(
            "ip limits",
            &format!("{}/min, {}/hour, {}/day", ip_limits.per_minute, ip_limits.per_hour, ip_limits.per_day),
        );
        print_step_complete(2, "Configuration", 2);

        print_step_start(3, "Services");
        let container = Self::new(store, &jwt_settings, ip_limits);
        print_step_complete(3, "Services", 8);

        print_final_summary(container.store.backend_name(), 4, 8);
        Ok(container)
    }
}

async fn connect_store(backend: StoreBackend) -> AppResult<Arc<dyn CounterStore>> {
    match backend {
        StoreBackend::Redis => {
            let store = RedisStore::connect(&StoreConfig::redis_url()).await?;
            Ok(Arc::new(store))
        }
        StoreBackend::Memory => {
            log::warn!("인메모리 저장소 사용 - 카운터가 인스턴스 간에 공유되지 않습니다");
            Ok(Arc::new(MemoryStore::new()))
        }
    }
}
