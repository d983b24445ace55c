//! 저장소 및 서버 설정 관리 모듈
//!
//! 실행 환경, HTTP 서버, 카운터 저장소, 레이트 리밋 관련 설정을 관리합니다.

use std::env;
use std::net::IpAddr;
use std::str::FromStr;

/// 애플리케이션 실행 환경
#[derive(Debug, Clone, PartialEq)]
pub enum Environment {
    /// 개발 환경
    Development,
    /// 테스트 환경
    Test,
    /// 스테이징 환경
    Staging,
    /// 프로덕션 환경
    Production,
}

impl Environment {
    /// 현재 실행 환경을 감지합니다.
    ///
    /// `ENVIRONMENT` 환경 변수를 확인하며,
    /// 설정되지 않은 경우 `Production`을 기본값으로 사용합니다.
    ///
    /// # Examples
    ///
    /// ```rust,ignore
    /// let env = Environment::current();
    /// if env.is_production() {
    ///     log::info!("프로덕션 환경");
    /// }
    /// ```
    pub fn current() -> Self {
        let raw = env::var("ENVIRONMENT").unwrap_or_else(|_| "production".to_string());
        Self::from_str(&raw)
    }

    /// 문자열에서 Environment를 생성합니다.
    ///
    /// 알 수 없는 값인 경우 `Production`을 반환합니다.
    pub fn from_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "development" | "dev" => Environment::Development,
            "test" | "testing" => Environment::Test,
            "staging" | "stage" => Environment::Staging,
            _ => Environment::Production,
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Environment::Production)
    }
}

/// 환경 변수 값을 파싱하고, 없거나 잘못된 경우 기본값을 사용합니다.
///
/// 값이 존재하지만 파싱에 실패하면 에러 로그를 남깁니다.
pub(crate) fn parse_or<T>(name: &str, raw: Option<String>, default: T) -> T
where
    T: FromStr + Copy,
{
    match raw {
        None => default,
        Some(value) => match value.trim().parse::<T>() {
            Ok(parsed) => parsed,
            Err(_) => {
                log::error!("{} 값이 올바르지 않습니다: '{}', 기본값 사용", name, value);
                default
            }
        },
    }
}

pub(crate) fn env_or<T>(name: &str, default: T) -> T
where
    T: FromStr + Copy,
{
    parse_or(name, env::var(name).ok(), default)
}

/// HTTP 서버 설정
pub struct ServerConfig;

impl ServerConfig {
    /// 서버 포트 (`PORT`, 기본값 8080)
    pub fn port() -> u16 {
        env_or("PORT", 8080)
    }

    /// 바인딩 호스트 (`HOST`, 기본값 `0.0.0.0`)
    pub fn host() -> String {
        env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string())
    }

    /// 워커 스레드 수 (`SERVER_WORKERS`, 기본값 4)
    pub fn workers() -> usize {
        env_or("SERVER_WORKERS", 4)
    }
}

/// 카운터 저장소 백엔드 종류
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StoreBackend {
    /// Redis 서버 (운영 기본값)
    Redis,
    /// 프로세스 내부 메모리 (단일 인스턴스, 테스트)
    Memory,
}

impl StoreBackend {
    pub fn from_str(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "memory" | "in-memory" | "inmemory" => StoreBackend::Memory,
            "redis" => StoreBackend::Redis,
            other => {
                log::error!("알 수 없는 STORE_BACKEND '{}', redis 사용", other);
                StoreBackend::Redis
            }
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            StoreBackend::Redis => "redis",
            StoreBackend::Memory => "memory",
        }
    }
}

/// 카운터 저장소 설정
///
/// ```bash
/// REDIS_URL=redis://localhost:6379
/// STORE_BACKEND=redis   # redis | memory
/// ```
pub struct StoreConfig;

impl StoreConfig {
    pub fn redis_url() -> String {
        env::var("REDIS_URL").unwrap_or_else(|_| "redis://localhost:6379".to_string())
    }

    pub fn backend() -> StoreBackend {
        env::var("STORE_BACKEND")
            .map(|raw| StoreBackend::from_str(&raw))
            .unwrap_or(StoreBackend::Redis)
    }
}

/// 레이트 리밋 설정
///
/// 전역 `actix-governor` 한도와 IP 단위 고정 윈도우 한도를 함께 관리합니다.
pub struct RateLimitConfig;

impl RateLimitConfig {
    /// 전역 초당 요청 보충 속도 (`RATE_LIMIT_PER_SECOND`, 기본값 10)
    pub fn per_second() -> u64 {
        env_or("RATE_LIMIT_PER_SECOND", 10)
    }

    /// 전역 버스트 크기 (`RATE_LIMIT_BURST_SIZE`, 기본값 50)
    pub fn burst_size() -> u32 {
        env_or("RATE_LIMIT_BURST_SIZE", 50)
    }

    /// IP당 분당 허용 요청 수 (`IP_LIMIT_PER_MINUTE`, 기본값 5)
    pub fn ip_per_minute() -> i64 {
        env_or("IP_LIMIT_PER_MINUTE", 5)
    }

    /// IP당 시간당 허용 요청 수 (`IP_LIMIT_PER_HOUR`, 기본값 100)
    pub fn ip_per_hour() -> i64 {
        env_or("IP_LIMIT_PER_HOUR", 100)
    }

    /// IP당 일일 허용 요청 수 (`IP_LIMIT_PER_DAY`, 기본값 1000)
    pub fn ip_per_day() -> i64 {
        env_or("IP_LIMIT_PER_DAY", 1000)
    }

    /// 전달 헤더를 신뢰할 프록시 주소 목록 (`TRUSTED_PROXIES`, 쉼표 구분, 기본값 없음)
    pub fn trusted_proxies() -> Vec<IpAddr> {
        env::var("TRUSTED_PROXIES")
            .map(|raw| parse_ip_list(&raw))
            .unwrap_or_default()
    }

    pub fn ip_limits() -> IpLimits {
        IpLimits {
            per_minute: Self::ip_per_minute(),
            per_hour: Self::ip_per_hour(),
            per_day: Self::ip_per_day(),
            trusted_proxies: Self::trusted_proxies(),
        }
    }
}

/// 쉼표로 구분된 IP 목록을 파싱합니다. 잘못된 항목은 에러 로그 후 건너뜁니다.
pub(crate) fn parse_ip_list(raw: &str) -> Vec<IpAddr> {
    raw.split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .filter_map(|entry| match entry.parse::<IpAddr>() {
            Ok(ip) => Some(ip),
            Err(_) => {
                log::error!("TRUSTED_PROXIES 항목이 올바르지 않습니다: '{}'", entry);
                None
            }
        })
        .collect()
}

/// 시작 시점에 확정되는 IP 윈도우별 한도
///
/// `trusted_proxies`에 속한 피어에서 온 요청만 `Forwarded`/`X-Forwarded-For`
/// 헤더의 클라이언트 주소를 사용합니다.
#[derive(Debug, Clone, PartialEq)]
pub struct IpLimits {
    pub per_minute: i64,
    pub per_hour: i64,
    pub per_day: i64,
    pub trusted_proxies: Vec<IpAddr>,
}

impl Default for IpLimits {
    fn default() -> Self {
        Self {
            per_minute: 5,
            per_hour: 100,
            per_day: 1000,
            trusted_proxies: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_environment_from_string() {
        assert_eq!(
            Environment::from_str("development"),
            Environment::Development
        );
        assert_eq!(Environment::from_str("test"), Environment::Test);
        assert_eq!(Environment::from_str("STAGE"), Environment::Staging);
        assert_eq!(Environment::from_str("unknown"), Environment::Production);
        assert!(Environment::from_str("prod").is_production());
    }

    #[test]
    fn test_store_backend_from_string() {
        assert_eq!(StoreBackend::from_str("memory"), StoreBackend::Memory);
        assert_eq!(StoreBackend::from_str(" Redis "), StoreBackend::Redis);
        assert_eq!(StoreBackend::from_str("etcd"), StoreBackend::Redis);
        assert_eq!(StoreBackend::Memory.as_str(), "memory");
    }

    #[test]
    fn test_parse_or_falls_back_on_invalid_value() {
        assert_eq!(parse_or("PORT", Some("9090".to_string()), 8080u16), 9090);
        assert_eq!(parse_or("PORT", Some("abc".to_string()), 8080u16), 8080);
        assert_eq!(parse_or("PORT", None, 8080u16), 8080);
        assert_eq!(parse_or("IP_LIMIT_PER_MINUTE", Some(" 7 ".to_string()), 5i64), 7);
    }

    #[test]
    fn test_server_config_defaults() {
        if env::var("PORT").is_err() {
            assert_eq!(ServerConfig::port(), 8080);
        }

        if env::var("HOST").is_err() {
            assert_eq!(ServerConfig::host(), "0.0.0.0");
        }
    }

    #[test]
    fn test_ip_limits_default() {
        let limits = IpLimits::default();
        assert_eq!(limits.per_minute, 5);
        assert_eq!(limits.per_hour, 100);
        assert_eq!(limits.per_day, 1000);
        assert!(limits.trusted_proxies.is_empty());
    }

    #[test]
    fn test_parse_ip_list_skips_invalid_entries() {
        let parsed = parse_ip_list(" 10.0.0.1, proxy.local,,::1 ");

        assert_eq!(
            parsed,
            vec!["10.0.0.1".parse::<IpAddr>().unwrap(), "::1".parse::<IpAddr>().unwrap()]
        );
        assert!(parse_ip_list("").is_empty());
    }
}
