//! 고정 윈도우 레이트 리밋의 시간 단위

use std::fmt;

use serde::Serialize;

/// 고정 윈도우 단위
///
/// 각 윈도우는 `ip:rate:{name}:{subject}` 형식의 독립 카운터 키를 가지며,
/// 첫 증가 시 윈도우 길이만큼의 TTL이 설정됩니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RateWindow {
    Minute,
    Hour,
    Day,
}

impl RateWindow {
    /// 초기화 순서대로 나열한 모든 윈도우
    pub const ALL: [RateWindow; 3] = [RateWindow::Minute, RateWindow::Hour, RateWindow::Day];

    pub fn name(&self) -> &'static str {
        match self {
            RateWindow::Minute => "minute",
            RateWindow::Hour => "hour",
            RateWindow::Day => "day",
        }
    }

    /// 윈도우 길이 (초)
    pub fn seconds(&self) -> i64 {
        match self {
            RateWindow::Minute => 60,
            RateWindow::Hour => 3_600,
            RateWindow::Day => 86_400,
        }
    }

    /// `minute`, `hour`, `day` 중 하나를 파싱합니다. 대소문자는 구분하지 않습니다.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().as_str() {
            "minute" => Some(RateWindow::Minute),
            "hour" => Some(RateWindow::Hour),
            "day" => Some(RateWindow::Day),
            _ => None,
        }
    }

    /// 주체와 윈도우에 대한 카운터 키
    pub fn counter_key(&self, subject: &str) -> String {
        format!("ip:rate:{}:{}", self.name(), subject)
    }
}

impl fmt::Display for RateWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_durations() {
        assert_eq!(RateWindow::Minute.seconds(), 60);
        assert_eq!(RateWindow::Hour.seconds(), 3600);
        assert_eq!(RateWindow::Day.seconds(), 86400);
    }

    #[test]
    fn test_parse_window() {
        assert_eq!(RateWindow::parse("minute"), Some(RateWindow::Minute));
        assert_eq!(RateWindow::parse("HOUR"), Some(RateWindow::Hour));
        assert_eq!(RateWindow::parse("week"), None);
    }

    #[test]
    fn test_counter_key_format() {
        assert_eq!(
            RateWindow::Minute.counter_key("192.168.0.1"),
            "ip:rate:minute:192.168.0.1"
        );
        assert_eq!(RateWindow::Day.to_string(), "day");
    }
}
