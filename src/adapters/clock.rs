use crate::domain::ports::Clock;
use crate::utils::error::Result;
use crate::utils::validation::parse_timezone;
use chrono::{DateTime, Utc};
use chrono_tz::Tz;

/// 系統時間，換算到設定的 IANA 時區
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    tz: Tz,
}

impl SystemClock {
    pub fn new(tz: Tz) -> Self {
        Self { tz }
    }

    pub fn from_name(tz_name: &str) -> Result<Self> {
        Ok(Self::new(parse_timezone("timezone", tz_name)?))
    }
}

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Tz> {
        Utc::now().with_timezone(&self.tz)
    }
}

/// 固定時間，供測試與重放使用
#[derive(Debug, Clone)]
pub struct FixedClock {
    now: DateTime<Tz>,
}

impl FixedClock {
    pub fn new(now: DateTime<Tz>) -> Self {
        Self { now }
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Tz> {
        self.now
    }
}
