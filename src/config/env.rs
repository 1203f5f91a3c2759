//! Configuration read from environment variables, used by the trigger function.
//!
//! | Variable | Default |
//! |---|---|
//! | `NEWS_WECHAT_WEBHOOK_URL` | required |
//! | `TRIGGER_SECRET` | unset (only scheduler calls are accepted) |
//! | `NEWS_ENDPOINT` / `NEWS_COUNT` / `NEWS_IP` | topurl API, 10, unset |
//! | `HOLIDAY_ENDPOINT` / `REQUEST_INTERVAL_MS` | appworlds API, 600 |
//! | `BAR_LENGTH` | 14 |
//! | `BRIEF_TIMEZONE` / `BRIEF_TITLE` | `Asia/Shanghai`, default title |

use crate::adapters::holiday::DEFAULT_HOLIDAY_ENDPOINT;
use crate::adapters::news::DEFAULT_NEWS_ENDPOINT;
use crate::core::render::DEFAULT_TITLE;
use crate::core::ConfigProvider;
use crate::utils::error::{BriefError, Result};
use crate::utils::validation::Validate;
use std::str::FromStr;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct EnvConfig {
    pub webhook_url: Option<String>,
    pub trigger_secret: Option<String>,
    pub news_endpoint: String,
    pub news_count: usize,
    pub news_ip: Option<String>,
    pub holiday_endpoint: String,
    pub request_interval_ms: u64,
    pub bar_length: usize,
    pub timezone: String,
    pub title: String,
}

/// 讀取並解析數值；格式錯誤時報錯而不是退回預設值
fn read_parsed<T, F>(provider: &F, name: &str, default: T) -> Result<T>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    match provider(name) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| BriefError::InvalidConfiguration {
                field: name.to_string(),
                value: raw.clone(),
                reason: "not a valid non-negative integer".to_string(),
            }),
        None => Ok(default),
    }
}

impl EnvConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_provider(|name| std::env::var(name).ok())
    }

    /// 以自訂的來源讀取，方便測試
    pub fn from_provider<F>(provider: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let text = |name: &str| provider(name).filter(|v| !v.trim().is_empty());

        Ok(Self {
            webhook_url: text("NEWS_WECHAT_WEBHOOK_URL"),
            trigger_secret: text("TRIGGER_SECRET"),
            news_endpoint: text("NEWS_ENDPOINT")
                .unwrap_or_else(|| DEFAULT_NEWS_ENDPOINT.to_string()),
            news_count: read_parsed(&provider, "NEWS_COUNT", 10)?,
            news_ip: text("NEWS_IP"),
            holiday_endpoint: text("HOLIDAY_ENDPOINT")
                .unwrap_or_else(|| DEFAULT_HOLIDAY_ENDPOINT.to_string()),
            request_interval_ms: read_parsed(&provider, "REQUEST_INTERVAL_MS", 600)?,
            bar_length: read_parsed(&provider, "BAR_LENGTH", 14)?,
            timezone: text("BRIEF_TIMEZONE").unwrap_or_else(|| "Asia/Shanghai".to_string()),
            title: text("BRIEF_TITLE").unwrap_or_else(|| DEFAULT_TITLE.to_string()),
        })
    }
}

impl ConfigProvider for EnvConfig {
    fn webhook_url(&self) -> Option<&str> {
        self.webhook_url.as_deref()
    }

    fn news_endpoint(&self) -> &str {
        &self.news_endpoint
    }

    fn news_count(&self) -> usize {
        self.news_count
    }

    fn news_ip(&self) -> Option<&str> {
        self.news_ip.as_deref()
    }

    fn holiday_endpoint(&self) -> &str {
        &self.holiday_endpoint
    }

    fn bar_length(&self) -> usize {
        self.bar_length
    }

    fn timezone(&self) -> &str {
        &self.timezone
    }

    fn request_interval(&self) -> Duration {
        Duration::from_millis(self.request_interval_ms)
    }

    fn title(&self) -> &str {
        &self.title
    }
}

impl Validate for EnvConfig {
    fn validate(&self) -> Result<()> {
        super::validate_provider(self, true)
    }
}
