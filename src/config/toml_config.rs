use crate::adapters::holiday::DEFAULT_HOLIDAY_ENDPOINT;
use crate::adapters::news::DEFAULT_NEWS_ENDPOINT;
use crate::core::progress::BarStyle;
use crate::core::render::DEFAULT_TITLE;
use crate::core::ConfigProvider;
use crate::utils::error::{BriefError, Result};
use crate::utils::validation::Validate;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::OnceLock;
use std::time::Duration;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TomlConfig {
    pub brief: BriefSection,
    pub news: NewsSection,
    pub holiday: HolidaySection,
    pub progress: ProgressSection,
    pub webhook: WebhookSection,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BriefSection {
    pub title: String,
    pub timezone: String,
    pub request_timeout_seconds: u64,
}

impl Default for BriefSection {
    fn default() -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            timezone: "Asia/Shanghai".to_string(),
            request_timeout_seconds: 10,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NewsSection {
    pub endpoint: String,
    pub count: usize,
    pub ip: Option<String>,
}

impl Default for NewsSection {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_NEWS_ENDPOINT.to_string(),
            count: 10,
            ip: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HolidaySection {
    pub endpoint: String,
    pub request_interval_ms: u64,
}

impl Default for HolidaySection {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_HOLIDAY_ENDPOINT.to_string(),
            request_interval_ms: 600,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProgressSection {
    pub bar_length: usize,
    pub style: BarStyle,
}

impl Default for ProgressSection {
    fn default() -> Self {
        Self {
            bar_length: 20,
            style: BarStyle::default(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct WebhookSection {
    pub url: Option<String>,
    /// 只渲染不推送
    pub dry_run: bool,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(BriefError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        // 處理環境變數替換
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| BriefError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${NEWS_WECHAT_WEBHOOK_URL})，未設定的保留原樣
    fn substitute_env_vars(content: &str) -> String {
        static ENV_VAR: OnceLock<Regex> = OnceLock::new();
        let re = ENV_VAR.get_or_init(|| Regex::new(r"\$\{([^}]+)\}").expect("valid regex"));

        re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        })
        .to_string()
    }
}

impl ConfigProvider for TomlConfig {
    fn webhook_url(&self) -> Option<&str> {
        if self.webhook.dry_run {
            None
        } else {
            self.webhook.url.as_deref()
        }
    }

    fn news_endpoint(&self) -> &str {
        &self.news.endpoint
    }

    fn news_count(&self) -> usize {
        self.news.count
    }

    fn news_ip(&self) -> Option<&str> {
        self.news.ip.as_deref()
    }

    fn holiday_endpoint(&self) -> &str {
        &self.holiday.endpoint
    }

    fn bar_length(&self) -> usize {
        self.progress.bar_length
    }

    fn timezone(&self) -> &str {
        &self.brief.timezone
    }

    fn request_interval(&self) -> Duration {
        Duration::from_millis(self.holiday.request_interval_ms)
    }

    fn title(&self) -> &str {
        &self.brief.title
    }

    fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.brief.request_timeout_seconds)
    }

    fn bar_style(&self) -> BarStyle {
        self.progress.style.clone()
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        super::validate_provider(self, !self.webhook.dry_run)
    }
}
