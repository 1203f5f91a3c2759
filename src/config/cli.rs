use crate::adapters::holiday::DEFAULT_HOLIDAY_ENDPOINT;
use crate::adapters::news::DEFAULT_NEWS_ENDPOINT;
use crate::core::render::DEFAULT_TITLE;
use crate::config::toml_config::TomlConfig;
use crate::core::ConfigProvider;
use crate::utils::validation::Validate;
use clap::parser::ValueSource;
use clap::{ArgMatches, CommandFactory, FromArgMatches, Parser};
use std::time::Duration;

#[derive(Debug, Clone, Parser)]
#[command(name = "daily-brief")]
#[command(about = "Push a daily news, weather and year-progress brief to a group chat bot")]
pub struct CliConfig {
    /// Group bot webhook URL
    #[arg(env = "NEWS_WECHAT_WEBHOOK_URL")]
    pub webhook_url: Option<String>,

    /// Load settings from a TOML file; flags given explicitly still override it
    #[arg(short, long)]
    pub config: Option<String>,

    #[arg(long, default_value = DEFAULT_NEWS_ENDPOINT)]
    pub news_endpoint: String,

    #[arg(long, default_value = "10")]
    pub news_count: usize,

    /// Client IP sent to the news API, used to pick the weather city
    #[arg(long)]
    pub news_ip: Option<String>,

    #[arg(long, default_value = DEFAULT_HOLIDAY_ENDPOINT)]
    pub holiday_endpoint: String,

    #[arg(long, default_value = "20")]
    pub bar_length: usize,

    /// IANA timezone used for "today" and the year boundaries
    #[arg(long, default_value = "Asia/Shanghai")]
    pub timezone: String,

    /// Pause between holiday API calls
    #[arg(long, default_value = "600")]
    pub request_interval_ms: u64,

    #[arg(long, default_value = DEFAULT_TITLE)]
    pub title: String,

    /// Render as of this RFC 3339 time instead of now
    #[arg(long)]
    pub at: Option<String>,

    /// Render and print the message without posting it
    #[arg(long)]
    pub dry_run: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl CliConfig {
    /// 解析命令列並保留參數來源，覆蓋設定檔時用來判斷哪些是使用者明確給的
    pub fn parse_with_matches() -> (Self, ArgMatches) {
        let matches = Self::command().get_matches();
        match Self::from_arg_matches(&matches) {
            Ok(cli) => (cli, matches),
            Err(e) => e.exit(),
        }
    }

    /// 命令列上明確給出的參數覆蓋設定檔；只有預設值的參數不動設定檔。
    /// 環境變數給的 webhook 只在設定檔沒有 url 時補上。
    pub fn apply_overrides(&self, matches: &ArgMatches, config: &mut TomlConfig) {
        let given = |id: &str| matches.value_source(id) == Some(ValueSource::CommandLine);

        match matches.value_source("webhook_url") {
            Some(ValueSource::CommandLine) => config.webhook.url = self.webhook_url.clone(),
            Some(ValueSource::EnvVariable) if config.webhook.url.is_none() => {
                config.webhook.url = self.webhook_url.clone()
            }
            _ => {}
        }
        if given("news_endpoint") {
            config.news.endpoint = self.news_endpoint.clone();
        }
        if given("news_count") {
            config.news.count = self.news_count;
        }
        if given("news_ip") {
            config.news.ip = self.news_ip.clone();
        }
        if given("holiday_endpoint") {
            config.holiday.endpoint = self.holiday_endpoint.clone();
        }
        if given("request_interval_ms") {
            config.holiday.request_interval_ms = self.request_interval_ms;
        }
        if given("bar_length") {
            config.progress.bar_length = self.bar_length;
        }
        if given("timezone") {
            config.brief.timezone = self.timezone.clone();
        }
        if given("title") {
            config.brief.title = self.title.clone();
        }
        if self.dry_run {
            config.webhook.dry_run = true;
        }
    }
}

impl ConfigProvider for CliConfig {
    fn webhook_url(&self) -> Option<&str> {
        if self.dry_run {
            None
        } else {
            self.webhook_url.as_deref()
        }
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

impl Validate for CliConfig {
    fn validate(&self) -> crate::utils::error::Result<()> {
        super::validate_provider(self, !self.dry_run)
    }
}
