#[cfg(feature = "cli")]
pub mod cli;
pub mod env;
pub mod toml_config;

use crate::core::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{
    parse_timezone, validate_non_empty_string, validate_positive_number, validate_range,
    validate_required_field, validate_url,
};

#[cfg(feature = "cli")]
pub use cli::CliConfig;

/// 各種配置來源共用的檢查
pub fn validate_provider<C: ConfigProvider + ?Sized>(config: &C, require_webhook: bool) -> Result<()> {
    let webhook_url = config.webhook_url();
    if require_webhook {
        let url = validate_required_field("webhook_url", &webhook_url)?;
        validate_url("webhook_url", url)?;
    } else if let Some(url) = webhook_url {
        validate_url("webhook_url", url)?;
    }

    validate_url("news_endpoint", config.news_endpoint())?;
    validate_url("holiday_endpoint", config.holiday_endpoint())?;
    validate_positive_number("bar_length", config.bar_length(), 1)?;
    validate_range("news_count", config.news_count(), 1, 50)?;
    validate_non_empty_string("title", config.title())?;
    parse_timezone("timezone", config.timezone())?;
    Ok(())
}
