use thiserror::Error;

#[derive(Error, Debug)]
pub enum BriefError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid configuration for '{field}' ({value}): {reason}")]
    InvalidConfiguration {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Upstream {service} returned no usable data: {message}")]
    UpstreamError { service: String, message: String },

    #[error("Webhook delivery failed ({status}): {message}")]
    DeliveryError { status: u16, message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Configuration,
    Data,
    Delivery,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl BriefError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            BriefError::ApiError(_) => ErrorCategory::Network,
            BriefError::IoError(_) => ErrorCategory::System,
            BriefError::SerializationError(_) | BriefError::UpstreamError { .. } => {
                ErrorCategory::Data
            }
            BriefError::ConfigError { .. }
            | BriefError::InvalidConfiguration { .. }
            | BriefError::MissingConfigError { .. } => ErrorCategory::Configuration,
            BriefError::DeliveryError { .. } => ErrorCategory::Delivery,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            // 上游暫時不可用，下次排程重跑即可
            ErrorCategory::Network | ErrorCategory::Delivery => ErrorSeverity::Medium,
            ErrorCategory::Data => ErrorSeverity::High,
            ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            BriefError::ApiError(_) => {
                "Check network connectivity and that the upstream API is reachable".to_string()
            }
            BriefError::IoError(_) => "Check file paths and permissions".to_string(),
            BriefError::SerializationError(_) => {
                "The upstream API may have changed its response format".to_string()
            }
            BriefError::ConfigError { .. } => "Review the configuration file".to_string(),
            BriefError::InvalidConfiguration { field, .. } => {
                format!("Fix the value of '{}' and try again", field)
            }
            BriefError::MissingConfigError { field } => {
                format!("Provide '{}' via argument, config file or environment", field)
            }
            BriefError::UpstreamError { service, .. } => {
                format!("Retry later; {} did not return data for this run", service)
            }
            BriefError::DeliveryError { .. } => {
                "Verify the webhook URL and that the bot is still in the group".to_string()
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            BriefError::ApiError(e) => format!("無法連線到資料來源: {}", e),
            BriefError::IoError(e) => format!("檔案讀寫失敗: {}", e),
            BriefError::SerializationError(e) => format!("資料格式錯誤: {}", e),
            BriefError::ConfigError { message } => format!("配置錯誤: {}", message),
            BriefError::InvalidConfiguration { field, reason, .. } => {
                format!("配置項 {} 無效: {}", field, reason)
            }
            BriefError::MissingConfigError { field } => format!("缺少配置項: {}", field),
            BriefError::UpstreamError { service, message } => {
                format!("{} 沒有返回資料: {}", service, message)
            }
            BriefError::DeliveryError { status, message } => {
                format!("消息推送失敗 ({}): {}", status, message)
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, BriefError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_configuration_errors_are_high_severity() {
        let err = BriefError::InvalidConfiguration {
            field: "bar_length".to_string(),
            value: "0".to_string(),
            reason: "must be at least 1".to_string(),
        };
        assert_eq!(err.category(), ErrorCategory::Configuration);
        assert_eq!(err.severity(), ErrorSeverity::High);
        assert!(err.recovery_suggestion().contains("bar_length"));
    }

    #[test]
    fn test_delivery_error_is_retryable() {
        let err = BriefError::DeliveryError {
            status: 502,
            message: "bad gateway".to_string(),
        };
        assert_eq!(err.severity(), ErrorSeverity::Medium);
        assert!(err.to_string().contains("502"));
    }
}
