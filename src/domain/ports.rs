use crate::core::progress::BarStyle;
use crate::domain::model::{BriefData, DeliveryReport, HolidayInfo, NewsBundle, WebhookMessage};
use crate::utils::error::Result;
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate};
use chrono_tz::Tz;
use std::time::Duration;

#[async_trait]
pub trait NewsSource: Send + Sync {
    /// `Ok(None)` 表示上游本次沒有資料，整次推送應跳過
    async fn fetch_news(&self) -> Result<Option<NewsBundle>>;
}

#[async_trait]
pub trait HolidaySource: Send + Sync {
    async fn fetch_holiday_info(&self, today: NaiveDate) -> Result<HolidayInfo>;
}

pub trait Notifier: Send + Sync {
    fn send(
        &self,
        message: &WebhookMessage,
    ) -> impl std::future::Future<Output = Result<DeliveryReport>> + Send;
}

pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Tz>;
}

pub trait ConfigProvider: Send + Sync {
    fn webhook_url(&self) -> Option<&str>;
    fn news_endpoint(&self) -> &str;
    fn news_count(&self) -> usize;
    fn news_ip(&self) -> Option<&str>;
    fn holiday_endpoint(&self) -> &str;
    fn bar_length(&self) -> usize;
    fn timezone(&self) -> &str;
    fn request_interval(&self) -> Duration;
    fn title(&self) -> &str;

    fn request_timeout(&self) -> Duration {
        Duration::from_secs(10)
    }

    fn bar_style(&self) -> BarStyle {
        BarStyle::default()
    }
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<Option<BriefData>>;
    async fn transform(&self, data: BriefData) -> Result<WebhookMessage>;
    async fn load(&self, message: WebhookMessage) -> Result<DeliveryReport>;
}
