use crate::domain::model::{ApiEnvelope, HolidayInfo};
use crate::domain::ports::HolidaySource;
use crate::utils::error::{BriefError, Result};
use async_trait::async_trait;
use chrono::{Datelike, Days, NaiveDate};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;

pub const DEFAULT_HOLIDAY_ENDPOINT: &str = "https://date.appworlds.cn";

#[derive(Debug, Deserialize)]
struct NextHoliday {
    name: String,
    date: NaiveDate,
}

#[derive(Debug, Deserialize)]
struct WorkDay {
    work: bool,
}

/// 節假日 API 客戶端。免費帳號限制每秒一次請求，呼叫之間會等待 `interval`。
pub struct AppworldsHolidayClient {
    client: Client,
    base_url: String,
    interval: Duration,
    timeout: Duration,
}

impl AppworldsHolidayClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            interval: Duration::from_millis(600),
            timeout: Duration::from_secs(10),
        }
    }

    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    async fn get<T: DeserializeOwned>(&self, path: &str, query: &[(&str, String)]) -> Result<T> {
        let url = format!("{}{}", self.base_url, path);
        tracing::debug!("Making holiday API request to: {}", url);

        let response = self
            .client
            .get(&url)
            .query(query)
            .timeout(self.timeout)
            .send()
            .await?
            .error_for_status()?;

        let envelope: ApiEnvelope<T> = response.json().await?;
        if envelope.code != 200 {
            return Err(BriefError::UpstreamError {
                service: format!("holiday API {}", path),
                message: format!("code {}: {}", envelope.code, envelope.message),
            });
        }
        envelope.data.ok_or_else(|| BriefError::UpstreamError {
            service: format!("holiday API {}", path),
            message: "response has no data".to_string(),
        })
    }

    async fn pause(&self) {
        if !self.interval.is_zero() {
            tokio::time::sleep(self.interval).await;
        }
    }

    async fn is_workday(&self, date: NaiveDate) -> Result<bool> {
        let day: WorkDay = self
            .get("/work", &[("date", date.format("%Y-%m-%d").to_string())])
            .await?;
        Ok(day.work)
    }

    async fn workdays_between(&self, start: NaiveDate, end: NaiveDate) -> Result<i64> {
        self.get(
            "/work/days",
            &[
                ("startDate", start.format("%Y-%m-%d").to_string()),
                ("endDate", end.format("%Y-%m-%d").to_string()),
            ],
        )
        .await
    }
}

#[async_trait]
impl HolidaySource for AppworldsHolidayClient {
    async fn fetch_holiday_info(&self, today: NaiveDate) -> Result<HolidayInfo> {
        let next: NextHoliday = self.get("/next", &[]).await?;
        self.pause().await;

        let days_until: i64 = self.get("/next/days", &[]).await?;
        self.pause().await;

        let tomorrow = today.checked_add_days(Days::new(1)).unwrap_or(today);
        let is_tomorrow_workday = match self.is_workday(tomorrow).await {
            Ok(work) => Some(work),
            Err(e) => {
                tracing::warn!("Could not determine whether {} is a workday: {}", tomorrow, e);
                None
            }
        };
        self.pause().await;

        let year_start = today.with_ordinal(1).unwrap_or(today);
        let workdays_elapsed = match self.workdays_between(year_start, today).await {
            Ok(days) => Some(days),
            Err(e) => {
                tracing::warn!("Could not count workdays since {}: {}", year_start, e);
                None
            }
        };

        tracing::info!(
            "Next holiday: {} on {} ({} days)",
            next.name,
            next.date,
            days_until
        );

        Ok(HolidayInfo {
            name: next.name,
            next_holiday_date: next.date,
            days_until,
            is_tomorrow_workday,
            workdays_elapsed,
        })
    }
}
