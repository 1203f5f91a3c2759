use crate::domain::model::{ApiEnvelope, NewsBundle};
use crate::domain::ports::NewsSource;
use crate::utils::error::Result;
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

pub const DEFAULT_NEWS_ENDPOINT: &str = "https://news.topurl.cn/api";

/// 每日新聞、天氣、詩詞等的資料來源
pub struct TopurlNewsClient {
    client: Client,
    endpoint: String,
    count: usize,
    ip: Option<String>,
    timeout: Duration,
}

impl TopurlNewsClient {
    pub fn new(endpoint: impl Into<String>, count: usize) -> Self {
        Self {
            client: Client::new(),
            endpoint: endpoint.into(),
            count,
            ip: None,
            timeout: Duration::from_secs(10),
        }
    }

    /// 上游依 IP 決定天氣的城市
    pub fn with_ip(mut self, ip: Option<String>) -> Self {
        self.ip = ip;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

#[async_trait]
impl NewsSource for TopurlNewsClient {
    async fn fetch_news(&self) -> Result<Option<NewsBundle>> {
        let mut request = self
            .client
            .get(&self.endpoint)
            .query(&[("count", self.count.to_string())])
            .timeout(self.timeout);
        if let Some(ip) = &self.ip {
            request = request.query(&[("ip", ip)]);
        }

        tracing::debug!("Fetching news bundle from: {}", self.endpoint);
        let response = request.send().await?.error_for_status()?;
        tracing::debug!("News API response status: {}", response.status());

        let envelope: ApiEnvelope<NewsBundle> = response.json().await?;
        if envelope.code != 200 {
            tracing::warn!(
                "News API returned code {} ({}), skipping this run",
                envelope.code,
                envelope.message
            );
            return Ok(None);
        }

        if envelope.data.is_none() {
            tracing::warn!("News API returned no data");
        }
        Ok(envelope.data)
    }
}
