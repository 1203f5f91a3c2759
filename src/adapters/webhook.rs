use crate::domain::model::{DeliveryReport, WebhookMessage};
use crate::domain::ports::Notifier;
use crate::utils::error::{BriefError, Result};
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

#[derive(Debug, Default, Deserialize)]
struct WebhookReply {
    #[serde(default)]
    errcode: i64,
    #[serde(default)]
    errmsg: String,
}

/// 回應不是 JSON 時記下警告並回傳 `None`
fn parse_reply(body: &str) -> Option<WebhookReply> {
    match serde_json::from_str(body) {
        Ok(reply) => Some(reply),
        Err(e) => {
            tracing::warn!("Webhook replied with unparsable body ({}): {:.200}", e, body);
            None
        }
    }
}

/// 企業微信群機器人。沒有 URL 時只記錄消息、不推送。
#[derive(Debug, Clone)]
pub struct WeComWebhook {
    client: Client,
    url: Option<String>,
    timeout: Duration,
}

impl WeComWebhook {
    pub fn new(url: Option<String>) -> Self {
        Self {
            client: Client::new(),
            url,
            timeout: Duration::from_secs(10),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn is_dry_run(&self) -> bool {
        self.url.is_none()
    }
}

impl Notifier for WeComWebhook {
    async fn send(&self, message: &WebhookMessage) -> Result<DeliveryReport> {
        let content_length = message.content().chars().count();

        let Some(url) = &self.url else {
            tracing::info!("No webhook URL configured, message not sent");
            return Ok(DeliveryReport {
                delivered: false,
                content_length,
                message: message.clone(),
            });
        };

        tracing::debug!("Posting {} chars of markdown to webhook", content_length);
        let response = self
            .client
            .post(url)
            .json(message)
            .timeout(self.timeout)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(BriefError::DeliveryError {
                status: status.as_u16(),
                message: body,
            });
        }

        // 群機器人出錯時仍回 200，錯誤碼在 body 裡
        let reply = parse_reply(&body).unwrap_or_default();
        if reply.errcode != 0 {
            return Err(BriefError::DeliveryError {
                status: status.as_u16(),
                message: format!("errcode {}: {}", reply.errcode, reply.errmsg),
            });
        }

        Ok(DeliveryReport {
            delivered: true,
            content_length,
            message: message.clone(),
        })
    }
}
