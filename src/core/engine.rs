use crate::core::{DeliveryReport, Pipeline};
use crate::utils::error::Result;

#[derive(Debug)]
pub enum RunOutcome {
    /// 消息已渲染並交給推送端（dry run 時 `delivered` 為 false）
    Completed(DeliveryReport),
    /// 上游沒有新聞資料，本次不推送
    Skipped,
}

pub struct BriefEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> BriefEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    pub async fn run(&self) -> Result<RunOutcome> {
        tracing::info!("Starting daily brief run");

        // Extract
        let Some(data) = self.pipeline.extract().await? else {
            tracing::warn!("No news data this run, nothing will be sent");
            return Ok(RunOutcome::Skipped);
        };
        tracing::info!(
            "Fetched {} headlines, holiday info {}",
            data.news.news_list.len(),
            if data.holiday.is_some() { "available" } else { "missing" }
        );

        // Transform
        let message = self.pipeline.transform(data).await?;
        tracing::info!("Rendered {} chars of markdown", message.content().chars().count());

        // Load
        let report = self.pipeline.load(message).await?;
        if report.delivered {
            tracing::info!("Message delivered to webhook");
        }

        Ok(RunOutcome::Completed(report))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{BriefData, WebhookMessage};
    use crate::domain::model::NewsBundle;
    use chrono::TimeZone;
    use chrono_tz::Asia::Shanghai;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingPipeline {
        has_news: bool,
        loads: AtomicUsize,
    }

    #[async_trait::async_trait]
    impl Pipeline for CountingPipeline {
        async fn extract(&self) -> Result<Option<BriefData>> {
            Ok(self.has_news.then(|| BriefData {
                now: Shanghai.with_ymd_and_hms(2025, 1, 2, 8, 0, 0).unwrap(),
                news: NewsBundle::default(),
                holiday: None,
            }))
        }

        async fn transform(&self, _data: BriefData) -> Result<WebhookMessage> {
            Ok(WebhookMessage::markdown("hello"))
        }

        async fn load(&self, message: WebhookMessage) -> Result<DeliveryReport> {
            self.loads.fetch_add(1, Ordering::SeqCst);
            Ok(DeliveryReport {
                delivered: true,
                content_length: 5,
                message,
            })
        }
    }

    #[tokio::test]
    async fn test_run_skips_without_news() {
        let engine = BriefEngine::new(CountingPipeline {
            has_news: false,
            loads: AtomicUsize::new(0),
        });

        let outcome = engine.run().await.unwrap();
        assert!(matches!(outcome, RunOutcome::Skipped));
        assert_eq!(engine.pipeline.loads.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_run_delivers_rendered_message() {
        let engine = BriefEngine::new(CountingPipeline {
            has_news: true,
            loads: AtomicUsize::new(0),
        });

        let outcome = tokio_test::assert_ok!(engine.run().await);
        match outcome {
            RunOutcome::Completed(report) => assert_eq!(report.message.content(), "hello"),
            RunOutcome::Skipped => panic!("run should not be skipped"),
        }
        assert_eq!(engine.pipeline.loads.load(Ordering::SeqCst), 1);
    }
}
