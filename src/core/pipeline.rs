use crate::adapters::{AppworldsHolidayClient, TopurlNewsClient, WeComWebhook};
use crate::core::progress::ProgressCalculator;
use crate::core::render::{pick_greeting, render_markdown};
use crate::core::{
    BriefData, Clock, ConfigProvider, DeliveryReport, HolidaySource, NewsSource, Notifier,
    Pipeline, WebhookMessage,
};
use crate::utils::error::Result;

/// 抓取新聞與節假日、計算進度條、渲染 markdown 並推送
pub struct BriefPipeline<N: NewsSource, H: HolidaySource, W: Notifier, C: ConfigProvider> {
    news: N,
    holidays: H,
    notifier: W,
    config: C,
    clock: Box<dyn Clock>,
    calculator: ProgressCalculator,
}

impl<C: ConfigProvider> BriefPipeline<TopurlNewsClient, AppworldsHolidayClient, WeComWebhook, C> {
    /// 依配置建立 HTTP 客戶端
    pub fn from_config(config: C, clock: Box<dyn Clock>) -> Result<Self> {
        let timeout = config.request_timeout();
        let news = TopurlNewsClient::new(config.news_endpoint(), config.news_count())
            .with_ip(config.news_ip().map(str::to_string))
            .with_timeout(timeout);
        let holidays = AppworldsHolidayClient::new(config.holiday_endpoint())
            .with_interval(config.request_interval())
            .with_timeout(timeout);
        let notifier = WeComWebhook::new(config.webhook_url().map(str::to_string))
            .with_timeout(timeout);

        Self::new(news, holidays, notifier, config, clock)
    }
}

impl<N: NewsSource, H: HolidaySource, W: Notifier, C: ConfigProvider> BriefPipeline<N, H, W, C> {
    pub fn new(news: N, holidays: H, notifier: W, config: C, clock: Box<dyn Clock>) -> Result<Self> {
        let calculator = ProgressCalculator::new(config.bar_length(), config.bar_style())?;
        Ok(Self {
            news,
            holidays,
            notifier,
            config,
            clock,
            calculator,
        })
    }
}

#[async_trait::async_trait]
impl<N, H, W, C> Pipeline for BriefPipeline<N, H, W, C>
where
    N: NewsSource,
    H: HolidaySource,
    W: Notifier,
    C: ConfigProvider,
{
    async fn extract(&self) -> Result<Option<BriefData>> {
        let now = self.clock.now();
        tracing::debug!("Run time: {}", now);

        let Some(news) = self.news.fetch_news().await? else {
            return Ok(None);
        };
        tracing::debug!(
            "Fetched {} news items and {} history events",
            news.news_list.len(),
            news.history_list.len()
        );

        // 節假日資料缺失不影響推送，只是少了標記和倒數
        let holiday = match self.holidays.fetch_holiday_info(now.date_naive()).await {
            Ok(info) => Some(info),
            Err(e) => {
                tracing::warn!("Holiday lookup failed, continuing without it: {}", e);
                None
            }
        };

        Ok(Some(BriefData { now, news, holiday }))
    }

    async fn transform(&self, data: BriefData) -> Result<WebhookMessage> {
        let holiday_date = data.holiday.as_ref().map(|h| h.next_holiday_date);
        let progress = self.calculator.compute(&data.now, holiday_date);
        tracing::debug!(
            "Progress {} ({} / {} cells, marker {:?})",
            progress.percentage,
            progress.cells_passed,
            self.calculator.bar_length(),
            progress.holiday_offset
        );

        let rest_tomorrow = data
            .holiday
            .as_ref()
            .and_then(|h| h.is_tomorrow_workday)
            .is_some_and(|work| !work);
        let greeting = rest_tomorrow.then(|| pick_greeting(&mut rand::rng()));

        let markdown = render_markdown(self.config.title(), &data, &progress, greeting);
        Ok(WebhookMessage::markdown(markdown))
    }

    async fn load(&self, message: WebhookMessage) -> Result<DeliveryReport> {
        self.notifier.send(&message).await
    }
}
