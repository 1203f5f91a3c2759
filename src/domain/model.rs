use chrono::{DateTime, NaiveDate};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

/// 上游 API 的通用外層結構 `{ code, message, data }`
#[derive(Debug, Clone, Deserialize)]
pub struct ApiEnvelope<T> {
    pub code: i64,
    #[serde(default, alias = "msg")]
    pub message: String,
    pub data: Option<T>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Calendar {
    pub c_month: u32,
    pub c_day: u32,
    #[serde(default)]
    pub nc_week: String,
    #[serde(default)]
    pub animal: String,
    #[serde(default)]
    pub month_cn: String,
    #[serde(default)]
    pub day_cn: String,
    #[serde(default)]
    pub term: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WeatherDetail {
    pub text_day: String,
    pub text_night: String,
    pub low: String,
    pub high: String,
    #[serde(default)]
    pub wind_direction: String,
    #[serde(default)]
    pub wind_scale: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Weather {
    pub city: String,
    #[serde(default)]
    pub weather_of: String,
    pub detail: WeatherDetail,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HistoryEvent {
    pub event: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Phrase {
    pub phrase: String,
    #[serde(default)]
    pub pinyin: String,
    #[serde(default)]
    pub explain: String,
    #[serde(default)]
    pub from: String,
    #[serde(default)]
    pub example: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Sentence {
    pub sentence: String,
    #[serde(default)]
    pub author: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Poem {
    pub title: String,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub content: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewsItem {
    pub title: String,
    pub url: String,
    #[serde(default)]
    pub category: String,
}

/// 新聞 API `data` 欄位中本程式用到的部分
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsBundle {
    pub calendar: Calendar,
    pub weather: Weather,
    #[serde(default)]
    pub history_list: Vec<HistoryEvent>,
    pub phrase: Phrase,
    pub sentence: Sentence,
    pub poem: Poem,
    #[serde(default)]
    pub news_list: Vec<NewsItem>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HolidayInfo {
    pub name: String,
    pub next_holiday_date: NaiveDate,
    pub days_until: i64,
    pub is_tomorrow_workday: Option<bool>,
    pub workdays_elapsed: Option<i64>,
}

#[derive(Debug, Clone)]
pub struct BriefData {
    pub now: DateTime<Tz>,
    pub news: NewsBundle,
    pub holiday: Option<HolidayInfo>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProgressResult {
    /// 兩位小數加 `%`，例如 `"42.17%"`
    pub percentage: String,
    pub percentage_value: f64,
    pub cells_passed: usize,
    pub cells_remaining: usize,
    /// 節假日標記在剩餘段中的位置
    pub holiday_offset: Option<usize>,
    pub bar: String,
    pub year: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarkdownBody {
    pub content: String,
}

/// 群機器人 markdown 消息
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebhookMessage {
    pub msgtype: String,
    pub markdown: MarkdownBody,
}

impl WebhookMessage {
    pub fn markdown(content: impl Into<String>) -> Self {
        Self {
            msgtype: "markdown".to_string(),
            markdown: MarkdownBody {
                content: content.into(),
            },
        }
    }

    pub fn content(&self) -> &str {
        &self.markdown.content
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeliveryReport {
    pub delivered: bool,
    pub content_length: usize,
    pub message: WebhookMessage,
}
