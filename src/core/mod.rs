pub mod engine;
pub mod pipeline;
pub mod progress;
pub mod render;
pub mod trigger;

pub use crate::domain::model::{
    BriefData, DeliveryReport, HolidayInfo, NewsBundle, ProgressResult, WebhookMessage,
};
pub use crate::domain::ports::{
    Clock, ConfigProvider, HolidaySource, NewsSource, Notifier, Pipeline,
};
pub use crate::utils::error::Result;
