// Adapters layer: concrete implementations of the domain ports (http clients, clock, webhook).

pub mod clock;
pub mod holiday;
pub mod news;
pub mod webhook;

pub use clock::{FixedClock, SystemClock};
pub use holiday::AppworldsHolidayClient;
pub use news::TopurlNewsClient;
pub use webhook::WeComWebhook;
