#[cfg(feature = "lambda")]
use daily_brief::adapters::SystemClock;
#[cfg(feature = "lambda")]
use daily_brief::core::trigger::TriggerAuth;
#[cfg(feature = "lambda")]
use daily_brief::core::{Clock, WebhookMessage};
#[cfg(feature = "lambda")]
use daily_brief::utils::{logger, validation::Validate};
#[cfg(feature = "lambda")]
use daily_brief::{BriefEngine, BriefPipeline, EnvConfig, RunOutcome};
#[cfg(feature = "lambda")]
use lambda_runtime::{run, service_fn, Error, LambdaEvent};
#[cfg(feature = "lambda")]
use serde::{Deserialize, Serialize};
#[cfg(feature = "lambda")]
use std::collections::HashMap;

#[cfg(feature = "lambda")]
#[derive(Deserialize)]
pub struct Request {
    #[serde(default)]
    pub headers: HashMap<String, String>,
}

#[cfg(feature = "lambda")]
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Response {
    pub status_code: u16,
    pub message: String,
    pub content: Option<WebhookMessage>,
}

#[cfg(feature = "lambda")]
impl Response {
    fn status(status_code: u16, message: &str) -> Self {
        Self {
            status_code,
            message: message.to_string(),
            content: None,
        }
    }

    fn internal_error() -> Self {
        Self::status(500, "Internal Server Error")
    }
}

#[cfg(feature = "lambda")]
async fn function_handler(event: LambdaEvent<Request>) -> Result<Response, Error> {
    tracing::info!("Daily brief trigger received");

    let config = match EnvConfig::from_env().and_then(|c| c.validate().map(|_| c)) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Configuration invalid: {}", e);
            return Ok(Response::internal_error());
        }
    };

    let clock = match SystemClock::from_name(&config.timezone) {
        Ok(clock) => clock,
        Err(e) => {
            tracing::error!("Configuration invalid: {}", e);
            return Ok(Response::internal_error());
        }
    };

    Ok(handle_trigger(config, &event.payload.headers, Box::new(clock)).await)
}

/// 驗證觸發來源後執行一次推送，所有失敗都轉成 HTTP 狀態碼
#[cfg(feature = "lambda")]
async fn handle_trigger(
    config: EnvConfig,
    headers: &HashMap<String, String>,
    clock: Box<dyn Clock>,
) -> Response {
    let auth = TriggerAuth::new(config.trigger_secret.clone());
    let Some(source) = auth.authorize(headers) else {
        tracing::warn!("Rejected unauthorized trigger");
        return Response::status(401, "Unauthorized");
    };
    tracing::info!("Trigger authorized via {:?}", source);

    let pipeline = match BriefPipeline::from_config(config, clock) {
        Ok(pipeline) => pipeline,
        Err(e) => {
            tracing::error!("Failed to build pipeline: {}", e);
            return Response::internal_error();
        }
    };

    match BriefEngine::new(pipeline).run().await {
        Ok(RunOutcome::Completed(report)) => Response {
            status_code: 200,
            message: "Daily brief sent".to_string(),
            content: Some(report.message),
        },
        Ok(RunOutcome::Skipped) => {
            tracing::warn!("No news data, nothing was sent");
            Response::internal_error()
        }
        Err(e) => {
            tracing::error!(
                "Daily brief failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            Response::internal_error()
        }
    }
}

#[cfg(feature = "lambda")]
#[tokio::main]
async fn main() -> Result<(), Error> {
    logger::init_lambda_logger();

    run(service_fn(function_handler)).await
}
