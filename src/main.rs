use chrono::DateTime;
use daily_brief::adapters::{FixedClock, SystemClock};
use daily_brief::core::{Clock, ConfigProvider};
use daily_brief::utils::error::{BriefError, ErrorSeverity};
use daily_brief::utils::logger;
use daily_brief::utils::validation::{parse_timezone, Validate};
use daily_brief::{BriefEngine, BriefPipeline, CliConfig, RunOutcome, TomlConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let (cli, matches) = CliConfig::parse_with_matches();

    // 初始化日誌
    logger::init_cli_logger(cli.verbose);

    tracing::info!("Starting daily-brief CLI");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    let result = match &cli.config {
        Some(path) => {
            tracing::info!("📁 Loading configuration from: {}", path);
            match TomlConfig::from_file(path) {
                Ok(mut config) => {
                    // 命令列參數覆蓋檔案設定
                    cli.apply_overrides(&matches, &mut config);
                    run(config, cli.at.as_deref()).await
                }
                Err(e) => Err(e),
            }
        }
        None => run(cli.clone(), cli.at.as_deref()).await,
    };

    match result {
        Ok(RunOutcome::Completed(report)) => {
            if report.delivered {
                tracing::info!("✅ 消息推送成功");
                println!("✅ 消息推送成功");
            } else {
                println!("{}", report.message.content());
            }
        }
        Ok(RunOutcome::Skipped) => {
            tracing::warn!("⚠️ No news data today, nothing was sent");
            println!("⚠️ 今日沒有新聞資料，未推送");
        }
        Err(e) => {
            // 記錄詳細錯誤信息
            tracing::error!(
                "❌ Daily brief failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 建議: {}", e.recovery_suggestion());

            // 根據錯誤嚴重程度決定退出碼
            let exit_code = match e.severity() {
                ErrorSeverity::Low => 0,
                ErrorSeverity::Medium => 2,
                ErrorSeverity::High => 1,
                ErrorSeverity::Critical => 3,
            };

            if exit_code > 0 {
                std::process::exit(exit_code);
            }
        }
    }

    Ok(())
}

async fn run<C>(config: C, at: Option<&str>) -> daily_brief::Result<RunOutcome>
where
    C: ConfigProvider + Validate,
{
    config.validate()?;
    tracing::info!("✅ Configuration validated");

    let clock = build_clock(config.timezone(), at)?;
    let pipeline = BriefPipeline::from_config(config, clock)?;
    BriefEngine::new(pipeline).run().await
}

fn build_clock(tz_name: &str, at: Option<&str>) -> daily_brief::Result<Box<dyn Clock>> {
    let tz = parse_timezone("timezone", tz_name)?;
    match at {
        Some(raw) => {
            let at = DateTime::parse_from_rfc3339(raw).map_err(|e| {
                BriefError::InvalidConfiguration {
                    field: "at".to_string(),
                    value: raw.to_string(),
                    reason: e.to_string(),
                }
            })?;
            tracing::info!("🕒 Rendering as of {}", at);
            Ok(Box::new(FixedClock::new(at.with_timezone(&tz))))
        }
        None => Ok(Box::new(SystemClock::new(tz))),
    }
}
