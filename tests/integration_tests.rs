use chrono::TimeZone;
use chrono_tz::Asia::Shanghai;
use daily_brief::adapters::FixedClock;
use daily_brief::utils::validation::Validate;
use daily_brief::{BriefEngine, BriefPipeline, RunOutcome, TomlConfig};
use httpmock::prelude::*;
use std::io::Write;
use tempfile::NamedTempFile;

fn news_payload(code: i64) -> serde_json::Value {
    serde_json::json!({
        "code": code,
        "message": "success",
        "data": {
            "calendar": {
                "cMonth": 7, "cDay": 3, "ncWeek": "星期一", "animal": "兔",
                "monthCn": "五月", "dayCn": "十六", "term": ""
            },
            "weather": {
                "city": "南京", "weatherOf": "today",
                "detail": {
                    "text_day": "雷阵雨", "text_night": "阴", "low": "25", "high": "31",
                    "wind_direction": "东南风", "wind_scale": "3"
                }
            },
            "historyList": [{"event": "1971年吉姆·莫里森逝世"}],
            "phrase": {
                "phrase": "守株待兔", "pinyin": "shǒu zhū dài tù",
                "explain": "比喻死守狭隘经验", "from": "《韩非子》", "example": ""
            },
            "sentence": {"sentence": "不积跬步，无以至千里", "author": "荀子"},
            "poem": {"title": "小池", "author": "杨万里", "content": ["泉眼无声惜细流", "树阴照水爱晴柔"]},
            "newsList": [
                {"title": "第一条", "url": "https://example.com/1", "category": "国内"},
                {"title": "第二条", "url": "https://example.com/2", "category": "国际"}
            ]
        }
    })
}

fn mock_holiday_api(server: &MockServer) {
    server.mock(|when, then| {
        when.method(GET).path("/next");
        then.status(200).json_body(serde_json::json!({
            "code": 200, "msg": "success",
            "data": {"name": "国庆节", "date": "2023-10-08"}
        }));
    });
    server.mock(|when, then| {
        when.method(GET).path("/next/days");
        then.status(200)
            .json_body(serde_json::json!({"code": 200, "msg": "success", "data": 97}));
    });
    server.mock(|when, then| {
        when.method(GET).path("/work").query_param("date", "2023-07-04");
        then.status(200).json_body(serde_json::json!({
            "code": 200, "msg": "success", "data": {"work": true}
        }));
    });
    server.mock(|when, then| {
        when.method(GET).path("/work/days");
        then.status(200)
            .json_body(serde_json::json!({"code": 200, "msg": "success", "data": 124}));
    });
}

fn write_config(server: &MockServer) -> NamedTempFile {
    let toml_content = format!(
        r##"
[brief]
title = "慧语简报"
timezone = "Asia/Shanghai"

[news]
endpoint = "{base}/api"
count = 2

[holiday]
endpoint = "{base}"
request_interval_ms = 0

[progress]
bar_length = 20

[progress.style]
passed_glyph = "#"
remaining_glyph = "-"
marker_glyph = "*"

[webhook]
url = "{base}/cgi-bin/webhook/send?key=test"
"##,
        base = server.base_url()
    );

    let mut file = NamedTempFile::new().unwrap();
    file.write_all(toml_content.as_bytes()).unwrap();
    file
}

fn clock() -> Box<FixedClock> {
    Box::new(FixedClock::new(
        Shanghai.with_ymd_and_hms(2023, 7, 3, 0, 0, 0).unwrap(),
    ))
}

#[tokio::test]
async fn test_end_to_end_brief_is_posted() {
    let server = MockServer::start();

    let news_mock = server.mock(|when, then| {
        when.method(GET).path("/api").query_param("count", "2");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(news_payload(200));
    });
    mock_holiday_api(&server);

    let expected_bar = "<font color=\"#666\">##########</font>\
                        <font color=\"comment\">-----</font>\
                        <font color=\"red\">*</font>\
                        <font color=\"comment\">----</font> 50.14%";
    let webhook_mock = server.mock(|when, then| {
        when.method(POST)
            .path("/cgi-bin/webhook/send")
            .query_param("key", "test")
            .body_contains("\"msgtype\":\"markdown\"")
            .body_contains("今日南京雷阵雨转阴，25 ~ 31℃，东南风3级")
            .body_contains("距离<font color=\\\"red\\\">国庆节</font>");
        then.status(200)
            .json_body(serde_json::json!({"errcode": 0, "errmsg": "ok"}));
    });

    let config_file = write_config(&server);
    let config = TomlConfig::from_file(config_file.path()).unwrap();
    config.validate().unwrap();

    let pipeline = BriefPipeline::from_config(config, clock()).unwrap();
    let outcome = BriefEngine::new(pipeline).run().await.unwrap();

    news_mock.assert();
    webhook_mock.assert();

    let report = match outcome {
        RunOutcome::Completed(report) => report,
        RunOutcome::Skipped => panic!("run should not be skipped"),
    };
    assert!(report.delivered);

    let content = report.message.content();
    assert!(content.contains(expected_bar));
    assert!(content.contains("1. 第一条 [↗️](https://example.com/1)"));
    assert!(content.contains("2023年，你已经工作了<font color=\"gray\">124</font>天"));
    assert!(content.contains("出处：《韩非子》"));
    assert!(!content.contains("示例："));
    assert!(!content.contains("明日休息"));
}

#[tokio::test]
async fn test_no_news_data_skips_delivery() {
    let server = MockServer::start();

    server.mock(|when, then| {
        when.method(GET).path("/api");
        then.status(200).json_body(news_payload(500));
    });
    mock_holiday_api(&server);
    let webhook_mock = server.mock(|when, then| {
        when.method(POST).path("/cgi-bin/webhook/send");
        then.status(200)
            .json_body(serde_json::json!({"errcode": 0, "errmsg": "ok"}));
    });

    let config_file = write_config(&server);
    let config = TomlConfig::from_file(config_file.path()).unwrap();
    let pipeline = BriefPipeline::from_config(config, clock()).unwrap();
    let outcome = BriefEngine::new(pipeline).run().await.unwrap();

    assert!(matches!(outcome, RunOutcome::Skipped));
    webhook_mock.assert_hits(0);
}

#[tokio::test]
async fn test_holiday_api_down_still_posts_without_marker() {
    let server = MockServer::start();

    server.mock(|when, then| {
        when.method(GET).path("/api");
        then.status(200).json_body(news_payload(200));
    });
    server.mock(|when, then| {
        when.method(GET).path("/next");
        then.status(502);
    });
    let webhook_mock = server.mock(|when, then| {
        when.method(POST)
            .path("/cgi-bin/webhook/send")
            .body_contains("2023年，您已经使用了50.14%");
        then.status(200)
            .json_body(serde_json::json!({"errcode": 0, "errmsg": "ok"}));
    });

    let config_file = write_config(&server);
    let config = TomlConfig::from_file(config_file.path()).unwrap();
    let pipeline = BriefPipeline::from_config(config, clock()).unwrap();
    let outcome = BriefEngine::new(pipeline).run().await.unwrap();

    webhook_mock.assert();
    match outcome {
        RunOutcome::Completed(report) => {
            assert!(!report.message.content().contains("<font color=\"red\">*</font>"))
        }
        RunOutcome::Skipped => panic!("run should not be skipped"),
    }
}

#[tokio::test]
async fn test_webhook_rejection_surfaces_as_error() {
    let server = MockServer::start();

    server.mock(|when, then| {
        when.method(GET).path("/api");
        then.status(200).json_body(news_payload(200));
    });
    mock_holiday_api(&server);
    server.mock(|when, then| {
        when.method(POST).path("/cgi-bin/webhook/send");
        then.status(200)
            .json_body(serde_json::json!({"errcode": 93000, "errmsg": "invalid webhook url"}));
    });

    let config_file = write_config(&server);
    let config = TomlConfig::from_file(config_file.path()).unwrap();
    let pipeline = BriefPipeline::from_config(config, clock()).unwrap();
    let result = BriefEngine::new(pipeline).run().await;

    assert!(matches!(
        result,
        Err(daily_brief::BriefError::DeliveryError { .. })
    ));
}
