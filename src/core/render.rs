use crate::domain::model::{BriefData, Calendar, Phrase, ProgressResult, Weather};
use rand::Rng;
use url::Url;

pub const DEFAULT_TITLE: &str = "慧语简报";

pub const REST_DAY_GREETINGS: [&str; 14] = [
    "祝你度过一个愉快的休息日，充分放松并享受美好时光！",
    "希望你在休息日能够尽情放松，充电，恢复精力，为新的一周做好准备！",
    "愿你的休息日充满欢乐和快乐，让所有的压力和疲劳都远离你！",
    "祝你度过一个美好的休息日，与家人朋友共度时光，留下美好的回忆！",
    "希望你的休息日充满阳光和喜悦，每一刻都充满快乐和满足！",
    "愿你的休息日充满美丽和宁静，让你的心灵得到滋养和放松！",
    "在这个休息日里，希望你能够享受美食、阅读好书、做你喜欢的事情，尽情放松！",
    "希望你的休息日充满惊喜和乐趣，让你的心情变得更加愉快！",
    "祝你度过一个悠闲而惬意的休息日，远离工作的烦恼，享受自由自在的时光！",
    "希望你的休息日充满美好的事物，像阳光一样温暖你的心灵！",
    "愿你的休息日充满美梦和好运，让你在新的一周中充满动力和能量！",
    "祝你度过一个充满活力和活动的休息日，让你的身心都得到放松和恢复！",
    "希望你在休息日能够找到内心的宁静和平衡，让自己重拾活力和动力！",
    "愿你的休息日充满欢笑和快乐，让每一刻都值得回味和珍藏！",
];

pub fn pick_greeting<R: Rng + ?Sized>(rng: &mut R) -> &'static str {
    REST_DAY_GREETINGS[rng.random_range(0..REST_DAY_GREETINGS.len())]
}

/// 日期與農曆
pub fn date_statement(calendar: &Calendar) -> String {
    let term = calendar
        .term
        .as_deref()
        .filter(|term| !term.is_empty())
        .map(|term| format!("，{}", term))
        .unwrap_or_default();

    format!(
        "{}月{}号{}，农历{}年{}{}{}，祝您生活愉快，平安喜乐",
        calendar.c_month,
        calendar.c_day,
        calendar.nc_week,
        calendar.animal,
        calendar.month_cn,
        calendar.day_cn,
        term
    )
}

/// 天氣，白天夜間相同時不寫「轉」
pub fn weather_statement(weather: &Weather) -> String {
    let detail = &weather.detail;
    // 上游就是這個拼法
    let day = if weather.weather_of == "tommorrow" {
        "明日"
    } else {
        "今日"
    };
    let night = if detail.text_day == detail.text_night {
        String::new()
    } else {
        format!("转{}", detail.text_night)
    };

    format!(
        "{}{}{}{}，{} ~ {}℃，{}{}级",
        day,
        weather.city,
        detail.text_day,
        night,
        detail.low,
        detail.high,
        detail.wind_direction,
        detail.wind_scale
    )
}

pub fn history_search_url(event: &str) -> String {
    match Url::parse_with_params("https://cn.bing.com/search", &[("q", event)]) {
        Ok(url) => url.to_string(),
        Err(_) => format!("https://cn.bing.com/search?q={}", event),
    }
}

/// 成語每個字配上拼音：`<font color="red">字</font>(zi)`，以 `·` 連接
pub fn phrase_statement(phrase: &Phrase) -> String {
    phrase
        .phrase
        .chars()
        .zip(phrase.pinyin.split_whitespace())
        .map(|(character, pinyin)| format!("<font color=\"red\">{}</font>({})", character, pinyin))
        .collect::<Vec<_>>()
        .join("·")
}

pub fn render_markdown(
    title: &str,
    data: &BriefData,
    progress: &ProgressResult,
    greeting: Option<&str>,
) -> String {
    let news = &data.news;
    let mut lines: Vec<String> = Vec::new();

    lines.push(format!("## <font color=\"warning\">{}</font>", title));
    lines.push(date_statement(&news.calendar));
    lines.push(format!(
        "{} [🌝](https://m.weather.com.cn/)",
        weather_statement(&news.weather)
    ));
    lines.push(String::new());

    lines.push("> <font color=\"info\">每日新闻</font>".to_string());
    lines.extend(
        news.news_list
            .iter()
            .enumerate()
            .map(|(index, item)| format!("{}. {} [↗️]({})", index + 1, item.title, item.url)),
    );
    lines.push(String::new());

    lines.push("> <font color=\"info\">历史上的今天</font>".to_string());
    lines.extend(news.history_list.iter().map(|item| {
        format!("▪ {} [↗️]({})", item.event, history_search_url(&item.event))
    }));
    lines.push(String::new());

    lines.push("> <font color=\"info\">天天诗词</font>".to_string());
    lines.push(format!("《{}》 —— {}", news.poem.title, news.poem.author));
    lines.extend(news.poem.content.iter().cloned());
    lines.push(String::new());

    lines.push("> <font color=\"info\">天天成语</font> [🔡](https://handle.antfu.me/)".to_string());
    lines.push(phrase_statement(&news.phrase));
    for (label, text) in [
        ("释义", &news.phrase.explain),
        ("出处", &news.phrase.from),
        ("示例", &news.phrase.example),
    ] {
        if !text.is_empty() {
            lines.push(format!("{}：{}", label, text));
        }
    }
    lines.push(String::new());

    lines.push("> <font color=\"info\">慧语香风</font> ".to_string());
    lines.push(news.sentence.sentence.clone());
    lines.push(String::new());

    lines.push("> <font color=\"info\">进度条</font> ".to_string());
    lines.push(format!("{} {}", progress.bar, progress.percentage));

    match &data.holiday {
        Some(holiday) => {
            let workdays = holiday
                .workdays_elapsed
                .map(|days| format!("你已经工作了<font color=\"gray\">{}</font>天，", days))
                .unwrap_or_default();
            lines.push(format!(
                "{}年，{}距离<font color=\"red\">{}</font>还有<font color=\"red\">{}</font>天! ",
                progress.year, workdays, holiday.name, holiday.days_until
            ));
            lines.push(String::new());
            if let Some(greeting) = greeting {
                lines.push(format!("> 明日休息, {}", greeting));
            }
        }
        None => {
            lines.push(format!(
                "{}年，您已经使用了{}",
                progress.year, progress.percentage
            ));
            lines.push(String::new());
        }
    }

    lines.push("珍惜当下，享受此刻的美好!🌸".to_string());
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{
        HistoryEvent, HolidayInfo, NewsBundle, NewsItem, Poem, Sentence, WeatherDetail,
    };
    use chrono::{NaiveDate, TimeZone};
    use chrono_tz::Asia::Shanghai;

    fn sample_news() -> NewsBundle {
        NewsBundle {
            calendar: Calendar {
                c_month: 4,
                c_day: 4,
                nc_week: "星期五".to_string(),
                animal: "蛇".to_string(),
                month_cn: "三月".to_string(),
                day_cn: "初七".to_string(),
                term: Some("清明".to_string()),
            },
            weather: Weather {
                city: "南京".to_string(),
                weather_of: "today".to_string(),
                detail: WeatherDetail {
                    text_day: "多云".to_string(),
                    text_night: "小雨".to_string(),
                    low: "9".to_string(),
                    high: "18".to_string(),
                    wind_direction: "东风".to_string(),
                    wind_scale: "3".to_string(),
                },
            },
            history_list: vec![HistoryEvent {
                event: "1949年北大西洋公约组织成立".to_string(),
            }],
            phrase: Phrase {
                phrase: "画龙点睛".to_string(),
                pinyin: "huà lóng diǎn jīng".to_string(),
                explain: "比喻关键处用几句话点明实质".to_string(),
                from: String::new(),
                example: String::new(),
            },
            sentence: Sentence {
                sentence: "路漫漫其修远兮".to_string(),
                author: "屈原".to_string(),
            },
            poem: Poem {
                title: "清明".to_string(),
                author: "杜牧".to_string(),
                content: vec!["清明时节雨纷纷".to_string(), "路上行人欲断魂".to_string()],
            },
            news_list: vec![NewsItem {
                title: "头条新闻".to_string(),
                url: "https://example.com/1".to_string(),
                category: "国内".to_string(),
            }],
        }
    }

    fn sample_progress() -> ProgressResult {
        ProgressResult {
            percentage: "25.48%".to_string(),
            percentage_value: 25.48,
            cells_passed: 5,
            cells_remaining: 15,
            holiday_offset: Some(2),
            bar: "<font color=\"#666\">█████</font>".to_string(),
            year: 2025,
        }
    }

    fn sample_data(holiday: Option<HolidayInfo>) -> BriefData {
        BriefData {
            now: Shanghai.with_ymd_and_hms(2025, 4, 4, 8, 0, 0).unwrap(),
            news: sample_news(),
            holiday,
        }
    }

    #[test]
    fn test_date_statement_with_term() {
        let mut calendar = sample_news().calendar;
        assert_eq!(
            date_statement(&calendar),
            "4月4号星期五，农历蛇年三月初七，清明，祝您生活愉快，平安喜乐"
        );

        calendar.term = Some(String::new());
        assert_eq!(
            date_statement(&calendar),
            "4月4号星期五，农历蛇年三月初七，祝您生活愉快，平安喜乐"
        );
    }

    #[test]
    fn test_weather_statement() {
        let mut weather = sample_news().weather;
        assert_eq!(weather_statement(&weather), "今日南京多云转小雨，9 ~ 18℃，东风3级");

        weather.weather_of = "tommorrow".to_string();
        weather.detail.text_night = "多云".to_string();
        assert_eq!(weather_statement(&weather), "明日南京多云，9 ~ 18℃，东风3级");
    }

    #[test]
    fn test_phrase_statement() {
        let phrase = sample_news().phrase;
        assert_eq!(
            phrase_statement(&phrase),
            "<font color=\"red\">画</font>(huà)·<font color=\"red\">龙</font>(lóng)·\
             <font color=\"red\">点</font>(diǎn)·<font color=\"red\">睛</font>(jīng)"
        );
    }

    #[test]
    fn test_history_search_url_is_encoded() {
        let url = history_search_url("a b&c");
        assert_eq!(url, "https://cn.bing.com/search?q=a+b%26c");
    }

    #[test]
    fn test_markdown_embeds_progress_verbatim() {
        let holiday = HolidayInfo {
            name: "劳动节".to_string(),
            next_holiday_date: NaiveDate::from_ymd_opt(2025, 5, 1).unwrap(),
            days_until: 27,
            is_tomorrow_workday: Some(false),
            workdays_elapsed: Some(62),
        };
        let progress = sample_progress();
        let markdown = render_markdown(
            DEFAULT_TITLE,
            &sample_data(Some(holiday)),
            &progress,
            Some(REST_DAY_GREETINGS[0]),
        );

        assert!(markdown.starts_with("## <font color=\"warning\">慧语简报</font>\n"));
        assert!(markdown.contains(&progress.bar));
        assert!(markdown.contains(&progress.percentage));
        assert!(markdown.contains("1. 头条新闻 [↗️](https://example.com/1)"));
        assert!(markdown.contains("《清明》 —— 杜牧\n清明时节雨纷纷\n"));
        assert!(markdown.contains("释义：比喻关键处用几句话点明实质\n"));
        assert!(!markdown.contains("出处："));
        assert!(markdown.contains("你已经工作了<font color=\"gray\">62</font>天"));
        assert!(markdown.contains("距离<font color=\"red\">劳动节</font>还有<font color=\"red\">27</font>天"));
        assert!(markdown.contains(&format!("> 明日休息, {}", REST_DAY_GREETINGS[0])));
        assert!(markdown.ends_with("珍惜当下，享受此刻的美好!🌸"));
    }

    #[test]
    fn test_progress_section_layout() {
        let holiday = HolidayInfo {
            name: "劳动节".to_string(),
            next_holiday_date: NaiveDate::from_ymd_opt(2025, 5, 1).unwrap(),
            days_until: 27,
            is_tomorrow_workday: Some(false),
            workdays_elapsed: None,
        };
        let progress = sample_progress();
        let markdown = render_markdown(
            DEFAULT_TITLE,
            &sample_data(Some(holiday)),
            &progress,
            Some(REST_DAY_GREETINGS[1]),
        );

        let expected = format!(
            "> <font color=\"info\">进度条</font> \n{} {}\n{}年，距离<font color=\"red\">劳动节</font>还有<font color=\"red\">27</font>天! \n\n> 明日休息, {}\n珍惜当下，享受此刻的美好!🌸",
            progress.bar, progress.percentage, progress.year, REST_DAY_GREETINGS[1]
        );
        assert!(markdown.ends_with(&expected));
        assert!(!markdown.contains("\n\n\n"));
    }

    #[test]
    fn test_markdown_without_holiday_falls_back_to_usage_line() {
        let progress = sample_progress();
        let markdown = render_markdown(DEFAULT_TITLE, &sample_data(None), &progress, None);

        assert!(markdown.contains("2025年，您已经使用了25.48%"));
        assert!(!markdown.contains("距离"));
        assert!(!markdown.contains("明日休息"));
    }

    #[test]
    fn test_pick_greeting_comes_from_fixed_set() {
        let mut rng = rand::rng();
        for _ in 0..20 {
            assert!(REST_DAY_GREETINGS.contains(&pick_greeting(&mut rng)));
        }
    }
}
