//! Year-elapsed progress bar with an optional next-holiday marker.
//!
//! Everything here is pure: the same `now`, bar length and holiday date
//! always produce the same [`ProgressResult`]. Time boundaries are taken in
//! the timezone carried by `now`, so callers decide what "local" means by
//! choosing the zone (see [`crate::adapters::clock::SystemClock`]).

use crate::domain::model::ProgressResult;
use crate::utils::error::{BriefError, Result};
use chrono::{DateTime, Datelike, NaiveDate, NaiveTime, TimeDelta, TimeZone};
use serde::{Deserialize, Serialize};

pub const MILLIS_PER_DAY: i64 = 86_400_000;

const GAP_SEARCH_STEPS: i64 = 16;

/// 進度條的字元與顏色
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BarStyle {
    pub passed_glyph: String,
    pub remaining_glyph: String,
    pub marker_glyph: String,
    pub passed_color: String,
    pub remaining_color: String,
    pub marker_color: String,
}

impl Default for BarStyle {
    fn default() -> Self {
        Self {
            passed_glyph: "█".to_string(),
            remaining_glyph: "█".to_string(),
            marker_glyph: "█".to_string(),
            passed_color: "#666".to_string(),
            remaining_color: "comment".to_string(),
            marker_color: "red".to_string(),
        }
    }
}

impl BarStyle {
    fn segment(color: &str, glyph: &str, count: usize) -> String {
        if count == 0 {
            return String::new();
        }
        format!("<font color=\"{}\">{}</font>", color, glyph.repeat(count))
    }

    /// 繪製 `cells_passed` 個已過格與 `cells_remaining` 個剩餘格。
    ///
    /// `marker` 是剩餘段內的位置，該格以標記字元取代，總格數不變。
    /// 超出剩餘段的位置會被忽略。
    pub fn paint(&self, cells_passed: usize, cells_remaining: usize, marker: Option<usize>) -> String {
        let mut bar = Self::segment(&self.passed_color, &self.passed_glyph, cells_passed);

        match marker.filter(|offset| *offset < cells_remaining) {
            Some(offset) => {
                bar.push_str(&Self::segment(
                    &self.remaining_color,
                    &self.remaining_glyph,
                    offset,
                ));
                bar.push_str(&Self::segment(&self.marker_color, &self.marker_glyph, 1));
                bar.push_str(&Self::segment(
                    &self.remaining_color,
                    &self.remaining_glyph,
                    cells_remaining - offset - 1,
                ));
            }
            None => bar.push_str(&Self::segment(
                &self.remaining_color,
                &self.remaining_glyph,
                cells_remaining,
            )),
        }

        bar
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedBar {
    pub cells_passed: usize,
    pub cells_remaining: usize,
    pub bar: String,
}

/// Gregorian leap-year rule.
pub fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

pub fn year_millis(year: i32) -> i64 {
    if is_leap_year(year) {
        366 * MILLIS_PER_DAY
    } else {
        365 * MILLIS_PER_DAY
    }
}

/// Local midnight of `date` in `tz`.
///
/// When midnight falls into a DST gap the day starts at the first local
/// instant after the gap.
pub fn local_midnight<Z: TimeZone>(tz: &Z, date: NaiveDate) -> DateTime<Z> {
    let naive = date.and_time(NaiveTime::MIN);
    // 夏令時跳變都是 15 分鐘的倍數，最長不超過數小時
    (0..=GAP_SEARCH_STEPS)
        .find_map(|step| {
            let candidate = naive + TimeDelta::minutes(15 * step);
            tz.from_local_datetime(&candidate).earliest()
        })
        .unwrap_or_else(|| tz.from_utc_datetime(&naive))
}

pub fn start_of_year<Z: TimeZone>(now: &DateTime<Z>) -> DateTime<Z> {
    let today = now.date_naive();
    let jan_first = NaiveDate::from_ymd_opt(now.year(), 1, 1).unwrap_or(today);
    local_midnight(&now.timezone(), jan_first)
}

/// Percentage of `now`'s year already elapsed, plus the year's length in ms.
///
/// Negative elapsed time (clock skew) counts as zero.
pub fn elapsed_percentage<Z: TimeZone>(now: &DateTime<Z>) -> (f64, i64) {
    let start = start_of_year(now);
    let total = year_millis(now.year());
    let elapsed = (now.timestamp_millis() - start.timestamp_millis()).max(0);
    (elapsed as f64 / total as f64 * 100.0, total)
}

/// `floor(percentage * bar_length / 100)` clamped to `[0, bar_length]`.
pub fn cells_for(percentage: f64, bar_length: usize) -> usize {
    let raw = (percentage * bar_length as f64 / 100.0).floor();
    if raw.is_nan() || raw <= 0.0 {
        0
    } else if raw >= bar_length as f64 {
        bar_length
    } else {
        raw as usize
    }
}

/// Position of the holiday marker inside the remaining run.
///
/// The marker sits `bar_length - holiday_cells_passed` cells before the end
/// of the run. A holiday already behind `now` lands on the first remaining
/// cell; one at or past year end lands on the last. `None` when there is
/// no remaining run to mark.
pub fn marker_offset(
    cells_remaining: usize,
    holiday_cells_passed: usize,
    bar_length: usize,
) -> Option<usize> {
    if cells_remaining == 0 {
        return None;
    }
    let holiday_length = bar_length - holiday_cells_passed.min(bar_length);
    let offset = cells_remaining.saturating_sub(holiday_length);
    Some(offset.min(cells_remaining - 1))
}

#[derive(Debug, Clone)]
pub struct ProgressCalculator {
    bar_length: usize,
    style: BarStyle,
}

impl ProgressCalculator {
    pub fn new(bar_length: usize, style: BarStyle) -> Result<Self> {
        if bar_length == 0 {
            return Err(BriefError::InvalidConfiguration {
                field: "bar_length".to_string(),
                value: bar_length.to_string(),
                reason: "bar length must be at least 1".to_string(),
            });
        }
        Ok(Self { bar_length, style })
    }

    pub fn bar_length(&self) -> usize {
        self.bar_length
    }

    pub fn render_bar(&self, percentage: f64) -> RenderedBar {
        let cells_passed = cells_for(percentage, self.bar_length);
        let cells_remaining = self.bar_length - cells_passed;
        RenderedBar {
            cells_passed,
            cells_remaining,
            bar: self.style.paint(cells_passed, cells_remaining, None),
        }
    }

    /// Holiday position in cells, measured from the same year start as `now`.
    pub fn holiday_cells<Z: TimeZone>(&self, now: &DateTime<Z>, holiday: NaiveDate) -> usize {
        let start = start_of_year(now);
        let total = year_millis(now.year());
        let at = local_midnight(&now.timezone(), holiday);
        let elapsed = at.timestamp_millis() - start.timestamp_millis();
        cells_for(elapsed as f64 / total as f64 * 100.0, self.bar_length)
    }

    pub fn compute<Z: TimeZone>(
        &self,
        now: &DateTime<Z>,
        holiday: Option<NaiveDate>,
    ) -> ProgressResult {
        let (percentage, _) = elapsed_percentage(now);
        let cells_passed = cells_for(percentage, self.bar_length);
        let cells_remaining = self.bar_length - cells_passed;

        let holiday_offset = holiday.and_then(|date| {
            marker_offset(
                cells_remaining,
                self.holiday_cells(now, date),
                self.bar_length,
            )
        });

        ProgressResult {
            percentage: format!("{:.2}%", percentage),
            percentage_value: percentage,
            cells_passed,
            cells_remaining,
            holiday_offset,
            bar: self.style.paint(cells_passed, cells_remaining, holiday_offset),
            year: now.year(),
        }
    }
}

/// Computes the progress bar with the default [`BarStyle`].
pub fn compute_progress<Z: TimeZone>(
    now: &DateTime<Z>,
    bar_length: usize,
    holiday: Option<NaiveDate>,
) -> Result<ProgressResult> {
    Ok(ProgressCalculator::new(bar_length, BarStyle::default())?.compute(now, holiday))
}
