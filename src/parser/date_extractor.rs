//! Date/time extraction for free-form event text
//!
//! Finds a `YYYY/MM/DD HH:mm` token inside an arbitrary string, cuts it out of
//! the text and turns it into a local start/end pair.

use chrono::{DateTime, Datelike, Duration, Local, NaiveDate, NaiveDateTime, NaiveTime, TimeZone};
use log::debug;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

/// Event length used when the text only names a start time
pub const DEFAULT_EVENT_DURATION_MINUTES: i64 = 60;

static DATE_TIME_TOKEN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(\d{4})/(\d{1,2})/(\d{1,2}) (\d{2}):(\d{2})").unwrap()
});

/// Start and end of an event, always present together
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeRange {
    pub start: DateTime<Local>,
    pub end: DateTime<Local>,
}

impl TimeRange {
    pub fn new(start: DateTime<Local>, end: DateTime<Local>) -> Self {
        Self { start, end }
    }

    /// Range beginning at `start` and lasting `duration`, if the end is representable
    pub fn starting_at(start: DateTime<Local>, duration: Duration) -> Option<Self> {
        let end = start.checked_add_signed(duration)?;
        Some(Self { start, end })
    }

    /// Both ends fit the four-digit years of the `YYYYMMDDTHHmmss` calendar format
    pub fn has_four_digit_years(&self) -> bool {
        (0..=9999).contains(&self.start.year()) && (0..=9999).contains(&self.end.year())
    }

    pub fn duration(&self) -> Duration {
        self.end - self.start
    }
}

/// Outcome of scanning event text for a date
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionResult {
    /// Input with the matched token cut out, otherwise untouched
    pub text_without_date: String,
    pub time_range: Option<TimeRange>,
}

impl ExtractionResult {
    fn without_date(input: &str) -> Self {
        Self { text_without_date: input.to_string(), time_range: None }
    }

    pub fn start_date_time(&self) -> Option<DateTime<Local>> {
        self.time_range.map(|range| range.start)
    }

    pub fn end_date_time(&self) -> Option<DateTime<Local>> {
        self.time_range.map(|range| range.end)
    }

    pub fn has_date(&self) -> bool {
        self.time_range.is_some()
    }
}

/// Extract the first `YYYY/MM/DD HH:mm` token from `input`.
///
/// The end time is one hour after the start. Text without a usable token comes
/// back unchanged with no time range; this never fails.
///
/// # Examples
///
/// ```
/// use quickcal::parser::extract_date_time;
///
/// let result = extract_date_time("ミーティング 2025/03/10 14:30");
/// assert_eq!(result.text_without_date, "ミーティング ");
/// assert!(result.has_date());
/// ```
pub fn extract_date_time(input: &str) -> ExtractionResult {
    extract_date_time_with_duration(input, Duration::minutes(DEFAULT_EVENT_DURATION_MINUTES))
}

/// Same as [`extract_date_time`] with a caller-chosen event length
pub fn extract_date_time_with_duration(input: &str, duration: Duration) -> ExtractionResult {
    for caps in DATE_TIME_TOKEN.captures_iter(input) {
        let Some(token) = caps.get(0) else { continue };

        if touches_digit(input, token.start(), token.end()) {
            debug!("Skipping date token glued to other digits: '{}'", token.as_str());
            continue;
        }

        let Some(start) = local_date_time(&caps) else {
            debug!("Skipping invalid date token: '{}'", token.as_str());
            continue;
        };

        let range = match TimeRange::starting_at(start, duration) {
            Some(range) if range.has_four_digit_years() => range,
            _ => {
                debug!("Skipping date token with out-of-range end: '{}'", token.as_str());
                continue;
            }
        };

        let mut text_without_date = String::with_capacity(input.len() - token.len());
        text_without_date.push_str(&input[..token.start()]);
        text_without_date.push_str(&input[token.end()..]);

        debug!("Extracted date token '{}' -> {}", token.as_str(), start);
        return ExtractionResult {
            text_without_date,
            time_range: Some(range),
        };
    }

    ExtractionResult::without_date(input)
}

fn touches_digit(input: &str, start: usize, end: usize) -> bool {
    let before = input[..start].chars().next_back();
    let after = input[end..].chars().next();
    before.is_some_and(|c| c.is_ascii_digit()) || after.is_some_and(|c| c.is_ascii_digit())
}

fn local_date_time(caps: &Captures<'_>) -> Option<DateTime<Local>> {
    let field = |i: usize| caps.get(i).and_then(|m| m.as_str().parse::<u32>().ok());

    let year = i32::try_from(field(1)?).ok()?;
    let date = NaiveDate::from_ymd_opt(year, field(2)?, field(3)?)?;
    let time = NaiveTime::from_hms_opt(field(4)?, field(5)?, 0)?;

    // Earliest instant on a DST fold, nothing inside a gap
    Local.from_local_datetime(&NaiveDateTime::new(date, time)).earliest()
}
