//! Google Calendar event-creation links
//!
//! Builds `https://calendar.google.com/calendar/r/eventedit` URLs prefilled
//! with a title, a details body and an optional time range.

use crate::parser::{ExtractionResult, TimeRange};
use chrono::{DateTime, Local, NaiveDateTime, TimeZone};
use log::debug;
use once_cell::sync::Lazy;
use url::Url;

pub const GOOGLE_CALENDAR_EVENT_URL: &str = "https://calendar.google.com/calendar/r/eventedit";

/// `YYYYMMDDTHHmmss` with seconds pinned to zero
const CALENDAR_TIMESTAMP_FORMAT: &str = "%Y%m%dT%H%M00";
const CALENDAR_TIMESTAMP_PARSE_FORMAT: &str = "%Y%m%dT%H%M%S";

static EVENT_EDIT_URL: Lazy<Url> =
    Lazy::new(|| Url::parse(GOOGLE_CALENDAR_EVENT_URL).expect("event edit URL is valid"));

/// Build the event-creation link.
///
/// `dates` is only added when both `start` and `end` are given.
pub fn create_google_calendar_url(
    text: &str,
    details: &str,
    start: Option<DateTime<Local>>,
    end: Option<DateTime<Local>>,
) -> Url {
    let mut url = EVENT_EDIT_URL.clone();
    {
        let mut query = url.query_pairs_mut();
        query.append_pair("text", text);
        query.append_pair("details", details);
        if let (Some(start), Some(end)) = (start, end) {
            query.append_pair("dates", &format_calendar_dates(&TimeRange::new(start, end)));
        }
    }

    debug!("Built calendar URL: {}", url);
    url
}

/// Feed an extraction straight into [`create_google_calendar_url`]
pub fn create_google_calendar_url_for(extraction: &ExtractionResult, details: &str) -> Url {
    create_google_calendar_url(
        &extraction.text_without_date,
        details,
        extraction.start_date_time(),
        extraction.end_date_time(),
    )
}

pub fn format_calendar_timestamp(instant: &DateTime<Local>) -> String {
    instant.format(CALENDAR_TIMESTAMP_FORMAT).to_string()
}

/// `<START>/<END>` value of the `dates` parameter
pub fn format_calendar_dates(range: &TimeRange) -> String {
    format!("{}/{}", format_calendar_timestamp(&range.start), format_calendar_timestamp(&range.end))
}

/// Read a `dates` value back into local instants
pub fn parse_calendar_dates(value: &str) -> Option<TimeRange> {
    let (start, end) = value.split_once('/')?;
    Some(TimeRange::new(parse_calendar_timestamp(start)?, parse_calendar_timestamp(end)?))
}

fn parse_calendar_timestamp(value: &str) -> Option<DateTime<Local>> {
    let naive = NaiveDateTime::parse_from_str(value, CALENDAR_TIMESTAMP_PARSE_FORMAT).ok()?;
    Local.from_local_datetime(&naive).earliest()
}

/// Value of a query parameter, decoded
pub fn query_param(url: &Url, name: &str) -> Option<String> {
    url.query_pairs().find(|(key, _)| key == name).map(|(_, value)| value.into_owned())
}
