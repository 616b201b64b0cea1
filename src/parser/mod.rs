/// QuickCal parser module
///
/// Pulls scheduling information out of free-form event text.
pub mod date_extractor;
pub mod utils;

pub use date_extractor::{
    DEFAULT_EVENT_DURATION_MINUTES, ExtractionResult, TimeRange, extract_date_time,
    extract_date_time_with_duration,
};
