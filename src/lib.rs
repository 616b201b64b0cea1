pub mod app;
pub mod calendar;
pub mod cli;
pub mod config;
pub mod context;
pub mod error;
pub mod opener;
pub mod parser;

// Re-export commonly used types
pub use calendar::create_google_calendar_url;
pub use config::Config;
pub use error::QuickCalError;
pub use parser::{ExtractionResult, TimeRange, extract_date_time};
