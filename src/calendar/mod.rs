//! Calendar service links
//!
//! Only Google Calendar is supported; events are never written directly, the
//! user confirms them on the service's own edit page.

mod google_calendar;

pub use google_calendar::*;
