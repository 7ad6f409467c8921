//! iCalendar (RFC 5545) export.
//!
//! Events and the resolved custody timeline are written into a single
//! VCALENDAR container that desktop and mobile calendar apps can import.

mod generate;
mod text;

pub use generate::{
    Horizon, IcsOptions, generate_custody_ics, generate_events_ics, generate_ics,
};
pub use text::{generate_uid, normalize_line_breaks, unescape_text};
