pub mod add;
pub mod calendar;
pub mod delete;
pub mod edit;
pub mod events;
pub mod export;
pub mod pack;
pub mod setup;
pub mod today;

use anyhow::Result;
use chrono::{Local, NaiveDate};
use custody_core::date::parse_date;

/// Parse an optional --date flag, defaulting to today in local time.
pub fn date_or_today(date: Option<&str>) -> Result<NaiveDate> {
    match date {
        Some(s) => Ok(parse_date(s)?),
        None => Ok(Local::now().date_naive()),
    }
}
