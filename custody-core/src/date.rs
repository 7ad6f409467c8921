//! Parsing helpers for user-supplied dates, times and weekdays.
//!
//! Malformed input is always reported; a date cannot be guessed safely.

use chrono::{Datelike, NaiveDate, NaiveTime, Weekday};

use crate::error::{CustodyError, CustodyResult};

/// Parse YYYY-MM-DD
pub fn parse_date(s: &str) -> CustodyResult<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .map_err(|_| CustodyError::InvalidDate(s.to_string()))
}

/// Parse HH:MM (seconds are accepted but optional)
pub fn parse_time(s: &str) -> CustodyResult<NaiveTime> {
    let s = s.trim();
    NaiveTime::parse_from_str(s, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(s, "%H:%M:%S"))
        .map_err(|_| CustodyError::InvalidTime(s.to_string()))
}

/// Parse YYYY-MM into (year, month)
pub fn parse_month(s: &str) -> CustodyResult<(i32, u32)> {
    let first = NaiveDate::parse_from_str(&format!("{}-01", s.trim()), "%Y-%m-%d")
        .map_err(|_| CustodyError::InvalidDate(s.to_string()))?;
    Ok((first.year(), first.month()))
}

/// Parse a weekday name ("mon", "Monday") or its 0-6 index with Sunday = 0.
pub fn parse_weekday(s: &str) -> CustodyResult<Weekday> {
    let s = s.trim();
    if let Ok(n) = s.parse::<u8>() {
        return weekday_from_sunday_index(n).ok_or_else(|| CustodyError::UnknownWeekday(s.into()));
    }
    s.parse::<Weekday>()
        .map_err(|_| CustodyError::UnknownWeekday(s.to_string()))
}

/// Parse a comma separated weekday list such as "mon,wed,fri".
pub fn parse_weekdays(s: &str) -> CustodyResult<Vec<Weekday>> {
    s.split(',')
        .filter(|part| !part.trim().is_empty())
        .map(parse_weekday)
        .collect()
}

/// Map 0..=6 (Sunday first) to a weekday.
pub fn weekday_from_sunday_index(n: u8) -> Option<Weekday> {
    match n {
        0 => Some(Weekday::Sun),
        1 => Some(Weekday::Mon),
        2 => Some(Weekday::Tue),
        3 => Some(Weekday::Wed),
        4 => Some(Weekday::Thu),
        5 => Some(Weekday::Fri),
        6 => Some(Weekday::Sat),
        _ => None,
    }
}

/// Number of days in the given month, or None for an invalid year/month.
pub fn days_in_month(year: i32, month: u32) -> Option<u32> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let next = first.checked_add_months(chrono::Months::new(1))?;
    Some((next - first).num_days() as u32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_date_rejects_garbage() {
        assert!(parse_date("2025-13-01").is_err());
        assert!(parse_date("tomorrow").is_err());
        assert_eq!(
            parse_date("2025-03-20").unwrap(),
            NaiveDate::from_ymd_opt(2025, 3, 20).unwrap()
        );
    }

    #[test]
    fn test_parse_weekday_accepts_names_and_indices() {
        assert_eq!(parse_weekday("mon").unwrap(), Weekday::Mon);
        assert_eq!(parse_weekday("Saturday").unwrap(), Weekday::Sat);
        assert_eq!(parse_weekday("0").unwrap(), Weekday::Sun);
        assert!(parse_weekday("7").is_err());
        assert_eq!(
            parse_weekdays("mon, wed,").unwrap(),
            vec![Weekday::Mon, Weekday::Wed]
        );
    }

    #[test]
    fn test_days_in_month_handles_leap_years() {
        assert_eq!(days_in_month(2024, 2), Some(29));
        assert_eq!(days_in_month(2025, 2), Some(28));
        assert_eq!(days_in_month(2025, 12), Some(31));
        assert_eq!(days_in_month(2025, 13), None);
    }

    #[test]
    fn test_parse_month() {
        assert_eq!(parse_month("2025-03").unwrap(), (2025, 3));
        assert!(parse_month("2025-3x").is_err());
    }
}
