//! ICS generation for events and custody spans.

use chrono::{DateTime, Duration, Months, NaiveDate, Utc};
use icalendar::{Calendar, Component, EventLike, Property, ValueType};

use super::text::{generate_uid, normalize_line_breaks};
use crate::event::EventInstance;
use crate::schedule::{CustodySchedule, CustodySpan};

pub const DEFAULT_CALENDAR_NAME: &str = "Family Schedule";
pub const DEFAULT_PRODUCT_ID: &str = "-//HarmonyHub//Custody Scheduler//EN";

/// Calendar-level settings for one export.
#[derive(Debug, Clone)]
pub struct IcsOptions {
    /// Shown by clients as the calendar name (X-WR-CALNAME)
    pub calendar_name: String,
    pub product_id: String,
    /// DTSTAMP written on every record
    pub stamp: DateTime<Utc>,
}

impl Default for IcsOptions {
    fn default() -> Self {
        IcsOptions {
            calendar_name: DEFAULT_CALENDAR_NAME.to_string(),
            product_id: DEFAULT_PRODUCT_ID.to_string(),
            stamp: Utc::now(),
        }
    }
}

/// How far past the anchor date the custody timeline is exported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Horizon {
    Months(u32),
    Days(u32),
    /// Exclusive end date
    Until(NaiveDate),
}

impl Default for Horizon {
    fn default() -> Self {
        Horizon::Months(12)
    }
}

impl Horizon {
    /// First day after the exported range.
    pub fn end_from(&self, anchor: NaiveDate) -> NaiveDate {
        match *self {
            Horizon::Months(n) => anchor
                .checked_add_months(Months::new(n))
                .unwrap_or(NaiveDate::MAX),
            Horizon::Days(n) => anchor
                .checked_add_signed(Duration::days(i64::from(n)))
                .unwrap_or(NaiveDate::MAX),
            Horizon::Until(end) => end,
        }
    }
}

fn format_stamp(stamp: &DateTime<Utc>) -> String {
    stamp.format("%Y%m%dT%H%M%SZ").to_string()
}

/// All-day value, written as `NAME;VALUE=DATE:YYYYMMDD`.
fn add_date_property(ics_event: &mut icalendar::Event, name: &str, date: NaiveDate) {
    let mut prop = Property::new(name, date.format("%Y%m%d").to_string());
    prop.append_parameter(ValueType::Date);
    ics_event.append_property(prop);
}

fn event_record(event: &EventInstance, dtstamp: &str) -> icalendar::Event {
    let template = &event.template;

    let mut ics_event = icalendar::Event::new();
    ics_event.uid(&generate_uid());
    ics_event.add_property("DTSTAMP", dtstamp);

    // Timed events use floating local time; the template has no zone
    match template.time {
        Some(time) => {
            let start = template.date.and_time(time).format("%Y%m%dT%H%M%S");
            ics_event.add_property("DTSTART", start.to_string());
        }
        None => add_date_property(&mut ics_event, "DTSTART", template.date),
    }

    ics_event.summary(&normalize_line_breaks(&template.title));

    if let Some(ref location) = template.location {
        ics_event.location(&normalize_line_breaks(location));
    }
    if let Some(ref notes) = template.notes {
        ics_event.description(&normalize_line_breaks(notes));
    }
    if !template.category.is_empty() {
        ics_event.add_property("CATEGORIES", &template.category);
    }

    ics_event.done()
}

fn span_record(
    schedule: &CustodySchedule,
    span: &CustodySpan,
    dtstamp: &str,
) -> icalendar::Event {
    let owner = schedule.name_of(span.owner);

    let mut ics_event = icalendar::Event::new();
    ics_event.uid(&generate_uid());
    ics_event.add_property("DTSTAMP", dtstamp);
    add_date_property(&mut ics_event, "DTSTART", span.start);
    add_date_property(&mut ics_event, "DTEND", span.end);
    ics_event.summary(&format!("With {owner}"));
    ics_event.description(&format!("Custody with {owner}"));
    // Custody spans shouldn't block time in the importing calendar
    ics_event.add_property("TRANSP", "TRANSPARENT");

    ics_event.done()
}

/// Swap the crate's default PRODID for ours.
fn set_product_id(ics: &str, product_id: &str) -> String {
    let mut result = String::with_capacity(ics.len());

    for line in ics.lines() {
        if line.starts_with("PRODID:") {
            result.push_str("PRODID:");
            result.push_str(product_id);
        } else {
            result.push_str(line);
        }
        result.push_str("\r\n");
    }

    result
}

/// Generate one VCALENDAR holding `events` and, optionally, the custody
/// timeline from the schedule's anchor up to `horizon`.
pub fn generate_ics(
    events: &[EventInstance],
    custody: Option<(&CustodySchedule, Horizon)>,
    opts: &IcsOptions,
) -> String {
    let dtstamp = format_stamp(&opts.stamp);
    let mut cal = Calendar::new();

    cal.append_property(Property::new("METHOD", "PUBLISH"));
    cal.append_property(Property::new("X-WR-CALNAME", opts.calendar_name.as_str()));

    for event in events {
        cal.push(event_record(event, &dtstamp));
    }

    let mut span_count = 0;
    if let Some((schedule, horizon)) = custody {
        let end = horizon.end_from(schedule.anchor_date);
        let spans = schedule.spans(schedule.anchor_date, end);
        span_count = spans.len();

        for span in &spans {
            cal.push(span_record(schedule, span, &dtstamp));
        }
    }

    let cal = cal.done();

    tracing::debug!(
        events = events.len(),
        spans = span_count,
        "Generated calendar export"
    );

    set_product_id(&cal.to_string(), &opts.product_id)
}

/// Export events only.
pub fn generate_events_ics(events: &[EventInstance], opts: &IcsOptions) -> String {
    generate_ics(events, None, opts)
}

/// Export the custody timeline only.
pub fn generate_custody_ics(
    schedule: &CustodySchedule,
    horizon: Horizon,
    opts: &IcsOptions,
) -> String {
    generate_ics(&[], Some((schedule, horizon)), opts)
}
