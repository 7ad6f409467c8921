//! Date and recurrence engine for a shared custody calendar.
//!
//! This crate is pure computation over dates and records:
//! - `schedule` resolves which parent owns a day and when custody changes hands
//! - `recurrence` expands a repeating event into a bounded series
//! - `series` plans edits and deletes across a series
//! - `ics` exports events and the custody timeline as iCalendar text
//! - `packing` lists what goes in the bag before a handoff
//!
//! Storage and transport are left to callers.

pub mod date;
pub mod error;
pub mod event;
pub mod ics;
pub mod packing;
pub mod recurrence;
pub mod schedule;
pub mod series;

pub use error::{CustodyError, CustodyResult};
pub use event::{Category, EventInstance, EventTemplate, SeriesId};
pub use recurrence::{Frequency, RecurrenceRule, expand};
pub use schedule::{CustodySchedule, Parent, PatternKind};
