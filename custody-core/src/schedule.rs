//! Custody patterns and the owner resolver.
//!
//! Every consumer that needs to know who has the child on a given day
//! (the "today" summary, the month view, the iCalendar export) goes through
//! [`owner`] and [`days_until_handoff`].

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Duration, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use crate::date::days_in_month;
use crate::error::CustodyError;

/// The closed set of supported custody rotations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PatternKind {
    /// One week with each parent.
    #[serde(rename = "alternating-weeks")]
    AlternatingWeeks,
    /// 2 days, 2 days, 3 days rotating.
    #[serde(rename = "2-2-3")]
    TwoTwoThree,
    /// Weekdays with one parent, weekends with the other.
    #[serde(rename = "weekday-weekend")]
    WeekdayWeekend,
}

impl PatternKind {
    pub const ALL: [PatternKind; 3] = [
        PatternKind::AlternatingWeeks,
        PatternKind::TwoTwoThree,
        PatternKind::WeekdayWeekend,
    ];

    /// Stable identifier used in config files and on the command line.
    pub fn id(&self) -> &'static str {
        match self {
            PatternKind::AlternatingWeeks => "alternating-weeks",
            PatternKind::TwoTwoThree => "2-2-3",
            PatternKind::WeekdayWeekend => "weekday-weekend",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            PatternKind::AlternatingWeeks => "Alternating Weeks",
            PatternKind::TwoTwoThree => "2-2-3 Schedule",
            PatternKind::WeekdayWeekend => "Weekday/Weekend Split",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            PatternKind::AlternatingWeeks => "One week with each parent",
            PatternKind::TwoTwoThree => "2 days, 2 days, 3 days rotating",
            PatternKind::WeekdayWeekend => "Weekdays with one parent, weekends with other",
        }
    }

    /// Length of the repeating cycle in days.
    pub fn period_days(&self) -> i64 {
        match self {
            PatternKind::AlternatingWeeks => 14,
            PatternKind::TwoTwoThree | PatternKind::WeekdayWeekend => 7,
        }
    }
}

impl fmt::Display for PatternKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for PatternKind {
    type Err = CustodyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PatternKind::ALL
            .into_iter()
            .find(|p| p.id().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| CustodyError::UnknownPattern(s.to_string()))
    }
}

/// Which side of the schedule owns a day. `A` is in control at offset 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Parent {
    A,
    B,
}

impl Parent {
    pub fn other(self) -> Parent {
        match self {
            Parent::A => Parent::B,
            Parent::B => Parent::A,
        }
    }
}

/// Signed day distance from the anchor. Negative before the anchor.
fn day_offset(anchor: NaiveDate, date: NaiveDate) -> i64 {
    (date - anchor).num_days()
}

fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// Resolve who owns `date` under `pattern`, measured from `anchor`.
pub fn owner(pattern: PatternKind, anchor: NaiveDate, date: NaiveDate) -> Parent {
    let offset = day_offset(anchor, date);

    match pattern {
        PatternKind::AlternatingWeeks => {
            if offset.div_euclid(7).rem_euclid(2) == 0 {
                Parent::A
            } else {
                Parent::B
            }
        }
        PatternKind::TwoTwoThree => match offset.rem_euclid(7) {
            0 | 1 => Parent::A,
            2 | 3 => Parent::B,
            _ => Parent::A,
        },
        PatternKind::WeekdayWeekend => {
            if is_weekend(date) {
                Parent::B
            } else {
                Parent::A
            }
        }
    }
}

/// Smallest `n > 0` such that the owner of `date + n` differs from the owner of `date`.
pub fn days_until_handoff(pattern: PatternKind, anchor: NaiveDate, date: NaiveDate) -> u32 {
    let offset = day_offset(anchor, date);

    let days = match pattern {
        PatternKind::AlternatingWeeks => 7 - offset.rem_euclid(7),
        PatternKind::TwoTwoThree => match offset.rem_euclid(7) {
            c @ 0..=1 => 2 - c,
            c @ 2..=3 => 4 - c,
            // The 3-day block runs straight into the next cycle's 2-day block.
            c => 9 - c,
        },
        PatternKind::WeekdayWeekend => match date.weekday() {
            Weekday::Sat => 2,
            Weekday::Sun => 1,
            weekday => 5 - i64::from(weekday.num_days_from_monday()),
        },
    };

    days as u32
}

/// A custody rotation between two named owners.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustodySchedule {
    pub pattern: PatternKind,
    pub anchor_date: NaiveDate,
    pub owner_a: String,
    pub owner_b: String,

    /// Household grouping from the account layer; carried through untouched.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub family_id: Option<String>,
}

/// One resolved day. Derived on demand, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CustodyDay {
    pub date: NaiveDate,
    pub owner: Parent,
}

/// A maximal run of days with the same owner. `end` is exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CustodySpan {
    pub owner: Parent,
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl CustodySpan {
    pub fn len_days(&self) -> i64 {
        (self.end - self.start).num_days()
    }
}

/// Where the child is on a given day and when that changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Handoff {
    pub owner: Parent,
    pub next_owner: Parent,
    pub days_until: u32,
    /// First day owned by `next_owner`.
    pub date: NaiveDate,
}

impl CustodySchedule {
    pub fn new(
        pattern: PatternKind,
        anchor_date: NaiveDate,
        owner_a: impl Into<String>,
        owner_b: impl Into<String>,
    ) -> Self {
        CustodySchedule {
            pattern,
            anchor_date,
            owner_a: owner_a.into(),
            owner_b: owner_b.into(),
            family_id: None,
        }
    }

    pub fn owner_on(&self, date: NaiveDate) -> Parent {
        owner(self.pattern, self.anchor_date, date)
    }

    pub fn name_of(&self, parent: Parent) -> &str {
        match parent {
            Parent::A => &self.owner_a,
            Parent::B => &self.owner_b,
        }
    }

    pub fn owner_name_on(&self, date: NaiveDate) -> &str {
        self.name_of(self.owner_on(date))
    }

    pub fn days_until_handoff(&self, date: NaiveDate) -> u32 {
        days_until_handoff(self.pattern, self.anchor_date, date)
    }

    pub fn handoff(&self, date: NaiveDate) -> Handoff {
        let owner = self.owner_on(date);
        let days_until = self.days_until_handoff(date);

        Handoff {
            owner,
            next_owner: owner.other(),
            days_until,
            date: date + Duration::days(i64::from(days_until)),
        }
    }

    /// Resolve every day in `[from, until)`.
    pub fn timeline(&self, from: NaiveDate, until: NaiveDate) -> Vec<CustodyDay> {
        from.iter_days()
            .take_while(|d| *d < until)
            .map(|date| CustodyDay {
                date,
                owner: self.owner_on(date),
            })
            .collect()
    }

    /// Resolve every day of a calendar month. Empty for an invalid month.
    pub fn month(&self, year: i32, month: u32) -> Vec<CustodyDay> {
        let Some(first) = NaiveDate::from_ymd_opt(year, month, 1) else {
            return Vec::new();
        };
        let Some(len) = days_in_month(year, month) else {
            return Vec::new();
        };

        self.timeline(first, first + Duration::days(i64::from(len)))
    }

    /// Merge `[from, until)` into maximal same-owner spans.
    pub fn spans(&self, from: NaiveDate, until: NaiveDate) -> Vec<CustodySpan> {
        let mut spans: Vec<CustodySpan> = Vec::new();

        for day in self.timeline(from, until) {
            match spans.last_mut() {
                Some(span) if span.owner == day.owner => {
                    span.end = day.date.succ_opt().unwrap_or(day.date);
                }
                _ => spans.push(CustodySpan {
                    owner: day.owner,
                    start: day.date,
                    end: day.date.succ_opt().unwrap_or(day.date),
                }),
            }
        }

        spans
    }
}
