//! Recurring event expansion.
//!
//! Turns one template plus a repeat rule into a bounded, chronologically
//! ordered series of dated instances that share a [`SeriesId`].

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Months, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use crate::error::CustodyError;
use crate::event::{EventInstance, EventTemplate, SeriesId};

/// Upper bound on instances emitted by a single expansion.
pub const MAX_SERIES_INSTANCES: usize = 200;

/// How far past the start date an open-ended rule is walked.
pub const MAX_HORIZON_YEARS: u32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Frequency {
    Daily,
    Weekly,
    Biweekly,
    Monthly,
}

impl Frequency {
    pub fn uses_weekdays(&self) -> bool {
        matches!(self, Frequency::Weekly | Frequency::Biweekly)
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Frequency::Daily => "daily",
            Frequency::Weekly => "weekly",
            Frequency::Biweekly => "biweekly",
            Frequency::Monthly => "monthly",
        };
        f.write_str(s)
    }
}

impl FromStr for Frequency {
    type Err = CustodyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "daily" => Ok(Frequency::Daily),
            "weekly" => Ok(Frequency::Weekly),
            "biweekly" => Ok(Frequency::Biweekly),
            "monthly" => Ok(Frequency::Monthly),
            _ => Err(CustodyError::UnknownFrequency(s.to_string())),
        }
    }
}

/// A repeat rule attached to an event template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecurrenceRule {
    pub frequency: Frequency,
    /// Only consulted for weekly and biweekly rules.
    #[serde(default)]
    pub days_of_week: HashSet<Weekday>,
    /// Last day (inclusive) an instance may fall on.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub until: Option<NaiveDate>,
}

impl RecurrenceRule {
    pub fn new(frequency: Frequency) -> Self {
        RecurrenceRule {
            frequency,
            days_of_week: HashSet::new(),
            until: None,
        }
    }

    pub fn on_days(mut self, days: impl IntoIterator<Item = Weekday>) -> Self {
        self.days_of_week.extend(days);
        self
    }

    pub fn until(mut self, until: NaiveDate) -> Self {
        self.until = Some(until);
        self
    }

    fn matches(&self, start: NaiveDate, date: NaiveDate) -> bool {
        match self.frequency {
            Frequency::Daily => true,
            Frequency::Weekly => self.days_of_week.contains(&date.weekday()),
            Frequency::Biweekly => {
                let weeks = (date - start).num_days().div_euclid(7);
                weeks.rem_euclid(2) == 0 && self.days_of_week.contains(&date.weekday())
            }
            Frequency::Monthly => date.day() == start.day(),
        }
    }

    /// Last day the expander will visit for a series starting on `start`.
    fn last_day(&self, start: NaiveDate) -> NaiveDate {
        match self.until {
            Some(until) => until,
            None => start
                .checked_add_months(Months::new(12 * MAX_HORIZON_YEARS))
                .unwrap_or(NaiveDate::MAX),
        }
    }

    /// Human-readable summary, e.g. "Repeats every Mon, Wed until Oct 3, 2026".
    pub fn describe(&self, start: NaiveDate) -> String {
        let mut preview = match self.frequency {
            Frequency::Daily => "Repeats daily".to_string(),
            Frequency::Weekly => format!("Repeats every {}", self.weekday_list()),
            Frequency::Biweekly => format!("Repeats every 2 weeks on {}", self.weekday_list()),
            Frequency::Monthly => {
                format!("Repeats on the {} of each month", ordinal(start.day()))
            }
        };

        if let Some(until) = self.until {
            preview.push_str(&format!(" until {}", until.format("%b %-d, %Y")));
        }

        preview
    }

    fn weekday_list(&self) -> String {
        let mut days: Vec<Weekday> = self.days_of_week.iter().copied().collect();
        days.sort_by_key(|d| d.num_days_from_sunday());
        days.iter()
            .map(|d| d.to_string())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

fn ordinal(n: u32) -> String {
    let suffix = match (n % 10, n % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    };
    format!("{n}{suffix}")
}

/// Expand `template` under `rule` into a series of instances.
///
/// - Without a rule the template becomes one standalone instance.
/// - At most [`MAX_SERIES_INSTANCES`] are emitted; open-ended rules stop
///   after [`MAX_HORIZON_YEARS`]. Use [`was_truncated`] to detect the cap.
/// - A rule that matches no day yields the standalone base instance, never
///   an empty list.
pub fn expand(template: &EventTemplate, rule: Option<&RecurrenceRule>) -> Vec<EventInstance> {
    let Some(rule) = rule else {
        return vec![EventInstance::standalone(template.clone())];
    };

    // No weekday can ever match, however far `until` is
    if rule.frequency.uses_weekdays() && rule.days_of_week.is_empty() {
        tracing::debug!(
            frequency = %rule.frequency,
            "Repeat rule has no weekdays, keeping the base event"
        );
        return vec![EventInstance::standalone(template.clone())];
    }

    let series_id = SeriesId::new();
    let start = template.date;
    let last_day = rule.last_day(start);

    let mut instances = Vec::new();

    for date in start.iter_days().take_while(|d| *d <= last_day) {
        if instances.len() >= MAX_SERIES_INSTANCES {
            break;
        }
        if !rule.matches(start, date) {
            continue;
        }

        instances.push(EventInstance {
            id: None,
            template: EventTemplate {
                date,
                ..template.clone()
            },
            is_recurring: true,
            recurrence_type: Some(rule.frequency),
            series_id: Some(series_id),
            instance_index: instances.len() as u32,
        });
    }

    if instances.is_empty() {
        tracing::debug!(
            frequency = %rule.frequency,
            "Repeat rule matched no days, keeping the base event"
        );
        return vec![EventInstance::standalone(template.clone())];
    }

    tracing::debug!(
        series = %series_id,
        count = instances.len(),
        truncated = was_truncated(&instances),
        "Expanded recurring event"
    );

    instances
}

/// Whether an expansion stopped at the instance cap.
pub fn was_truncated(instances: &[EventInstance]) -> bool {
    instances.len() >= MAX_SERIES_INSTANCES
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::Category;
    use chrono::Duration;

    fn template_on(date: NaiveDate) -> EventTemplate {
        let mut template = EventTemplate::new("Piano lesson", date, Category::Activities);
        template.location = Some("Music school".to_string());
        template
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_no_rule_yields_single_standalone_instance() {
        let instances = expand(&template_on(date(2025, 3, 3)), None);
        assert_eq!(instances.len(), 1);
        assert!(!instances[0].is_recurring);
        assert_eq!(instances[0].series_id, None);
        assert_eq!(instances[0].instance_index, 0);
    }

    #[test]
    fn test_open_ended_weekly_rule_is_capped() {
        // 2025-03-03 is a Monday
        let start = date(2025, 3, 3);
        let rule = RecurrenceRule::new(Frequency::Weekly).on_days([Weekday::Mon]);
        let instances = expand(&template_on(start), Some(&rule));

        assert_eq!(instances.len(), MAX_SERIES_INSTANCES);
        assert!(was_truncated(&instances));

        let series_id = instances[0].series_id.expect("series id");
        for (i, instance) in instances.iter().enumerate() {
            assert_eq!(instance.date().weekday(), Weekday::Mon);
            assert_eq!(instance.instance_index as usize, i);
            assert_eq!(instance.series_id, Some(series_id));
            assert_eq!(instance.recurrence_type, Some(Frequency::Weekly));
            assert_eq!(instance.template.location.as_deref(), Some("Music school"));
        }
        assert_eq!(instances[199].date(), start + Duration::weeks(199));
    }

    #[test]
    fn test_until_before_start_falls_back_to_base_instance() {
        let start = date(2025, 3, 3);
        let rule = RecurrenceRule::new(Frequency::Daily).until(start - Duration::days(1));
        let instances = expand(&template_on(start), Some(&rule));

        assert_eq!(instances.len(), 1);
        assert_eq!(instances[0].date(), start);
        assert_eq!(instances[0].series_id, None);
    }

    #[test]
    fn test_weekly_without_days_falls_back_to_base_instance() {
        let rule = RecurrenceRule::new(Frequency::Weekly).until(date(2025, 6, 1));
        let instances = expand(&template_on(date(2025, 3, 3)), Some(&rule));
        assert_eq!(instances.len(), 1);
        assert!(!instances[0].is_recurring);
    }

    #[test]
    fn test_until_is_inclusive() {
        let start = date(2025, 3, 3);
        let rule = RecurrenceRule::new(Frequency::Daily).until(date(2025, 3, 9));
        let instances = expand(&template_on(start), Some(&rule));
        assert_eq!(instances.len(), 7);
        assert_eq!(instances.last().unwrap().date(), date(2025, 3, 9));
        assert!(!was_truncated(&instances));
    }

    #[test]
    fn test_biweekly_counts_weeks_from_start() {
        // Start on a Wednesday; the Monday five days later is in week 0,
        // the Monday after that in week 1 and must be skipped.
        let start = date(2025, 3, 5);
        let rule = RecurrenceRule::new(Frequency::Biweekly)
            .on_days([Weekday::Mon, Weekday::Wed])
            .until(date(2025, 3, 31));
        let dates: Vec<NaiveDate> = expand(&template_on(start), Some(&rule))
            .iter()
            .map(|i| i.date())
            .collect();

        assert_eq!(
            dates,
            vec![
                date(2025, 3, 5),
                date(2025, 3, 10),
                date(2025, 3, 19),
                date(2025, 3, 24),
            ]
        );
    }

    #[test]
    fn test_monthly_skips_months_without_that_day() {
        let start = date(2025, 1, 31);
        let rule = RecurrenceRule::new(Frequency::Monthly).until(date(2025, 6, 30));
        let dates: Vec<NaiveDate> = expand(&template_on(start), Some(&rule))
            .iter()
            .map(|i| i.date())
            .collect();

        assert_eq!(
            dates,
            vec![date(2025, 1, 31), date(2025, 3, 31), date(2025, 5, 31)]
        );
    }

    #[test]
    fn test_open_ended_monthly_stops_at_horizon() {
        let start = date(2025, 1, 15);
        let rule = RecurrenceRule::new(Frequency::Monthly);
        let instances = expand(&template_on(start), Some(&rule));
        // 10 years of months, both ends inclusive
        assert_eq!(instances.len(), 121);
        assert_eq!(instances.last().unwrap().date(), date(2035, 1, 15));
    }

    #[test]
    fn test_weekly_without_days_returns_base_event_immediately() {
        let start = date(2025, 3, 3);
        for frequency in [Frequency::Weekly, Frequency::Biweekly] {
            let rule = RecurrenceRule::new(frequency).until(NaiveDate::MAX);
            let instances = expand(&template_on(start), Some(&rule));

            assert_eq!(instances.len(), 1);
            assert!(!instances[0].is_recurring);
            assert_eq!(instances[0].date(), start);
        }
    }

    #[test]
    fn test_each_expansion_gets_its_own_series() {
        let rule = RecurrenceRule::new(Frequency::Daily).until(date(2025, 3, 5));
        let a = expand(&template_on(date(2025, 3, 3)), Some(&rule));
        let b = expand(&template_on(date(2025, 3, 3)), Some(&rule));
        assert_ne!(a[0].series_id, b[0].series_id);
    }

    #[test]
    fn test_describe() {
        let start = date(2025, 3, 3);
        let rule = RecurrenceRule::new(Frequency::Weekly)
            .on_days([Weekday::Wed, Weekday::Mon])
            .until(date(2026, 10, 3));
        assert_eq!(rule.describe(start), "Repeats every Mon, Wed until Oct 3, 2026");

        let rule = RecurrenceRule::new(Frequency::Monthly);
        assert_eq!(rule.describe(date(2025, 3, 22)), "Repeats on the 22nd of each month");
        assert_eq!(
            RecurrenceRule::new(Frequency::Daily).describe(start),
            "Repeats daily"
        );
    }

    #[test]
    fn test_frequency_from_str() {
        assert_eq!("Weekly".parse::<Frequency>().unwrap(), Frequency::Weekly);
        assert!("yearly".parse::<Frequency>().is_err());
    }
}
