//! Selecting which instances of a series an edit or delete touches.
//!
//! Planning is pure: the result is a [`MutationPlan`] naming the affected
//! instances. Writing them back, ideally in one batch, is up to the caller.

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::error::CustodyError;
use crate::event::{Category, EventInstance};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SeriesAction {
    Update,
    Delete,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MutationScope {
    ThisOnly,
    ThisAndFollowing,
    All,
}

impl fmt::Display for MutationScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            MutationScope::ThisOnly => "this event",
            MutationScope::ThisAndFollowing => "this and following events",
            MutationScope::All => "all events in the series",
        };
        f.write_str(s)
    }
}

impl FromStr for MutationScope {
    type Err = CustodyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "this" | "this-only" => Ok(MutationScope::ThisOnly),
            "following" | "this-and-following" => Ok(MutationScope::ThisAndFollowing),
            "all" => Ok(MutationScope::All),
            _ => Err(CustodyError::UnknownScope(s.to_string())),
        }
    }
}

/// The instances an action applies to.
#[derive(Debug, Clone, PartialEq)]
pub struct MutationPlan<'a> {
    pub action: SeriesAction,
    /// Scope actually applied; `ThisOnly` when the target has no series.
    pub scope: MutationScope,
    pub targets: Vec<&'a EventInstance>,
}

/// Decide which of `series` are affected when `action` is applied to `target`.
///
/// `series` may contain unrelated records; only instances sharing the
/// target's series id are ever selected. The target itself is always part
/// of the plan.
pub fn plan<'a>(
    action: SeriesAction,
    scope: MutationScope,
    target: &'a EventInstance,
    series: &'a [EventInstance],
) -> MutationPlan<'a> {
    let Some(series_id) = target.series_id else {
        return MutationPlan {
            action,
            scope: MutationScope::ThisOnly,
            targets: vec![target],
        };
    };

    let mut targets: Vec<&EventInstance> = match scope {
        MutationScope::ThisOnly => vec![target],
        MutationScope::ThisAndFollowing => series
            .iter()
            .filter(|i| i.is_in_series(series_id) && i.instance_index >= target.instance_index)
            .collect(),
        MutationScope::All => series.iter().filter(|i| i.is_in_series(series_id)).collect(),
    };

    // The caller may pass a series that doesn't include the target record.
    if !targets.iter().any(|i| i.instance_index == target.instance_index) {
        targets.push(target);
    }
    targets.sort_by_key(|i| i.instance_index);

    tracing::debug!(
        series = %series_id,
        ?action,
        %scope,
        count = targets.len(),
        "Planned series mutation"
    );

    MutationPlan {
        action,
        scope,
        targets,
    }
}

impl MutationPlan<'_> {
    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    pub fn indices(&self) -> Vec<u32> {
        self.targets.iter().map(|i| i.instance_index).collect()
    }

    /// Store ids of the selected records that have been saved.
    pub fn ids(&self) -> Vec<&str> {
        self.targets.iter().filter_map(|i| i.id.as_deref()).collect()
    }

    pub fn contains(&self, instance: &EventInstance) -> bool {
        self.targets.iter().any(|t| *t == instance)
    }

    /// Updated copies of the selected instances. Empty for delete plans.
    ///
    /// A date change only applies to a single event; series-wide edits keep
    /// each instance on its own date.
    pub fn apply(&self, patch: &EventPatch) -> Vec<EventInstance> {
        if self.action == SeriesAction::Delete {
            return Vec::new();
        }

        let move_date = self.scope == MutationScope::ThisOnly;

        self.targets
            .iter()
            .map(|instance| {
                let mut updated = (*instance).clone();
                patch.apply_to(&mut updated, move_date);
                updated
            })
            .collect()
    }
}

/// Field changes for an edit. `None` leaves a field as it is.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventPatch {
    pub title: Option<String>,
    pub date: Option<NaiveDate>,
    /// `Some(None)` clears the time, making the event all-day.
    pub time: Option<Option<NaiveTime>>,
    pub location: Option<Option<String>>,
    pub notes: Option<Option<String>>,
    pub category: Option<Category>,
}

impl EventPatch {
    pub fn is_empty(&self) -> bool {
        *self == EventPatch::default()
    }

    fn apply_to(&self, instance: &mut EventInstance, move_date: bool) {
        let template = &mut instance.template;

        if let Some(ref title) = self.title {
            template.title = title.clone();
        }
        if let (true, Some(date)) = (move_date, self.date) {
            template.date = date;
        }
        if let Some(time) = self.time {
            template.time = time;
        }
        if let Some(ref location) = self.location {
            template.location = location.clone();
        }
        if let Some(ref notes) = self.notes {
            template.notes = notes.clone();
        }
        if let Some(category) = self.category {
            template.category = category.name().to_string();
            template.color = category.color().to_string();
            template.icon = category.icon().to_string();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::EventTemplate;
    use crate::recurrence::{Frequency, RecurrenceRule, expand};

    fn ten_day_series() -> Vec<EventInstance> {
        let start = NaiveDate::from_ymd_opt(2025, 4, 1).unwrap();
        let rule = RecurrenceRule::new(Frequency::Daily)
            .until(NaiveDate::from_ymd_opt(2025, 4, 10).unwrap());
        let template = EventTemplate::new("Swim", start, Category::Sports);
        let mut instances = expand(&template, Some(&rule));
        for (i, instance) in instances.iter_mut().enumerate() {
            instance.id = Some(format!("doc-{i}"));
        }
        instances
    }

    #[test]
    fn test_this_and_following_selects_tail() {
        let series = ten_day_series();
        assert_eq!(series.len(), 10);

        let plan = plan(
            SeriesAction::Delete,
            MutationScope::ThisAndFollowing,
            &series[5],
            &series,
        );
        assert_eq!(plan.indices(), vec![5, 6, 7, 8, 9]);
        assert_eq!(plan.ids(), vec!["doc-5", "doc-6", "doc-7", "doc-8", "doc-9"]);
        assert!(!plan.contains(&series[4]));
    }

    #[test]
    fn test_all_selects_whole_series_only() {
        let mut records = ten_day_series();
        let other = ten_day_series();
        records.extend(other.iter().cloned());
        records.push(EventInstance::standalone(EventTemplate::new(
            "Dentist",
            NaiveDate::from_ymd_opt(2025, 4, 3).unwrap(),
            Category::Medical,
        )));

        let plan = plan(SeriesAction::Delete, MutationScope::All, &records[7], &records);
        assert_eq!(plan.len(), 10);
        assert!(plan.targets.iter().all(|i| i.series_id == records[7].series_id));
    }

    #[test]
    fn test_this_only_selects_target() {
        let series = ten_day_series();
        let plan = plan(SeriesAction::Update, MutationScope::ThisOnly, &series[3], &series);
        assert_eq!(plan.indices(), vec![3]);
    }

    #[test]
    fn test_standalone_target_degrades_to_this_only() {
        let series = ten_day_series();
        let standalone = EventInstance::standalone(EventTemplate::new(
            "Dentist",
            NaiveDate::from_ymd_opt(2025, 4, 3).unwrap(),
            Category::Medical,
        ));

        for scope in [MutationScope::ThisAndFollowing, MutationScope::All] {
            let plan = plan(SeriesAction::Delete, scope, &standalone, &series);
            assert_eq!(plan.scope, MutationScope::ThisOnly);
            assert_eq!(plan.len(), 1);
            assert_eq!(plan.targets[0].title(), "Dentist");
        }
    }

    #[test]
    fn test_apply_keeps_dates_for_series_edits() {
        let series = ten_day_series();
        let patch = EventPatch {
            title: Some("Swim team".to_string()),
            date: Some(NaiveDate::from_ymd_opt(2025, 5, 1).unwrap()),
            category: Some(Category::Activities),
            ..Default::default()
        };

        let plan = plan(SeriesAction::Update, MutationScope::All, &series[0], &series);
        let updated = plan.apply(&patch);
        assert_eq!(updated.len(), 10);
        for (before, after) in series.iter().zip(&updated) {
            assert_eq!(after.title(), "Swim team");
            assert_eq!(after.date(), before.date());
            assert_eq!(after.template.icon, "🎨");
            assert_eq!(after.id, before.id);
        }

        let single = plan_single(&series);
        let moved = single.apply(&patch);
        assert_eq!(moved[0].date(), NaiveDate::from_ymd_opt(2025, 5, 1).unwrap());
    }

    fn plan_single(series: &[EventInstance]) -> MutationPlan<'_> {
        plan(SeriesAction::Update, MutationScope::ThisOnly, &series[2], series)
    }

    #[test]
    fn test_apply_on_delete_plan_is_empty() {
        let series = ten_day_series();
        let plan = plan(SeriesAction::Delete, MutationScope::All, &series[0], &series);
        assert!(plan.apply(&EventPatch::default()).is_empty());
    }

    #[test]
    fn test_scope_from_str() {
        assert_eq!(
            "following".parse::<MutationScope>().unwrap(),
            MutationScope::ThisAndFollowing
        );
        assert!(matches!(
            "some".parse::<MutationScope>(),
            Err(CustodyError::UnknownScope(s)) if s == "some"
        ));
    }
}
