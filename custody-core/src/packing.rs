//! Pack list for the next handoff.
//!
//! Close to a handoff, the child's bag needs the usual things plus whatever
//! the next few days' events call for.

use chrono::{Duration, NaiveDate};
use serde::Serialize;

use crate::event::{Category, EventInstance};
use crate::schedule::{CustodySchedule, Handoff};

/// Show the list once the handoff is at most this many days away.
pub const DEFAULT_PACK_WINDOW_DAYS: u32 = 7;

/// How far ahead events are checked for extra items, inclusive.
pub const EVENT_LOOKAHEAD_DAYS: i64 = 3;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PackItem {
    pub id: String,
    pub name: String,
    pub icon: String,
    /// Added because of an upcoming event
    pub event_based: bool,
}

impl PackItem {
    fn base(id: &str, name: &str, icon: &str) -> Self {
        PackItem {
            id: id.to_string(),
            name: name.to_string(),
            icon: icon.to_string(),
            event_based: false,
        }
    }

    /// Item an event calls for, if its category needs anything.
    fn for_event(event: &EventInstance) -> Option<Self> {
        let template = &event.template;
        let key = event.id.as_deref().unwrap_or(&template.title);

        let (prefix, name, icon) = match Category::from_name(&template.category)? {
            Category::Sports => ("sports", format!("Sports gear for {}", template.title), "⚽"),
            Category::School => ("school", format!("Materials for {}", template.title), "📖"),
            Category::Medical => ("medical", "Medications/medical supplies".to_string(), "💊"),
            Category::Activities | Category::Family | Category::Other => return None,
        };

        Some(PackItem {
            id: format!("{prefix}-{key}"),
            name,
            icon: icon.to_string(),
            event_based: true,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackList {
    pub handoff: Handoff,
    pub items: Vec<PackItem>,
}

fn base_items() -> Vec<PackItem> {
    vec![
        PackItem::base("clothes", "Clothes for the week", "👕"),
        PackItem::base("phone-charger", "Phone charger", "🔌"),
        PackItem::base("homework", "Homework and school books", "📚"),
        PackItem::base("toiletries", "Toiletries (toothbrush, etc.)", "🧴"),
    ]
}

/// Build the pack list for `today`, or `None` when the next handoff is more
/// than `window_days` away.
pub fn pack_list(
    schedule: &CustodySchedule,
    events: &[EventInstance],
    today: NaiveDate,
    window_days: u32,
) -> Option<PackList> {
    let handoff = schedule.handoff(today);
    if handoff.days_until > window_days {
        return None;
    }

    let last = today + Duration::days(EVENT_LOOKAHEAD_DAYS);
    let mut items = base_items();
    items.extend(
        events
            .iter()
            .filter(|e| (today..=last).contains(&e.date()))
            .filter_map(PackItem::for_event),
    );

    tracing::debug!(
        days_until = handoff.days_until,
        items = items.len(),
        "Built pack list"
    );

    Some(PackList { handoff, items })
}
