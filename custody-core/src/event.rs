//! Event templates and the dated instances produced from them.
//!
//! These types mirror the records kept in the family's document store.
//! The store itself is not addressed here; callers hand in fetched
//! records and write back whatever the engine returns.

use std::fmt;

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::recurrence::Frequency;

/// What the user fills in when creating an event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventTemplate {
    pub title: String,
    pub date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<NaiveTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,

    // Display metadata, chosen by the UI layer
    pub category: String,
    pub color: String,
    pub icon: String,

    /// Owning household, passed through untouched.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub family_id: Option<String>,
}

impl EventTemplate {
    /// Template with display metadata taken from a preset category.
    pub fn new(title: impl Into<String>, date: NaiveDate, category: Category) -> Self {
        EventTemplate {
            title: title.into(),
            date,
            time: None,
            location: None,
            notes: None,
            category: category.name().to_string(),
            color: category.color().to_string(),
            icon: category.icon().to_string(),
            family_id: None,
        }
    }
}

/// Opaque identity shared by every instance of one expansion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SeriesId(Uuid);

impl SeriesId {
    pub fn new() -> Self {
        SeriesId(Uuid::new_v4())
    }
}

impl Default for SeriesId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SeriesId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// A concrete dated event, standalone or part of a series.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventInstance {
    /// Document id assigned by the store, if the record has been saved.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(flatten)]
    pub template: EventTemplate,

    // Series bookkeeping
    pub is_recurring: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recurrence_type: Option<Frequency>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub series_id: Option<SeriesId>,
    /// Zero-based, gap-free position within the series in chronological order.
    #[serde(default)]
    pub instance_index: u32,
}

impl EventInstance {
    /// A non-recurring event on the template's own date.
    pub fn standalone(template: EventTemplate) -> Self {
        EventInstance {
            id: None,
            template,
            is_recurring: false,
            recurrence_type: None,
            series_id: None,
            instance_index: 0,
        }
    }

    pub fn date(&self) -> NaiveDate {
        self.template.date
    }

    pub fn title(&self) -> &str {
        &self.template.title
    }

    pub fn is_in_series(&self, series_id: SeriesId) -> bool {
        self.series_id == Some(series_id)
    }
}

impl fmt::Display for EventInstance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.template.icon, self.template.title)
    }
}

/// Preset categories offered when creating an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    School,
    Sports,
    Medical,
    Activities,
    Family,
    Other,
}

impl Category {
    pub const ALL: [Category; 6] = [
        Category::School,
        Category::Sports,
        Category::Medical,
        Category::Activities,
        Category::Family,
        Category::Other,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Category::School => "School",
            Category::Sports => "Sports",
            Category::Medical => "Medical",
            Category::Activities => "Activities",
            Category::Family => "Family",
            Category::Other => "Other",
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            Category::School => "#667eea",
            Category::Sports => "#f093fb",
            Category::Medical => "#4facfe",
            Category::Activities => "#43e97b",
            Category::Family => "#fa709a",
            Category::Other => "#a8edea",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Category::School => "📚",
            Category::Sports => "⚽",
            Category::Medical => "🏥",
            Category::Activities => "🎨",
            Category::Family => "👨‍👩‍👧",
            Category::Other => "📌",
        }
    }

    /// Case-insensitive lookup by display name.
    pub fn from_name(name: &str) -> Option<Category> {
        Category::ALL
            .into_iter()
            .find(|c| c.name().eq_ignore_ascii_case(name.trim()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_template_from_category_copies_display_metadata() {
        let date = NaiveDate::from_ymd_opt(2025, 9, 1).unwrap();
        let template = EventTemplate::new("Soccer practice", date, Category::Sports);
        assert_eq!(template.category, "Sports");
        assert_eq!(template.color, "#f093fb");
        assert_eq!(template.icon, "⚽");
    }

    #[test]
    fn test_category_lookup_is_case_insensitive() {
        assert_eq!(Category::from_name("medical"), Some(Category::Medical));
        assert_eq!(Category::from_name(" School "), Some(Category::School));
        assert_eq!(Category::from_name("Chores"), None);
    }

    #[test]
    fn test_instance_serializes_flat_for_the_store() {
        let date = NaiveDate::from_ymd_opt(2025, 9, 1).unwrap();
        let instance =
            EventInstance::standalone(EventTemplate::new("Dentist", date, Category::Medical));
        let json = serde_json::to_value(&instance).unwrap();

        assert_eq!(json["title"], "Dentist");
        assert_eq!(json["date"], "2025-09-01");
        assert_eq!(json["isRecurring"], false);
        assert!(json.get("seriesId").is_none());

        let back: EventInstance = serde_json::from_value(json).unwrap();
        assert_eq!(back, instance);
    }
}
