//! Local JSON stand-in for the family's event document store.
//!
//! Records are kept in one file. Every saved record gets a document id so
//! edits and deletes can address it the way the remote store would.

use std::path::Path;

use anyhow::{Context, Result};
use custody_core::EventInstance;

pub fn load_events(path: &Path) -> Result<Vec<EventInstance>> {
    if !path.exists() {
        return Ok(Vec::new());
    }

    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Could not read events file {}", path.display()))?;
    let events = serde_json::from_str(&content)
        .with_context(|| format!("Invalid events file {}", path.display()))?;

    Ok(events)
}

pub fn save_events(path: &Path, events: &[EventInstance]) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let content = serde_json::to_string_pretty(events)?;
    std::fs::write(path, content)
        .with_context(|| format!("Could not write events file {}", path.display()))?;

    tracing::debug!(count = events.len(), path = %path.display(), "Saved events");
    Ok(())
}

/// Give every unsaved record a document id.
pub fn assign_ids(events: &mut [EventInstance]) {
    for event in events.iter_mut().filter(|e| e.id.is_none()) {
        event.id = Some(uuid::Uuid::new_v4().simple().to_string());
    }
}

/// Find a record by full id or unique id prefix.
pub fn find_by_id<'a>(events: &'a [EventInstance], id: &str) -> Result<&'a EventInstance> {
    let matches: Vec<&EventInstance> = events
        .iter()
        .filter(|e| e.id.as_deref().is_some_and(|eid| eid.starts_with(id)))
        .collect();

    match matches.as_slice() {
        [event] => Ok(*event),
        [] => anyhow::bail!("No event with id '{}'", id),
        _ => anyhow::bail!("Id '{}' matches {} events, use more characters", id, matches.len()),
    }
}

/// Sort chronologically, all-day events first within a day.
pub fn sort_events(events: &mut [EventInstance]) {
    events.sort_by(|a, b| {
        (a.template.date, a.template.time).cmp(&(b.template.date, b.template.time))
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use custody_core::{Category, EventTemplate};

    fn event(title: &str) -> EventInstance {
        EventInstance::standalone(EventTemplate::new(
            title,
            NaiveDate::from_ymd_opt(2025, 5, 1).unwrap(),
            Category::Family,
        ))
    }

    #[test]
    fn test_round_trip_through_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("events.json");

        assert!(load_events(&path).unwrap().is_empty());

        let mut events = vec![event("Birthday"), event("Recital")];
        assign_ids(&mut events);
        save_events(&path, &events).unwrap();

        assert_eq!(load_events(&path).unwrap(), events);
    }

    #[test]
    fn test_find_by_id_prefix() {
        let mut events = vec![event("Birthday"), event("Recital")];
        events[0].id = Some("abc123".to_string());
        events[1].id = Some("abd456".to_string());

        assert_eq!(find_by_id(&events, "abc").unwrap().title(), "Birthday");
        assert!(find_by_id(&events, "ab").is_err());
        assert!(find_by_id(&events, "zzz").is_err());
    }
}
