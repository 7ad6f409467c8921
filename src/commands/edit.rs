use std::collections::HashMap;

use anyhow::Result;
use custody_core::date::{parse_date, parse_time};
use custody_core::series::{EventPatch, MutationScope, SeriesAction, plan};
use owo_colors::OwoColorize;

use super::add::parse_category;
use crate::config::Config;
use crate::render::pluralize;
use crate::store;

pub struct EditArgs {
    pub title: Option<String>,
    pub date: Option<String>,
    pub time: Option<String>,
    pub location: Option<String>,
    pub notes: Option<String>,
    pub category: Option<String>,
}

/// Empty strings clear optional fields.
fn optional_text(value: Option<String>) -> Option<Option<String>> {
    value.map(|v| if v.is_empty() { None } else { Some(v) })
}

fn build_patch(args: EditArgs) -> Result<EventPatch> {
    let time = match args.time.as_deref() {
        None => None,
        Some("none") | Some("") => Some(None),
        Some(t) => Some(Some(parse_time(t)?)),
    };

    Ok(EventPatch {
        title: args.title,
        date: args.date.as_deref().map(parse_date).transpose()?,
        time,
        location: optional_text(args.location),
        notes: optional_text(args.notes),
        category: args.category.as_deref().map(parse_category).transpose()?,
    })
}

pub fn run(cfg: &Config, id: &str, scope: MutationScope, args: EditArgs) -> Result<()> {
    let patch = build_patch(args)?;
    if patch.is_empty() {
        anyhow::bail!(
            "Nothing to change. Pass at least one of --title, --date, --time, --location, --notes, --category"
        );
    }

    let path = cfg.events_path();
    let mut events = store::load_events(&path)?;
    let target = store::find_by_id(&events, id)?;

    let plan = plan(SeriesAction::Update, scope, target, &events);
    let applied_scope = plan.scope;
    if patch.date.is_some() && applied_scope != MutationScope::ThisOnly {
        println!(
            "   {}",
            "Dates are kept when editing several events of a series".yellow()
        );
    }

    let updated: HashMap<String, _> = plan
        .apply(&patch)
        .into_iter()
        .filter_map(|e| e.id.clone().map(|id| (id, e)))
        .collect();
    let count = updated.len();

    for event in events.iter_mut() {
        if let Some(new) = event.id.as_ref().and_then(|id| updated.get(id)) {
            *event = new.clone();
        }
    }

    store::sort_events(&mut events);
    store::save_events(&path, &events)?;

    println!(
        "{} {} {} ({})",
        "Updated".yellow(),
        count,
        pluralize("event", count),
        applied_scope
    );

    Ok(())
}
