use anyhow::Result;
use custody_core::series::{MutationScope, SeriesAction, plan};
use owo_colors::OwoColorize;

use crate::config::Config;
use crate::render::pluralize;
use crate::store;

pub fn run(cfg: &Config, id: &str, scope: MutationScope) -> Result<()> {
    let path = cfg.events_path();
    let events = store::load_events(&path)?;
    let target = store::find_by_id(&events, id)?;

    let plan = plan(SeriesAction::Delete, scope, target, &events);
    if plan.scope != scope {
        println!(
            "   {}",
            "Not part of a series, deleting just this event".dimmed()
        );
    }

    let doomed: Vec<String> = plan.ids().into_iter().map(str::to_string).collect();
    let remaining: Vec<_> = events
        .iter()
        .filter(|e| !e.id.as_ref().is_some_and(|eid| doomed.contains(eid)))
        .cloned()
        .collect();

    store::save_events(&path, &remaining)?;

    println!(
        "{} {} {} ({})",
        "Deleted".red(),
        doomed.len(),
        pluralize("event", doomed.len()),
        plan.scope
    );

    Ok(())
}
