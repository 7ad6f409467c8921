use anyhow::Result;
use custody_core::date::parse_date;
use owo_colors::OwoColorize;

use crate::config::Config;
use crate::render::event_line;
use crate::store;

pub fn run(cfg: &Config, from: Option<&str>) -> Result<()> {
    let from = from.map(parse_date).transpose()?;

    let mut events = store::load_events(&cfg.events_path())?;
    store::sort_events(&mut events);

    let shown: Vec<_> = events
        .iter()
        .filter(|e| from.map_or(true, |from| e.date() >= from))
        .collect();

    if shown.is_empty() {
        println!("{}", "No events found".dimmed());
        return Ok(());
    }

    for event in shown {
        println!("{}", event_line(event));
    }

    Ok(())
}
