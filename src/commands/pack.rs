use anyhow::Result;
use custody_core::packing::pack_list;
use owo_colors::OwoColorize;

use crate::config::Config;
use crate::render::{Render, owner_label, pluralize};
use crate::store;

pub fn run(cfg: &Config, date: Option<&str>, within: u32) -> Result<()> {
    let schedule = cfg.require_schedule()?;
    let today = super::date_or_today(date)?;
    let events = store::load_events(&cfg.events_path())?;

    match pack_list(schedule, &events, today, within) {
        Some(list) => println!("{}", list.render(schedule)),
        None => {
            let handoff = schedule.handoff(today);
            println!(
                "{}",
                format!(
                    "Nothing to pack yet: {} has the kids for {} more {}",
                    owner_label(schedule, handoff.owner),
                    handoff.days_until,
                    pluralize("day", handoff.days_until as usize)
                )
                .dimmed()
            );
        }
    }

    Ok(())
}
