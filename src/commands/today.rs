use anyhow::Result;

use crate::config::Config;
use crate::render::Render;

pub fn run(cfg: &Config, date: Option<&str>) -> Result<()> {
    let schedule = cfg.require_schedule()?;
    let date = super::date_or_today(date)?;

    let handoff = schedule.handoff(date);
    println!("{}", handoff.render(schedule));

    Ok(())
}
