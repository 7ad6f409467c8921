use anyhow::Result;
use custody_core::date::parse_date;
use custody_core::{CustodySchedule, PatternKind};
use owo_colors::OwoColorize;

use crate::config::{self, Config};
use crate::render::owner_label;

pub fn run(pattern: &str, anchor: &str, owner_a: String, owner_b: String) -> Result<()> {
    let pattern: PatternKind = pattern.parse()?;
    let anchor_date = parse_date(anchor)?;

    if owner_a.trim().is_empty() || owner_b.trim().is_empty() {
        anyhow::bail!("Both owners need a name");
    }

    // Written over the file alone so CUSTODY_* overrides stay out of it
    let path = config::config_path()?;
    let schedule = CustodySchedule::new(pattern, anchor_date, owner_a, owner_b);
    let cfg = Config::save_schedule_to(&path, schedule)?;

    let schedule = cfg.require_schedule()?;
    println!(
        "{} {} ({})",
        "Saved".green(),
        pattern.name().bold(),
        pattern.description().dimmed()
    );
    println!(
        "   Starting {} with {}",
        anchor_date.format("%a %b %-d, %Y"),
        owner_label(schedule, custody_core::Parent::A)
    );
    println!("   {}", path.display().dimmed());

    Ok(())
}
