use std::path::Path;

use anyhow::{Context, Result};
use custody_core::ics::{Horizon, IcsOptions, generate_ics};
use owo_colors::OwoColorize;

use crate::config::Config;
use crate::store;

pub fn run(
    cfg: &Config,
    output: Option<&Path>,
    months: Option<u32>,
    include_events: bool,
    include_custody: bool,
) -> Result<()> {
    if !include_events && !include_custody {
        anyhow::bail!("Nothing to export: --no-events and --no-custody were both given");
    }

    let events = if include_events {
        store::load_events(&cfg.events_path())?
    } else {
        Vec::new()
    };

    let custody = if include_custody {
        let schedule = cfg.require_schedule()?;
        let horizon = Horizon::Months(months.unwrap_or(cfg.export_months));
        Some((schedule, horizon))
    } else {
        None
    };

    let opts = IcsOptions {
        calendar_name: cfg.family_name.clone(),
        ..Default::default()
    };

    let ics = generate_ics(&events, custody, &opts);

    match output {
        Some(path) => {
            std::fs::write(path, &ics)
                .with_context(|| format!("Could not write {}", path.display()))?;
            eprintln!(
                "{} {} ({} events)",
                "Exported".green(),
                path.display(),
                events.len()
            );
        }
        None => print!("{}", ics),
    }

    Ok(())
}
