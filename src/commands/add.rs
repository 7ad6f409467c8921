use anyhow::Result;
use chrono::Datelike;
use custody_core::date::{parse_date, parse_time, parse_weekdays};
use custody_core::recurrence::{MAX_SERIES_INSTANCES, was_truncated};
use custody_core::{Category, EventTemplate, Frequency, RecurrenceRule, expand};
use owo_colors::OwoColorize;

use crate::config::Config;
use crate::render::pluralize;
use crate::store;

pub struct AddArgs {
    pub title: String,
    pub date: String,
    pub time: Option<String>,
    pub location: Option<String>,
    pub notes: Option<String>,
    pub category: String,
    pub repeat: Option<String>,
    pub days: Option<String>,
    pub until: Option<String>,
}

pub fn parse_category(name: &str) -> Result<Category> {
    Category::from_name(name).ok_or_else(|| {
        let available: Vec<_> = Category::ALL.iter().map(|c| c.name()).collect();
        anyhow::anyhow!(
            "Category '{}' not found. Available: {}",
            name,
            available.join(", ")
        )
    })
}

fn build_rule(args: &AddArgs, template: &EventTemplate) -> Result<Option<RecurrenceRule>> {
    let Some(ref repeat) = args.repeat else {
        if args.days.is_some() || args.until.is_some() {
            anyhow::bail!("--days and --until only apply together with --repeat");
        }
        return Ok(None);
    };

    let frequency: Frequency = repeat.parse()?;
    let mut rule = RecurrenceRule::new(frequency);

    match args.days {
        Some(ref days) => rule = rule.on_days(parse_weekdays(days)?),
        // Weekly repeats default to the event's own weekday
        None if frequency.uses_weekdays() => {
            rule = rule.on_days([template.date.weekday()])
        }
        None => {}
    }

    if let Some(ref until) = args.until {
        rule = rule.until(parse_date(until)?);
    }

    Ok(Some(rule))
}

pub fn run(cfg: &Config, args: AddArgs) -> Result<()> {
    let category = parse_category(&args.category)?;
    let date = parse_date(&args.date)?;

    let mut template = EventTemplate::new(args.title.clone(), date, category);
    template.time = args.time.as_deref().map(parse_time).transpose()?;
    template.location = args.location.clone();
    template.notes = args.notes.clone();
    template.family_id = cfg.schedule.as_ref().and_then(|s| s.family_id.clone());

    let rule = build_rule(&args, &template)?;
    let mut instances = expand(&template, rule.as_ref());
    store::assign_ids(&mut instances);

    let path = cfg.events_path();
    let mut events = store::load_events(&path)?;
    events.extend(instances.iter().cloned());
    store::sort_events(&mut events);
    store::save_events(&path, &events)?;

    let count = instances.len();
    println!(
        "{} {} {}",
        "Added".green(),
        count,
        pluralize("event", count)
    );

    if let Some(ref rule) = rule {
        if count == 1 && !instances[0].is_recurring {
            println!(
                "   {}",
                "The repeat rule matched no days, saved as a single event".yellow()
            );
        } else {
            println!("   {}", rule.describe(date).dimmed());
        }
        if was_truncated(&instances) {
            println!(
                "   {}",
                format!("Stopped at {} occurrences", MAX_SERIES_INSTANCES).yellow()
            );
        }
    }

    Ok(())
}
