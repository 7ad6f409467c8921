use anyhow::Result;
use chrono::{Datelike, Local, NaiveDate, Weekday};
use custody_core::Parent;
use custody_core::date::parse_month;
use owo_colors::OwoColorize;

use crate::config::Config;
use crate::render::{Render, owner_label, pluralize};

pub fn run(cfg: &Config, month: Option<&str>) -> Result<()> {
    let schedule = cfg.require_schedule()?;

    let (year, month) = match month {
        Some(s) => parse_month(s)?,
        None => {
            let today = Local::now().date_naive();
            (today.year(), today.month())
        }
    };

    let days = schedule.month(year, month);
    let Some(first) = NaiveDate::from_ymd_opt(year, month, 1) else {
        anyhow::bail!("Invalid month {}-{:02}", year, month);
    };

    println!("📅 {}", first.format("%B %Y").bold());
    println!();

    for day in &days {
        if day.date.weekday() == Weekday::Mon && day.date != first {
            println!();
        }
        println!("{}", day.render(schedule));
    }

    let count_a = days.iter().filter(|d| d.owner == Parent::A).count();
    let count_b = days.len() - count_a;
    println!();
    println!(
        "{} {} {}, {} {} {}",
        owner_label(schedule, Parent::A),
        count_a,
        pluralize("day", count_a),
        owner_label(schedule, Parent::B),
        count_b,
        pluralize("day", count_b)
    );

    Ok(())
}
