//! Terminal rendering for custody-core types.
//!
//! Extension traits that add colored output using owo_colors. Parent A is
//! shown in pink and parent B in blue, matching the shared calendar.

use chrono::{Datelike, Local};
use custody_core::packing::PackList;
use custody_core::schedule::{CustodyDay, Handoff};
use custody_core::{CustodySchedule, EventInstance, Parent};
use owo_colors::OwoColorize;

pub trait Render {
    fn render(&self, schedule: &CustodySchedule) -> String;
}

/// Color an owner's name by which side of the schedule they are on.
pub fn owner_label(schedule: &CustodySchedule, parent: Parent) -> String {
    let name = schedule.name_of(parent);
    match parent {
        Parent::A => name.truecolor(255, 107, 157).bold().to_string(),
        Parent::B => name.truecolor(79, 172, 254).bold().to_string(),
    }
}

impl Render for Handoff {
    fn render(&self, schedule: &CustodySchedule) -> String {
        let when = match self.days_until {
            1 => "tomorrow".to_string(),
            n => format!("in {} days", n),
        };

        format!(
            "🏠 With {} today\n   Switching to {} {} ({})",
            owner_label(schedule, self.owner),
            owner_label(schedule, self.next_owner),
            when,
            self.date.format("%a %b %-d").dimmed()
        )
    }
}

impl Render for CustodyDay {
    fn render(&self, schedule: &CustodySchedule) -> String {
        let label = format!("{:>3} {}", self.date.day(), self.date.format("%a"));
        let today = Local::now().date_naive() == self.date;
        let marker = if today { "←".bold().to_string() } else { String::new() };

        format!("{}  {} {}", label, owner_label(schedule, self.owner), marker)
            .trim_end()
            .to_string()
    }
}

impl Render for PackList {
    fn render(&self, schedule: &CustodySchedule) -> String {
        let when = match self.handoff.days_until {
            1 => "tomorrow".to_string(),
            n => format!("in {} days", n),
        };

        let mut out = format!(
            "🎒 Going to {}'s {}\n",
            owner_label(schedule, self.handoff.next_owner),
            when
        );
        for item in &self.items {
            let name = if item.event_based {
                item.name.bold().to_string()
            } else {
                item.name.clone()
            };
            out.push_str(&format!("   [ ] {} {}\n", item.icon, name));
        }
        out.push_str(&format!(
            "   {}",
            format!("{} {}", self.items.len(), pluralize("item", self.items.len())).dimmed()
        ));

        out
    }
}

/// One line for an event listing: id, date, time, icon, title.
pub fn event_line(event: &EventInstance) -> String {
    let template = &event.template;
    let id: String = match event.id {
        Some(ref id) => id.chars().take(8).collect(),
        None => "--------".to_string(),
    };
    let time = template
        .time
        .map(|t| t.format("%H:%M").to_string())
        .unwrap_or_else(|| "all-day".to_string());
    let series = if event.is_recurring { " ↻" } else { "" };

    format!(
        "{} {} {:>7} {} {}{}",
        id.dimmed(),
        template.date.format("%a %b %-d %Y"),
        time,
        template.icon,
        template.title,
        series.dimmed()
    )
}

pub fn pluralize(word: &str, count: usize) -> String {
    if count == 1 {
        word.to_string()
    } else {
        format!("{}s", word)
    }
}
