use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use custody_core::CustodySchedule;
use serde::{Deserialize, Serialize};

static DEFAULT_FAMILY_NAME: &str = "Family Schedule";
static DEFAULT_EVENTS_FILE: &str = "~/.config/custody/events.json";
const DEFAULT_EXPORT_MONTHS: u32 = 12;

fn default_family_name() -> String {
    DEFAULT_FAMILY_NAME.to_string()
}

fn default_events_file() -> String {
    DEFAULT_EVENTS_FILE.to_string()
}

fn default_export_months() -> u32 {
    DEFAULT_EXPORT_MONTHS
}

/// Configuration at ~/.config/custody/config.toml
///
/// Any key can be overridden with a CUSTODY_ environment variable,
/// e.g. CUSTODY_EXPORT_MONTHS=6 or CUSTODY_SCHEDULE__OWNER_B=Dad.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Calendar name used in exports
    #[serde(default = "default_family_name")]
    pub family_name: String,

    /// How many months of custody timeline to export
    #[serde(default = "default_export_months")]
    pub export_months: u32,

    /// JSON file holding saved events
    #[serde(default = "default_events_file")]
    pub events_file: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schedule: Option<CustodySchedule>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            family_name: default_family_name(),
            export_months: default_export_months(),
            events_file: default_events_file(),
            schedule: None,
        }
    }
}

/// Get the config directory path (~/.config/custody)
pub fn config_dir() -> Result<PathBuf> {
    let config_dir = dirs::config_dir()
        .context("Could not determine config directory")?
        .join("custody");
    Ok(config_dir)
}

/// Get the config file path (~/.config/custody/config.toml)
pub fn config_path() -> Result<PathBuf> {
    Ok(config_dir()?.join("config.toml"))
}

impl Config {
    /// Load ~/.config/custody/config.toml layered with CUSTODY_* variables.
    pub fn load() -> Result<Self> {
        Self::load_from(&config_path()?)
    }

    /// A missing file is not an error; defaults apply.
    pub fn load_from(path: &Path) -> Result<Self> {
        Self::build(path, true)
    }

    /// Only what is in the file, without CUSTODY_* overrides. Anything
    /// written back to disk starts from this.
    pub fn load_stored(path: &Path) -> Result<Self> {
        Self::build(path, false)
    }

    fn build(path: &Path, with_env: bool) -> Result<Self> {
        let mut builder = config::Config::builder()
            .add_source(config::File::from(path.to_path_buf()).required(false));

        if with_env {
            builder = builder.add_source(
                config::Environment::with_prefix("CUSTODY")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            );
        }

        let settings = builder
            .build()
            .with_context(|| format!("Could not read config at {}", path.display()))?;

        settings
            .try_deserialize()
            .with_context(|| format!("Invalid config at {}", path.display()))
    }

    /// Replace the schedule in the file at `path`, leaving other keys as
    /// they are on disk. The previous schedule's family id is kept.
    pub fn save_schedule_to(path: &Path, schedule: CustodySchedule) -> Result<Config> {
        let mut stored = Self::load_stored(path)?;

        let family_id = stored.schedule.as_ref().and_then(|s| s.family_id.clone());
        stored.schedule = Some(CustodySchedule {
            family_id: schedule.family_id.or(family_id),
            ..schedule
        });
        stored.save_to(path)?;

        Ok(stored)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).context("Could not create config directory")?;
        }

        let content = toml::to_string_pretty(self).context("Could not serialize config")?;
        std::fs::write(path, content)
            .with_context(|| format!("Could not write config file {}", path.display()))?;

        Ok(())
    }

    /// The configured schedule, or a hint on how to create one.
    pub fn require_schedule(&self) -> Result<&CustodySchedule> {
        self.schedule.as_ref().ok_or_else(|| {
            anyhow::anyhow!(
                "No custody schedule configured.\n\n\
                Create one with:\n  \
                custody setup --pattern alternating-weeks --anchor 2025-01-06 --owner-a Mom --owner-b Dad"
            )
        })
    }

    /// Events file path with `~` expanded.
    pub fn events_path(&self) -> PathBuf {
        PathBuf::from(shellexpand::tilde(&self.events_file).into_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use custody_core::PatternKind;

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("config.toml")).unwrap();
        assert_eq!(config.family_name, "Family Schedule");
        assert_eq!(config.export_months, 12);
        assert!(config.schedule.is_none());
        assert!(config.require_schedule().is_err());
    }

    #[test]
    fn test_save_then_load_keeps_schedule() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let config = Config {
            family_name: "The Parkers".to_string(),
            schedule: Some(CustodySchedule::new(
                PatternKind::TwoTwoThree,
                NaiveDate::from_ymd_opt(2025, 1, 6).unwrap(),
                "Mom",
                "Dad",
            )),
            ..Default::default()
        };
        config.save_to(&path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("pattern = \"2-2-3\""), "config:\n{}", content);

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.family_name, "The Parkers");
        assert_eq!(loaded.schedule, config.schedule);
    }

    #[test]
    fn test_save_schedule_does_not_persist_env_overrides() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let mut stored = Config {
            family_name: "The Parkers".to_string(),
            ..Default::default()
        };
        let mut previous = CustodySchedule::new(
            PatternKind::AlternatingWeeks,
            NaiveDate::from_ymd_opt(2024, 9, 2).unwrap(),
            "Mom",
            "Dad",
        );
        previous.family_id = Some("fam-42".to_string());
        stored.schedule = Some(previous);
        stored.save_to(&path).unwrap();

        std::env::set_var("CUSTODY_EVENTS_FILE", "/tmp/elsewhere.json");
        let merged = Config::load_from(&path).unwrap();
        assert_eq!(merged.events_file, "/tmp/elsewhere.json");

        let schedule = CustodySchedule::new(
            PatternKind::WeekdayWeekend,
            NaiveDate::from_ymd_opt(2025, 1, 6).unwrap(),
            "Mom",
            "Dad",
        );
        Config::save_schedule_to(&path, schedule).unwrap();
        std::env::remove_var("CUSTODY_EVENTS_FILE");

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(!content.contains("elsewhere"), "config:\n{}", content);

        let reloaded = Config::load_stored(&path).unwrap();
        assert_eq!(reloaded.family_name, "The Parkers");
        assert_eq!(reloaded.events_file, DEFAULT_EVENTS_FILE);
        let saved = reloaded.schedule.unwrap();
        assert_eq!(saved.pattern, PatternKind::WeekdayWeekend);
        assert_eq!(saved.family_id.as_deref(), Some("fam-42"));
    }
}
