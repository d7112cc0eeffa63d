// File: ./src/config.rs
use crate::model::SummaryType;
use crate::model::summary::{DEFAULT_TIMESPAN_DAYS, MAX_TIMESPAN_DAYS};
use anyhow::{Context, Result, bail};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Days covered by the summary, starting today.
    pub timespan_days: u32,
    /// Number of week panels. Unset means four on Mondays and five otherwise.
    pub panel_count: Option<usize>,
    /// Snapshot file. Unset means `snapshot.json` in the data directory.
    pub data_file: Option<PathBuf>,
    pub default_view: SummaryType,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            timespan_days: DEFAULT_TIMESPAN_DAYS,
            panel_count: None,
            data_file: None,
            default_view: SummaryType::Demand,
        }
    }
}

impl Config {
    pub fn get_path() -> Option<PathBuf> {
        ProjectDirs::from("com", "cwplan", "cwplan").map(|proj| proj.config_dir().join("config.toml"))
    }

    /// Loads the user config, falling back to defaults when there is none.
    pub fn load() -> Result<Self> {
        match Self::get_path() {
            Some(path) if path.exists() => Self::load_from(&path),
            _ => Ok(Self::default()),
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config at {}", path.display()))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Invalid config at {}", path.display()))?;
        check_timespan(config.timespan_days)
            .with_context(|| format!("Invalid config at {}", path.display()))?;
        log::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        crate::storage::LocalStorage::atomic_write(path, content)?;
        Ok(())
    }
}

/// Accepts summary windows of `1..=MAX_TIMESPAN_DAYS` days.
pub fn check_timespan(days: u32) -> Result<u32> {
    if days == 0 || days > MAX_TIMESPAN_DAYS {
        bail!(
            "timespan of {} days is out of range (1..={})",
            days,
            MAX_TIMESPAN_DAYS
        );
    }
    Ok(days)
}
