use crate::error::QuickCalError;
use crate::parser::DEFAULT_EVENT_DURATION_MINUTES;
use anyhow::{Context, Result};
use chrono::TimeDelta;
use directories::ProjectDirs;
use log::warn;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub calendar: CalendarConfig,
    #[serde(default)]
    pub browser: BrowserConfig,
    #[serde(default)]
    pub context: ContextConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalendarConfig {
    #[serde(default = "default_duration_minutes")]
    pub default_duration_minutes: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrowserConfig {
    /// Program used instead of the platform opener, e.g. "firefox"
    pub open_command: Option<String>,
    #[serde(default = "default_true")]
    pub open_after_create: bool,
}

/// Fallback title/url when no browsing context is supplied
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContextConfig {
    pub title: Option<String>,
    pub url: Option<String>,
}

fn default_duration_minutes() -> i64 {
    DEFAULT_EVENT_DURATION_MINUTES
}

fn default_true() -> bool {
    true
}

impl Default for CalendarConfig {
    fn default() -> Self {
        Self { default_duration_minutes: default_duration_minutes() }
    }
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self { open_command: None, open_after_create: true }
    }
}

/// Longest configurable event, one leap year
pub const MAX_EVENT_DURATION_MINUTES: i64 = 366 * 24 * 60;

impl CalendarConfig {
    /// Configured event length; values outside 1..=MAX_EVENT_DURATION_MINUTES fall back
    /// to the default
    pub fn event_duration(&self) -> TimeDelta {
        let default = TimeDelta::minutes(DEFAULT_EVENT_DURATION_MINUTES);
        let minutes = self.default_duration_minutes;

        if !(1..=MAX_EVENT_DURATION_MINUTES).contains(&minutes) {
            warn!(
                "Ignoring default_duration_minutes = {}, using {} minutes",
                minutes, DEFAULT_EVENT_DURATION_MINUTES
            );
            return default;
        }
        TimeDelta::try_minutes(minutes).unwrap_or(default)
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = get_config_path()?;
        Self::load_from(&config_path)
    }

    pub fn load_from(config_path: &Path) -> Result<Self> {
        // If config doesn't exist, create default
        if !config_path.exists() {
            let default_config = Config::default();
            default_config.save_to(config_path)?;
            return Ok(default_config);
        }

        let content = fs::read_to_string(config_path).context("Failed to read config file")?;
        let config = toml::from_str(&content).map_err(|e| QuickCalError::Config {
            path: config_path.to_path_buf(),
            reason: e.to_string(),
        })?;
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        let config_path = get_config_path()?;
        self.save_to(&config_path)
    }

    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        fs::write(config_path, content).context("Failed to write config file")?;

        Ok(())
    }
}

pub fn get_config_path() -> Result<PathBuf> {
    let proj_dirs = ProjectDirs::from("com", "quickcal", "quickcal")
        .context("Failed to determine config directory")?;

    Ok(proj_dirs.config_dir().join("config.toml"))
}
