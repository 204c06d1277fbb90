use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub retention: Retention,

    #[serde(default)]
    pub timing: Timing,

    #[serde(default)]
    pub exclusions: Exclusions,

    #[serde(default)]
    pub tools: Tools,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Retention {
    /// Journal entries older than this are vacuumed
    #[serde(default = "default_journal_days")]
    pub journal_days: u64,

    /// Log files older than this are removed in full mode
    #[serde(default = "default_log_days")]
    pub log_days: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Timing {
    #[serde(default = "default_start_delay_ms")]
    pub start_delay_ms: u64,

    #[serde(default = "default_task_delay_ms")]
    pub task_delay_ms: u64,

    #[serde(default = "default_tick_ms")]
    pub tick_ms: u64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Exclusions {
    /// Task descriptions to skip, matched case-insensitively
    #[serde(default)]
    pub tasks: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tools {
    #[serde(default = "default_probe")]
    pub probe: bool,
}

impl Default for Retention {
    fn default() -> Self {
        Self {
            journal_days: default_journal_days(),
            log_days: default_log_days(),
        }
    }
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            start_delay_ms: default_start_delay_ms(),
            task_delay_ms: default_task_delay_ms(),
            tick_ms: default_tick_ms(),
        }
    }
}

impl Default for Tools {
    fn default() -> Self {
        Self {
            probe: default_probe(),
        }
    }
}

fn default_journal_days() -> u64 { 100 }
fn default_log_days() -> u64 { 10 }
fn default_start_delay_ms() -> u64 { 2000 }
fn default_task_delay_ms() -> u64 { 1000 }
fn default_tick_ms() -> u64 { 100 }
fn default_probe() -> bool { true }

impl Timing {
    pub fn start_delay(&self) -> Duration {
        Duration::from_millis(self.start_delay_ms)
    }

    pub fn task_delay(&self) -> Duration {
        Duration::from_millis(self.task_delay_ms)
    }

    /// Spinner redraw interval, never below 10 ms
    pub fn tick(&self) -> Duration {
        Duration::from_millis(self.tick_ms.max(10))
    }
}

impl Config {
    /// Get the config file path, e.g. ~/.config/scour/config.toml
    pub fn config_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("", "", "scour")
            .context("Could not determine the configuration directory")?;
        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Load config from file or return defaults
    pub fn load() -> Self {
        match Self::config_path() {
            Ok(path) if path.exists() => Self::load_from(&path),
            _ => Self::default(),
        }
    }

    /// Load config from `path`, warning and falling back to defaults on error
    pub fn load_from(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(content) => match toml::from_str(&content) {
                Ok(config) => config,
                Err(e) => {
                    eprintln!("Warning: Failed to parse config file: {}", e);
                    Self::default()
                }
            },
            Err(e) => {
                eprintln!("Warning: Failed to read config file: {}", e);
                Self::default()
            }
        }
    }

    /// Save config to file
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let toml = toml::to_string_pretty(self).context("Failed to serialize config")?;

        fs::write(path, toml).context("Failed to write config file")?;

        Ok(())
    }

    /// Apply CLI option overrides
    pub fn apply_cli_overrides(
        &mut self,
        journal_days: Option<u64>,
        log_days: Option<u64>,
        no_pause: bool,
    ) {
        if let Some(days) = journal_days {
            self.retention.journal_days = days;
        }
        if let Some(days) = log_days {
            self.retention.log_days = days;
        }
        if no_pause {
            self.timing.start_delay_ms = 0;
            self.timing.task_delay_ms = 0;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_config_defaults() {
        let config = Config::default();
        assert_eq!(config.retention.journal_days, 100);
        assert_eq!(config.retention.log_days, 10);
        assert_eq!(config.timing.start_delay_ms, 2000);
        assert_eq!(config.timing.task_delay_ms, 1000);
        assert_eq!(config.timing.tick(), Duration::from_millis(100));
        assert!(config.exclusions.tasks.is_empty());
        assert!(config.tools.probe);
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let config: Config = toml::from_str("[retention]\nlog_days = 3\n").unwrap();
        assert_eq!(config.retention.log_days, 3);
        assert_eq!(config.retention.journal_days, 100);
        assert_eq!(config.timing.task_delay_ms, 1000);
    }

    #[test]
    fn test_save_and_load_from() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.exclusions.tasks.push("Apt Cache".to_string());
        config.tools.probe = false;
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path);
        assert_eq!(loaded.exclusions.tasks, vec!["Apt Cache".to_string()]);
        assert!(!loaded.tools.probe);
    }

    #[test]
    fn test_unparsable_file_falls_back_to_defaults() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        fs::write(&path, "retention = \"nope\"").unwrap();

        let loaded = Config::load_from(&path);
        assert_eq!(loaded.retention.journal_days, 100);
    }

    #[test]
    fn test_config_apply_cli_overrides() {
        let mut config = Config::default();
        config.apply_cli_overrides(Some(30), Some(5), true);

        assert_eq!(config.retention.journal_days, 30);
        assert_eq!(config.retention.log_days, 5);
        assert_eq!(config.timing.start_delay(), Duration::ZERO);
        assert_eq!(config.timing.task_delay(), Duration::ZERO);
    }

    #[test]
    fn test_config_partial_overrides() {
        let mut config = Config::default();
        config.apply_cli_overrides(None, Some(7), false);

        assert_eq!(config.retention.journal_days, 100);
        assert_eq!(config.retention.log_days, 7);
        assert_eq!(config.timing.task_delay_ms, 1000);
    }

    #[test]
    fn test_tick_has_floor() {
        let mut config = Config::default();
        config.timing.tick_ms = 0;
        assert_eq!(config.timing.tick(), Duration::from_millis(10));
    }
}
