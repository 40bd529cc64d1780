use crate::core::error::StepError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_MODEL: &str = "gemini-3-flash-preview";
pub const DEFAULT_TEMPERATURE: f64 = 0.7;
pub const DEFAULT_ALARM_INTERVAL_SECS: u64 = 3600;

/// On-disk configuration, `~/.littlestep/config.yaml`. Every field is
/// optional; missing values fall back to the defaults above.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct Config {
    pub api_key: Option<String>,
    pub base_url: Option<String>,
    pub model: Option<String>,
    pub temperature: Option<f64>,
    pub alarm_interval_secs: Option<u64>,
}

impl Config {
    fn config_dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".littlestep")
    }

    fn config_path() -> PathBuf {
        Self::config_dir().join("config.yaml")
    }

    pub fn load() -> Result<Config, StepError> {
        let path = Self::config_path();

        if path.exists() {
            let contents = fs::read_to_string(&path)?;
            let config = serde_yml::from_str::<Config>(&contents)
                .map_err(|e| StepError::Config(format!("Parse {}: {}", path.display(), e)))?;
            return Ok(config);
        }

        // First run: write a template the user can fill in
        let config = Config::default();
        let _ = config.save();
        Ok(config)
    }

    pub fn save(&self) -> Result<(), StepError> {
        let path = Self::config_path();
        if let Some(parent) = path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        fs::write(&path, serde_yml::to_string(self)?)?;
        Ok(())
    }

    pub fn history_dir() -> PathBuf {
        Self::config_dir().join("history")
    }

    pub fn model(&self) -> String {
        self.model
            .clone()
            .unwrap_or_else(|| DEFAULT_MODEL.to_string())
    }

    pub fn temperature(&self) -> f64 {
        self.temperature.unwrap_or(DEFAULT_TEMPERATURE)
    }

    pub fn alarm_interval(&self) -> Duration {
        Duration::from_secs(
            self.alarm_interval_secs
                .unwrap_or(DEFAULT_ALARM_INTERVAL_SECS),
        )
    }
}
