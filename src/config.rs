use serde::{Deserialize, Deserializer};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

use crate::viewer::{ClockRange, ClockStep, SyncSettings};
use crate::visual::MODEL_ALTITUDE_M;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub source: SourceConfig,
    pub replay: ReplayConfig,
    pub server: ServerConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    pub base_url: String,
    #[serde(deserialize_with = "deserialize_duration")]
    pub timeout: Duration,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8000".to_string(),
            timeout: Duration::from_secs(10),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ReplayConfig {
    pub multiplier: f64,
    pub clock_range: ClockRange,
    pub clock_step: ClockStep,
    pub marker_altitude_m: f64,
    pub camera_altitude_m: f64,
    #[serde(deserialize_with = "deserialize_duration")]
    pub flight_duration: Duration,
    #[serde(deserialize_with = "deserialize_duration")]
    pub frame_interval: Duration,
}

impl Default for ReplayConfig {
    fn default() -> Self {
        let sync = SyncSettings::default();
        Self {
            multiplier: sync.multiplier,
            clock_range: sync.clock_range,
            clock_step: sync.clock_step,
            marker_altitude_m: MODEL_ALTITUDE_M,
            camera_altitude_m: sync.camera_altitude_m,
            flight_duration: sync.flight_duration,
            frame_interval: Duration::from_millis(100),
        }
    }
}

impl ReplayConfig {
    pub fn sync_settings(&self) -> SyncSettings {
        SyncSettings {
            multiplier: self.multiplier,
            clock_range: self.clock_range,
            clock_step: self.clock_step,
            camera_altitude_m: self.camera_altitude_m,
            flight_duration: self.flight_duration,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind: String,
    pub dataset: Option<PathBuf>,
    /// Empty means any origin.
    pub cors_allow_origin: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1:8000".to_string(),
            dataset: None,
            cors_allow_origin: Vec::new(),
        }
    }
}

impl Config {
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        // An empty document deserializes to unit, not to an empty mapping.
        let config: Config = if content.trim().is_empty() {
            Config::default()
        } else {
            serde_yaml::from_str(content)?
        };
        config.validate()?;
        Ok(config)
    }

    /// Defaults when no file is given.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Config::default()),
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |msg: &str| Err(ConfigError::Invalid(msg.to_string()));

        if self.source.base_url.trim().is_empty() {
            return invalid("source.base_url must not be empty");
        }
        if !self.replay.multiplier.is_finite() || self.replay.multiplier == 0.0 {
            return invalid("replay.multiplier must be a finite, non-zero number");
        }
        for (name, value) in [
            ("replay.marker_altitude_m", self.replay.marker_altitude_m),
            ("replay.camera_altitude_m", self.replay.camera_altitude_m),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::Invalid(format!(
                    "{name} must be a finite, non-negative number"
                )));
            }
        }
        if self.replay.frame_interval.is_zero() {
            return invalid("replay.frame_interval must be greater than zero");
        }
        Ok(())
    }
}

fn deserialize_duration<'de, D>(deserializer: D) -> Result<Duration, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    humantime::parse_duration(s.trim()).map_err(serde::de::Error::custom)
}
