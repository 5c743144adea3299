//! # Simulation Configuration
//!
//! Every field has a default matching the reference run: four printers at 7
//! sheets per minute, a new job every 30 simulated seconds, 30 simulated minutes
//! at 300x.
//!
//! ## Example: TOML Configuration
//!
//! ```toml
//! [simulation]
//! printers = 4
//! speed = 300.0
//! duration_secs = 1800
//! poll_interval_ms = 1
//! seed = 42
//! start_time = "09:00:00"
//!
//! [printer]
//! sheets_per_minute = 7
//!
//! [dispatch]
//! arrival_interval_secs = 30
//!
//! [output]
//! format = "jsonl"
//! ```
//!
//! Without `start_time` the run starts at the host's local time of day.

use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Serialize};
use spooler_shared::SimTime;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub simulation: SimulationConfig,
    #[serde(default)]
    pub printer: PrinterConfig,
    #[serde(default)]
    pub dispatch: DispatchConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Run-level settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SimulationConfig {
    #[serde(default = "default_printers")]
    pub printers: usize,
    /// Simulated seconds per real second
    #[serde(default = "default_speed")]
    pub speed: f64,
    #[serde(default = "default_duration_secs")]
    pub duration_secs: u64,
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,
    #[serde(default)]
    pub seed: Option<u64>,
    /// `HH:MM:SS`
    #[serde(default)]
    pub start_time: Option<String>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            printers: default_printers(),
            speed: default_speed(),
            duration_secs: default_duration_secs(),
            poll_interval_ms: default_poll_interval_ms(),
            seed: None,
            start_time: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PrinterConfig {
    #[serde(default = "default_sheets_per_minute")]
    pub sheets_per_minute: u32,
}

impl Default for PrinterConfig {
    fn default() -> Self {
        Self {
            sheets_per_minute: default_sheets_per_minute(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DispatchConfig {
    #[serde(default = "default_arrival_interval_secs")]
    pub arrival_interval_secs: u64,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            arrival_interval_secs: default_arrival_interval_secs(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Jsonl,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct OutputConfig {
    #[serde(default)]
    pub format: OutputFormat,
}

impl Config {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let sim = &self.simulation;
        if sim.printers < 1 {
            return Err(ConfigError::Invalid("simulation.printers must be at least 1".to_string()));
        }
        if !sim.speed.is_finite() || sim.speed <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "simulation.speed must be a positive number, got {}",
                sim.speed
            )));
        }
        if self.printer.sheets_per_minute == 0 || self.printer.sheets_per_minute > 60_000 {
            return Err(ConfigError::Invalid(
                "printer.sheets_per_minute must be between 1 and 60000".to_string(),
            ));
        }
        if self.dispatch.arrival_interval_secs == 0 {
            return Err(ConfigError::Invalid(
                "dispatch.arrival_interval_secs must be > 0".to_string(),
            ));
        }
        self.start_time_of_day()?;
        Ok(())
    }

    /// Parsed `simulation.start_time`, `None` when unset.
    pub fn start_time_of_day(&self) -> Result<Option<SimTime>, ConfigError> {
        let Some(raw) = self.simulation.start_time.as_deref() else {
            return Ok(None);
        };
        let time = NaiveTime::parse_from_str(raw, "%H:%M:%S").map_err(|e| {
            ConfigError::Invalid(format!("simulation.start_time '{}' is not HH:MM:SS: {}", raw, e))
        })?;
        Ok(Some(SimTime::from_secs(u64::from(time.num_seconds_from_midnight()))))
    }
}

/// Host local time of day, used when no start time is configured.
pub fn local_time_of_day() -> SimTime {
    let now = chrono::Local::now().time();
    SimTime::from_secs(u64::from(now.num_seconds_from_midnight()))
}

// Default value functions
fn default_printers() -> usize { 4 }
fn default_speed() -> f64 { 300.0 }
fn default_duration_secs() -> u64 { 30 * 60 }
fn default_poll_interval_ms() -> u64 { 1 }
fn default_sheets_per_minute() -> u32 { 7 }
fn default_arrival_interval_secs() -> u64 { 30 }

/// Load and validate configuration from a TOML file at the given path.
pub fn load_config(path: &str) -> Result<Config, ConfigError> {
    let contents = std::fs::read_to_string(path).map_err(|e| {
        tracing::error!("Failed to read config file '{}': {}", path, e);
        ConfigError::Io(e)
    })?;
    let config: Config = toml::from_str(&contents).map_err(|e| {
        tracing::error!("Failed to parse config TOML: {}", e);
        ConfigError::Toml(e)
    })?;
    config.validate()?;
    Ok(config)
}
