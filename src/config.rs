use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

/// Main configuration structure
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub checks: ChecksConfig,
    #[serde(default)]
    pub poller: PollerSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Base URL of the DHIS2 server (e.g. "https://play.dhis2.org/dev")
    pub base_url: String,
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChecksConfig {
    /// Comma-separated list of integrity check names to monitor
    pub monitored: String,
}

impl ChecksConfig {
    /// Split the configured list into ordered check names, dropping blanks
    pub fn monitored_names(&self) -> Vec<String> {
        self.monitored
            .split(',')
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(str::to_string)
            .collect()
    }
}

/// Timing and deadline settings for the completion poller
#[derive(Debug, Clone, Deserialize)]
pub struct PollerSettings {
    /// Seconds to wait after triggering before the first running query
    #[serde(default = "default_settle_secs")]
    pub settle_secs: u64,
    /// Seconds between running queries
    #[serde(default = "default_interval_secs")]
    pub interval_secs: u64,
    /// Maximum running queries before the run is abandoned
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
}

fn default_settle_secs() -> u64 {
    5
}

fn default_interval_secs() -> u64 {
    5
}

fn default_max_attempts() -> u32 {
    120
}

impl Default for PollerSettings {
    fn default() -> Self {
        Self {
            settle_secs: default_settle_secs(),
            interval_secs: default_interval_secs(),
            max_attempts: default_max_attempts(),
        }
    }
}

impl PollerSettings {
    pub fn settle(&self) -> Duration {
        Duration::from_secs(self.settle_secs)
    }

    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs)
    }
}

impl AppConfig {
    /// Load configuration from files and environment
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from("config")
    }

    /// Load configuration from a specific directory
    pub fn load_from<P: AsRef<Path>>(config_dir: P) -> Result<Self, ConfigError> {
        let config_dir = config_dir.as_ref();

        let builder = Config::builder()
            .set_default("poller.settle_secs", default_settle_secs())?
            .set_default("poller.interval_secs", default_interval_secs())?
            .set_default("poller.max_attempts", default_max_attempts() as u64)?
            .add_source(File::from(config_dir.join("default.toml")).required(false))
            // Override with environment variables (DIM_SERVER__BASE_URL, etc.)
            .add_source(
                Environment::with_prefix("DIM")
                    .separator("__")
                    .try_parsing(true),
            );

        builder.build()?.try_deserialize()
    }
}
