//! Configuration types for the device liveness service

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Largest window, in seconds, whose millisecond count fits in a `u64`
pub const MAX_WINDOW_SECONDS: u64 = u64::MAX / 1000;

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub registry: RegistryConfig,
    #[serde(default)]
    pub ingest: IngestConfig,
    #[serde(default)]
    pub api: ApiConfig,
}

/// Liveness windows and sweep cadence.
///
/// The online window decides what `is_online` reports; the stale window
/// decides when a sweep clears the stored flag. They are independent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistryConfig {
    #[serde(default = "default_online_window")]
    pub online_window_seconds: u64,
    #[serde(default = "default_stale_window")]
    pub stale_window_seconds: u64,
    #[serde(default = "default_sweep_interval")]
    pub sweep_interval_seconds: u64,
}

impl RegistryConfig {
    pub fn online_window(&self) -> Duration {
        Duration::from_secs(self.online_window_seconds)
    }

    pub fn stale_window(&self) -> Duration {
        Duration::from_secs(self.stale_window_seconds)
    }

    pub fn sweep_interval(&self) -> Duration {
        Duration::from_secs(self.sweep_interval_seconds)
    }
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            online_window_seconds: default_online_window(),
            stale_window_seconds: default_stale_window(),
            sweep_interval_seconds: default_sweep_interval(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngestConfig {
    #[serde(default = "default_channel_capacity")]
    pub channel_capacity: usize,
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            channel_capacity: default_channel_capacity(),
        }
    }
}

/// Status API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default = "default_api_port")]
    pub port: u16,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            port: default_api_port(),
        }
    }
}

impl Config {
    /// Reject values the service cannot run with
    pub fn validate(&self) -> crate::Result<()> {
        let registry = &self.registry;
        if registry.online_window_seconds == 0 {
            return Err(config_error("registry.online_window_seconds must be > 0"));
        }
        if registry.stale_window_seconds == 0 {
            return Err(config_error("registry.stale_window_seconds must be > 0"));
        }
        if registry.sweep_interval_seconds == 0 {
            return Err(config_error("registry.sweep_interval_seconds must be > 0"));
        }
        for (name, seconds) in [
            ("online_window_seconds", registry.online_window_seconds),
            ("stale_window_seconds", registry.stale_window_seconds),
            ("sweep_interval_seconds", registry.sweep_interval_seconds),
        ] {
            if seconds > MAX_WINDOW_SECONDS {
                return Err(crate::LivenessError::Config(format!(
                    "registry.{} must be <= {}",
                    name, MAX_WINDOW_SECONDS
                )));
            }
        }
        if self.ingest.channel_capacity == 0 {
            return Err(config_error("ingest.channel_capacity must be > 0"));
        }
        if registry.stale_window_seconds < registry.online_window_seconds {
            tracing::warn!(
                "stale_window_seconds ({}) is shorter than online_window_seconds ({}); \
                 swept entries will still read online until the online window ends",
                registry.stale_window_seconds,
                registry.online_window_seconds
            );
        }
        Ok(())
    }
}

fn config_error(msg: &str) -> crate::LivenessError {
    crate::LivenessError::Config(msg.to_string())
}

fn default_online_window() -> u64 {
    300
}

fn default_stale_window() -> u64 {
    600
}

fn default_sweep_interval() -> u64 {
    60
}

fn default_channel_capacity() -> usize {
    1024
}

fn default_true() -> bool {
    true
}

fn default_api_port() -> u16 {
    11120
}

/// Load configuration from a JSON file
pub fn load_config(path: &Path) -> crate::Result<Config> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        crate::LivenessError::Config(format!("Failed to read config file {:?}: {}", path, e))
    })?;
    let config: Config = serde_json::from_str(&content)?;
    Ok(config)
}
