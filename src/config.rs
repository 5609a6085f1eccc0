//! Monitor configuration
//!
//! Loaded from `~/.config/wifi-monitor/config.json` when present, then
//! overridden by command-line flags.

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

/// Lowest floor any configuration may set
pub const HARD_MIN_INTERVAL: Duration = Duration::from_millis(10);

/// Longest poll interval; larger requests are capped here
pub const MAX_INTERVAL: Duration = Duration::from_secs(24 * 60 * 60);

/// What a tick with no usable sample means, for the whole monitor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoDataPolicy {
    /// Drop the tick and keep polling
    #[default]
    Skip,
    /// Publish a terminal error and stop polling
    Terminate,
}

/// Runtime polling parameters
#[derive(Debug, Clone, PartialEq)]
pub struct PollConfig {
    pub interval: Duration,
    pub min_interval: Duration,
    pub stabilization_window: Duration,
    pub no_data_policy: NoDataPolicy,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_millis(500),
            min_interval: Duration::from_millis(500),
            stabilization_window: Duration::from_secs(3),
            no_data_policy: NoDataPolicy::Skip,
        }
    }
}

impl PollConfig {
    /// Apply the interval floor and ceiling
    pub fn clamp_interval(&self, interval: Duration) -> Duration {
        let floor = self.min_interval.clamp(HARD_MIN_INTERVAL, MAX_INTERVAL);
        interval.clamp(floor, MAX_INTERVAL)
    }

    /// Interval actually used by the scheduler
    pub fn effective_interval(&self) -> Duration {
        self.clamp_interval(self.interval)
    }
}

/// On-disk configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MonitorConfig {
    /// 轮询间隔（秒）
    pub poll_interval_secs: f64,
    /// 轮询间隔下限（秒）
    pub min_interval_secs: f64,
    /// 稳定窗口（秒）
    pub stabilization_window_secs: f64,
    pub no_data_policy: NoDataPolicy,
    /// 无线网卡名，如 wlan0
    pub interface: Option<String>,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            poll_interval_secs: 0.5,
            min_interval_secs: 0.5,
            stabilization_window_secs: 3.0,
            no_data_policy: NoDataPolicy::Skip,
            interface: None,
        }
    }
}

impl MonitorConfig {
    /// Default location, `~/.config/wifi-monitor/config.json`
    pub fn default_path() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(".config/wifi-monitor/config.json"))
    }

    /// Load from the default location, falling back to defaults
    pub fn load() -> Result<Self> {
        match Self::default_path() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    /// Load from `path`; a missing file yields defaults
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Cannot read config {}", path.display()))?;
        let config: MonitorConfig = serde_json::from_str(&content)
            .with_context(|| format!("Cannot parse config {}", path.display()))?;

        debug!(path = %path.display(), "Loaded monitor config");
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        let fields = [
            ("poll_interval_secs", self.poll_interval_secs),
            ("min_interval_secs", self.min_interval_secs),
            ("stabilization_window_secs", self.stabilization_window_secs),
        ];
        for (name, value) in fields {
            secs_to_duration(name, value)?;
        }
        Ok(())
    }

    /// Convert to runtime parameters
    pub fn poll_config(&self) -> Result<PollConfig> {
        Ok(PollConfig {
            interval: secs_to_duration("poll_interval_secs", self.poll_interval_secs)?,
            min_interval: secs_to_duration("min_interval_secs", self.min_interval_secs)?,
            stabilization_window: secs_to_duration("stabilization_window_secs", self.stabilization_window_secs)?,
            no_data_policy: self.no_data_policy,
        })
    }
}

fn secs_to_duration(name: &str, value: f64) -> Result<Duration> {
    Duration::try_from_secs_f64(value)
        .map_err(|_| anyhow!("{} must be a non-negative number of seconds in range, got {}", name, value))
}

/// Parse a seconds value given on the command line
pub fn parse_secs(value: &str) -> Result<Duration> {
    let secs: f64 = value
        .trim()
        .parse()
        .map_err(|_| anyhow!("not a number: {}", value))?;
    secs_to_duration("duration", secs)
}
