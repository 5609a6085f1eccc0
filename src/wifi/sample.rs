//! Status samples - what one provider call observes about the current network

use serde::{Deserialize, Serialize};

use crate::error::MonitorError;

/// A validated snapshot of the associated network
///
/// Built once per successful provider call and never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusSample {
    /// Station identifier (BSSID)
    bssid: String,
    /// Network display name (SSID)
    ssid: String,
    /// Normalized signal strength, 0.0 ..= 1.0
    signal_strength: f64,
}

impl StatusSample {
    pub fn new(bssid: impl Into<String>, ssid: impl Into<String>, signal_strength: f64) -> Self {
        Self {
            bssid: bssid.into(),
            ssid: ssid.into(),
            signal_strength: signal_strength.clamp(0.0, 1.0),
        }
    }

    /// Identity used for stabilization
    pub fn bssid(&self) -> &str {
        &self.bssid
    }

    pub fn ssid(&self) -> &str {
        &self.ssid
    }

    pub fn signal_strength(&self) -> f64 {
        self.signal_strength
    }
}

/// Unvalidated provider output
///
/// Platforms can report partial records (a signal reading with no BSSID
/// while roaming, for instance). Those never become a [`StatusSample`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawStatus {
    pub bssid: Option<String>,
    pub ssid: Option<String>,
    pub signal_strength: Option<f64>,
}

impl RawStatus {
    pub fn complete(bssid: impl Into<String>, ssid: impl Into<String>, signal_strength: f64) -> Self {
        Self {
            bssid: Some(bssid.into()),
            ssid: Some(ssid.into()),
            signal_strength: Some(signal_strength),
        }
    }
}

impl TryFrom<RawStatus> for StatusSample {
    type Error = MonitorError;

    fn try_from(raw: RawStatus) -> Result<Self, Self::Error> {
        let bssid = non_empty(raw.bssid).ok_or(MonitorError::InvalidSample { field: "bssid" })?;
        let ssid = non_empty(raw.ssid).ok_or(MonitorError::InvalidSample { field: "ssid" })?;
        let signal_strength = raw
            .signal_strength
            .filter(|s| s.is_finite())
            .ok_or(MonitorError::InvalidSample { field: "signal_strength" })?;

        Ok(StatusSample::new(bssid, ssid, signal_strength))
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
