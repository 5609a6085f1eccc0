//! Error types shared by the polling core and the registration adapters

use serde::Serialize;
use thiserror::Error;

/// Errors surfaced by the monitor.
///
/// `NoData` and `InvalidSample` are the only values that can reach the
/// subscription stream. Host command failures travel as `anyhow::Error`
/// on the call that caused them.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MonitorError {
    /// The provider returned no usable status
    #[error("no wireless status available")]
    NoData,

    /// The provider returned a status with a required field missing
    #[error("status sample is missing `{field}`")]
    InvalidSample { field: &'static str },

    /// Network credentials were rejected before reaching the host
    #[error("invalid network credentials: {reason}")]
    InvalidCredentials { reason: String },
}

impl MonitorError {
    /// Whether the engine should treat this error as an absent sample
    pub fn is_absence(&self) -> bool {
        matches!(self, MonitorError::NoData | MonitorError::InvalidSample { .. })
    }
}
