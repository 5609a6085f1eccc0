//! Network stability detection - decides when an association has settled

use std::time::Duration;

use tokio::time::Instant;

use crate::wifi::StatusSample;

/// Identity tracking for the engine
#[derive(Debug, Clone)]
pub struct MonitorState {
    /// BSSID seen on the previous valid sample
    pub last_identifier: Option<String>,
    /// When `last_identifier` last changed
    pub last_change: Instant,
}

impl MonitorState {
    fn new(created_at: Instant) -> Self {
        Self {
            last_identifier: None,
            last_change: created_at,
        }
    }
}

/// Outcome of feeding one sample to the engine
#[derive(Debug, Clone, PartialEq)]
pub enum Verdict {
    /// Identity has held for the full window
    Publish(StatusSample),
    /// New or still-settling identity
    Suppress,
    /// No usable sample this tick
    NoData,
}

/// Debounces identity changes over a stabilization window
pub struct StabilizationEngine {
    state: MonitorState,
    window: Duration,
}

impl StabilizationEngine {
    pub fn new(window: Duration) -> Self {
        Self::new_at(window, Instant::now())
    }

    /// Create with an explicit creation time (for tests)
    pub fn new_at(window: Duration, created_at: Instant) -> Self {
        Self {
            state: MonitorState::new(created_at),
            window,
        }
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    pub fn state(&self) -> &MonitorState {
        &self.state
    }

    /// Evaluate a sample observed at `now`
    pub fn observe(&mut self, sample: Option<StatusSample>, now: Instant) -> Verdict {
        let Some(sample) = sample else {
            return Verdict::NoData;
        };

        if self.state.last_identifier.as_deref() != Some(sample.bssid()) {
            self.state.last_identifier = Some(sample.bssid().to_string());
            self.state.last_change = now;
            return Verdict::Suppress;
        }

        if now.saturating_duration_since(self.state.last_change) >= self.window {
            Verdict::Publish(sample)
        } else {
            Verdict::Suppress
        }
    }
}
