//! WifiMonitor - wires scheduler, worker and publisher together

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::info;

use super::publisher::{Publication, Publisher, Subscription};
use super::scheduler::{CycleGuard, PollScheduler};
use super::stability::StabilizationEngine;
use super::worker::PollWorker;
use crate::config::{NoDataPolicy, PollConfig};
use crate::error::MonitorError;
use crate::provider::StatusProvider;

/// Debounced network monitor
///
/// Polling starts as soon as the monitor is spawned. Stabilization state
/// survives interval changes and stop/start. Dropping the monitor aborts
/// its tasks.
pub struct WifiMonitor {
    config: PollConfig,
    scheduler: PollScheduler,
    publisher: Publisher,
    guard: Arc<CycleGuard>,
    worker: JoinHandle<()>,
}

impl WifiMonitor {
    /// Spawn the worker and arm the timer; requires a Tokio runtime
    pub fn spawn<P>(provider: P, config: PollConfig) -> Self
    where
        P: StatusProvider + 'static,
    {
        let publisher = Publisher::new();
        let guard = Arc::new(CycleGuard::new());
        let (tx, rx) = mpsc::channel(1);

        let engine = StabilizationEngine::new(config.stabilization_window);
        let worker = PollWorker::new(
            provider,
            engine,
            publisher.clone(),
            Arc::clone(&guard),
            config.no_data_policy,
        );
        let worker = tokio::spawn(worker.run(rx));

        let mut scheduler = PollScheduler::new(config.clone(), Arc::clone(&guard), tx);
        scheduler.start(config.interval);

        info!(
            window_ms = config.stabilization_window.as_millis() as u64,
            policy = ?config.no_data_policy,
            "WiFi monitor started"
        );

        Self {
            config,
            scheduler,
            publisher,
            guard,
            worker,
        }
    }

    /// New subscriber; replays the latest publication first
    pub fn subscribe(&self) -> Subscription {
        self.publisher.subscribe()
    }

    pub fn latest(&self) -> Option<Publication> {
        self.publisher.latest()
    }

    /// Shared handle for readers that outlive a borrow of the monitor
    pub fn publisher(&self) -> Publisher {
        self.publisher.clone()
    }

    /// Change the poll interval and restart the schedule
    ///
    /// Returns the effective (clamped) interval. Cycles issued under the
    /// old schedule are discarded, including one whose fetch is in flight.
    pub fn set_poll_interval(&mut self, interval: Duration) -> Duration {
        self.config.interval = interval;
        self.scheduler.set_interval(interval);
        self.scheduler.interval()
    }

    pub fn poll_interval(&self) -> Duration {
        self.scheduler.interval()
    }

    pub fn stabilization_window(&self) -> Duration {
        self.config.stabilization_window
    }

    pub fn no_data_policy(&self) -> NoDataPolicy {
        self.config.no_data_policy
    }

    pub fn is_running(&self) -> bool {
        self.scheduler.is_running()
    }

    /// Whether the stream has ended for good
    pub fn is_terminated(&self) -> bool {
        self.guard.is_halted() || self.publisher.is_closed()
    }

    pub fn stop(&mut self) {
        self.scheduler.stop();
    }

    /// Re-arm the timer at the current interval
    pub fn start(&mut self) -> Result<(), MonitorError> {
        if self.is_terminated() {
            return Err(MonitorError::NoData);
        }
        self.scheduler.start(self.config.interval);
        Ok(())
    }
}

impl Drop for WifiMonitor {
    fn drop(&mut self) {
        self.scheduler.stop();
        self.worker.abort();
    }
}
