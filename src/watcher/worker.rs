//! Poll worker - the single task that fetches, decides and publishes

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::time::Instant;
use tracing::{debug, info, warn};

use super::publisher::Publisher;
use super::scheduler::{CycleGuard, Tick};
use super::stability::{StabilizationEngine, Verdict};
use crate::config::NoDataPolicy;
use crate::provider::StatusProvider;
use crate::wifi::StatusSample;

/// What one cycle did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleOutcome {
    Published,
    Suppressed,
    /// No usable sample, tick dropped
    Skipped,
    /// No usable sample, stream terminated
    Terminated,
    /// Tick or result belonged to a superseded schedule
    Stale,
}

/// Owns the stabilization engine; runs cycles strictly one at a time
pub struct PollWorker<P> {
    provider: P,
    engine: StabilizationEngine,
    publisher: Publisher,
    guard: Arc<CycleGuard>,
    policy: NoDataPolicy,
}

impl<P: StatusProvider> PollWorker<P> {
    pub fn new(
        provider: P,
        engine: StabilizationEngine,
        publisher: Publisher,
        guard: Arc<CycleGuard>,
        policy: NoDataPolicy,
    ) -> Self {
        Self {
            provider,
            engine,
            publisher,
            guard,
            policy,
        }
    }

    pub fn engine(&self) -> &StabilizationEngine {
        &self.engine
    }

    /// Process ticks until the scheduler side of the channel is dropped
    pub async fn run(mut self, mut ticks: mpsc::Receiver<Tick>) {
        while let Some(tick) = ticks.recv().await {
            let outcome = self.run_cycle(tick).await;
            self.guard.finish();
            debug!(generation = tick.generation, outcome = ?outcome, "Cycle complete");
        }
        debug!("Tick channel closed, poll worker exiting");
    }

    /// One fetch+decide+publish cycle
    pub async fn run_cycle(&mut self, tick: Tick) -> CycleOutcome {
        if !self.guard.is_current(tick.generation) {
            return CycleOutcome::Stale;
        }

        let fetched = self.provider.fetch_current().await;

        // the provider call can outlive a restart
        if !self.guard.is_current(tick.generation) {
            debug!(generation = tick.generation, "Discarding result from superseded schedule");
            return CycleOutcome::Stale;
        }

        let sample = match fetched {
            Ok(Some(raw)) => match StatusSample::try_from(raw) {
                Ok(sample) => Some(sample),
                Err(e) => {
                    debug!(error = %e, "Discarding incomplete status");
                    None
                }
            },
            Ok(None) => None,
            Err(e) => {
                warn!(error = %e, "Status provider failed");
                None
            }
        };

        match self.engine.observe(sample, Instant::now()) {
            Verdict::Publish(sample) => {
                info!(bssid = %sample.bssid(), ssid = %sample.ssid(), signal = sample.signal_strength(), "Publishing stable status");
                self.publisher.publish(sample);
                CycleOutcome::Published
            }
            Verdict::Suppress => {
                debug!(bssid = ?self.engine.state().last_identifier, "Status not yet stable");
                CycleOutcome::Suppressed
            }
            Verdict::NoData => self.handle_no_data(),
        }
    }

    fn handle_no_data(&mut self) -> CycleOutcome {
        match self.policy {
            NoDataPolicy::Skip => {
                debug!("No status this tick, skipping");
                CycleOutcome::Skipped
            }
            NoDataPolicy::Terminate => {
                info!("No status available, terminating stream");
                self.guard.halt();
                self.publisher.signal_no_data();
                CycleOutcome::Terminated
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MonitorError;
    use crate::watcher::publisher::Publication;
    use crate::wifi::RawStatus;
    use anyhow::{anyhow, Result};
    use async_trait::async_trait;
    use std::collections::VecDeque;
    use std::sync::Mutex;
    use std::time::Duration;

    enum Reply {
        Status(Option<RawStatus>),
        Fail,
    }

    struct Script(Mutex<VecDeque<Reply>>);

    impl Script {
        fn new(replies: Vec<Reply>) -> Self {
            Self(Mutex::new(replies.into()))
        }
    }

    #[async_trait]
    impl StatusProvider for Script {
        async fn fetch_current(&self) -> Result<Option<RawStatus>> {
            match self.0.lock().unwrap().pop_front() {
                Some(Reply::Status(status)) => Ok(status),
                Some(Reply::Fail) | None => Err(anyhow!("scripted failure")),
            }
        }
    }

    fn home() -> Reply {
        Reply::Status(Some(RawStatus::complete("aa:bb:cc:dd:ee:ff", "home", 0.6)))
    }

    fn worker(replies: Vec<Reply>, policy: NoDataPolicy) -> (PollWorker<Script>, Publisher, Arc<CycleGuard>) {
        let publisher = Publisher::new();
        let guard = Arc::new(CycleGuard::new());
        let engine = StabilizationEngine::new(Duration::ZERO);
        let worker = PollWorker::new(Script::new(replies), engine, publisher.clone(), Arc::clone(&guard), policy);
        (worker, publisher, guard)
    }

    fn tick(guard: &CycleGuard) -> Tick {
        Tick {
            generation: guard.generation(),
        }
    }

    #[tokio::test]
    async fn test_publishes_after_identity_settles() {
        let (mut worker, publisher, guard) = worker(vec![home(), home()], NoDataPolicy::Skip);

        assert_eq!(worker.run_cycle(tick(&guard)).await, CycleOutcome::Suppressed);
        assert_eq!(worker.run_cycle(tick(&guard)).await, CycleOutcome::Published);
        assert!(matches!(publisher.latest(), Some(Publication::Report(_))));
    }

    #[tokio::test]
    async fn test_incomplete_status_counts_as_no_data() {
        let partial = Reply::Status(Some(RawStatus {
            signal_strength: Some(0.4),
            ..Default::default()
        }));
        let (mut worker, publisher, guard) = worker(vec![partial], NoDataPolicy::Skip);

        assert_eq!(worker.run_cycle(tick(&guard)).await, CycleOutcome::Skipped);
        assert!(worker.engine().state().last_identifier.is_none());
        assert!(publisher.latest().is_none());
    }

    #[tokio::test]
    async fn test_provider_error_counts_as_no_data() {
        let (mut worker, publisher, guard) = worker(vec![Reply::Fail], NoDataPolicy::Skip);
        assert_eq!(worker.run_cycle(tick(&guard)).await, CycleOutcome::Skipped);
        assert!(!publisher.is_closed());
    }

    #[tokio::test]
    async fn test_terminate_policy_closes_stream_and_halts() {
        let (mut worker, publisher, guard) = worker(vec![Reply::Status(None)], NoDataPolicy::Terminate);

        assert_eq!(worker.run_cycle(tick(&guard)).await, CycleOutcome::Terminated);
        assert!(guard.is_halted());
        assert_eq!(publisher.latest(), Some(Publication::Error(MonitorError::NoData)));
        assert!(publisher.is_closed());
    }

    #[tokio::test]
    async fn test_incomplete_status_terminates_under_terminate_policy() {
        let partial = Reply::Status(Some(RawStatus {
            bssid: Some("aa:bb:cc:dd:ee:ff".to_string()),
            ssid: Some("home".to_string()),
            signal_strength: None,
        }));
        let (mut worker, publisher, guard) = worker(vec![partial, home()], NoDataPolicy::Terminate);
        let mut sub = publisher.subscribe();

        assert_eq!(worker.run_cycle(tick(&guard)).await, CycleOutcome::Terminated);
        assert!(guard.is_halted());
        assert!(worker.engine().state().last_identifier.is_none());
        assert_eq!(sub.next().await, Some(Publication::Error(MonitorError::NoData)));
        assert_eq!(sub.next().await, None);
    }

    #[tokio::test]
    async fn test_stale_tick_never_calls_provider() {
        let (mut worker, _publisher, guard) = worker(vec![home()], NoDataPolicy::Skip);
        let stale = tick(&guard);
        guard.halt();

        assert_eq!(worker.run_cycle(stale).await, CycleOutcome::Stale);
        // reply still queued
        assert_eq!(worker.provider.0.lock().unwrap().len(), 1);
    }
}
