//! Poll scheduling - one repeating timer, one cycle in flight

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc::{self, error::TrySendError};
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::{debug, info, warn};

use crate::config::PollConfig;

/// Request for one fetch+decide cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tick {
    /// Scheduling epoch the tick was issued under
    pub generation: u64,
}

/// State shared by the timer and the worker
///
/// `generation` moves forward on every start, stop and halt; anything
/// stamped with an older value is stale. `in_flight` is held from the
/// moment a tick is handed to the worker until its cycle ends.
#[derive(Debug, Default)]
pub struct CycleGuard {
    generation: AtomicU64,
    in_flight: AtomicBool,
    halted: AtomicBool,
}

impl CycleGuard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::Acquire)
    }

    pub fn is_current(&self, generation: u64) -> bool {
        self.generation() == generation
    }

    fn advance(&self) -> u64 {
        self.generation.fetch_add(1, Ordering::AcqRel) + 1
    }

    /// Claim the single cycle slot
    fn try_begin(&self) -> bool {
        !self.in_flight.swap(true, Ordering::AcqRel)
    }

    /// Release the cycle slot
    pub fn finish(&self) {
        self.in_flight.store(false, Ordering::Release);
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Permanently stop scheduling and invalidate outstanding cycles
    pub fn halt(&self) {
        self.halted.store(true, Ordering::Release);
        self.advance();
    }

    pub fn is_halted(&self) -> bool {
        self.halted.load(Ordering::Acquire)
    }
}

/// Owns the repeating timer
///
/// Must be used from within a Tokio runtime.
pub struct PollScheduler {
    config: PollConfig,
    interval: Duration,
    timer: Option<JoinHandle<()>>,
    guard: Arc<CycleGuard>,
    ticks: mpsc::Sender<Tick>,
}

impl PollScheduler {
    pub fn new(config: PollConfig, guard: Arc<CycleGuard>, ticks: mpsc::Sender<Tick>) -> Self {
        let interval = config.effective_interval();
        Self {
            config,
            interval,
            timer: None,
            guard,
            ticks,
        }
    }

    /// Effective (clamped) interval
    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn is_running(&self) -> bool {
        self.timer.as_ref().is_some_and(|t| !t.is_finished())
    }

    /// Replace any existing schedule with one at `interval`
    ///
    /// The first tick fires one full interval from now. Returns false if the
    /// guard has been halted.
    pub fn start(&mut self, interval: Duration) -> bool {
        if let Some(timer) = self.timer.take() {
            timer.abort();
        }
        self.interval = self.config.clamp_interval(interval);

        if self.guard.is_halted() {
            warn!("Scheduler halted, not restarting");
            return false;
        }

        let generation = self.guard.advance();
        info!(
            interval_ms = self.interval.as_millis() as u64,
            requested_ms = interval.as_millis() as u64,
            generation,
            "Poll schedule started"
        );

        self.timer = Some(tokio::spawn(run_timer(
            self.interval,
            generation,
            Arc::clone(&self.guard),
            self.ticks.clone(),
        )));
        true
    }

    /// Cancel the active timer; idempotent
    pub fn stop(&mut self) {
        if let Some(timer) = self.timer.take() {
            timer.abort();
            let generation = self.guard.advance();
            info!(generation, "Poll schedule stopped");
        }
    }

    /// `stop()` then `start(interval)`
    pub fn set_interval(&mut self, interval: Duration) -> bool {
        self.stop();
        self.start(interval)
    }
}

impl Drop for PollScheduler {
    fn drop(&mut self) {
        if let Some(timer) = self.timer.take() {
            timer.abort();
        }
    }
}

async fn run_timer(period: Duration, generation: u64, guard: Arc<CycleGuard>, ticks: mpsc::Sender<Tick>) {
    let mut timer = time::interval_at(Instant::now() + period, period);
    timer.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        timer.tick().await;

        if !guard.is_current(generation) {
            debug!(generation, "Schedule superseded, timer exiting");
            break;
        }

        if !guard.try_begin() {
            debug!(generation, "Cycle still in flight, skipping tick");
            continue;
        }

        match ticks.try_send(Tick { generation }) {
            Ok(()) => {}
            Err(TrySendError::Full(_)) => {
                guard.finish();
                debug!(generation, "Worker queue full, skipping tick");
            }
            Err(TrySendError::Closed(_)) => {
                guard.finish();
                warn!(generation, "Poll worker gone, timer exiting");
                break;
            }
        }
    }
}
