//! Debounced polling core - schedules fetches and publishes settled status

mod monitor;
mod publisher;
mod scheduler;
mod stability;
mod worker;

pub use monitor::WifiMonitor;
pub use publisher::{Publication, Publisher, Subscription};
pub use scheduler::{CycleGuard, PollScheduler, Tick};
pub use stability::{MonitorState, StabilizationEngine, Verdict};
pub use worker::{CycleOutcome, PollWorker};
