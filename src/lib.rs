//! WiFi Monitor - 轮询当前无线网络并发布稳定后的变化

pub mod cli;
pub mod config;
pub mod controller;
pub mod error;
pub mod infra;
pub mod provider;
pub mod registration;
pub mod watcher;
pub mod wifi;

pub use config::{MonitorConfig, NoDataPolicy, PollConfig};
pub use controller::WifiController;
pub use error::MonitorError;
pub use provider::{NmcliStatusProvider, StatusProvider};
pub use registration::{NetworkRegistrar, NmcliRegistrar};
pub use watcher::{Publication, Publisher, StabilizationEngine, Subscription, Verdict, WifiMonitor};
pub use wifi::{NetworkCredentials, NetworkSecurity, RawStatus, StatusSample};
