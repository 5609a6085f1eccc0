//! WiFi controller - monitor plus saved-network management behind one handle

use std::time::Duration;

use anyhow::Result;

use crate::config::PollConfig;
use crate::error::MonitorError;
use crate::provider::StatusProvider;
use crate::registration::NetworkRegistrar;
use crate::watcher::{Publication, Subscription, WifiMonitor};
use crate::wifi::NetworkCredentials;

/// Entry point for applications
///
/// Polling begins on construction. Registration calls go straight to the
/// registrar and never touch the status stream.
pub struct WifiController<R> {
    monitor: WifiMonitor,
    registrar: R,
}

impl<R: NetworkRegistrar> WifiController<R> {
    pub fn new<P>(provider: P, registrar: R, config: PollConfig) -> Self
    where
        P: StatusProvider + 'static,
    {
        Self {
            monitor: WifiMonitor::spawn(provider, config),
            registrar,
        }
    }

    pub fn subscribe(&self) -> Subscription {
        self.monitor.subscribe()
    }

    pub fn latest(&self) -> Option<Publication> {
        self.monitor.latest()
    }

    pub fn set_poll_interval(&mut self, interval: Duration) -> Duration {
        self.monitor.set_poll_interval(interval)
    }

    pub fn poll_interval(&self) -> Duration {
        self.monitor.poll_interval()
    }

    pub fn stop(&mut self) {
        self.monitor.stop();
    }

    pub fn start(&mut self) -> Result<(), MonitorError> {
        self.monitor.start()
    }

    pub fn monitor(&self) -> &WifiMonitor {
        &self.monitor
    }

    /// Save an open network
    pub async fn add_open_network(&self, ssid: &str) -> Result<()> {
        self.registrar.add_network(&NetworkCredentials::open(ssid)).await
    }

    /// Save a passphrase-protected network
    pub async fn add_network(&self, ssid: &str, passphrase: &str, is_wep: bool) -> Result<()> {
        let credentials = NetworkCredentials::with_passphrase(ssid, passphrase, is_wep);
        self.registrar.add_network(&credentials).await
    }

    pub async fn configured_ssids(&self) -> Result<Vec<String>> {
        self.registrar.configured_ssids().await
    }
}
