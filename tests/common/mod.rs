//! Shared test doubles

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use tokio::sync::Notify;
use tokio::time::Instant;

use wifi_monitor::{NetworkCredentials, NetworkRegistrar, RawStatus, StatusProvider};

pub const HOME_BSSID: &str = "aa:bb:cc:dd:ee:01";
pub const OFFICE_BSSID: &str = "aa:bb:cc:dd:ee:02";

pub fn home() -> Option<RawStatus> {
    Some(RawStatus::complete(HOME_BSSID, "home", 0.7))
}

pub fn office() -> Option<RawStatus> {
    Some(RawStatus::complete(OFFICE_BSSID, "office", 0.5))
}

/// One scripted provider reply
pub enum Step {
    Ready(Option<RawStatus>),
    After(Duration, Option<RawStatus>),
    Gated(Arc<Notify>, Option<RawStatus>),
}

/// Provider that replays scripted steps, then a fallback forever
pub struct ScriptedProvider {
    steps: Mutex<VecDeque<Step>>,
    fallback: Option<RawStatus>,
    latency: Duration,
    calls: Mutex<Vec<Instant>>,
    active: AtomicUsize,
    max_active: AtomicUsize,
}

impl ScriptedProvider {
    pub fn new(steps: Vec<Step>, fallback: Option<RawStatus>) -> Arc<Self> {
        Arc::new(Self::build(steps, fallback, Duration::ZERO))
    }

    pub fn always(status: Option<RawStatus>) -> Arc<Self> {
        Self::new(Vec::new(), status)
    }

    pub fn slow(status: Option<RawStatus>, latency: Duration) -> Arc<Self> {
        Arc::new(Self::build(Vec::new(), status, latency))
    }

    fn build(steps: Vec<Step>, fallback: Option<RawStatus>, latency: Duration) -> Self {
        Self {
            steps: Mutex::new(steps.into()),
            fallback,
            latency,
            calls: Mutex::new(Vec::new()),
            active: AtomicUsize::new(0),
            max_active: AtomicUsize::new(0),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn call_times(&self) -> Vec<Instant> {
        self.calls.lock().unwrap().clone()
    }

    pub fn max_concurrent(&self) -> usize {
        self.max_active.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl StatusProvider for ScriptedProvider {
    async fn fetch_current(&self) -> Result<Option<RawStatus>> {
        let step = self.steps.lock().unwrap().pop_front();
        self.calls.lock().unwrap().push(Instant::now());
        let active = self.active.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_active.fetch_max(active, Ordering::SeqCst);

        let status = match step {
            Some(Step::Ready(status)) => status,
            Some(Step::After(delay, status)) => {
                tokio::time::sleep(delay).await;
                status
            }
            Some(Step::Gated(gate, status)) => {
                gate.notified().await;
                status
            }
            None => {
                if !self.latency.is_zero() {
                    tokio::time::sleep(self.latency).await;
                }
                self.fallback.clone()
            }
        };

        self.active.fetch_sub(1, Ordering::SeqCst);
        Ok(status)
    }
}

/// Registrar that records what it was asked to save
#[derive(Default)]
pub struct RecordingRegistrar {
    pub saved: Mutex<Vec<NetworkCredentials>>,
    pub fail: bool,
}

#[async_trait]
impl NetworkRegistrar for RecordingRegistrar {
    async fn add_network(&self, credentials: &NetworkCredentials) -> Result<()> {
        if self.fail {
            return Err(anyhow!("host refused profile"));
        }
        credentials.validate()?;
        self.saved.lock().unwrap().push(credentials.clone());
        Ok(())
    }

    async fn configured_ssids(&self) -> Result<Vec<String>> {
        Ok(self
            .saved
            .lock()
            .unwrap()
            .iter()
            .map(|c| c.ssid.clone())
            .collect())
    }
}
