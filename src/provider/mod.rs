//! Status provider adapters
//!
//! A provider answers one question: what network is this host associated
//! with right now. Calls are single-shot and may take arbitrarily long;
//! callers own the single-flight discipline.

mod nmcli;

pub use nmcli::{parse_active_network, NmcliStatusProvider};

use anyhow::Result;
use async_trait::async_trait;

use crate::wifi::RawStatus;

/// Source of the current network status
#[async_trait]
pub trait StatusProvider: Send + Sync {
    /// Fetch the current status once
    ///
    /// `Ok(None)` means the host reported no association.
    async fn fetch_current(&self) -> Result<Option<RawStatus>>;
}

#[async_trait]
impl<P: StatusProvider + ?Sized> StatusProvider for std::sync::Arc<P> {
    async fn fetch_current(&self) -> Result<Option<RawStatus>> {
        (**self).fetch_current().await
    }
}

#[async_trait]
impl<P: StatusProvider + ?Sized> StatusProvider for Box<P> {
    async fn fetch_current(&self) -> Result<Option<RawStatus>> {
        (**self).fetch_current().await
    }
}
