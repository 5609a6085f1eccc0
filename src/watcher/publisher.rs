//! Replay-latest broadcast of stabilized reports

use std::sync::Arc;

use serde::Serialize;
use tokio::sync::watch;

use crate::error::MonitorError;
use crate::wifi::StatusSample;

/// A value delivered to subscribers
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum Publication {
    /// Stabilized network status
    Report(StatusSample),
    /// Terminal failure; nothing follows it
    Error(MonitorError),
}

impl Publication {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Publication::Error(_))
    }
}

#[derive(Debug, Clone, Default)]
struct Latest {
    value: Option<Publication>,
    closed: bool,
}

/// Single-writer, many-reader latest-value channel
///
/// Cloning shares the same channel. Subscribers may await on any task or
/// thread; delivery is the hand-off.
#[derive(Clone)]
pub struct Publisher {
    tx: Arc<watch::Sender<Latest>>,
}

impl Publisher {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(Latest::default());
        Self { tx: Arc::new(tx) }
    }

    /// Deliver a report. Returns false once the channel is closed.
    pub fn publish(&self, sample: StatusSample) -> bool {
        self.tx.send_if_modified(move |latest| {
            if latest.closed {
                return false;
            }
            latest.value = Some(Publication::Report(sample));
            true
        })
    }

    /// Deliver the terminal no-data error and close the channel for everyone
    pub fn signal_no_data(&self) {
        self.tx.send_if_modified(|latest| {
            if latest.closed {
                return false;
            }
            latest.value = Some(Publication::Error(MonitorError::NoData));
            latest.closed = true;
            true
        });
    }

    /// Most recently delivered value, if any
    pub fn latest(&self) -> Option<Publication> {
        self.tx.borrow().value.clone()
    }

    pub fn is_closed(&self) -> bool {
        self.tx.borrow().closed
    }

    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }

    pub fn subscribe(&self) -> Subscription {
        Subscription {
            rx: self.tx.subscribe(),
            primed: false,
            finished: false,
        }
    }
}

impl Default for Publisher {
    fn default() -> Self {
        Self::new()
    }
}

/// One subscriber's view of the channel
///
/// The first `next()` replays the latest value if one exists. A slow
/// subscriber only ever sees the newest value, never a backlog.
pub struct Subscription {
    rx: watch::Receiver<Latest>,
    primed: bool,
    finished: bool,
}

impl Subscription {
    /// Wait for the next publication; `None` once the stream has ended
    pub async fn next(&mut self) -> Option<Publication> {
        if self.finished {
            return None;
        }

        if !self.primed {
            self.primed = true;
            let current = self.rx.borrow_and_update().value.clone();
            if let Some(publication) = current {
                return Some(self.track(publication));
            }
        }

        loop {
            if self.rx.changed().await.is_err() {
                self.finished = true;
                return None;
            }
            let current = self.rx.borrow_and_update().value.clone();
            if let Some(publication) = current {
                return Some(self.track(publication));
            }
        }
    }

    fn track(&mut self, publication: Publication) -> Publication {
        if publication.is_terminal() {
            self.finished = true;
        }
        publication
    }
}
