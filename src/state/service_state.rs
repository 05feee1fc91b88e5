//! Shared state behind the HTTP host surface

use std::{
    sync::Mutex,
    time::Instant,
};

use chrono::{DateTime, Utc};
use tokio::sync::watch;
use tracing::warn;

use crate::adapter::TileAdapter;

use super::snapshot::TileSnapshot;

/// What the HTTP handlers need: the adapter into the tile service, the
/// latest snapshot, and a little bookkeeping for `/status`.
#[derive(Debug)]
pub struct ServiceState {
    pub adapter: TileAdapter,
    snapshot_rx: watch::Receiver<TileSnapshot>,
    pub start_time: Instant,
    pub port: u16,
    pub host: String,
    last_action: Mutex<Option<String>>,
    last_action_time: Mutex<Option<DateTime<Utc>>>,
}

impl ServiceState {
    pub fn new(
        adapter: TileAdapter,
        snapshot_rx: watch::Receiver<TileSnapshot>,
        host: String,
        port: u16,
    ) -> Self {
        Self {
            adapter,
            snapshot_rx,
            start_time: Instant::now(),
            port,
            host,
            last_action: Mutex::new(None),
            last_action_time: Mutex::new(None),
        }
    }

    /// Latest snapshot emitted by the tile service.
    pub fn snapshot(&self) -> TileSnapshot {
        self.snapshot_rx.borrow().clone()
    }

    /// Fresh receiver for handlers that want to wait for the next change.
    pub fn subscribe(&self) -> watch::Receiver<TileSnapshot> {
        self.snapshot_rx.clone()
    }

    /// Record the most recent host action for `/status`.
    pub fn record_action(&self, action: &str) {
        match self.last_action.lock() {
            Ok(mut last) => *last = Some(action.to_string()),
            Err(e) => warn!("failed to lock last action: {}", e),
        }
        match self.last_action_time.lock() {
            Ok(mut last) => *last = Some(Utc::now()),
            Err(e) => warn!("failed to lock last action time: {}", e),
        }
    }

    pub fn last_action(&self) -> (Option<String>, Option<DateTime<Utc>>) {
        let action = self.last_action.lock().ok().and_then(|a| a.clone());
        let time = self.last_action_time.lock().ok().and_then(|t| *t);
        (action, time)
    }

    /// Server uptime as a formatted string
    pub fn uptime(&self) -> String {
        let duration = self.start_time.elapsed();
        let hours = duration.as_secs() / 3600;
        let minutes = (duration.as_secs() % 3600) / 60;
        let seconds = duration.as_secs() % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}s", seconds)
        }
    }
}
