//! Tile adapter module
//!
//! This module is the boundary between a tile host and the controller:
//! host lifecycle callbacks are forwarded into the serialized event queue,
//! and render snapshots are replayed back into the host.

pub mod render;

use tokio::sync::mpsc;
use tracing::debug;

// Re-export main types
pub use render::{render_task, RenderedTile, TileHost, VirtualTile};

/// Inbound events of the tile service loop.
///
/// User clicks, host lifecycle and external interrupts all travel through
/// the one queue, so the controller never sees concurrent calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TileEvent {
    StartListening,
    Click,
    StopListening,
    TileRemoved,
    ScreenOff,
}

/// Host-facing handle that maps tile callbacks to queued events.
#[derive(Debug, Clone)]
pub struct TileAdapter {
    events: mpsc::Sender<TileEvent>,
}

impl TileAdapter {
    pub fn new(events: mpsc::Sender<TileEvent>) -> Self {
        Self { events }
    }

    /// The host started listening; the current snapshot will be re-pushed.
    pub async fn on_start_listening(&self) -> Result<(), String> {
        self.send(TileEvent::StartListening).await
    }

    /// The user clicked the tile.
    pub async fn on_click(&self) -> Result<(), String> {
        self.send(TileEvent::Click).await
    }

    /// The host stopped listening; resources are released deterministically.
    pub async fn on_stop_listening(&self) -> Result<(), String> {
        self.send(TileEvent::StopListening).await
    }

    /// The tile was removed from the panel.
    pub async fn on_tile_removed(&self) -> Result<(), String> {
        self.send(TileEvent::TileRemoved).await
    }

    /// The display was turned off by hardware or the power button.
    pub async fn on_screen_off(&self) -> Result<(), String> {
        self.send(TileEvent::ScreenOff).await
    }

    async fn send(&self, event: TileEvent) -> Result<(), String> {
        debug!("forwarding host event: {:?}", event);
        self.events
            .send(event)
            .await
            .map_err(|_| "tile service is no longer running".to_string())
    }
}
