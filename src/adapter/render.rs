//! Snapshot rendering into a tile host

use std::sync::{Arc, Mutex};

use tokio::sync::watch;
use tracing::{info, warn};

use crate::state::snapshot::{IconVariant, TileSnapshot};

/// Render surface offered by a tile host.
///
/// `set_*` calls stage changes; nothing is visible until `publish()`.
pub trait TileHost: Send {
    fn set_state(&mut self, active: bool);
    fn set_label(&mut self, label: &str);
    fn set_icon(&mut self, icon: IconVariant);
    fn publish(&mut self);
}

/// Follow snapshot emissions and replay each one into the host.
///
/// Runs until the snapshot channel closes, i.e. until the tile service
/// loop exits.
pub async fn render_task<H: TileHost>(mut host: H, mut snapshots: watch::Receiver<TileSnapshot>) {
    // Push the initial state so the host never shows a stale tile.
    let initial = snapshots.borrow_and_update().clone();
    apply(&mut host, &initial);

    while snapshots.changed().await.is_ok() {
        let snap = snapshots.borrow_and_update().clone();
        apply(&mut host, &snap);
    }
    info!("snapshot channel closed, render task stopping");
}

fn apply<H: TileHost>(host: &mut H, snap: &TileSnapshot) {
    host.set_state(snap.active);
    host.set_label(&snap.label);
    host.set_icon(snap.icon);
    host.publish();
}

/// What a virtual tile currently shows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderedTile {
    pub active: bool,
    pub label: String,
    pub icon: IconVariant,
    pub publishes: u64,
}

/// In-process tile host for the development daemon and tests.
///
/// Mirrors the staged-then-committed contract of a real panel host:
/// `set_*` mutate a pending copy, `publish()` commits it.
#[derive(Debug)]
pub struct VirtualTile {
    pending: RenderedTile,
    rendered: Arc<Mutex<RenderedTile>>,
}

impl VirtualTile {
    /// Returns the host plus a shared view of its committed render.
    pub fn new() -> (Self, Arc<Mutex<RenderedTile>>) {
        let rendered = Arc::new(Mutex::new(RenderedTile::default()));
        let tile = Self {
            pending: RenderedTile::default(),
            rendered: Arc::clone(&rendered),
        };
        (tile, rendered)
    }
}

impl TileHost for VirtualTile {
    fn set_state(&mut self, active: bool) {
        self.pending.active = active;
    }

    fn set_label(&mut self, label: &str) {
        self.pending.label = label.to_string();
    }

    fn set_icon(&mut self, icon: IconVariant) {
        self.pending.icon = icon;
    }

    fn publish(&mut self) {
        match self.rendered.lock() {
            Ok(mut rendered) => {
                rendered.active = self.pending.active;
                rendered.label = self.pending.label.clone();
                rendered.icon = self.pending.icon;
                rendered.publishes += 1;
                info!(
                    "tile updated: state={} label=\"{}\" icon={:?}",
                    if rendered.active { "active" } else { "inactive" },
                    rendered.label,
                    rendered.icon
                );
            }
            Err(e) => warn!("failed to lock rendered tile: {}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::durations::DurationPreset;

    #[test]
    fn set_calls_stage_until_publish_commits() {
        let (mut tile, rendered) = VirtualTile::new();

        tile.set_state(true);
        tile.set_label("05:00");
        tile.set_icon(IconVariant::On);
        assert_eq!(*rendered.lock().unwrap(), RenderedTile::default());

        tile.publish();
        let committed = rendered.lock().unwrap().clone();
        assert!(committed.active);
        assert_eq!(committed.label, "05:00");
        assert_eq!(committed.icon, IconVariant::On);
        assert_eq!(committed.publishes, 1);
    }

    #[tokio::test]
    async fn render_task_applies_initial_and_updated_snapshots() {
        let (tx, rx) = watch::channel(TileSnapshot::inactive());
        let (tile, rendered) = VirtualTile::new();
        let task = tokio::spawn(render_task(tile, rx));

        // Wait for the initial render to land.
        loop {
            if rendered.lock().unwrap().publishes >= 1 {
                break;
            }
            tokio::task::yield_now().await;
        }
        assert_eq!(rendered.lock().unwrap().label, "Caffeine");

        tx.send(TileSnapshot::active(DurationPreset::Finite(300)))
            .unwrap();
        loop {
            if rendered.lock().unwrap().publishes >= 2 {
                break;
            }
            tokio::task::yield_now().await;
        }
        let committed = rendered.lock().unwrap().clone();
        assert!(committed.active);
        assert_eq!(committed.label, "05:00");
        assert_eq!(committed.icon, IconVariant::On);

        drop(tx);
        task.await.unwrap();
    }
}
