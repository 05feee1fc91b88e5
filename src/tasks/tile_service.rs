//! Tile service background task

use tokio::sync::{mpsc, watch};
use tokio::time::Instant;
use tracing::{debug, info, warn};

use crate::adapter::TileEvent;
use crate::state::controller::CaffeineController;
use crate::state::snapshot::TileSnapshot;
use crate::tasks::countdown::TimerEvent;

enum Input {
    Host(TileEvent),
    Timer(TimerEvent),
}

/// Single logical owner of the caffeine controller.
///
/// Host events and countdown events are multiplexed into one serialized
/// context, so the controller needs no locking and a cancelled countdown
/// can never deliver late. Runs until the event queue closes; on exit the
/// controller is deactivated so a held wake lock cannot outlive the tile.
pub async fn tile_service_task(
    mut controller: CaffeineController,
    mut events: mpsc::Receiver<TileEvent>,
    snapshots: watch::Sender<TileSnapshot>,
) {
    info!("starting tile service task");

    loop {
        let input = tokio::select! {
            maybe_event = events.recv() => {
                match maybe_event {
                    Some(event) => Input::Host(event),
                    None => break,
                }
            }
            timer_event = controller.next_timer_event() => Input::Timer(timer_event),
        };

        let snapshot = match input {
            Input::Host(TileEvent::StartListening) => {
                debug!("host started listening, re-pushing current snapshot");
                Some(controller.snapshot())
            }
            Input::Host(TileEvent::Click) => controller.on_user_activation(Instant::now()),
            Input::Host(TileEvent::ScreenOff) => controller.on_external_interrupt(),
            Input::Host(TileEvent::StopListening) | Input::Host(TileEvent::TileRemoved) => {
                controller.deactivate()
            }
            Input::Timer(event) => controller.on_timer_event(event),
        };

        if let Some(snapshot) = snapshot {
            if snapshots.send(snapshot).is_err() {
                warn!("no snapshot subscribers left");
            }
        }
    }

    // Queue closed: the host side is gone. Release everything.
    controller.deactivate();
    info!("tile service task stopped");
}
