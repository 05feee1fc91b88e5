//! Caffeine Tile - a timed keep-awake toggle for Quick Settings hosts
//!
//! This is the main entry point for the caffeine-tile daemon. It wires the
//! tile core to a development host: callbacks arrive over HTTP and renders
//! go to a virtual tile plus the log.

use std::{sync::Arc, time::Duration};

use tokio::net::TcpListener;
use tokio::sync::{mpsc, watch};
use tracing::info;

use caffeine_tile::{
    adapter::{render_task, TileAdapter, VirtualTile},
    api::create_router,
    config::Config,
    platform::{
        check_inhibit_available, InhibitWakeLock, VirtualWakeLock, WakeLock, WakeLockHandle,
    },
    state::{CaffeineController, ServiceState, TileSnapshot},
    tasks::tile_service_task,
    utils::shutdown_signal,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Initialize tracing with appropriate log level
    tracing_subscriber::fmt()
        .with_env_filter(format!(
            "caffeine_tile={},tower_http=info",
            config.log_level()
        ))
        .init();

    info!("Starting caffeine-tile v1.1.0");
    info!(
        "Configuration: host={}, port={}, durations={:?}s, double-click window={}s",
        config.host, config.port, config.durations, config.double_click_window
    );

    let cycle = match config.duration_cycle() {
        Ok(cycle) => cycle,
        Err(e) => {
            tracing::error!("invalid duration presets: {}", e);
            std::process::exit(1);
        }
    };

    // Pick the wake-lock backend; the inhibitor one requires systemd.
    let lock: Box<dyn WakeLock> = if config.system_inhibit {
        if let Err(e) = check_inhibit_available().await {
            tracing::error!("{}", e);
            std::process::exit(1);
        }
        Box::new(InhibitWakeLock::new())
    } else {
        Box::new(VirtualWakeLock)
    };

    let controller = CaffeineController::new(
        WakeLockHandle::new(lock),
        cycle,
        Duration::from_secs(config.double_click_window),
    );

    // One serialized queue for clicks, lifecycle and screen-off events.
    let (event_tx, event_rx) = mpsc::channel(32);
    let (snapshot_tx, snapshot_rx) = watch::channel(TileSnapshot::inactive());
    tokio::spawn(tile_service_task(controller, event_rx, snapshot_tx));

    // Render snapshots into the virtual tile.
    let (tile, _rendered) = VirtualTile::new();
    tokio::spawn(render_task(tile, snapshot_rx.clone()));

    let adapter = TileAdapter::new(event_tx);
    if let Err(e) = adapter.on_start_listening().await {
        anyhow::bail!("tile service failed to start: {}", e);
    }

    let state = Arc::new(ServiceState::new(
        adapter.clone(),
        snapshot_rx.clone(),
        config.host.clone(),
        config.port,
    ));

    // Create HTTP router with all endpoints
    let app = create_router(state);

    // Bind to the specified address
    let addr = config.address();
    let listener = TcpListener::bind(&addr).await?;

    info!("Host surface running on http://{}", addr);
    info!("Endpoints:");
    info!("  POST /click      - Deliver a tile click");
    info!("  POST /screen-off - Deliver an external display-off event");
    info!("  GET  /status     - Current tile state and uptime");
    info!("  GET  /health     - Health check");

    // Setup graceful shutdown
    let server = axum::serve(listener, app);

    tokio::select! {
        result = server => {
            if let Err(e) = result {
                tracing::error!("Server error: {}", e);
            }
        }
        _ = shutdown_signal() => {
            info!("Shutdown signal received");
        }
    }

    // Stop listening so the controller releases the wake lock, and wait
    // for the inactive snapshot before exiting.
    if adapter.on_stop_listening().await.is_ok() {
        let mut snapshots = snapshot_rx;
        let released = tokio::time::timeout(Duration::from_secs(2), async {
            while snapshots.borrow_and_update().active {
                if snapshots.changed().await.is_err() {
                    break;
                }
            }
        })
        .await;
        if released.is_err() {
            tracing::warn!("timed out waiting for the wake lock to be released");
        }
    }

    info!("Shutdown complete");
    Ok(())
}
