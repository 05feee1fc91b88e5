//! HTTP endpoint handlers
//!
//! These handlers play the out-of-process tile host: `/click` and
//! `/screen-off` stand in for the host callbacks a panel would deliver.

use std::{sync::Arc, time::Duration};

use axum::{extract::State, http::StatusCode, response::Json};
use tokio::time::timeout;
use tracing::{error, info};

use crate::state::ServiceState;

use super::responses::{ApiResponse, HealthResponse, StatusResponse};

/// How long a handler waits for the tile service to emit the
/// post-transition snapshot before answering with whatever is current.
const SNAPSHOT_WAIT: Duration = Duration::from_millis(250);

/// Handle POST /click - deliver a tile click
pub async fn click_handler(
    State(state): State<Arc<ServiceState>>,
) -> Result<Json<ApiResponse>, StatusCode> {
    state.record_action("click");

    let mut snapshots = state.subscribe();
    snapshots.borrow_and_update();

    if let Err(e) = state.adapter.on_click().await {
        error!("failed to deliver click: {}", e);
        return Err(StatusCode::INTERNAL_SERVER_ERROR);
    }

    // A click always changes the rendered state; wait for it so the
    // response carries the post-transition snapshot.
    let _ = timeout(SNAPSHOT_WAIT, snapshots.changed()).await;
    let tile = snapshots.borrow().clone();
    info!(
        "click delivered, tile is now {}",
        if tile.active { "active" } else { "inactive" }
    );
    Ok(Json(ApiResponse::new("Click delivered".to_string(), tile)))
}

/// Handle POST /screen-off - deliver an external display-off notification
pub async fn screen_off_handler(
    State(state): State<Arc<ServiceState>>,
) -> Result<Json<ApiResponse>, StatusCode> {
    state.record_action("screen-off");

    let mut snapshots = state.subscribe();
    let was_active = snapshots.borrow_and_update().active;

    if let Err(e) = state.adapter.on_screen_off().await {
        error!("failed to deliver screen-off: {}", e);
        return Err(StatusCode::INTERNAL_SERVER_ERROR);
    }

    // Screen-off while inactive is a no-op and emits no snapshot; only
    // wait for a change when there was a session to abandon.
    if was_active {
        let _ = timeout(SNAPSHOT_WAIT, snapshots.changed()).await;
    }
    let tile = snapshots.borrow().clone();
    Ok(Json(ApiResponse::new(
        if was_active {
            "Keep-awake session abandoned".to_string()
        } else {
            "Screen-off ignored, tile inactive".to_string()
        },
        tile,
    )))
}

/// Handle GET /status - current tile state and server metadata
pub async fn status_handler(
    State(state): State<Arc<ServiceState>>,
) -> Result<Json<StatusResponse>, StatusCode> {
    let (last_action, last_action_time) = state.last_action();

    Ok(Json(StatusResponse {
        tile: state.snapshot(),
        uptime: state.uptime(),
        port: state.port,
        host: state.host.clone(),
        last_action,
        last_action_time,
    }))
}

/// Handle GET /health - health check endpoint
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}
