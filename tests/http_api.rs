//! End-to-end tests for the HTTP host surface

use std::{sync::Arc, time::Duration};

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use serde_json::Value;
use tokio::sync::{mpsc, watch};
use tower::ServiceExt;

use caffeine_tile::{
    adapter::TileAdapter,
    api::create_router,
    platform::{VirtualWakeLock, WakeLockHandle},
    state::{CaffeineController, DurationCycle, ServiceState, TileSnapshot},
    tasks::tile_service_task,
};

fn test_router(presets: &[u64]) -> Router {
    let controller = CaffeineController::new(
        WakeLockHandle::new(Box::new(VirtualWakeLock)),
        DurationCycle::from_secs(presets).unwrap(),
        Duration::from_secs(5),
    );
    let (event_tx, event_rx) = mpsc::channel(32);
    let (snapshot_tx, snapshot_rx) = watch::channel(TileSnapshot::inactive());
    tokio::spawn(tile_service_task(controller, event_rx, snapshot_tx));

    let state = Arc::new(ServiceState::new(
        TileAdapter::new(event_tx),
        snapshot_rx,
        "127.0.0.1".to_string(),
        0,
    ));
    create_router(state)
}

async fn request(app: &Router, method: &str, uri: &str) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method(method)
                .uri(uri)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = serde_json::from_slice(&bytes).unwrap();
    (status, json)
}

#[tokio::test]
async fn health_reports_ok() {
    let app = test_router(&[300]);
    let (status, body) = request(&app, "GET", "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn status_starts_inactive_with_the_idle_label() {
    let app = test_router(&[300]);
    let (status, body) = request(&app, "GET", "/status").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["tile"]["active"], false);
    assert_eq!(body["tile"]["label"], "Caffeine");
    assert_eq!(body["tile"]["icon"], "off");
}

#[tokio::test]
async fn click_activates_and_rapid_click_cycles() {
    let app = test_router(&[300, 600]);

    let (status, body) = request(&app, "POST", "/click").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "active");
    assert_eq!(body["tile"]["label"], "05:00");
    assert_eq!(body["tile"]["icon"], "on");

    // Second click inside the window cycles to the next preset.
    let (_, body) = request(&app, "POST", "/click").await;
    assert_eq!(body["tile"]["label"], "10:00");
}

#[tokio::test]
async fn screen_off_abandons_an_active_session() {
    let app = test_router(&[300]);

    let (_, body) = request(&app, "POST", "/click").await;
    assert_eq!(body["status"], "active");

    let (status, body) = request(&app, "POST", "/screen-off").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "inactive");
    assert_eq!(body["tile"]["label"], "Caffeine");

    let (_, body) = request(&app, "GET", "/status").await;
    assert_eq!(body["tile"]["active"], false);
    assert_eq!(body["last_action"], "screen-off");
}

#[tokio::test]
async fn screen_off_while_inactive_is_reported_as_a_noop() {
    let app = test_router(&[300]);
    let (status, body) = request(&app, "POST", "/screen-off").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "inactive");
    assert_eq!(body["message"], "Screen-off ignored, tile inactive");
}
