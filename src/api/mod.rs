//! HTTP API module
//!
//! The development host surface: host callbacks come in over HTTP and the
//! rendered tile state is readable back out.

pub mod handlers;
pub mod responses;

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::state::ServiceState;
use handlers::*;

/// Create the HTTP router with all endpoints
pub fn create_router(state: Arc<ServiceState>) -> Router {
    Router::new()
        .route("/click", post(click_handler))
        .route("/screen-off", post(screen_off_handler))
        .route("/status", get(status_handler))
        .route("/health", get(health_handler))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}
