//! API response structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::state::TileSnapshot;

/// Response for endpoints that deliver a host event to the tile.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse {
    pub status: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub tile: TileSnapshot,
}

impl ApiResponse {
    pub fn new(message: String, tile: TileSnapshot) -> Self {
        let status = if tile.active { "active" } else { "inactive" };
        Self {
            status: status.to_string(),
            message,
            timestamp: Utc::now(),
            tile,
        }
    }
}

/// Status response with uptime and last-action bookkeeping
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    pub tile: TileSnapshot,
    pub uptime: String,
    pub port: u16,
    pub host: String,
    pub last_action: Option<String>,
    pub last_action_time: Option<DateTime<Utc>>,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub version: String,
}

impl HealthResponse {
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
            timestamp: Utc::now(),
            version: "1.1.0".to_string(),
        }
    }
}
