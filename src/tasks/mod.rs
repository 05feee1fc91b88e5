//! Background tasks module
//!
//! This module contains the countdown machinery and the tile service loop
//! that runs alongside the HTTP host surface.

pub mod countdown;
pub mod tile_service;

// Re-export main types
pub use countdown::{CountdownTimer, TimerEvent};
pub use tile_service::tile_service_task;
