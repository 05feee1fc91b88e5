//! Caffeine Tile - a timed keep-awake toggle for Quick Settings hosts
//!
//! This library provides the caffeine tile core: a wake-lock owning
//! controller that cycles through duration presets on rapid clicks, counts
//! the session down once per second, and abandons it when the display is
//! turned off externally.

pub mod adapter;
pub mod api;
pub mod config;
pub mod platform;
pub mod state;
pub mod tasks;
pub mod utils;

// Re-export commonly used types
pub use adapter::{TileAdapter, TileEvent, TileHost, VirtualTile};
pub use api::create_router;
pub use config::Config;
pub use platform::{VirtualWakeLock, WakeLockHandle};
pub use state::{CaffeineController, DurationCycle, ServiceState, TileSnapshot};
pub use tasks::tile_service_task;
pub use utils::signals::shutdown_signal;
