//! State management module
//!
//! This module contains the duration policy, the render snapshot, the
//! caffeine controller state machine and the shared HTTP-facing state.

pub mod controller;
pub mod durations;
pub mod service_state;
pub mod snapshot;

// Re-export main types
pub use controller::CaffeineController;
pub use durations::{CycleExhausted, DurationCycle, DurationPreset};
pub use service_state::ServiceState;
pub use snapshot::{IconVariant, TileSnapshot};
