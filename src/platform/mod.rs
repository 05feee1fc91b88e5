//! Platform boundary module
//!
//! This module contains the wake-lock capability the tile holds while
//! active, with a virtual backend and a systemd-inhibit backend.

pub mod inhibit;
pub mod wakelock;

// Re-export main types
pub use inhibit::{check_inhibit_available, InhibitWakeLock};
pub use wakelock::{VirtualWakeLock, WakeLock, WakeLockHandle};
