//! Display wake-lock capability and its exclusive-ownership handle

use tracing::{debug, info};

/// Raw keep-display-awake capability provided by the platform boundary.
///
/// Acquisition is infallible by contract; a backend that can fail must be
/// rejected before it is wired in (see `check_inhibit_available`).
pub trait WakeLock: Send {
    fn acquire(&mut self);
    fn release(&mut self);
}

/// Exclusive owner of a single wake lock.
///
/// Tracks `held` so that `acquire` and `release` are idempotent; the
/// underlying capability only ever sees balanced transitions. Dropping the
/// handle releases the lock.
pub struct WakeLockHandle {
    inner: Box<dyn WakeLock>,
    held: bool,
}

impl WakeLockHandle {
    pub fn new(inner: Box<dyn WakeLock>) -> Self {
        Self { inner, held: false }
    }

    /// Prevent the display from sleeping. No-op if already held.
    pub fn acquire(&mut self) {
        if self.held {
            debug!("wake lock already held, acquire ignored");
            return;
        }
        self.inner.acquire();
        self.held = true;
    }

    /// Allow the display to sleep again. No-op if already released.
    pub fn release(&mut self) {
        if !self.held {
            return;
        }
        self.inner.release();
        self.held = false;
    }

    pub fn is_held(&self) -> bool {
        self.held
    }
}

impl Drop for WakeLockHandle {
    fn drop(&mut self) {
        self.release();
    }
}

impl std::fmt::Debug for WakeLockHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WakeLockHandle")
            .field("held", &self.held)
            .finish()
    }
}

/// Logging-only wake lock for development hosts and tests.
#[derive(Debug, Default)]
pub struct VirtualWakeLock;

impl WakeLock for VirtualWakeLock {
    fn acquire(&mut self) {
        info!("display wake lock acquired (virtual)");
    }

    fn release(&mut self) {
        info!("display wake lock released (virtual)");
    }
}
