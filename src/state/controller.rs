//! Caffeine controller state machine
//!
//! Owns the wake lock, the duration cycle and the countdown, and turns
//! inbound events into state transitions plus render snapshots. All
//! operations run on the tile service loop; the controller is not meant to
//! be shared across threads.

use std::time::Duration;

use tokio::time::Instant;
use tracing::{debug, info};

use crate::platform::WakeLockHandle;
use crate::tasks::countdown::{CountdownTimer, TimerEvent};

use super::durations::DurationCycle;
use super::snapshot::TileSnapshot;

/// State machine behind the caffeine tile.
///
/// The held wake lock is the active bit: the tile is active exactly while
/// the lock is held. Every mutating operation returns the snapshot to
/// render, or `None` when the call was a no-op and nothing must be emitted.
#[derive(Debug)]
pub struct CaffeineController {
    lock: WakeLockHandle,
    cycle: DurationCycle,
    countdown: CountdownTimer,
    /// Activations spaced closer than this cycle through durations
    /// instead of toggling off.
    double_click_window: Duration,
    last_activation: Option<Instant>,
}

impl CaffeineController {
    pub fn new(lock: WakeLockHandle, cycle: DurationCycle, double_click_window: Duration) -> Self {
        Self {
            lock,
            cycle,
            countdown: CountdownTimer::new(),
            double_click_window,
            last_activation: None,
        }
    }

    pub fn is_active(&self) -> bool {
        self.lock.is_held()
    }

    /// Current render state; derived, never stored.
    pub fn snapshot(&self) -> TileSnapshot {
        if self.lock.is_held() {
            TileSnapshot::active(self.countdown.remaining())
        } else {
            TileSnapshot::inactive()
        }
    }

    /// Handle a user click on the tile.
    ///
    /// A click within the double-activation window of the previous one
    /// cycles to the next duration preset; past the window it toggles.
    /// Cycling past the last preset turns the tile off.
    pub fn on_user_activation(&mut self, now: Instant) -> Option<TileSnapshot> {
        let within_window = self
            .last_activation
            .map(|last| now.duration_since(last) < self.double_click_window)
            .unwrap_or(false);

        let snap = if self.lock.is_held() && within_window {
            match self.cycle.advance() {
                Ok(preset) => {
                    info!("cycling keep-awake duration to {}", preset);
                    self.countdown.start(preset);
                    Some(self.snapshot())
                }
                Err(_) => {
                    info!("duration cycle exhausted, turning off");
                    self.deactivate_inner()
                }
            }
        } else if self.lock.is_held() {
            info!("tile toggled off");
            self.deactivate_inner()
        } else {
            self.cycle.reset();
            let preset = self.cycle.current();
            info!("tile activated, keeping display awake for {}", preset);
            self.lock.acquire();
            self.countdown.start(preset);
            Some(self.snapshot())
        };

        self.last_activation = Some(now);
        snap
    }

    /// Stop the session and release every resource. Idempotent; returns
    /// `None` when already inactive.
    pub fn deactivate(&mut self) -> Option<TileSnapshot> {
        if !self.lock.is_held() {
            return None;
        }
        info!("tile deactivated");
        self.deactivate_inner()
    }

    /// The display was turned off externally (power button, lid, ...).
    ///
    /// An in-progress session is abandoned regardless of remaining time;
    /// while inactive this is a no-op, not an error.
    pub fn on_external_interrupt(&mut self) -> Option<TileSnapshot> {
        if !self.lock.is_held() {
            debug!("screen-off received while inactive, ignoring");
            return None;
        }
        info!("screen turned off externally, abandoning keep-awake session");
        self.deactivate_inner()
    }

    /// Wait for the next countdown event. Pends while no countdown runs.
    pub async fn next_timer_event(&mut self) -> TimerEvent {
        self.countdown.tick().await
    }

    /// Apply a countdown event produced by [`Self::next_timer_event`].
    pub fn on_timer_event(&mut self, event: TimerEvent) -> Option<TileSnapshot> {
        match event {
            TimerEvent::Tick { remaining } => {
                debug!("countdown tick, {}s remaining", remaining);
                Some(self.snapshot())
            }
            TimerEvent::Finished => {
                info!("countdown finished, releasing wake lock");
                self.lock.release();
                Some(self.snapshot())
            }
        }
    }

    fn deactivate_inner(&mut self) -> Option<TileSnapshot> {
        self.countdown.cancel();
        self.lock.release();
        Some(self.snapshot())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::{VirtualWakeLock, WakeLockHandle};
    use tokio::time::advance;

    const WINDOW: Duration = Duration::from_secs(5);

    fn controller(presets: &[u64]) -> CaffeineController {
        CaffeineController::new(
            WakeLockHandle::new(Box::new(VirtualWakeLock)),
            DurationCycle::from_secs(presets).unwrap(),
            WINDOW,
        )
    }

    #[tokio::test(start_paused = true)]
    async fn activate_then_deactivate_releases_for_every_preset() {
        // Four cycle positions: 300s, 600s, 1800s, infinite.
        for clicks in 1..=4 {
            let mut ctrl = controller(&[300, 600, 1800]);
            for _ in 0..clicks {
                let snap = ctrl.on_user_activation(Instant::now()).unwrap();
                assert!(snap.active);
            }

            let snap = ctrl.deactivate().unwrap();
            assert!(!snap.active);
            assert!(!ctrl.is_active());
        }
    }

    #[tokio::test(start_paused = true)]
    async fn deactivate_is_idempotent_and_silent_the_second_time() {
        let mut ctrl = controller(&[60]);
        ctrl.on_user_activation(Instant::now());

        assert!(ctrl.deactivate().is_some());
        assert_eq!(ctrl.deactivate(), None);
        assert!(!ctrl.is_active());
    }

    #[tokio::test(start_paused = true)]
    async fn rapid_activations_cycle_presets_in_order() {
        let mut ctrl = controller(&[60, 120]);

        let snap = ctrl.on_user_activation(Instant::now()).unwrap();
        assert_eq!(snap.label, "01:00");

        let snap = ctrl.on_user_activation(Instant::now()).unwrap();
        assert_eq!(snap.label, "02:00");

        let snap = ctrl.on_user_activation(Instant::now()).unwrap();
        assert_eq!(snap.label, "\u{221E}");

        // Cycle exhausted: the fourth rapid activation turns the tile off.
        let snap = ctrl.on_user_activation(Instant::now()).unwrap();
        assert!(!snap.active);
        assert!(!ctrl.is_active());
    }

    #[tokio::test(start_paused = true)]
    async fn activation_past_the_window_toggles_off() {
        let mut ctrl = controller(&[60, 120]);
        ctrl.on_user_activation(Instant::now());

        advance(WINDOW + Duration::from_secs(1)).await;
        let snap = ctrl.on_user_activation(Instant::now()).unwrap();
        assert!(!snap.active);
        assert!(!ctrl.is_active());
    }

    #[tokio::test(start_paused = true)]
    async fn reactivation_after_toggle_off_starts_at_first_preset() {
        let mut ctrl = controller(&[60, 120]);
        ctrl.on_user_activation(Instant::now());
        ctrl.on_user_activation(Instant::now()); // cycle to 120s

        advance(WINDOW * 2).await;
        ctrl.on_user_activation(Instant::now()); // toggle off

        advance(WINDOW * 2).await;
        let snap = ctrl.on_user_activation(Instant::now()).unwrap();
        assert_eq!(snap.label, "01:00");
    }

    #[tokio::test(start_paused = true)]
    async fn external_interrupt_wins_regardless_of_remaining_time() {
        let mut ctrl = controller(&[300]);
        ctrl.on_user_activation(Instant::now());

        // Burn 50 seconds of the countdown, then hit the power button.
        for _ in 0..50 {
            advance(Duration::from_secs(1)).await;
            let ev = ctrl.next_timer_event().await;
            ctrl.on_timer_event(ev);
        }
        let snap = ctrl.on_external_interrupt().unwrap();
        assert!(!snap.active);
        assert!(!ctrl.is_active());
    }

    #[tokio::test(start_paused = true)]
    async fn external_interrupt_while_inactive_is_a_silent_noop() {
        let mut ctrl = controller(&[60]);
        assert_eq!(ctrl.on_external_interrupt(), None);
    }

    #[tokio::test(start_paused = true)]
    async fn ticks_update_the_label_and_finish_releases_the_lock() {
        let mut ctrl = controller(&[3]);
        let snap = ctrl.on_user_activation(Instant::now()).unwrap();
        assert_eq!(snap.label, "00:03");

        advance(Duration::from_secs(1)).await;
        let ev = ctrl.next_timer_event().await;
        assert_eq!(ev, TimerEvent::Tick { remaining: 2 });
        assert_eq!(ctrl.on_timer_event(ev).unwrap().label, "00:02");

        advance(Duration::from_secs(1)).await;
        let ev = ctrl.next_timer_event().await;
        assert_eq!(ctrl.on_timer_event(ev).unwrap().label, "00:01");

        advance(Duration::from_secs(1)).await;
        let ev = ctrl.next_timer_event().await;
        assert_eq!(ev, TimerEvent::Tick { remaining: 0 });
        ctrl.on_timer_event(ev);

        let ev = ctrl.next_timer_event().await;
        assert_eq!(ev, TimerEvent::Finished);
        let snap = ctrl.on_timer_event(ev).unwrap();
        assert!(!snap.active);
        assert!(!ctrl.is_active());
    }

    #[tokio::test(start_paused = true)]
    async fn infinite_session_only_ends_on_explicit_deactivation() {
        let mut ctrl = controller(&[60]);
        ctrl.on_user_activation(Instant::now());
        let snap = ctrl.on_user_activation(Instant::now()).unwrap(); // cycle to infinite
        assert_eq!(snap.label, "\u{221E}");

        advance(Duration::from_secs(7200)).await;
        let timed_out =
            tokio::time::timeout(Duration::from_millis(10), ctrl.next_timer_event()).await;
        assert!(timed_out.is_err());
        assert!(ctrl.is_active());

        let snap = ctrl.deactivate().unwrap();
        assert!(!snap.active);
    }

    #[tokio::test(start_paused = true)]
    async fn cycling_keeps_the_lock_held() {
        let mut ctrl = controller(&[60, 120]);
        ctrl.on_user_activation(Instant::now());
        ctrl.on_user_activation(Instant::now());
        assert!(ctrl.is_active());
    }
}
