//! Cancellable one-second countdown for the tile service loop

use std::time::Duration;

use futures::future;
use tokio::time::{interval_at, Instant, Interval};
use tracing::debug;

use crate::state::durations::DurationPreset;

/// Event produced by an armed countdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerEvent {
    /// One second elapsed; `remaining` counts down to 0.
    Tick { remaining: u64 },
    /// The countdown reached zero. Emitted exactly once, after `Tick { 0 }`.
    Finished,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Idle,
    /// Running with no scheduled ticks and no finish.
    Infinite,
    Counting { remaining_secs: u64 },
    /// `Tick { 0 }` has been delivered; the next poll yields `Finished`.
    Finishing,
}

/// Countdown owned by the controller and polled from the tile service loop.
///
/// Events are pulled through [`CountdownTimer::tick`] rather than pushed
/// from a separate task, so after `cancel()` returns no tick or finish can
/// be observed - there is nothing in flight to filter.
#[derive(Debug)]
pub struct CountdownTimer {
    phase: Phase,
    interval: Option<Interval>,
}

impl CountdownTimer {
    pub fn new() -> Self {
        Self {
            phase: Phase::Idle,
            interval: None,
        }
    }

    /// Arm the countdown for the given preset, implicitly cancelling any
    /// countdown already running.
    ///
    /// An infinite preset marks the timer running without scheduling ticks;
    /// it costs nothing and produces no events.
    pub fn start(&mut self, preset: DurationPreset) {
        self.cancel();
        match preset {
            DurationPreset::Infinite => {
                debug!("countdown armed with no timeout");
                self.phase = Phase::Infinite;
            }
            DurationPreset::Finite(secs) => {
                debug!("countdown armed for {}s", secs);
                self.phase = Phase::Counting {
                    remaining_secs: secs,
                };
                // First fire one full second after start.
                let period = Duration::from_secs(1);
                self.interval = Some(interval_at(Instant::now() + period, period));
            }
        }
    }

    /// Stop the countdown. Idempotent; final as soon as it returns.
    pub fn cancel(&mut self) {
        self.phase = Phase::Idle;
        self.interval = None;
    }

    pub fn is_running(&self) -> bool {
        self.phase != Phase::Idle
    }

    /// Remaining time for label rendering.
    pub fn remaining(&self) -> DurationPreset {
        match self.phase {
            Phase::Infinite => DurationPreset::Infinite,
            Phase::Counting { remaining_secs } => DurationPreset::Finite(remaining_secs),
            Phase::Finishing | Phase::Idle => DurationPreset::Finite(0),
        }
    }

    /// Wait for the next event.
    ///
    /// Pends forever while idle or infinite, so this can sit in a `select!`
    /// arm unconditionally.
    pub async fn tick(&mut self) -> TimerEvent {
        if self.phase == Phase::Finishing {
            self.cancel();
            return TimerEvent::Finished;
        }

        let Phase::Counting { remaining_secs } = self.phase else {
            return future::pending().await;
        };
        let Some(interval) = self.interval.as_mut() else {
            return future::pending().await;
        };

        interval.tick().await;
        let remaining = remaining_secs.saturating_sub(1);
        self.phase = if remaining == 0 {
            Phase::Finishing
        } else {
            Phase::Counting {
                remaining_secs: remaining,
            }
        };
        TimerEvent::Tick { remaining }
    }
}

impl Default for CountdownTimer {
    fn default() -> Self {
        Self::new()
    }
}
