//! Duration presets and the cycling policy

use std::fmt;

/// One selectable keep-awake duration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DurationPreset {
    /// Finite duration in seconds.
    Finite(u64),
    /// No timeout; the session runs until explicitly stopped.
    Infinite,
}

impl fmt::Display for DurationPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DurationPreset::Finite(secs) => write!(f, "{}s", secs),
            DurationPreset::Infinite => write!(f, "infinite"),
        }
    }
}

/// Marker returned by [`DurationCycle::advance`] when the last preset has
/// already been handed out. The caller must deactivate, not wrap around.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CycleExhausted;

/// Ordered list of selectable durations, shortest to longest, with the
/// infinite preset always last.
#[derive(Debug, Clone)]
pub struct DurationCycle {
    presets: Vec<DurationPreset>,
    index: usize,
}

impl DurationCycle {
    /// Build a cycle from finite durations in seconds.
    ///
    /// Values are sorted ascending and deduplicated; the infinite preset is
    /// appended as the final position.
    pub fn from_secs(secs: &[u64]) -> Result<Self, String> {
        if secs.is_empty() {
            return Err("at least one duration preset is required".to_string());
        }
        if secs.contains(&0) {
            return Err("duration presets must be non-zero".to_string());
        }

        let mut sorted: Vec<u64> = secs.to_vec();
        sorted.sort_unstable();
        sorted.dedup();

        let mut presets: Vec<DurationPreset> =
            sorted.into_iter().map(DurationPreset::Finite).collect();
        presets.push(DurationPreset::Infinite);

        Ok(Self { presets, index: 0 })
    }

    /// The preset at the current cycle position.
    pub fn current(&self) -> DurationPreset {
        self.presets[self.index]
    }

    /// Move to the next preset in sequence order.
    ///
    /// Past the final preset this returns [`CycleExhausted`] instead of
    /// wrapping; the position is left on the last preset.
    pub fn advance(&mut self) -> Result<DurationPreset, CycleExhausted> {
        if self.index + 1 < self.presets.len() {
            self.index += 1;
            Ok(self.current())
        } else {
            Err(CycleExhausted)
        }
    }

    /// Return to the first (shortest) preset.
    pub fn reset(&mut self) {
        self.index = 0;
    }

    pub fn presets(&self) -> &[DurationPreset] {
        &self.presets
    }
}

impl Default for DurationCycle {
    /// 5 min, 10 min, 30 min, then infinite.
    fn default() -> Self {
        Self::from_secs(&[5 * 60, 10 * 60, 30 * 60]).expect("default presets are valid")
    }
}
