//! Render snapshot pushed to tile hosts

use serde::{Deserialize, Serialize};

use super::durations::DurationPreset;

/// Label shown while the tile is inactive.
const IDLE_LABEL: &str = "Caffeine";

/// Icon selection for the host tile.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IconVariant {
    On,
    #[default]
    Off,
}

/// Deterministic projection of the controller state for rendering.
///
/// Recomputed on every state change; it has no identity of its own.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileSnapshot {
    pub active: bool,
    pub label: String,
    pub icon: IconVariant,
}

impl TileSnapshot {
    /// Snapshot for an inactive tile.
    pub fn inactive() -> Self {
        Self {
            active: false,
            label: IDLE_LABEL.to_string(),
            icon: IconVariant::Off,
        }
    }

    /// Snapshot for an active tile with the given remaining time.
    pub fn active(remaining: DurationPreset) -> Self {
        Self {
            active: true,
            label: format_remaining(remaining),
            icon: IconVariant::On,
        }
    }
}

impl Default for TileSnapshot {
    fn default() -> Self {
        Self::inactive()
    }
}

/// "mm:ss" for finite remaining time, the infinity sign otherwise.
fn format_remaining(remaining: DurationPreset) -> String {
    match remaining {
        DurationPreset::Finite(secs) => format!("{:02}:{:02}", secs / 60 % 60, secs % 60),
        DurationPreset::Infinite => "\u{221E}".to_string(),
    }
}
