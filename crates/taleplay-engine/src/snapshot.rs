//! Pollable render state.

use serde::Serialize;
use taleplay_core::{ModuleHint, Unit};

use crate::navigation::Direction;
use crate::playback::PlaybackState;

/// Everything the render layer needs to draw one frame.
///
/// Serializes with camelCase keys for UI bridges; a missing current unit is
/// `null`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSnapshot {
    pub current_paragraph_index: usize,
    pub paragraph_count: usize,
    pub units: Vec<Unit>,
    /// Unit the narrator is on; `None` whenever idle.
    pub current_unit_index: Option<usize>,
    /// Unit to draw highlighted under the session's highlight policy.
    pub highlighted_unit_index: Option<usize>,
    pub state: PlaybackState,
    pub direction: Direction,
    pub hints: Vec<ModuleHint>,
    pub suggested_lines: Option<String>,
    pub char_progress: usize,
    /// Fraction of the paragraph narrated (0.0–1.0).
    pub progress: f32,
    pub is_first: bool,
    pub is_last: bool,
}

impl SessionSnapshot {
    /// The highlighted unit itself, if any.
    pub fn highlighted_unit(&self) -> Option<&Unit> {
        self.highlighted_unit_index.and_then(|i| self.units.get(i))
    }

    /// One-based position label, e.g. `"3 / 12"`.
    pub fn position_label(&self) -> String {
        format!("{} / {}", self.current_paragraph_index + 1, self.paragraph_count)
    }
}
