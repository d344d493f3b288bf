//! Highlight eligibility, a presentation policy over the engine state.

use taleplay_core::{HighlightPolicy, Unit};

/// The unit the render layer should draw highlighted.
///
/// Under [`HighlightPolicy::ContentOnly`] a current punctuation unit is not
/// highlighted. The engine's own current unit index is never filtered.
pub fn highlighted_unit(
    policy: HighlightPolicy,
    units: &[Unit],
    current: Option<usize>,
) -> Option<usize> {
    let index = current?;
    let unit = units.get(index)?;
    match policy {
        HighlightPolicy::AllUnits => Some(index),
        HighlightPolicy::ContentOnly => (!unit.is_punctuation()).then_some(index),
    }
}
