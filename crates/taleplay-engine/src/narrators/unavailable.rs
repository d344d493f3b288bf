//! Narrator for hosts without speech support.

use taleplay_core::{NarrationRequest, Narrator, NarratorError};

/// A narrator that reports itself unavailable.
///
/// The playback controller never asks it to speak, so play requests become
/// no-ops and the engine stays idle.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnavailableNarrator;

impl Narrator for UnavailableNarrator {
    fn is_available(&self) -> bool {
        false
    }

    fn speak(&mut self, _request: NarrationRequest) -> Result<(), NarratorError> {
        Err(NarratorError::Unavailable)
    }

    fn stop(&mut self) {}
}
