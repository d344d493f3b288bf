//! Paragraph navigation.
//!
//! The navigation controller owns the current paragraph position and the
//! unit cache derived from it. Every position change cancels playback first,
//! so no narration from the old paragraph can outlive the move.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use taleplay_core::{Paragraph, StoryCompletion, Unit, segment};

use crate::playback::PlaybackController;

/// Direction of the last move. Presentation only.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    #[default]
    Forward,
    Backward,
}

/// Result of [`NavigationController::next`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavOutcome {
    /// Moved to the following paragraph.
    Moved,
    /// Already at the last paragraph; the completion handler was invoked.
    Completed,
}

/// Owns the current paragraph index over a read-only paragraph list.
#[derive(Debug, Clone)]
pub struct NavigationController {
    paragraphs: Arc<[Paragraph]>,
    current: usize,
    units: Vec<Unit>,
    direction: Direction,
}

impl NavigationController {
    /// Start at the first paragraph. Returns `None` for an empty list.
    pub fn new(paragraphs: Arc<[Paragraph]>) -> Option<Self> {
        let units = segment(paragraphs.first()?.text());
        Some(Self {
            paragraphs,
            current: 0,
            units,
            direction: Direction::Forward,
        })
    }

    pub const fn current_index(&self) -> usize {
        self.current
    }

    pub fn len(&self) -> usize {
        self.paragraphs.len()
    }

    /// Always `false`; a controller is never built over an empty list.
    pub fn is_empty(&self) -> bool {
        self.paragraphs.is_empty()
    }

    pub const fn is_first(&self) -> bool {
        self.current == 0
    }

    pub fn is_last(&self) -> bool {
        self.current + 1 == self.paragraphs.len()
    }

    pub fn current_paragraph(&self) -> &Paragraph {
        &self.paragraphs[self.current]
    }

    /// Units of the current paragraph.
    pub fn units(&self) -> &[Unit] {
        &self.units
    }

    pub const fn direction(&self) -> Direction {
        self.direction
    }

    pub fn paragraphs(&self) -> &Arc<[Paragraph]> {
        &self.paragraphs
    }

    /// Move to `index`, cancelling playback first.
    ///
    /// Out-of-range indices are ignored and return `false`.
    pub fn go_to(&mut self, index: usize, playback: &mut PlaybackController) -> bool {
        if index >= self.paragraphs.len() {
            tracing::debug!(index, len = self.paragraphs.len(), "Ignoring out-of-range navigation");
            return false;
        }

        playback.cancel();

        if index > self.current {
            self.direction = Direction::Forward;
        } else if index < self.current {
            self.direction = Direction::Backward;
        }
        self.current = index;
        self.units = segment(self.paragraphs[index].text());

        tracing::debug!(index, direction = ?self.direction, "Paragraph selected");
        true
    }

    /// Advance one paragraph, or report completion from the last one.
    ///
    /// Every call at the last paragraph cancels playback and invokes
    /// `completion`; the position never moves past the end.
    pub fn next(
        &mut self,
        playback: &mut PlaybackController,
        completion: &mut dyn StoryCompletion,
    ) -> NavOutcome {
        if !self.is_last() {
            self.go_to(self.current + 1, playback);
            return NavOutcome::Moved;
        }

        playback.cancel();
        tracing::info!(paragraphs = self.paragraphs.len(), "Story complete");
        completion.on_complete();
        NavOutcome::Completed
    }

    /// Step back one paragraph. No-op at the first paragraph.
    pub fn previous(&mut self, playback: &mut PlaybackController) -> bool {
        match self.current.checked_sub(1) {
            Some(index) => self.go_to(index, playback),
            None => false,
        }
    }
}
