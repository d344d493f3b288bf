//! Playback session for one mounted narration view.
//!
//! Wires a [`NavigationController`], a [`PlaybackController`] and a
//! [`HintProjector`] over one paragraph list, and owns the receiving end of
//! the narrator event channel. All state changes happen on the caller's
//! task: user operations are `&mut self` calls, and narrator events are only
//! applied when the session drains the channel.
//!
//! # Example
//!
//! ```ignore
//! let (tx, rx) = narrator_channel();
//! let narrator = PacedNarrator::new(tx, DEFAULT_PER_CHAR);
//! let mut session = PlaybackSession::new(
//!     story.paragraphs,
//!     Box::new(narrator),
//!     rx,
//!     Box::new(NoopCompletion),
//!     PlaybackSettings::default(),
//! )?;
//!
//! session.play();
//! while session.wait_event().await.is_some() {
//!     render(&session.snapshot());
//! }
//! ```

use std::sync::Arc;

use taleplay_core::{
    ModuleHint, Narrator, NarratorEvent, NarratorEventReceiver, Paragraph, PlaybackSettings,
    SettingsError, SettingsUpdate, StoryCompletion,
};
use thiserror::Error;

use crate::highlight::highlighted_unit;
use crate::hints::HintProjector;
use crate::navigation::{NavOutcome, NavigationController};
use crate::playback::{EventOutcome, PlayOutcome, PlaybackController, PlaybackState};
use crate::snapshot::SessionSnapshot;

/// Errors raised while creating or reconfiguring a session.
#[derive(Debug, Error)]
pub enum SessionError {
    /// A session needs at least one paragraph.
    #[error("Cannot start a playback session without paragraphs")]
    NoParagraphs,

    /// Settings failed validation.
    #[error("Invalid playback settings: {0}")]
    Settings(#[from] SettingsError),
}

/// Narration state for one paragraph list.
pub struct PlaybackSession {
    navigation: NavigationController,
    playback: PlaybackController,
    hints: HintProjector,
    events: NarratorEventReceiver,
    completion: Box<dyn StoryCompletion>,
    settings: PlaybackSettings,
}

impl PlaybackSession {
    /// Create a session positioned on the first paragraph, idle.
    pub fn new(
        paragraphs: impl Into<Arc<[Paragraph]>>,
        narrator: Box<dyn Narrator>,
        events: NarratorEventReceiver,
        completion: Box<dyn StoryCompletion>,
        settings: PlaybackSettings,
    ) -> Result<Self, SessionError> {
        settings.validate()?;

        let paragraphs = paragraphs.into();
        let navigation =
            NavigationController::new(Arc::clone(&paragraphs)).ok_or(SessionError::NoParagraphs)?;
        let hints = HintProjector::new(paragraphs);

        let mut playback = PlaybackController::new(narrator);
        playback.set_rate(settings.rate);
        playback.set_voice(settings.voice.clone());

        tracing::info!(
            paragraphs = navigation.len(),
            narration_available = playback.is_available(),
            "Playback session created"
        );

        Ok(Self {
            navigation,
            playback,
            hints,
            events,
            completion,
            settings,
        })
    }

    // ── Accessors ──────────────────────────────────────────────────

    pub const fn state(&self) -> PlaybackState {
        self.playback.state()
    }

    pub const fn current_paragraph_index(&self) -> usize {
        self.navigation.current_index()
    }

    pub const fn current_unit_index(&self) -> Option<usize> {
        self.playback.current_unit_index()
    }

    pub fn paragraph_count(&self) -> usize {
        self.navigation.len()
    }

    pub const fn settings(&self) -> &PlaybackSettings {
        &self.settings
    }

    pub const fn navigation(&self) -> &NavigationController {
        &self.navigation
    }

    pub const fn playback(&self) -> &PlaybackController {
        &self.playback
    }

    /// Module hints of paragraph `index`; empty when none.
    pub fn hints(&self, index: usize) -> &[ModuleHint] {
        self.hints.hints(index)
    }

    // ── User operations ────────────────────────────────────────────

    /// Narrate the current paragraph from the start.
    pub fn play(&mut self) -> PlayOutcome {
        let text = self.navigation.current_paragraph().text();
        self.playback.play(text)
    }

    /// Play/pause button: stop when speaking, otherwise play.
    pub fn toggle(&mut self) -> PlaybackState {
        let text = self.navigation.current_paragraph().text();
        self.playback.toggle(text)
    }

    /// Stop narration, keeping the current paragraph.
    pub fn stop(&mut self) {
        self.playback.cancel();
    }

    /// Move to paragraph `index`; out-of-range indices are ignored.
    pub fn go_to(&mut self, index: usize) -> bool {
        self.navigation.go_to(index, &mut self.playback)
    }

    /// Next paragraph, or report completion from the last one.
    pub fn next(&mut self) -> NavOutcome {
        self.navigation
            .next(&mut self.playback, self.completion.as_mut())
    }

    /// Previous paragraph; no-op at the first one.
    pub fn previous(&mut self) -> bool {
        self.navigation.previous(&mut self.playback)
    }

    /// Apply a partial settings update.
    ///
    /// Rate and voice take effect from the next narration request.
    pub fn update_settings(&mut self, update: &SettingsUpdate) -> Result<(), SessionError> {
        let mut settings = self.settings.clone();
        settings.merge(update);
        settings.validate()?;

        self.playback.set_rate(settings.rate);
        self.playback.set_voice(settings.voice.clone());
        self.settings = settings;
        Ok(())
    }

    // ── Narrator events ────────────────────────────────────────────

    /// Apply one narrator event.
    ///
    /// With auto-advance enabled, a normally finished paragraph moves on to
    /// the next one and starts narrating it.
    pub fn handle_event(&mut self, event: NarratorEvent) -> EventOutcome {
        let outcome = self.playback.handle_event(event);
        if outcome == EventOutcome::Finished && self.settings.auto_advance {
            self.advance_after_finish();
        }
        outcome
    }

    /// Apply every event already queued, without waiting.
    ///
    /// Returns how many events were taken off the channel.
    pub fn pump_events(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(event) = self.events.try_recv() {
            self.handle_event(event);
            applied += 1;
        }
        applied
    }

    /// Wait for the next narrator event and apply it.
    ///
    /// Returns `None` once every sender has been dropped.
    pub async fn wait_event(&mut self) -> Option<EventOutcome> {
        let event = self.events.recv().await?;
        Some(self.handle_event(event))
    }

    /// Current render state.
    pub fn snapshot(&self) -> SessionSnapshot {
        let paragraph = self.navigation.current_paragraph();
        let units = self.navigation.units().to_vec();
        let current_unit_index = self.playback.current_unit_index();
        let highlighted_unit_index =
            highlighted_unit(self.settings.highlight, &units, current_unit_index);

        SessionSnapshot {
            current_paragraph_index: self.navigation.current_index(),
            paragraph_count: self.navigation.len(),
            units,
            current_unit_index,
            highlighted_unit_index,
            state: self.playback.state(),
            direction: self.navigation.direction(),
            hints: self.hints.hints(self.navigation.current_index()).to_vec(),
            suggested_lines: paragraph.suggested_lines().map(str::to_string),
            char_progress: self.playback.char_progress(),
            progress: self.playback.progress(),
            is_first: self.navigation.is_first(),
            is_last: self.navigation.is_last(),
        }
    }

    // ── Internal helpers ───────────────────────────────────────────

    fn advance_after_finish(&mut self) {
        if self.next() == NavOutcome::Moved {
            tracing::debug!(
                index = self.navigation.current_index(),
                "Auto-advancing to next paragraph"
            );
            let _ = self.play();
        }
    }
}

impl std::fmt::Debug for PlaybackSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlaybackSession")
            .field("navigation", &self.navigation)
            .field("playback", &self.playback)
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}
