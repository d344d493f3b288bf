//! Playback controller: the single-utterance state machine.
//!
//! ```text
//!            play(text) / speak(token)
//!   Idle ───────────────────────────────▶ Speaking
//!    ▲                                      │  Started / Boundary(token)
//!    │   Ended / Errored(token), cancel()   │  update current unit
//!    └──────────────────────────────────────┘
//! ```
//!
//! Every request is tagged with a fresh [`NarrationToken`]. Only events that
//! carry the currently tracked token change state; everything else belongs to
//! a request that was cancelled or replaced and is dropped on the floor.

use serde::{Deserialize, Serialize};
use taleplay_core::{
    DEFAULT_RATE, MAX_RATE, MIN_RATE, NarrationRequest, NarrationToken, Narrator, NarratorError,
    NarratorEvent, NarratorEventKind, OffsetIndex, Unit, segment,
};

/// Whether a narration request is outstanding.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlaybackState {
    /// No outstanding request.
    #[default]
    Idle,
    /// Exactly one outstanding request.
    Speaking,
}

/// Result of a [`PlaybackController::play`] call.
#[derive(Debug)]
pub enum PlayOutcome {
    /// A request was issued with this token.
    Started(NarrationToken),
    /// The host has no narration capability; nothing happened.
    Unavailable,
    /// There was no text to speak; nothing happened.
    Skipped,
    /// The narrator refused the request; the controller is idle.
    Failed(NarratorError),
}

impl PlayOutcome {
    pub const fn token(&self) -> Option<NarrationToken> {
        match self {
            Self::Started(token) => Some(*token),
            _ => None,
        }
    }
}

/// What applying a narrator event did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventOutcome {
    /// The event belonged to a superseded request and was ignored.
    Stale,
    /// The event updated the current unit or progress.
    Applied,
    /// The utterance finished normally; the controller is idle.
    Finished,
    /// The utterance failed; the controller is idle.
    Failed,
}

/// Owns the narrator and the single outstanding narration request.
pub struct PlaybackController {
    narrator: Box<dyn Narrator>,
    state: PlaybackState,
    /// Token of the outstanding request, `None` when idle.
    current_token: Option<NarrationToken>,
    /// Last token handed out; the next request gets `last_token.next()`.
    last_token: NarrationToken,
    units: Vec<Unit>,
    index: OffsetIndex,
    current_unit: Option<usize>,
    char_progress: usize,
    rate: f32,
    voice: Option<String>,
}

impl PlaybackController {
    pub fn new(narrator: Box<dyn Narrator>) -> Self {
        Self {
            narrator,
            state: PlaybackState::Idle,
            current_token: None,
            last_token: NarrationToken(0),
            units: Vec::new(),
            index: OffsetIndex::default(),
            current_unit: None,
            char_progress: 0,
            rate: DEFAULT_RATE,
            voice: None,
        }
    }

    pub const fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn is_speaking(&self) -> bool {
        self.state == PlaybackState::Speaking
    }

    /// Index of the unit being spoken; `None` whenever idle.
    pub const fn current_unit_index(&self) -> Option<usize> {
        self.current_unit
    }

    pub const fn current_token(&self) -> Option<NarrationToken> {
        self.current_token
    }

    /// Units of the most recently played text.
    pub fn units(&self) -> &[Unit] {
        &self.units
    }

    /// Last char offset reported by the narrator for the current text.
    pub const fn char_progress(&self) -> usize {
        self.char_progress
    }

    /// Fraction of the current text narrated so far (0.0–1.0).
    pub fn progress(&self) -> f32 {
        let total = self.index.total_chars();
        if total == 0 {
            return 0.0;
        }
        #[allow(clippy::cast_precision_loss)]
        let fraction = self.char_progress.min(total) as f32 / total as f32;
        fraction
    }

    pub fn is_available(&self) -> bool {
        self.narrator.is_available()
    }

    /// Speech rate sent with the next request.
    pub const fn rate(&self) -> f32 {
        self.rate
    }

    /// Speech rate for subsequent requests.
    ///
    /// Clamped to `MIN_RATE..=MAX_RATE`; NaN falls back to the default rate.
    pub fn set_rate(&mut self, rate: f32) {
        self.rate = if rate.is_nan() {
            DEFAULT_RATE
        } else {
            rate.clamp(MIN_RATE, MAX_RATE)
        };
    }

    /// Voice for subsequent requests.
    pub fn set_voice(&mut self, voice: Option<String>) {
        self.voice = voice;
    }

    // ── Commands ───────────────────────────────────────────────────

    /// Speak `text`, replacing any outstanding request.
    ///
    /// Never fails: an unavailable narrator or a rejected request leaves the
    /// controller idle and is reported through the returned [`PlayOutcome`].
    pub fn play(&mut self, text: &str) -> PlayOutcome {
        if !self.narrator.is_available() {
            tracing::debug!("Narration unavailable, ignoring play");
            return PlayOutcome::Unavailable;
        }
        if text.is_empty() {
            return PlayOutcome::Skipped;
        }

        if self.is_speaking() {
            self.cancel();
        }

        self.units = segment(text);
        self.index = OffsetIndex::new(&self.units);

        let token = self.last_token.next();
        self.last_token = token;

        let request = NarrationRequest {
            token,
            text: text.to_string(),
            rate: self.rate,
            voice: self.voice.clone(),
        };

        match self.narrator.speak(request) {
            Ok(()) => {
                self.current_token = Some(token);
                self.state = PlaybackState::Speaking;
                self.current_unit = None;
                self.char_progress = 0;
                tracing::debug!(%token, units = self.units.len(), "Narration requested");
                PlayOutcome::Started(token)
            }
            Err(e) => {
                tracing::warn!(%token, error = %e, "Narrator rejected request");
                self.reset();
                PlayOutcome::Failed(e)
            }
        }
    }

    /// Stop when speaking, otherwise speak `text`.
    pub fn toggle(&mut self, text: &str) -> PlaybackState {
        if self.is_speaking() {
            self.cancel();
        } else {
            let _ = self.play(text);
        }
        self.state
    }

    /// Stop the outstanding request and invalidate its token.
    ///
    /// Safe to call while idle. Once this returns, no event from the
    /// cancelled request can change state.
    pub fn cancel(&mut self) {
        if self.is_speaking() {
            self.narrator.stop();
            tracing::debug!(token = ?self.current_token, "Narration cancelled");
        }
        self.reset();
    }

    // ── Narrator events ────────────────────────────────────────────

    /// Apply one narrator event.
    pub fn handle_event(&mut self, event: NarratorEvent) -> EventOutcome {
        match event.kind {
            NarratorEventKind::Started => self.on_start(event.token),
            NarratorEventKind::Boundary { char_index } => self.on_boundary(event.token, char_index),
            NarratorEventKind::Ended => self.on_end(event.token),
            NarratorEventKind::Errored { message } => self.on_error(event.token, &message),
        }
    }

    pub fn on_start(&mut self, token: NarrationToken) -> EventOutcome {
        if !self.is_current(token) {
            return EventOutcome::Stale;
        }
        self.current_unit = if self.units.is_empty() { None } else { Some(0) };
        self.char_progress = 0;
        tracing::debug!(%token, "Narration started");
        EventOutcome::Applied
    }

    /// Move the highlight to the unit containing `char_index`.
    ///
    /// Offsets outside the text keep the previous unit.
    pub fn on_boundary(&mut self, token: NarrationToken, char_index: usize) -> EventOutcome {
        if !self.is_current(token) {
            return EventOutcome::Stale;
        }
        self.char_progress = char_index;
        match self.index.lookup(char_index) {
            Some(unit) => self.current_unit = Some(unit),
            None => tracing::trace!(%token, char_index, "Boundary outside text, keeping unit"),
        }
        EventOutcome::Applied
    }

    pub fn on_end(&mut self, token: NarrationToken) -> EventOutcome {
        if !self.is_current(token) {
            return EventOutcome::Stale;
        }
        self.reset();
        self.char_progress = self.index.total_chars();
        tracing::debug!(%token, "Narration finished");
        EventOutcome::Finished
    }

    /// A failed utterance ends like a normal one; partial narration is fine.
    pub fn on_error(&mut self, token: NarrationToken, message: &str) -> EventOutcome {
        if !self.is_current(token) {
            return EventOutcome::Stale;
        }
        let progress = self.char_progress;
        self.reset();
        self.char_progress = progress;
        tracing::warn!(%token, error = message, "Narration failed");
        EventOutcome::Failed
    }

    // ── Internal helpers ───────────────────────────────────────────

    fn is_current(&self, token: NarrationToken) -> bool {
        let current = self.current_token == Some(token);
        if !current {
            tracing::debug!(%token, tracked = ?self.current_token, "Discarding stale narrator event");
        }
        current
    }

    fn reset(&mut self) {
        self.current_token = None;
        self.state = PlaybackState::Idle;
        self.current_unit = None;
        self.char_progress = 0;
    }
}

impl Drop for PlaybackController {
    fn drop(&mut self) {
        self.cancel();
    }
}

impl std::fmt::Debug for PlaybackController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlaybackController")
            .field("state", &self.state)
            .field("current_token", &self.current_token)
            .field("current_unit", &self.current_unit)
            .field("char_progress", &self.char_progress)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockall::Sequence;
    use mockall::predicate::function;

    mockall::mock! {
        pub Narrator {}

        impl Narrator for Narrator {
            fn is_available(&self) -> bool;
            fn speak(&mut self, request: NarrationRequest) -> Result<(), NarratorError>;
            fn stop(&mut self);
        }
    }

    fn available_narrator() -> MockNarrator {
        let mut narrator = MockNarrator::new();
        narrator.expect_is_available().return_const(true);
        narrator
    }

    const TEXT: &str = "小兔子跑走了。牠很開心！";

    #[test]
    fn play_issues_tagged_request_without_highlight() {
        let mut narrator = available_narrator();
        narrator
            .expect_speak()
            .with(function(|r: &NarrationRequest| {
                r.token == NarrationToken(1) && r.text == TEXT && r.voice.is_none()
            }))
            .times(1)
            .returning(|_| Ok(()));
        narrator.expect_stop().times(1).return_const(());

        let mut playback = PlaybackController::new(Box::new(narrator));
        let outcome = playback.play(TEXT);

        assert_eq!(outcome.token(), Some(NarrationToken(1)));
        assert_eq!(playback.state(), PlaybackState::Speaking);
        assert_eq!(playback.current_unit_index(), None);
        assert_eq!(playback.units().len(), 4);
    }

    #[test]
    fn replaying_stops_previous_request_first() {
        let mut seq = Sequence::new();
        let mut narrator = available_narrator();
        narrator
            .expect_speak()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(()));
        narrator
            .expect_stop()
            .times(1)
            .in_sequence(&mut seq)
            .return_const(());
        narrator
            .expect_speak()
            .with(function(|r: &NarrationRequest| r.token == NarrationToken(2)))
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(()));
        // Teardown of the second request.
        narrator
            .expect_stop()
            .times(1)
            .in_sequence(&mut seq)
            .return_const(());

        let mut playback = PlaybackController::new(Box::new(narrator));
        let first = playback.play(TEXT).token().unwrap();
        let second = playback.play("太陽出來了。").token().unwrap();

        assert!(second > first);
        assert_eq!(playback.current_token(), Some(second));
    }

    #[test]
    fn unavailable_narrator_never_speaks() {
        let mut narrator = MockNarrator::new();
        narrator.expect_is_available().return_const(false);
        narrator.expect_speak().never();
        narrator.expect_stop().never();

        let mut playback = PlaybackController::new(Box::new(narrator));
        assert!(matches!(playback.play(TEXT), PlayOutcome::Unavailable));
        assert_eq!(playback.toggle(TEXT), PlaybackState::Idle);
        assert_eq!(playback.toggle(TEXT), PlaybackState::Idle);
        playback.cancel();
        assert_eq!(playback.current_unit_index(), None);
    }

    #[test]
    fn rejected_request_returns_to_idle() {
        let mut narrator = available_narrator();
        narrator
            .expect_speak()
            .returning(|_| Err(NarratorError::Rejected("busy".to_string())));
        narrator.expect_stop().never();

        let mut playback = PlaybackController::new(Box::new(narrator));
        let outcome = playback.play(TEXT);

        assert!(matches!(outcome, PlayOutcome::Failed(NarratorError::Rejected(_))));
        assert_eq!(playback.state(), PlaybackState::Idle);
        assert_eq!(playback.current_token(), None);
    }

    #[test]
    fn empty_text_is_skipped() {
        let mut narrator = available_narrator();
        narrator.expect_speak().never();

        let mut playback = PlaybackController::new(Box::new(narrator));
        assert!(matches!(playback.play(""), PlayOutcome::Skipped));
        assert_eq!(playback.state(), PlaybackState::Idle);
    }

    #[test]
    fn cancel_while_idle_does_not_touch_narrator() {
        let mut narrator = available_narrator();
        narrator.expect_stop().never();

        let mut playback = PlaybackController::new(Box::new(narrator));
        playback.cancel();
        playback.cancel();
        assert_eq!(playback.state(), PlaybackState::Idle);
    }

    #[test]
    fn boundary_sequence_tracks_units() {
        let mut narrator = available_narrator();
        narrator.expect_speak().returning(|_| Ok(()));
        narrator.expect_stop().return_const(());

        let mut playback = PlaybackController::new(Box::new(narrator));
        let token = playback.play(TEXT).token().unwrap();

        assert_eq!(playback.on_start(token), EventOutcome::Applied);
        assert_eq!(playback.current_unit_index(), Some(0));

        playback.on_boundary(token, 0);
        assert_eq!(playback.current_unit_index(), Some(0));

        playback.on_boundary(token, 6);
        assert_eq!(playback.current_unit_index(), Some(1));

        playback.on_boundary(token, 8);
        assert_eq!(playback.current_unit_index(), Some(2));
        assert!((playback.progress() - 8.0 / 12.0).abs() < f32::EPSILON);

        // Past the end of the text: keep the previous unit.
        playback.on_boundary(token, 40);
        assert_eq!(playback.current_unit_index(), Some(2));

        assert_eq!(playback.on_end(token), EventOutcome::Finished);
        assert_eq!(playback.state(), PlaybackState::Idle);
        assert_eq!(playback.current_unit_index(), None);
        assert_eq!(playback.char_progress(), 12);
    }

    #[test]
    fn stale_events_are_ignored() {
        let mut narrator = available_narrator();
        narrator.expect_speak().returning(|_| Ok(()));
        narrator.expect_stop().return_const(());

        let mut playback = PlaybackController::new(Box::new(narrator));
        let old = playback.play(TEXT).token().unwrap();
        playback.cancel();
        let new = playback.play(TEXT).token().unwrap();
        playback.on_start(new);

        assert_eq!(playback.on_boundary(old, 7), EventOutcome::Stale);
        assert_eq!(playback.on_end(old), EventOutcome::Stale);
        assert_eq!(playback.on_error(old, "late"), EventOutcome::Stale);
        assert_eq!(playback.current_unit_index(), Some(0));
        assert_eq!(playback.state(), PlaybackState::Speaking);
    }

    #[test]
    fn error_behaves_like_end() {
        let mut narrator = available_narrator();
        narrator.expect_speak().returning(|_| Ok(()));
        narrator.expect_stop().return_const(());

        let mut playback = PlaybackController::new(Box::new(narrator));
        let token = playback.play(TEXT).token().unwrap();
        playback.on_start(token);
        playback.on_boundary(token, 7);

        let outcome = playback.handle_event(NarratorEvent::errored(token, "audio device lost"));

        assert_eq!(outcome, EventOutcome::Failed);
        assert_eq!(playback.state(), PlaybackState::Idle);
        assert_eq!(playback.current_unit_index(), None);
        assert_eq!(playback.char_progress(), 7);
    }

    #[test]
    fn set_rate_clamps_to_supported_range() {
        let mut playback = PlaybackController::new(Box::new(MockNarrator::new()));

        playback.set_rate(10.0);
        assert!((playback.rate() - MAX_RATE).abs() < f32::EPSILON);
        playback.set_rate(0.0);
        assert!((playback.rate() - MIN_RATE).abs() < f32::EPSILON);
        playback.set_rate(f32::NAN);
        assert!((playback.rate() - DEFAULT_RATE).abs() < f32::EPSILON);
        playback.set_rate(1.25);
        assert!((playback.rate() - 1.25).abs() < f32::EPSILON);
    }

    #[test]
    fn clamped_rate_is_sent_with_request() {
        let mut narrator = available_narrator();
        narrator
            .expect_speak()
            .with(function(|r: &NarrationRequest| (r.rate - MAX_RATE).abs() < f32::EPSILON))
            .times(1)
            .returning(|_| Ok(()));
        narrator.expect_stop().return_const(());

        let mut playback = PlaybackController::new(Box::new(narrator));
        playback.set_rate(3.0);
        assert!(matches!(playback.play(TEXT), PlayOutcome::Started(_)));
    }

    #[test]
    fn rate_and_voice_apply_to_next_request() {
        let mut narrator = available_narrator();
        narrator
            .expect_speak()
            .with(function(|r: &NarrationRequest| {
                (r.rate - 1.5).abs() < f32::EPSILON && r.voice.as_deref() == Some("zh-TW")
            }))
            .times(1)
            .returning(|_| Ok(()));
        narrator.expect_stop().return_const(());

        let mut playback = PlaybackController::new(Box::new(narrator));
        playback.set_rate(1.5);
        playback.set_voice(Some("zh-TW".to_string()));
        assert!(matches!(playback.play(TEXT), PlayOutcome::Started(_)));
    }
}
