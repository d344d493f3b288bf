//! Playback settings and validation.
//!
//! Pure domain types with no infrastructure dependencies. Hosts build these
//! from flags, environment or their own preferences store.

use serde::{Deserialize, Serialize};

/// Normal speech rate.
pub const DEFAULT_RATE: f32 = 1.0;

/// Slowest accepted speech rate.
pub const MIN_RATE: f32 = 0.5;

/// Fastest accepted speech rate.
pub const MAX_RATE: f32 = 2.0;

/// Which units the render layer may draw highlighted.
///
/// The engine always tracks the raw current unit; this policy only decides
/// whether that unit is shown as highlighted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HighlightPolicy {
    /// Never highlight punctuation units.
    #[default]
    ContentOnly,
    /// Highlight whichever unit is current.
    AllUnits,
}

/// Settings applied to narration requests and presentation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaybackSettings {
    /// Speech rate multiplier passed to the narrator.
    pub rate: f32,

    /// Narrator voice; `None` uses the narrator default.
    pub voice: Option<String>,

    /// Highlight eligibility policy for the render layer.
    pub highlight: HighlightPolicy,

    /// Whether hosts should move to the next paragraph when one finishes.
    pub auto_advance: bool,
}

impl Default for PlaybackSettings {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl PlaybackSettings {
    /// Create settings with sensible defaults.
    #[must_use]
    pub const fn with_defaults() -> Self {
        Self {
            rate: DEFAULT_RATE,
            voice: None,
            highlight: HighlightPolicy::ContentOnly,
            auto_advance: false,
        }
    }

    /// Merge a partial update, only touching fields that are `Some`.
    pub fn merge(&mut self, update: &SettingsUpdate) {
        if let Some(rate) = update.rate {
            self.rate = rate;
        }
        if let Some(ref voice) = update.voice {
            self.voice.clone_from(voice);
        }
        if let Some(highlight) = update.highlight {
            self.highlight = highlight;
        }
        if let Some(auto_advance) = update.auto_advance {
            self.auto_advance = auto_advance;
        }
    }

    /// Validate settings values.
    pub fn validate(&self) -> Result<(), SettingsError> {
        if !(MIN_RATE..=MAX_RATE).contains(&self.rate) {
            return Err(SettingsError::InvalidRate(self.rate));
        }
        if self.voice.as_ref().is_some_and(|v| v.trim().is_empty()) {
            return Err(SettingsError::EmptyVoice);
        }
        Ok(())
    }
}

/// Partial settings update.
///
/// `voice` is `Option<Option<String>>`:
/// - `None` = don't change
/// - `Some(None)` = reset to the narrator default
/// - `Some(Some(id))` = use `id`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SettingsUpdate {
    pub rate: Option<f32>,
    pub voice: Option<Option<String>>,
    pub highlight: Option<HighlightPolicy>,
    pub auto_advance: Option<bool>,
}

/// Settings validation error.
#[derive(Debug, Clone, thiserror::Error)]
pub enum SettingsError {
    #[error("Speech rate must be between 0.5 and 2.0, got {0}")]
    InvalidRate(f32),

    #[error("Voice identifier cannot be empty")]
    EmptyVoice,
}
