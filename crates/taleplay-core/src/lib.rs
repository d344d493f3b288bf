//! Core domain types and port definitions for taleplay.
//!
//! This crate holds everything the narration engine needs that does not
//! depend on a runtime or a concrete speech backend:
//!
//! - [`domain`] - paragraphs, sensory module hints, story documents
//! - [`segment`] - splitting paragraph text into highlightable units
//! - [`offset_index`] - mapping narrator character offsets back to units
//! - [`ports`] - the narrator and completion interfaces adapters implement
//! - [`settings`] - playback settings and validation

#![deny(unused_crate_dependencies)]

pub mod domain;
pub mod offset_index;
pub mod ports;
pub mod segment;
pub mod settings;

// Re-export commonly used types for convenience
pub use domain::{ModuleHint, Paragraph, SensoryModule, Story, StoryError};
pub use offset_index::OffsetIndex;
pub use ports::{
    NarrationRequest, NarrationToken, Narrator, NarratorError, NarratorEvent, NarratorEventKind,
    NarratorEventReceiver, NarratorEventSender, NoopCompletion, StoryCompletion, narrator_channel,
    utf16_to_char_offset,
};
pub use segment::{Unit, UnitKind, is_delimiter, segment};
pub use settings::{
    DEFAULT_RATE, HighlightPolicy, MAX_RATE, MIN_RATE, PlaybackSettings, SettingsError,
    SettingsUpdate,
};

#[cfg(test)]
use tempfile as _;
#[cfg(test)]
use proptest as _;
