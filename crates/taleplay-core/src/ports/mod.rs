//! Port definitions (trait abstractions) for external collaborators.
//!
//! Ports define the interfaces the narration engine expects from its host.
//! They contain no implementation details and use only domain types.
//!
//! # Design Rules
//!
//! - No concrete speech backend types in any signature
//! - Narrator callbacks travel over a channel, never through shared state
//! - Every event carries the token of the request that produced it

pub mod completion;
pub mod narrator;

pub use completion::{NoopCompletion, StoryCompletion};
pub use narrator::{
    NarrationRequest, NarrationToken, Narrator, NarratorError, NarratorEvent, NarratorEventKind,
    NarratorEventReceiver, NarratorEventSender, narrator_channel, utf16_to_char_offset,
};
