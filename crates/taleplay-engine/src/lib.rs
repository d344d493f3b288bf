//! Synchronized narration playback engine.
//!
//! Narrates an ordered list of paragraphs through an injected [`Narrator`]
//! and keeps the index of the currently spoken unit in step with the
//! narrator's boundary events.
//!
//! ```text
//!   NavigationController ──selects──▶ paragraph ──segment──▶ units / OffsetIndex
//!            │                                                     │
//!        cancel()                                                lookup
//!            ▼                                                     │
//!   PlaybackController ──speak(token)──▶ Narrator ──events(token)──┘
//! ```
//!
//! [`PlaybackSession`] wires the pieces together for one mounted narration
//! view and exposes a pollable [`SessionSnapshot`] for the render layer.
//!
//! [`Narrator`]: taleplay_core::Narrator

#![deny(unused_crate_dependencies)]

pub mod highlight;
pub mod hints;
pub mod narrators;
pub mod navigation;
pub mod playback;
pub mod session;
pub mod snapshot;

// Re-export key types for convenience
pub use highlight::highlighted_unit;
pub use hints::HintProjector;
pub use narrators::{PacedNarrator, UnavailableNarrator};
pub use navigation::{Direction, NavOutcome, NavigationController};
pub use playback::{EventOutcome, PlayOutcome, PlaybackController, PlaybackState};
pub use session::{PlaybackSession, SessionError};
pub use snapshot::SessionSnapshot;

#[cfg(test)]
use tokio_test as _;
