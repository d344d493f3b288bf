//! Bundled narrator adapters.
//!
//! Real hosts implement [`Narrator`](taleplay_core::Narrator) over their own
//! speech backend. The adapters here cover the cases every host needs:
//!
//! | Adapter                 | Speaks | Use                                             |
//! |-------------------------|--------|-------------------------------------------------|
//! | [`PacedNarrator`]       |   ✓    | Terminal playback and demos; simulated timing   |
//! | [`UnavailableNarrator`] |        | Hosts without speech support                    |

mod paced;
mod unavailable;

pub use paced::{DEFAULT_PER_CHAR, PacedNarrator};
pub use unavailable::UnavailableNarrator;
