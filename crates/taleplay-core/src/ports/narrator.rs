//! Narrator port: the external text-to-speech capability.
//!
//! A narrator speaks one [`NarrationRequest`] at a time. Progress is reported
//! asynchronously as [`NarratorEvent`]s on the sender the adapter received at
//! construction (see [`narrator_channel`]). Each event echoes the token of the
//! request it belongs to, so the engine can discard events from requests it
//! has already cancelled.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::sync::mpsc;

/// Identifier of one narration request.
///
/// Tokens are handed out in strictly increasing order by the playback
/// controller and never reused within a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NarrationToken(pub u64);

impl NarrationToken {
    /// The token following this one.
    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Display for NarrationToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A request to speak one paragraph.
#[derive(Debug, Clone, PartialEq)]
pub struct NarrationRequest {
    pub token: NarrationToken,
    pub text: String,
    /// Speech rate multiplier (1.0 = normal).
    pub rate: f32,
    /// Backend-specific voice identifier; `None` uses the narrator default.
    pub voice: Option<String>,
}

/// What happened to a narration request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NarratorEventKind {
    /// Audio for the request started playing.
    Started,
    /// The narrator reached the char at `char_index` of the request text.
    ///
    /// Counted in Unicode scalar values. Backends that report UTF-16 code
    /// units (Web Speech `charIndex`) must convert with
    /// [`utf16_to_char_offset`] before sending.
    Boundary { char_index: usize },
    /// The request finished normally.
    Ended,
    /// The request failed; partial narration may have played.
    Errored { message: String },
}

/// An event reported by a narrator, tagged with its request token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NarratorEvent {
    pub token: NarrationToken,
    pub kind: NarratorEventKind,
}

impl NarratorEvent {
    pub const fn started(token: NarrationToken) -> Self {
        Self {
            token,
            kind: NarratorEventKind::Started,
        }
    }

    pub const fn boundary(token: NarrationToken, char_index: usize) -> Self {
        Self {
            token,
            kind: NarratorEventKind::Boundary { char_index },
        }
    }

    pub const fn ended(token: NarrationToken) -> Self {
        Self {
            token,
            kind: NarratorEventKind::Ended,
        }
    }

    pub fn errored(token: NarrationToken, message: impl Into<String>) -> Self {
        Self {
            token,
            kind: NarratorEventKind::Errored {
                message: message.into(),
            },
        }
    }
}

/// Sending half handed to narrator adapters.
pub type NarratorEventSender = mpsc::UnboundedSender<NarratorEvent>;

/// Receiving half consumed by the playback session.
pub type NarratorEventReceiver = mpsc::UnboundedReceiver<NarratorEvent>;

/// Create the event channel connecting a narrator adapter to a session.
#[must_use]
pub fn narrator_channel() -> (NarratorEventSender, NarratorEventReceiver) {
    mpsc::unbounded_channel()
}

/// Errors a narrator may return when asked to speak.
#[derive(Debug, Error)]
pub enum NarratorError {
    /// Speech is not supported in this host environment.
    #[error("Narration is not available in this environment")]
    Unavailable,

    /// The backend refused the request.
    #[error("Narrator rejected the request: {0}")]
    Rejected(String),

    /// The event receiver is gone, so progress could never be reported.
    #[error("Narrator event channel closed")]
    ChannelClosed,
}

/// Convert a UTF-16 code unit offset into `text` to a char offset.
///
/// An offset inside a surrogate pair maps to the char the pair encodes. The
/// end of the text maps to the char count; anything beyond is `None`.
pub fn utf16_to_char_offset(text: &str, utf16_index: usize) -> Option<usize> {
    let mut code_units = 0;
    let mut chars = 0;
    for c in text.chars() {
        code_units += c.len_utf16();
        if utf16_index < code_units {
            return Some(chars);
        }
        chars += 1;
    }
    (utf16_index == code_units).then_some(chars)
}

/// Text-to-speech capability consumed by the playback engine.
///
/// Adapters must honour at-most-one-active-utterance semantics: a `speak`
/// issued while another request is live replaces it. The engine always calls
/// [`stop`](Narrator::stop) before issuing a new request anyway.
///
/// Boundary offsets are char offsets into the request text. Adapters over
/// backends that count UTF-16 code units convert them first, otherwise the
/// highlight drifts after every astral char.
pub trait Narrator: Send {
    /// Whether speech is supported in this environment.
    ///
    /// When this returns `false` the engine never calls `speak`.
    fn is_available(&self) -> bool {
        true
    }

    /// Begin speaking `request.text`.
    ///
    /// Must return promptly; progress is reported through the event channel.
    fn speak(&mut self, request: NarrationRequest) -> Result<(), NarratorError>;

    /// Stop the active utterance, if any.
    ///
    /// Events for the stopped request may still be delivered afterwards.
    fn stop(&mut self);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokens_increase() {
        let first = NarrationToken(1);
        assert!(first.next() > first);
        assert_eq!(first.next(), NarrationToken(2));
        assert_eq!(first.to_string(), "#1");
    }

    #[test]
    fn channel_delivers_events_in_order() {
        let (tx, mut rx) = narrator_channel();
        let token = NarrationToken(7);
        tx.send(NarratorEvent::started(token)).unwrap();
        tx.send(NarratorEvent::boundary(token, 3)).unwrap();
        tx.send(NarratorEvent::errored(token, "device lost")).unwrap();

        assert_eq!(rx.try_recv().unwrap(), NarratorEvent::started(token));
        assert_eq!(
            rx.try_recv().unwrap().kind,
            NarratorEventKind::Boundary { char_index: 3 }
        );
        assert_eq!(
            rx.try_recv().unwrap().kind,
            NarratorEventKind::Errored {
                message: "device lost".to_string()
            }
        );
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn utf16_offsets_map_to_chars() {
        let text = "小兔😀跑了。";
        assert_eq!(utf16_to_char_offset(text, 0), Some(0));
        assert_eq!(utf16_to_char_offset(text, 2), Some(2));
        assert_eq!(utf16_to_char_offset(text, 3), Some(2));
        assert_eq!(utf16_to_char_offset(text, 4), Some(3));
        assert_eq!(utf16_to_char_offset(text, 6), Some(5));
        assert_eq!(utf16_to_char_offset(text, 7), Some(6));
        assert_eq!(utf16_to_char_offset(text, 8), None);
    }

    #[test]
    fn utf16_offsets_match_chars_without_astral() {
        let text = "小兔子跑走了。牠很開心！";
        for i in 0..=text.chars().count() {
            assert_eq!(utf16_to_char_offset(text, i), Some(i));
        }
    }
}
