//! Simulated narrator that paces through the text on a timer.
//!
//! Emits the same event sequence a speech engine would (`Started`, one
//! `Boundary` per unit, then `Ended`) with a fixed duration per char scaled
//! by the request rate. Used by the terminal player, where there is no
//! speech backend to drive the highlight.

use std::time::Duration;

use taleplay_core::{
    NarrationRequest, NarrationToken, Narrator, NarratorError, NarratorEvent, NarratorEventSender,
    segment,
};
use tokio::runtime::Handle;
use tokio::task::JoinHandle;

/// Default time spent on each char at rate 1.0.
pub const DEFAULT_PER_CHAR: Duration = Duration::from_millis(180);

/// Narrator that "speaks" by sleeping through each unit.
///
/// Must be used from within a tokio runtime; `speak` spawns the pacing task
/// onto the current runtime.
#[derive(Debug)]
pub struct PacedNarrator {
    events: NarratorEventSender,
    per_char: Duration,
    task: Option<JoinHandle<()>>,
}

impl PacedNarrator {
    pub const fn new(events: NarratorEventSender, per_char: Duration) -> Self {
        Self {
            events,
            per_char,
            task: None,
        }
    }

    /// Whether a pacing task is still running.
    pub fn is_speaking(&self) -> bool {
        self.task.as_ref().is_some_and(|task| !task.is_finished())
    }
}

impl Narrator for PacedNarrator {
    fn speak(&mut self, request: NarrationRequest) -> Result<(), NarratorError> {
        if self.events.is_closed() {
            return Err(NarratorError::ChannelClosed);
        }
        let runtime = Handle::try_current().map_err(|e| NarratorError::Rejected(e.to_string()))?;

        // Single utterance: a new request replaces the old one.
        self.stop();

        tracing::debug!(token = %request.token, rate = request.rate, "Paced narration started");
        let task = runtime.spawn(narrate(self.events.clone(), request, self.per_char));
        self.task = Some(task);
        Ok(())
    }

    fn stop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

impl Drop for PacedNarrator {
    fn drop(&mut self) {
        self.stop();
    }
}

async fn narrate(events: NarratorEventSender, request: NarrationRequest, per_char: Duration) {
    let token = request.token;
    let rate = if request.rate > 0.0 { request.rate } else { 1.0 };

    if send(&events, NarratorEvent::started(token)).is_err() {
        return;
    }

    for unit in segment(&request.text) {
        if send(&events, NarratorEvent::boundary(token, unit.start_offset)).is_err() {
            return;
        }
        tokio::time::sleep(unit_duration(unit.length, per_char, rate)).await;
    }

    let _ = send(&events, NarratorEvent::ended(token));
}

fn send(events: &NarratorEventSender, event: NarratorEvent) -> Result<(), NarrationToken> {
    let token = event.token;
    events.send(event).map_err(|_| {
        tracing::debug!(%token, "Narrator event receiver dropped");
        token
    })
}

fn unit_duration(chars: usize, per_char: Duration, rate: f32) -> Duration {
    #[allow(clippy::cast_precision_loss)]
    let scale = chars as f64 / f64::from(rate);
    per_char.mul_f64(scale)
}
