//! Completion port: what happens after the last paragraph.

/// Invoked when the listener moves past the final paragraph.
///
/// Owned by the surrounding screen (typically it routes onwards). Any
/// `FnMut() + Send` closure is a completion handler.
pub trait StoryCompletion: Send {
    fn on_complete(&mut self);
}

impl<F> StoryCompletion for F
where
    F: FnMut() + Send,
{
    fn on_complete(&mut self) {
        self();
    }
}

/// A completion handler that does nothing.
///
/// Suitable for tests and hosts that poll the snapshot instead.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopCompletion;

impl StoryCompletion for NoopCompletion {
    fn on_complete(&mut self) {
        // Intentionally do nothing
    }
}
