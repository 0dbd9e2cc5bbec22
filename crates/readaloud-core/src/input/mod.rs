//! Gesture abstraction layer.

mod mock;

pub use mock::ScriptedGestures;

/// Logical gestures consumed by the app.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum GestureEvent {
    Tap,
    /// Drag translation relative to where the gesture began.
    Pan { x: f32, y: f32 },
    PanEnded,
}

/// Polled gesture provider.
pub trait GestureSource {
    type Error;

    fn poll_event(&mut self) -> Result<Option<GestureEvent>, Self::Error>;
}
