use super::{GestureEvent, GestureSource};

/// Replays a fixed gesture sequence, one event per poll.
#[derive(Debug, Clone)]
pub struct ScriptedGestures<'a> {
    events: &'a [GestureEvent],
    cursor: usize,
}

impl<'a> ScriptedGestures<'a> {
    pub const fn new(events: &'a [GestureEvent]) -> Self {
        Self { events, cursor: 0 }
    }
}

impl GestureSource for ScriptedGestures<'_> {
    type Error = core::convert::Infallible;

    fn poll_event(&mut self) -> Result<Option<GestureEvent>, Self::Error> {
        let Some(event) = self.events.get(self.cursor).copied() else {
            return Ok(None);
        };
        self.cursor = self.cursor.saturating_add(1);
        Ok(Some(event))
    }
}
