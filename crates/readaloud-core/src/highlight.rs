//! Single active highlight projected onto a [`TextCanvas`].

use log::{debug, warn};

use crate::{
    Error,
    canvas::{Emphasis, TextCanvas},
    document::CharRange,
};

/// Highlight state as a value. `previous` is the range the next projection
/// has to restore to normal styling.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct HighlightSpan {
    pub active: Option<CharRange>,
    pub previous: Option<CharRange>,
}

impl HighlightSpan {
    pub const fn activated(self, range: CharRange) -> Self {
        Self {
            active: Some(range),
            previous: self.active,
        }
    }

    pub const fn cleared(self) -> Self {
        Self {
            active: None,
            previous: self.active,
        }
    }
}

#[derive(Debug, Default)]
pub struct HighlightRenderer {
    span: HighlightSpan,
}

impl HighlightRenderer {
    pub const fn new() -> Self {
        Self {
            span: HighlightSpan {
                active: None,
                previous: None,
            },
        }
    }

    pub fn span(&self) -> HighlightSpan {
        self.span
    }

    pub fn active(&self) -> Option<CharRange> {
        self.span.active
    }

    /// Highlight `range`, clamped to the first `text_len` chars of the canvas.
    pub fn set_active<C>(
        &mut self,
        canvas: &mut C,
        range: CharRange,
        text_len: usize,
    ) -> Result<(), Error>
    where
        C: TextCanvas,
    {
        let Some(range) = range.clamp_to(text_len) else {
            debug!(
                "highlight: ignored range start={} len={} text_len={}",
                range.start, range.len, text_len
            );
            return Ok(());
        };

        if self.span.active == Some(range) {
            return Ok(());
        }

        self.span = self.span.activated(range);
        self.project(canvas)
    }

    pub fn clear<C>(&mut self, canvas: &mut C) -> Result<(), Error>
    where
        C: TextCanvas,
    {
        if self.span.active.is_none() {
            return Ok(());
        }

        self.span = self.span.cleared();
        self.project(canvas)
    }

    /// Drop highlight state without touching the canvas, for when the
    /// underlying text was replaced.
    pub fn forget(&mut self) {
        self.span = HighlightSpan::default();
    }

    fn project<C>(&mut self, canvas: &mut C) -> Result<(), Error>
    where
        C: TextCanvas,
    {
        let mut result = Ok(());

        if let Some(previous) = self.span.previous.take() {
            if canvas.set_emphasis(previous, Emphasis::Normal).is_err() {
                warn!(
                    "highlight: restore failed start={} len={}",
                    previous.start, previous.len
                );
                result = Err(Error::Canvas);
            }
        }

        if let Some(active) = self.span.active {
            let applied = canvas
                .set_emphasis(active, Emphasis::Highlighted)
                .and_then(|()| canvas.scroll_to_visible(active));
            if applied.is_err() {
                warn!(
                    "highlight: apply failed start={} len={}",
                    active.start, active.len
                );
                result = Err(Error::Canvas);
            }
        }

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{CanvasCall, RecordingCanvas};

    #[test]
    fn same_range_twice_is_one_transition() {
        let mut canvas = RecordingCanvas::new("hello world");
        let len = canvas.char_len();
        let mut highlight = HighlightRenderer::new();

        highlight.set_active(&mut canvas, CharRange::new(0, 5), len).unwrap();
        highlight.set_active(&mut canvas, CharRange::new(0, 5), len).unwrap();

        assert_eq!(
            canvas.calls,
            [
                CanvasCall::Emphasis(CharRange::new(0, 5), Emphasis::Highlighted),
                CanvasCall::Scroll(CharRange::new(0, 5)),
            ]
        );
    }

    #[test]
    fn new_range_restores_previous_first() {
        let mut canvas = RecordingCanvas::new("hello world");
        let len = canvas.char_len();
        let mut highlight = HighlightRenderer::new();

        highlight.set_active(&mut canvas, CharRange::new(0, 5), len).unwrap();
        canvas.calls.clear();
        highlight.set_active(&mut canvas, CharRange::new(6, 5), len).unwrap();

        assert_eq!(
            canvas.calls,
            [
                CanvasCall::Emphasis(CharRange::new(0, 5), Emphasis::Normal),
                CanvasCall::Emphasis(CharRange::new(6, 5), Emphasis::Highlighted),
                CanvasCall::Scroll(CharRange::new(6, 5)),
            ]
        );
        assert_eq!(canvas.highlighted(), "world");
    }

    #[test]
    fn overlapping_ranges_leave_only_the_new_one_lit() {
        let mut canvas = RecordingCanvas::new("abcdefgh");
        let len = canvas.char_len();
        let mut highlight = HighlightRenderer::new();

        highlight.set_active(&mut canvas, CharRange::new(0, 4), len).unwrap();
        highlight.set_active(&mut canvas, CharRange::new(2, 4), len).unwrap();

        assert_eq!(canvas.highlighted(), "cdef");
    }

    #[test]
    fn clear_restores_and_is_repeatable() {
        let mut canvas = RecordingCanvas::new("hello world");
        let len = canvas.char_len();
        let mut highlight = HighlightRenderer::new();

        highlight.set_active(&mut canvas, CharRange::new(6, 5), len).unwrap();
        highlight.clear(&mut canvas).unwrap();
        let calls = canvas.calls.len();
        highlight.clear(&mut canvas).unwrap();

        assert_eq!(canvas.calls.len(), calls);
        assert_eq!(canvas.highlighted(), "");
        assert_eq!(highlight.span(), HighlightSpan::default());
    }

    #[test]
    fn ranges_are_clamped_to_canvas() {
        let mut canvas = RecordingCanvas::new("short");
        let len = canvas.char_len();
        let mut highlight = HighlightRenderer::new();

        highlight.set_active(&mut canvas, CharRange::new(3, 10), len).unwrap();
        assert_eq!(highlight.active(), Some(CharRange::new(3, 2)));

        highlight.set_active(&mut canvas, CharRange::new(9, 1), len).unwrap();
        assert_eq!(highlight.active(), Some(CharRange::new(3, 2)));
    }

    #[test]
    fn canvas_failure_still_advances_state() {
        let mut canvas = RecordingCanvas::new("hello world");
        let len = canvas.char_len();
        canvas.fail = true;
        let mut highlight = HighlightRenderer::new();

        assert_eq!(
            highlight.set_active(&mut canvas, CharRange::new(0, 5), len),
            Err(Error::Canvas)
        );
        assert_eq!(highlight.active(), Some(CharRange::new(0, 5)));
    }
}
