//! Drag-to-scrub: horizontal translation quantized into word steps.

use log::{debug, warn};

use crate::{
    Error,
    canvas::TextCanvas,
    document::Document,
    haptics::HapticFeedback,
    highlight::HighlightRenderer,
    speech::{PreviewChannel, SpeechEngine, SpeechParams},
};

/// Translation units per word step.
pub const DEFAULT_SCROLL_UNIT: f32 = 20.0;

/// `floor(translation / unit)`, with non-finite input and non-positive units
/// mapped to step 0.
pub fn quantize(translation: f32, unit: f32) -> i64 {
    if !translation.is_finite() || !unit.is_finite() || unit <= 0.0 {
        return 0;
    }
    let steps = translation / unit;
    let truncated = steps as i64;
    if (truncated as f32) > steps {
        truncated.saturating_sub(1)
    } else {
        truncated
    }
}

/// State of one drag gesture.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScrubSession {
    pub last_translation_x: f32,
    pub last_step: i64,
    /// Word the gesture is relative to; step `n` targets `base + n`.
    pub base_word_index: usize,
    pub pending_word_index: Option<usize>,
    /// Whether this gesture has taken over from playback yet.
    pub interrupted: bool,
}

impl ScrubSession {
    pub const fn new() -> Self {
        Self {
            last_translation_x: 0.0,
            last_step: 0,
            base_word_index: 0,
            pending_word_index: None,
            interrupted: false,
        }
    }

    /// Feed a translation. Returns the new step only when it differs from the
    /// previous one.
    pub fn track(&mut self, translation_x: f32, unit: f32) -> Option<i64> {
        self.last_translation_x = translation_x;
        let step = quantize(translation_x, unit);
        if step == self.last_step {
            return None;
        }
        self.last_step = step;
        Some(step)
    }

    pub fn target(&self, step: i64) -> i64 {
        i64::try_from(self.base_word_index)
            .unwrap_or(i64::MAX)
            .saturating_add(step)
    }
}

impl Default for ScrubSession {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PanOutcome {
    /// No step boundary crossed.
    Tracking,
    /// Moved onto a new word. `fault` carries a preview failure; the highlight
    /// and pending word were updated regardless.
    Stepped {
        word_index: usize,
        fault: Option<Error>,
    },
    /// Step landed outside the document and was ignored.
    OutOfRange { target: i64 },
}

#[derive(Debug)]
pub struct ScrubController<P> {
    preview: PreviewChannel<P>,
    scroll_unit: f32,
    session: Option<ScrubSession>,
}

impl<P> ScrubController<P>
where
    P: SpeechEngine,
{
    pub fn new(preview_engine: P, preview_params: SpeechParams, scroll_unit: f32) -> Self {
        Self {
            preview: PreviewChannel::new(preview_engine, preview_params),
            scroll_unit,
            session: None,
        }
    }

    pub fn preview(&self) -> &PreviewChannel<P> {
        &self.preview
    }

    pub fn preview_mut(&mut self) -> &mut PreviewChannel<P> {
        &mut self.preview
    }

    pub fn session(&self) -> Option<&ScrubSession> {
        self.session.as_ref()
    }

    pub fn is_scrubbing(&self) -> bool {
        self.session.is_some_and(|session| session.interrupted)
    }

    pub fn pending_word_index(&self) -> Option<usize> {
        self.session.and_then(|session| session.pending_word_index)
    }

    /// Whether this translation is the first movement of the gesture, at which
    /// point playback has to be stopped and [`Self::take_over`] called.
    pub fn needs_take_over(&mut self, translation_x: f32) -> bool {
        let session = self.session.get_or_insert_with(ScrubSession::new);
        !session.interrupted && translation_x != session.last_translation_x
    }

    /// Enter scrub mode relative to `base_word_index`.
    pub fn take_over(&mut self, base_word_index: usize) {
        let session = self.session.get_or_insert_with(ScrubSession::new);
        session.interrupted = true;
        session.base_word_index = base_word_index;
        debug!("scrub: take over base_word={}", base_word_index);
    }

    pub fn on_pan<C, H>(
        &mut self,
        translation_x: f32,
        doc: &Document,
        canvas: &mut C,
        highlight: &mut HighlightRenderer,
        haptics: &mut H,
    ) -> PanOutcome
    where
        C: TextCanvas,
        H: HapticFeedback,
    {
        let session = self.session.get_or_insert_with(ScrubSession::new);
        if !session.interrupted {
            session.last_translation_x = translation_x;
            return PanOutcome::Tracking;
        }

        let Some(step) = session.track(translation_x, self.scroll_unit) else {
            return PanOutcome::Tracking;
        };

        let target = session.target(step);
        let Some((word_index, range)) = usize::try_from(target)
            .ok()
            .and_then(|index| doc.word_range(index).map(|range| (index, range)))
        else {
            debug!(
                "scrub: ignored step={} target={} len={}",
                step,
                target,
                doc.len()
            );
            return PanOutcome::OutOfRange { target };
        };

        let word = doc.word_text(word_index).unwrap_or_default();
        debug!("scrub: step={} word={} {:?}", step, word_index, word);

        let fault = self.preview.play(word).err();
        if highlight
            .set_active(canvas, range, doc.char_len())
            .is_err() {
            warn!("scrub: highlight failed word={}", word_index);
        }
        haptics.step_pulse();
        session.pending_word_index = Some(word_index);

        PanOutcome::Stepped { word_index, fault }
    }

    /// End the gesture, returning the word playback should resume from.
    pub fn on_pan_ended(&mut self) -> Option<usize> {
        let session = self.session.take()?;
        if !session.interrupted {
            return None;
        }
        debug!(
            "scrub: released pending_word={:?}",
            session.pending_word_index
        );
        session.pending_word_index
    }
}
