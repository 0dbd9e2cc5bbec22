//! Read-aloud state machine tying gestures, speech progress and the highlight
//! to one word-position model.

use heapless::Deque;
use log::{debug, warn};

use crate::{
    Error,
    canvas::TextCanvas,
    document::{Document, segment},
    haptics::HapticFeedback,
    highlight::HighlightRenderer,
    input::{GestureEvent, GestureSource},
    playback::{PlaybackController, PlaybackState, Transition},
    scrub::{DEFAULT_SCROLL_UNIT, PanOutcome, ScrubController},
    speech::{Channel, SpeechEngine, SpeechEvent, SpeechParams},
};

const NOTICE_CAPACITY: usize = 16;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ReadAloudConfig {
    pub speech: SpeechParams,
    pub preview: SpeechParams,
    pub scroll_unit: f32,
}

impl Default for ReadAloudConfig {
    fn default() -> Self {
        Self {
            speech: SpeechParams::NORMAL,
            preview: SpeechParams::PREVIEW,
            scroll_unit: DEFAULT_SCROLL_UNIT,
        }
    }
}

impl ReadAloudConfig {
    pub const fn with_speech(mut self, speech: SpeechParams) -> Self {
        self.speech = speech;
        self
    }

    pub const fn with_preview(mut self, preview: SpeechParams) -> Self {
        self.preview = preview;
        self
    }

    pub const fn with_scroll_unit(mut self, scroll_unit: f32) -> Self {
        self.scroll_unit = scroll_unit;
        self
    }
}

/// Host-facing events, drained with [`ReadAloudApp::poll_notice`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Notice {
    Started { from: usize },
    Paused,
    Resumed,
    Finished,
    Scrubbed { word_index: usize },
    /// An engine refused a request; playback on that channel is back to idle.
    Halted { channel: Channel },
}

pub struct ReadAloudApp<M, P, C, H, G>
where
    M: SpeechEngine,
    P: SpeechEngine,
    C: TextCanvas,
    H: HapticFeedback,
    G: GestureSource,
{
    main: M,
    canvas: C,
    haptics: H,
    input: G,
    document: Option<Document>,
    highlight: HighlightRenderer,
    playback: PlaybackController,
    scrub: ScrubController<P>,
    notices: Deque<Notice, NOTICE_CAPACITY>,
}

impl<M, P, C, H, G> ReadAloudApp<M, P, C, H, G>
where
    M: SpeechEngine,
    P: SpeechEngine,
    C: TextCanvas,
    H: HapticFeedback,
    G: GestureSource,
{
    pub fn new(
        main: M,
        preview: P,
        canvas: C,
        haptics: H,
        input: G,
        config: ReadAloudConfig,
    ) -> Self {
        Self {
            main,
            canvas,
            haptics,
            input,
            document: None,
            highlight: HighlightRenderer::new(),
            playback: PlaybackController::new(config.speech),
            scrub: ScrubController::new(preview, config.preview, config.scroll_unit),
            notices: Deque::new(),
        }
    }

    pub fn playback_state(&self) -> PlaybackState {
        self.playback.state()
    }

    pub fn playback(&self) -> &PlaybackController {
        &self.playback
    }

    pub fn scrub(&self) -> &ScrubController<P> {
        &self.scrub
    }

    pub fn highlight(&self) -> &HighlightRenderer {
        &self.highlight
    }

    pub fn document(&self) -> Option<&Document> {
        self.document.as_ref()
    }

    pub fn canvas(&self) -> &C {
        &self.canvas
    }

    pub fn canvas_mut(&mut self) -> &mut C {
        &mut self.canvas
    }

    pub fn haptics(&self) -> &H {
        &self.haptics
    }

    pub fn main_engine(&self) -> &M {
        &self.main
    }

    pub fn main_engine_mut(&mut self) -> &mut M {
        &mut self.main
    }

    pub fn preview_engine(&self) -> &P {
        self.scrub.preview().engine()
    }

    pub fn preview_engine_mut(&mut self) -> &mut P {
        self.scrub.preview_mut().engine_mut()
    }

    pub fn poll_notice(&mut self) -> Option<Notice> {
        self.notices.pop_front()
    }

    /// Drain the gesture source.
    pub fn process_inputs(&mut self) {
        loop {
            match self.input.poll_event() {
                Ok(Some(event)) => self.handle_gesture(event),
                Ok(None) => break,
                Err(_) => {
                    warn!("input: gesture source failed");
                    break;
                }
            }
        }
    }

    pub fn handle_gesture(&mut self, event: GestureEvent) {
        match event {
            GestureEvent::Tap => {
                if self.scrub.session().is_some() {
                    self.release_scrub();
                }
                self.apply_tap();
            }
            GestureEvent::Pan { x, .. } => self.apply_pan(x),
            GestureEvent::PanEnded => self.release_scrub(),
        }
    }

    /// Progress callback from either engine.
    pub fn on_speech_event(&mut self, channel: Channel, event: SpeechEvent<'_>) {
        if channel == Channel::Preview {
            return;
        }
        let Some(doc) = self.document.as_ref() else {
            debug!("speech: event before any document {:?}", event);
            return;
        };

        match event {
            SpeechEvent::WillSpeak { range, .. } => {
                if let Err(err) =
                    self.playback
                        .on_will_speak(range, doc, &mut self.canvas, &mut self.highlight)
                {
                    self.report(err);
                }
            }
            SpeechEvent::Finished { utterance } => match self.playback.on_utterance_finished(
                utterance,
                &mut self.canvas,
                &mut self.highlight,
            ) {
                Ok(Transition::Finished) => self.notices_push(Notice::Finished),
                Ok(_) => {}
                Err(err) => self.report(err),
            },
        }
    }

    fn apply_tap(&mut self) {
        self.refresh_document();
        let Some(doc) = self.document.as_ref() else {
            return;
        };

        match self
            .playback
            .toggle(doc, &mut self.main, &mut self.canvas, &mut self.highlight)
        {
            Ok(Transition::Started { from }) => self.notices_push(Notice::Started { from }),
            Ok(Transition::Paused) => self.notices_push(Notice::Paused),
            Ok(Transition::Resumed) => self.notices_push(Notice::Resumed),
            Ok(_) => {}
            Err(err) => self.report(err),
        }
    }

    fn apply_pan(&mut self, translation_x: f32) {
        if self.scrub.needs_take_over(translation_x) {
            if let Err(err) = self.playback.stop(&mut self.main) {
                self.report(err);
            }
            self.refresh_document();
            let base = self.playback.resume_point().unwrap_or(0);
            self.scrub.take_over(base);
        }

        let Some(doc) = self.document.as_ref() else {
            return;
        };

        let outcome = self.scrub.on_pan(
            translation_x,
            doc,
            &mut self.canvas,
            &mut self.highlight,
            &mut self.haptics,
        );
        if let PanOutcome::Stepped { word_index, fault } = outcome {
            self.notices_push(Notice::Scrubbed { word_index });
            if let Some(err) = fault {
                self.report(err);
            }
        }
    }

    fn release_scrub(&mut self) {
        if let Some(word_index) = self.scrub.on_pan_ended() {
            self.playback.set_resume_point(Some(word_index));
        }
    }

    /// Rebuild the document when idle and the canvas text changed.
    fn refresh_document(&mut self) {
        if !self.playback.is_idle() {
            return;
        }
        if self
            .document
            .as_ref()
            .is_some_and(|doc| doc.raw_text() == self.canvas.text())
        {
            return;
        }

        let doc = segment(self.canvas.text());
        debug!(
            "app: segmented document words={} utterances={}",
            doc.len(),
            doc.utterances().len()
        );
        if self.document.is_some() {
            self.playback.set_resume_point(None);
            self.highlight.forget();
        }
        self.document = Some(doc);
    }

    fn report(&mut self, err: Error) {
        match err {
            Error::EngineUnavailable(channel) => {
                warn!("app: {}", err);
                self.notices_push(Notice::Halted { channel });
            }
            Error::Canvas => warn!("app: {}", err),
            Error::OutOfRangeWordIndex { .. } | Error::EmptyDocument => debug!("app: {}", err),
        }
    }

    fn notices_push(&mut self, notice: Notice) {
        if self.notices.is_full() {
            let dropped = self.notices.pop_front();
            debug!("app: notice queue full, dropped {:?}", dropped);
        }
        let _ = self.notices.push_back(notice);
    }
}
