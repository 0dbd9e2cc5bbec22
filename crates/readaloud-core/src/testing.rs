//! Recording collaborators shared by unit tests.

use crate::{
    canvas::{Emphasis, TextCanvas},
    document::CharRange,
    haptics::{HapticFeedback, PulseKind},
    speech::{Boundary, SpeechEngine, SpeechParams, SpeechRequest},
};

#[derive(Clone, Debug, PartialEq)]
pub enum EngineCall {
    Speak(String, SpeechParams),
    Pause(Boundary),
    Resume,
    Stop(Boundary),
}

#[derive(Debug, Default)]
pub struct RecordingEngine {
    pub calls: Vec<EngineCall>,
    pub queued: usize,
    pub max_queued: usize,
    pub paused: bool,
    pub fail_speak: bool,
    pub fail_stop: bool,
}

impl RecordingEngine {
    pub fn spoken(&self) -> Vec<&str> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                EngineCall::Speak(text, _) => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }
}

impl SpeechEngine for RecordingEngine {
    type Error = ();

    fn speak(&mut self, request: &SpeechRequest<'_>) -> Result<(), Self::Error> {
        if self.fail_speak {
            return Err(());
        }
        self.calls
            .push(EngineCall::Speak(request.text.into(), request.params));
        self.queued += 1;
        self.max_queued = self.max_queued.max(self.queued);
        Ok(())
    }

    fn pause(&mut self, boundary: Boundary) -> Result<(), Self::Error> {
        self.calls.push(EngineCall::Pause(boundary));
        self.paused = true;
        Ok(())
    }

    fn resume(&mut self) -> Result<(), Self::Error> {
        self.calls.push(EngineCall::Resume);
        self.paused = false;
        Ok(())
    }

    fn stop(&mut self, boundary: Boundary) -> Result<(), Self::Error> {
        if self.fail_stop {
            return Err(());
        }
        self.calls.push(EngineCall::Stop(boundary));
        self.queued = 0;
        self.paused = false;
        Ok(())
    }

    fn is_speaking(&self) -> bool {
        self.queued > 0
    }

    fn is_paused(&self) -> bool {
        self.paused
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum CanvasCall {
    Emphasis(CharRange, Emphasis),
    Scroll(CharRange),
    Select(CharRange),
}

#[derive(Debug)]
pub struct RecordingCanvas {
    pub text: String,
    pub emphasis: Vec<Emphasis>,
    pub calls: Vec<CanvasCall>,
    pub fail: bool,
}

impl RecordingCanvas {
    pub fn new(text: &str) -> Self {
        Self {
            text: text.into(),
            emphasis: vec![Emphasis::Normal; text.chars().count()],
            calls: Vec::new(),
            fail: false,
        }
    }

    pub fn replace_text(&mut self, text: &str) {
        self.text = text.into();
        self.emphasis = vec![Emphasis::Normal; text.chars().count()];
    }

    pub fn highlighted(&self) -> String {
        self.text
            .chars()
            .zip(&self.emphasis)
            .filter(|(_, emphasis)| **emphasis == Emphasis::Highlighted)
            .map(|(ch, _)| ch)
            .collect()
    }

    pub fn char_len(&self) -> usize {
        self.emphasis.len()
    }

    pub fn selections(&self) -> Vec<CharRange> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                CanvasCall::Select(range) => Some(*range),
                _ => None,
            })
            .collect()
    }
}

impl TextCanvas for RecordingCanvas {
    type Error = ();

    fn text(&self) -> &str {
        &self.text
    }

    fn emphasis_at(&self, offset: usize) -> Emphasis {
        self.emphasis.get(offset).copied().unwrap_or_default()
    }

    fn set_emphasis(&mut self, range: CharRange, emphasis: Emphasis) -> Result<(), Self::Error> {
        if self.fail {
            return Err(());
        }
        self.calls.push(CanvasCall::Emphasis(range, emphasis));
        for slot in self.emphasis.iter_mut().skip(range.start).take(range.len) {
            *slot = emphasis;
        }
        Ok(())
    }

    fn scroll_to_visible(&mut self, range: CharRange) -> Result<(), Self::Error> {
        self.calls.push(CanvasCall::Scroll(range));
        Ok(())
    }

    fn select(&mut self, range: CharRange) -> Result<(), Self::Error> {
        self.calls.push(CanvasCall::Select(range));
        Ok(())
    }
}

#[derive(Debug, Default)]
pub struct RecordingHaptics {
    pub pressure: bool,
    pub pulses: Vec<PulseKind>,
}

impl HapticFeedback for RecordingHaptics {
    fn supports_pressure(&self) -> bool {
        self.pressure
    }

    fn pulse(&mut self, kind: PulseKind) {
        self.pulses.push(kind);
    }
}

/// Word sub-ranges an engine would report for `utterance`, relative to it.
pub fn boundary_ranges(utterance: &str) -> Vec<CharRange> {
    let mut ranges = Vec::new();
    let mut cursor = 0usize;
    for token in utterance.split(' ') {
        let len = token.chars().count();
        if len > 0 {
            ranges.push(CharRange::new(cursor, len));
        }
        cursor += len + 1;
    }
    ranges
}
