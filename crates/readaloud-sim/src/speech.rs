use std::collections::VecDeque;

use log::{debug, trace};

use readaloud_core::{
    document::CharRange,
    speech::{Boundary, SpeechEngine, SpeechEvent, SpeechParams, SpeechRequest},
};

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum SimSpeechError {
    Unavailable,
}

/// Owned progress event produced by [`SimulatedSpeech::next_event`].
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum SimEvent {
    WillSpeak { range: CharRange, utterance: String },
    Finished { utterance: String },
}

impl SimEvent {
    pub fn as_speech_event(&self) -> SpeechEvent<'_> {
        match self {
            Self::WillSpeak { range, utterance } => SpeechEvent::WillSpeak {
                range: *range,
                utterance,
            },
            Self::Finished { utterance } => SpeechEvent::Finished { utterance },
        }
    }
}

#[derive(Debug, Clone)]
struct QueuedUtterance {
    text: String,
    params: SpeechParams,
    boundaries: Vec<CharRange>,
    next_boundary: usize,
}

impl QueuedUtterance {
    fn new(request: &SpeechRequest<'_>) -> Self {
        Self {
            text: request.text.to_owned(),
            params: request.params,
            boundaries: word_boundaries(request.text),
            next_boundary: 0,
        }
    }
}

/// Speech engine that "speaks" one word per [`SimulatedSpeech::next_event`]
/// call, using its own whitespace segmentation for word boundaries.
#[derive(Debug, Clone, Default)]
pub struct SimulatedSpeech {
    name: &'static str,
    queue: VecDeque<QueuedUtterance>,
    paused: bool,
    available: bool,
    spoken: Vec<String>,
}

impl SimulatedSpeech {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            queue: VecDeque::new(),
            paused: false,
            available: true,
            spoken: Vec::new(),
        }
    }

    /// Make every following request fail, or recover.
    pub fn set_available(&mut self, available: bool) {
        self.available = available;
    }

    /// Texts of every accepted speak request, in order.
    pub fn spoken(&self) -> &[String] {
        &self.spoken
    }

    pub fn queued(&self) -> usize {
        self.queue.len()
    }

    /// Advance playback by one word boundary or utterance end.
    pub fn next_event(&mut self) -> Option<SimEvent> {
        if self.paused {
            return None;
        }
        let front = self.queue.front_mut()?;

        if let Some(range) = front.boundaries.get(front.next_boundary).copied() {
            front.next_boundary += 1;
            trace!("{}: will speak {:?}", self.name, range);
            return Some(SimEvent::WillSpeak {
                range,
                utterance: front.text.clone(),
            });
        }

        let finished = self.queue.pop_front()?;
        trace!(
            "{}: finished rate={} {:?}",
            self.name, finished.params.rate, finished.text
        );
        Some(SimEvent::Finished {
            utterance: finished.text,
        })
    }

    fn ensure_available(&self) -> Result<(), SimSpeechError> {
        if self.available {
            Ok(())
        } else {
            Err(SimSpeechError::Unavailable)
        }
    }
}

impl SpeechEngine for SimulatedSpeech {
    type Error = SimSpeechError;

    fn speak(&mut self, request: &SpeechRequest<'_>) -> Result<(), Self::Error> {
        self.ensure_available()?;
        debug!(
            "{}: speak rate={} delays={}/{}ms {:?}",
            self.name,
            request.params.rate,
            request.params.pre_delay_ms,
            request.params.post_delay_ms,
            request.text
        );
        self.spoken.push(request.text.to_owned());
        self.queue.push_back(QueuedUtterance::new(request));
        Ok(())
    }

    fn pause(&mut self, boundary: Boundary) -> Result<(), Self::Error> {
        self.ensure_available()?;
        debug!("{}: pause at {:?}", self.name, boundary);
        self.paused = true;
        Ok(())
    }

    fn resume(&mut self) -> Result<(), Self::Error> {
        self.ensure_available()?;
        debug!("{}: resume", self.name);
        self.paused = false;
        Ok(())
    }

    fn stop(&mut self, boundary: Boundary) -> Result<(), Self::Error> {
        self.ensure_available()?;
        debug!(
            "{}: stop at {:?}, dropping {} utterances",
            self.name,
            boundary,
            self.queue.len()
        );
        self.queue.clear();
        self.paused = false;
        Ok(())
    }

    fn is_speaking(&self) -> bool {
        !self.queue.is_empty()
    }

    fn is_paused(&self) -> bool {
        self.paused
    }
}

fn word_boundaries(text: &str) -> Vec<CharRange> {
    let mut ranges = Vec::new();
    let mut start = None;
    let mut offset = 0usize;

    for ch in text.chars() {
        match (ch.is_whitespace(), start) {
            (false, None) => start = Some(offset),
            (true, Some(begin)) => {
                ranges.push(CharRange::new(begin, offset - begin));
                start = None;
            }
            _ => {}
        }
        offset += 1;
    }
    if let Some(begin) = start {
        ranges.push(CharRange::new(begin, offset - begin));
    }

    ranges
}
