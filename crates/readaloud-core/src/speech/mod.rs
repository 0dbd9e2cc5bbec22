//! Text-to-speech collaborator contract.

mod preview;

use core::fmt;

use crate::document::CharRange;

pub use preview::PreviewChannel;

/// Which engine instance an event or failure belongs to.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Channel {
    /// Full playback driven by the playback controller.
    Main,
    /// Single-word previews emitted while scrubbing.
    Preview,
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Main => f.write_str("main"),
            Self::Preview => f.write_str("preview"),
        }
    }
}

/// Where a pause or stop takes effect.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Boundary {
    Immediate,
    Word,
}

/// Rate and delays applied to one speak request.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpeechParams {
    /// Engine-native rate; `0.5` is the engine's normal speed.
    pub rate: f32,
    pub pre_delay_ms: u32,
    pub post_delay_ms: u32,
}

impl SpeechParams {
    pub const NORMAL: Self = Self::new(0.5);
    pub const PREVIEW: Self = Self::new(0.6);

    pub const fn new(rate: f32) -> Self {
        Self {
            rate,
            pre_delay_ms: 0,
            post_delay_ms: 0,
        }
    }

    pub const fn with_rate(mut self, rate: f32) -> Self {
        self.rate = rate;
        self
    }

    pub const fn with_delays(mut self, pre_delay_ms: u32, post_delay_ms: u32) -> Self {
        self.pre_delay_ms = pre_delay_ms;
        self.post_delay_ms = post_delay_ms;
        self
    }
}

impl Default for SpeechParams {
    fn default() -> Self {
        Self::NORMAL
    }
}

/// One utterance handed to the engine.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpeechRequest<'a> {
    pub text: &'a str,
    pub params: SpeechParams,
}

/// Speech synthesizer. Requests queue in order; progress comes back through
/// the host as [`SpeechEvent`]s on the same event loop as gestures.
///
/// Implementations must drop every not-yet-delivered event of an utterance
/// once `stop` returns.
pub trait SpeechEngine {
    type Error;

    fn speak(&mut self, request: &SpeechRequest<'_>) -> Result<(), Self::Error>;
    fn pause(&mut self, boundary: Boundary) -> Result<(), Self::Error>;
    fn resume(&mut self) -> Result<(), Self::Error>;
    fn stop(&mut self, boundary: Boundary) -> Result<(), Self::Error>;

    /// `true` while an utterance is queued or playing, paused included.
    fn is_speaking(&self) -> bool;
    fn is_paused(&self) -> bool;
}

/// Progress notification delivered by the engine.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SpeechEvent<'a> {
    /// `range` is relative to `utterance`, the text of the request being spoken.
    WillSpeak { range: CharRange, utterance: &'a str },
    Finished { utterance: &'a str },
}
