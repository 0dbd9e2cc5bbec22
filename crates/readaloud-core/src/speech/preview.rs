use log::{debug, warn};

use super::{Boundary, Channel, SpeechEngine, SpeechParams, SpeechRequest};
use crate::Error;

/// Dedicated engine for single-word scrub previews.
///
/// Latest request wins: a preview still playing is stopped before the next
/// one is spoken, so at most one preview is ever active.
#[derive(Debug)]
pub struct PreviewChannel<E> {
    engine: E,
    params: SpeechParams,
}

impl<E> PreviewChannel<E>
where
    E: SpeechEngine,
{
    pub fn new(engine: E, params: SpeechParams) -> Self {
        Self { engine, params }
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut E {
        &mut self.engine
    }

    pub fn play(&mut self, word: &str) -> Result<(), Error> {
        self.cancel()?;
        debug!("preview: speak {:?}", word);
        self.engine
            .speak(&SpeechRequest {
                text: word,
                params: self.params,
            })
            .map_err(|_| {
                warn!("preview: engine rejected speak request");
                Error::EngineUnavailable(Channel::Preview)
            })
    }

    pub fn cancel(&mut self) -> Result<(), Error> {
        if !self.engine.is_speaking() {
            return Ok(());
        }
        self.engine.stop(Boundary::Immediate).map_err(|_| {
            warn!("preview: engine rejected stop request");
            Error::EngineUnavailable(Channel::Preview)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{EngineCall, RecordingEngine};

    #[test]
    fn second_preview_stops_the_first() {
        let mut channel = PreviewChannel::new(RecordingEngine::default(), SpeechParams::PREVIEW);
        channel.play("one").unwrap();
        channel.play("two").unwrap();

        assert_eq!(
            channel.engine().calls,
            [
                EngineCall::Speak("one".into(), SpeechParams::PREVIEW),
                EngineCall::Stop(Boundary::Immediate),
                EngineCall::Speak("two".into(), SpeechParams::PREVIEW),
            ]
        );
        assert_eq!(channel.engine().max_queued, 1);
    }

    #[test]
    fn idle_channel_is_not_stopped() {
        let mut channel = PreviewChannel::new(RecordingEngine::default(), SpeechParams::PREVIEW);
        channel.cancel().unwrap();
        assert!(channel.engine().calls.is_empty());
    }

    #[test]
    fn rejected_speak_maps_to_preview_channel() {
        let mut engine = RecordingEngine::default();
        engine.fail_speak = true;
        let mut channel = PreviewChannel::new(engine, SpeechParams::PREVIEW);
        assert_eq!(
            channel.play("x"),
            Err(Error::EngineUnavailable(Channel::Preview))
        );
    }
}
