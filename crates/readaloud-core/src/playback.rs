//! Main speech playback and its word-position bookkeeping.

use alloc::vec::Vec;

use log::{debug, info, warn};

use crate::{
    Error,
    canvas::TextCanvas,
    document::{CharRange, Document},
    highlight::HighlightRenderer,
    speech::{Boundary, Channel, SpeechEngine, SpeechParams, SpeechRequest},
};

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum PlaybackState {
    #[default]
    Idle,
    Speaking,
    Paused,
}

/// Result of a playback transition, reported back to the app.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Transition {
    Started { from: usize },
    Paused,
    Resumed,
    /// An utterance finished and another one is queued.
    Advanced,
    Finished,
    Ignored,
}

/// A dispatched utterance, anchored in document coordinates.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ScheduledUtterance {
    pub char_start: usize,
    pub char_len: usize,
}

impl ScheduledUtterance {
    const fn char_end(self) -> usize {
        self.char_start + self.char_len
    }
}

/// Progress of one speaking episode.
///
/// `cumulative_spoken_chars` counts from `origin_char`, the document offset of
/// `start_word_index`, so the cut applied to the first utterance is part of the
/// anchor rather than a special case.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct PlaybackSession {
    pub state: PlaybackState,
    pub start_word_index: usize,
    pub cumulative_spoken_chars: usize,
    pub current_word_index: usize,
    pub origin_char: usize,
    schedule: Vec<ScheduledUtterance>,
    finished: usize,
}

impl PlaybackSession {
    fn speaking(
        start_word_index: usize,
        origin_char: usize,
        schedule: Vec<ScheduledUtterance>,
    ) -> Self {
        Self {
            state: PlaybackState::Speaking,
            start_word_index,
            cumulative_spoken_chars: 0,
            current_word_index: start_word_index,
            origin_char,
            schedule,
            finished: 0,
        }
    }

    pub fn schedule(&self) -> &[ScheduledUtterance] {
        &self.schedule
    }

    pub fn finished_utterances(&self) -> usize {
        self.finished
    }

    /// Document range for a sub-range of the utterance being spoken.
    pub fn absolute_range(&self, relative: CharRange) -> CharRange {
        relative.offset(self.origin_char + self.cumulative_spoken_chars)
    }

    /// Record that the word at `word_index` is about to be spoken.
    pub fn advance_word(&mut self, word_index: usize) {
        self.current_word_index = self.current_word_index.max(word_index);
    }

    /// Account the current utterance as spoken. Returns `true` once every
    /// scheduled utterance has finished.
    pub fn finish_utterance(&mut self) -> bool {
        let Some(done) = self.schedule.get(self.finished).copied() else {
            return true;
        };
        self.finished += 1;

        // Blank lines are never dispatched; their newlines still count.
        let skipped = self
            .schedule
            .get(self.finished)
            .map_or(0, |next| next.char_start - done.char_end() - 1);
        self.cumulative_spoken_chars += done.char_len + 1 + skipped;

        self.finished >= self.schedule.len()
    }
}

/// Drives the main speech channel and keeps the highlight on the word being
/// spoken.
#[derive(Debug, Default)]
pub struct PlaybackController {
    session: PlaybackSession,
    resume_point: Option<usize>,
    params: SpeechParams,
}

impl PlaybackController {
    pub fn new(params: SpeechParams) -> Self {
        Self {
            session: PlaybackSession::default(),
            resume_point: None,
            params,
        }
    }

    pub fn state(&self) -> PlaybackState {
        self.session.state
    }

    pub fn is_idle(&self) -> bool {
        self.session.state == PlaybackState::Idle
    }

    pub fn session(&self) -> &PlaybackSession {
        &self.session
    }

    pub fn current_word_index(&self) -> usize {
        self.session.current_word_index
    }

    /// Word the next start from idle begins at.
    pub fn resume_point(&self) -> Option<usize> {
        self.resume_point
    }

    pub fn set_resume_point(&mut self, word_index: Option<usize>) {
        self.resume_point = word_index;
    }

    /// Speak from `from` to the end of the document.
    pub fn start<E, C>(
        &mut self,
        from: usize,
        doc: &Document,
        engine: &mut E,
        canvas: &mut C,
        highlight: &mut HighlightRenderer,
    ) -> Result<Transition, Error>
    where
        E: SpeechEngine,
        C: TextCanvas,
    {
        if doc.is_empty() {
            debug!("playback: start ignored, document is empty");
            return Err(Error::EmptyDocument);
        }
        let (Some(first), Some((cut, head))) =
            (doc.utterance_of_word(from), doc.utterance_tail(from))
        else {
            debug!("playback: start ignored word={} len={}", from, doc.len());
            return Err(Error::OutOfRangeWordIndex {
                index: from as i64,
                len: doc.len(),
            });
        };

        if !self.is_idle() {
            self.stop(engine)?;
        }

        let origin_char = doc.utterances()[first].char_start + cut;
        let mut schedule = Vec::with_capacity(doc.utterances().len() - first);
        schedule.push(ScheduledUtterance {
            char_start: origin_char,
            char_len: head.chars().count(),
        });

        let mut dispatched = self.dispatch(engine, head);
        for utterance in &doc.utterances()[first + 1..] {
            if dispatched.is_err() {
                break;
            }
            if utterance.word_count() == 0 {
                continue;
            }
            schedule.push(ScheduledUtterance {
                char_start: utterance.char_start,
                char_len: utterance.char_len,
            });
            dispatched = self.dispatch(engine, doc.utterance_text(utterance));
        }

        if dispatched.is_err() {
            warn!("playback: engine rejected speak request, halting");
            let _ = engine.stop(Boundary::Immediate);
            let _ = highlight.clear(canvas);
            self.session = PlaybackSession::default();
            return Err(Error::EngineUnavailable(Channel::Main));
        }

        info!(
            "playback: start word={} cut={} utterances={}",
            from,
            cut,
            schedule.len()
        );
        self.resume_point = None;
        self.session = PlaybackSession::speaking(from, origin_char, schedule);
        Ok(Transition::Started { from })
    }

    /// Tap handling: pause, resume, or start from the resume point.
    pub fn toggle<E, C>(
        &mut self,
        doc: &Document,
        engine: &mut E,
        canvas: &mut C,
        highlight: &mut HighlightRenderer,
    ) -> Result<Transition, Error>
    where
        E: SpeechEngine,
        C: TextCanvas,
    {
        match self.session.state {
            PlaybackState::Speaking => {
                if engine.pause(Boundary::Word).is_err() {
                    return Err(self.halt(engine, canvas, highlight));
                }
                debug!(
                    "playback: paused word={}",
                    self.session.current_word_index
                );
                self.session.state = PlaybackState::Paused;
                Ok(Transition::Paused)
            }
            PlaybackState::Paused => {
                if engine.resume().is_err() {
                    return Err(self.halt(engine, canvas, highlight));
                }
                debug!(
                    "playback: resumed word={}",
                    self.session.current_word_index
                );
                self.session.state = PlaybackState::Speaking;
                Ok(Transition::Resumed)
            }
            PlaybackState::Idle => {
                let from = match self.resume_point.take() {
                    Some(index) if index < doc.len() => index,
                    Some(index) => {
                        debug!(
                            "playback: dropped resume point word={} len={}",
                            index,
                            doc.len()
                        );
                        0
                    }
                    None => 0,
                };
                self.start(from, doc, engine, canvas, highlight)
            }
        }
    }

    /// Interrupt playback immediately. The interrupted word becomes the
    /// resume point.
    pub fn stop<E>(&mut self, engine: &mut E) -> Result<Option<usize>, Error>
    where
        E: SpeechEngine,
    {
        if self.is_idle() {
            return Ok(None);
        }

        let interrupted = self.session.current_word_index;
        let stopped = engine.stop(Boundary::Immediate);
        self.session = PlaybackSession::default();
        self.resume_point = Some(interrupted);
        debug!("playback: stopped word={}", interrupted);

        stopped.map_err(|_| {
            warn!("playback: engine rejected stop request");
            Error::EngineUnavailable(Channel::Main)
        })?;
        Ok(Some(interrupted))
    }

    /// Word-boundary callback from the main engine.
    pub fn on_will_speak<C>(
        &mut self,
        range: CharRange,
        doc: &Document,
        canvas: &mut C,
        highlight: &mut HighlightRenderer,
    ) -> Result<(), Error>
    where
        C: TextCanvas,
    {
        if self.is_idle() {
            debug!(
                "playback: stale boundary start={} len={}",
                range.start, range.len
            );
            return Ok(());
        }

        let absolute = self.session.absolute_range(range);
        if let Some(word_index) = doc.word_at_char(absolute.start) {
            self.session.advance_word(word_index);
        }

        if canvas.select(absolute).is_err() {
            warn!("playback: canvas rejected selection");
        }
        highlight.set_active(canvas, absolute, doc.char_len())
    }

    /// Utterance-finished callback from the main engine.
    pub fn on_utterance_finished<C>(
        &mut self,
        utterance: &str,
        canvas: &mut C,
        highlight: &mut HighlightRenderer,
    ) -> Result<Transition, Error>
    where
        C: TextCanvas,
    {
        if self.is_idle() {
            debug!("playback: stale finish {:?}", utterance);
            return Ok(Transition::Ignored);
        }

        if let Some(expected) = self.session.schedule.get(self.session.finished) {
            let reported = utterance.chars().count();
            if reported != expected.char_len {
                warn!(
                    "playback: finished utterance length {} differs from scheduled {}",
                    reported, expected.char_len
                );
            }
        }

        if !self.session.finish_utterance() {
            return Ok(Transition::Advanced);
        }

        info!(
            "playback: finished start_word={} last_word={}",
            self.session.start_word_index, self.session.current_word_index
        );
        self.session = PlaybackSession::default();
        self.resume_point = None;
        highlight.clear(canvas)?;
        Ok(Transition::Finished)
    }

    /// Reset to idle after an engine failure.
    fn halt<E, C>(
        &mut self,
        engine: &mut E,
        canvas: &mut C,
        highlight: &mut HighlightRenderer,
    ) -> Error
    where
        E: SpeechEngine,
        C: TextCanvas,
    {
        warn!(
            "playback: engine unavailable, halting at word={}",
            self.session.current_word_index
        );
        let _ = engine.stop(Boundary::Immediate);
        let _ = highlight.clear(canvas);
        self.resume_point = Some(self.session.current_word_index);
        self.session = PlaybackSession::default();
        Error::EngineUnavailable(Channel::Main)
    }

    fn dispatch<E>(&self, engine: &mut E, text: &str) -> Result<(), E::Error>
    where
        E: SpeechEngine,
    {
        engine.speak(&SpeechRequest {
            text,
            params: self.params,
        })
    }
}
