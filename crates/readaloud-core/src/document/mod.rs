//! Immutable word index built from raw text.

mod segment;

use alloc::{string::String, vec::Vec};
use core::ops::Range;

pub use segment::segment;

/// Character span in document coordinates, counted in `char`s.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub struct CharRange {
    pub start: usize,
    pub len: usize,
}

impl CharRange {
    pub const fn new(start: usize, len: usize) -> Self {
        Self { start, len }
    }

    pub const fn end(self) -> usize {
        self.start + self.len
    }

    pub const fn is_empty(self) -> bool {
        self.len == 0
    }

    pub const fn offset(self, by: usize) -> Self {
        Self {
            start: self.start + by,
            len: self.len,
        }
    }

    /// Clamp to `0..limit`. Returns `None` when nothing is left.
    pub fn clamp_to(self, limit: usize) -> Option<Self> {
        if self.start >= limit {
            return None;
        }
        let end = self.end().min(limit);
        let clamped = Self::new(self.start, end - self.start);
        (!clamped.is_empty()).then_some(clamped)
    }
}

/// One whitespace-delimited token.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Word {
    pub index: usize,
    pub char_start: usize,
    pub char_len: usize,
    bytes: Range<usize>,
}

impl Word {
    pub const fn char_range(&self) -> CharRange {
        CharRange::new(self.char_start, self.char_len)
    }
}

/// One line of the source text; the unit dispatched to the speech engine.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Utterance {
    pub words: Range<usize>,
    pub char_start: usize,
    pub char_len: usize,
    bytes: Range<usize>,
}

impl Utterance {
    pub fn word_count(&self) -> usize {
        self.words.len()
    }
}

/// Segmented text. Built once per reading session and shared read-only by
/// the playback and scrub controllers.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Document {
    raw_text: String,
    char_len: usize,
    utterances: Vec<Utterance>,
    words: Vec<Word>,
}

impl Document {
    pub fn raw_text(&self) -> &str {
        &self.raw_text
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Length of the raw text in chars.
    pub fn char_len(&self) -> usize {
        self.char_len
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn words(&self) -> &[Word] {
        &self.words
    }

    pub fn utterances(&self) -> &[Utterance] {
        &self.utterances
    }

    pub fn word(&self, index: usize) -> Option<&Word> {
        self.words.get(index)
    }

    pub fn word_text(&self, index: usize) -> Option<&str> {
        self.words
            .get(index)
            .map(|word| &self.raw_text[word.bytes.clone()])
    }

    pub fn word_range(&self, index: usize) -> Option<CharRange> {
        self.words.get(index).map(Word::char_range)
    }

    pub fn utterance_text(&self, utterance: &Utterance) -> &str {
        &self.raw_text[utterance.bytes.clone()]
    }

    /// Index of the utterance holding `word_index`.
    pub fn utterance_of_word(&self, word_index: usize) -> Option<usize> {
        if word_index >= self.words.len() {
            return None;
        }
        let index = self
            .utterances
            .partition_point(|utterance| utterance.words.end <= word_index);
        (index < self.utterances.len()).then_some(index)
    }

    /// Last word starting at or before `char_offset`.
    pub fn word_at_char(&self, char_offset: usize) -> Option<usize> {
        let after = self
            .words
            .partition_point(|word| word.char_start <= char_offset);
        after.checked_sub(1)
    }

    /// Suffix of a word's utterance beginning at that word, with the
    /// utterance-relative character offset it was cut at.
    pub(crate) fn utterance_tail(&self, word_index: usize) -> Option<(usize, &str)> {
        let word = self.words.get(word_index)?;
        let utterance = &self.utterances[self.utterance_of_word(word_index)?];
        let cut = word.char_start - utterance.char_start;
        Some((cut, &self.raw_text[word.bytes.start..utterance.bytes.end]))
    }
}
