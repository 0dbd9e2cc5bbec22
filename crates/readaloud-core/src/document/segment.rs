use alloc::vec::Vec;

use super::{Document, Utterance, Word};

/// Split `raw_text` into utterances (one per `'\n'`-separated line) and words
/// (one per `' '`-separated token). Offsets advance by one for every consumed
/// separator, so empty lines and doubled spaces keep later offsets aligned with
/// the source text.
pub fn segment(raw_text: &str) -> Document {
    let mut utterances = Vec::new();
    let mut words = Vec::new();
    let mut byte_cursor = 0usize;
    let mut char_cursor = 0usize;

    for line in raw_text.split('\n') {
        let line_chars = line.chars().count();
        let first_word = words.len();
        let mut token_byte = byte_cursor;
        let mut token_char = char_cursor;

        for token in line.split(' ') {
            let token_chars = token.chars().count();
            if !token.trim().is_empty() {
                words.push(Word {
                    index: words.len(),
                    char_start: token_char,
                    char_len: token_chars,
                    bytes: token_byte..token_byte + token.len(),
                });
            }
            token_byte += token.len() + 1;
            token_char += token_chars + 1;
        }

        utterances.push(Utterance {
            words: first_word..words.len(),
            char_start: char_cursor,
            char_len: line_chars,
            bytes: byte_cursor..byte_cursor + line.len(),
        });
        byte_cursor += line.len() + 1;
        char_cursor += line_chars + 1;
    }

    Document {
        raw_text: raw_text.into(),
        char_len: char_cursor.saturating_sub(1),
        utterances,
        words,
    }
}
