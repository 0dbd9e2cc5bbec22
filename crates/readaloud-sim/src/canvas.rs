use core::fmt::Write as _;

use crossterm::style::Stylize;
use readaloud_core::{
    canvas::{Emphasis, TextCanvas},
    document::CharRange,
};

/// Font face carried per character. Restyling emphasis never touches it.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum FontFace {
    #[default]
    Regular,
    Bold,
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
struct Glyph {
    ch: char,
    font: FontFace,
    emphasis: Emphasis,
}

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum CanvasError {
    OutOfBounds { start: usize, len: usize, limit: usize },
}

/// In-memory styled text standing in for the host text view.
#[derive(Debug, Clone)]
pub struct StyledBuffer {
    text: String,
    glyphs: Vec<Glyph>,
    selection: Option<CharRange>,
    visible_line: usize,
    restyles: usize,
}

impl StyledBuffer {
    pub fn new(text: &str) -> Self {
        Self {
            text: text.to_owned(),
            glyphs: text
                .chars()
                .map(|ch| Glyph {
                    ch,
                    ..Glyph::default()
                })
                .collect(),
            selection: None,
            visible_line: 0,
            restyles: 0,
        }
    }

    pub fn replace_text(&mut self, text: &str) {
        *self = Self::new(text);
    }

    pub fn set_font(&mut self, range: CharRange, font: FontFace) {
        for glyph in self.glyphs.iter_mut().skip(range.start).take(range.len) {
            glyph.font = font;
        }
    }

    pub fn font_at(&self, offset: usize) -> Option<FontFace> {
        self.glyphs.get(offset).map(|glyph| glyph.font)
    }

    pub fn selection(&self) -> Option<CharRange> {
        self.selection
    }

    /// Zero-based line last scrolled into view.
    pub fn visible_line(&self) -> usize {
        self.visible_line
    }

    /// Number of emphasis changes applied so far.
    pub fn restyles(&self) -> usize {
        self.restyles
    }

    pub fn highlighted_text(&self) -> String {
        self.glyphs
            .iter()
            .filter(|glyph| glyph.emphasis == Emphasis::Highlighted)
            .map(|glyph| glyph.ch)
            .collect()
    }

    /// Lines `visible_line - before ..= visible_line + after`, with the
    /// highlighted run colored for a terminal.
    pub fn render_window(&self, before: usize, after: usize) -> String {
        let first = self.visible_line.saturating_sub(before);
        let last = self.visible_line.saturating_add(after);
        let mut out = String::new();
        let mut line = 0usize;

        for glyph in &self.glyphs {
            if glyph.ch == '\n' {
                if (first..=last).contains(&line) {
                    out.push('\n');
                }
                line += 1;
                continue;
            }
            if !(first..=last).contains(&line) {
                continue;
            }

            let _ = match (glyph.emphasis, glyph.font) {
                (Emphasis::Normal, FontFace::Regular) => out.write_char(glyph.ch),
                (Emphasis::Normal, FontFace::Bold) => write!(out, "{}", glyph.ch.bold()),
                (Emphasis::Highlighted, FontFace::Regular) => {
                    write!(out, "{}", glyph.ch.dark_yellow())
                }
                (Emphasis::Highlighted, FontFace::Bold) => {
                    write!(out, "{}", glyph.ch.dark_yellow().bold())
                }
            };
        }

        out.trim_end_matches('\n').to_owned()
    }

    fn check(&self, range: CharRange) -> Result<(), CanvasError> {
        if range.end() > self.glyphs.len() {
            return Err(CanvasError::OutOfBounds {
                start: range.start,
                len: range.len,
                limit: self.glyphs.len(),
            });
        }
        Ok(())
    }

    fn line_of(&self, offset: usize) -> usize {
        self.glyphs
            .iter()
            .take(offset)
            .filter(|glyph| glyph.ch == '\n')
            .count()
    }
}

impl TextCanvas for StyledBuffer {
    type Error = CanvasError;

    fn text(&self) -> &str {
        &self.text
    }

    fn emphasis_at(&self, offset: usize) -> Emphasis {
        self.glyphs
            .get(offset)
            .map(|glyph| glyph.emphasis)
            .unwrap_or_default()
    }

    fn set_emphasis(&mut self, range: CharRange, emphasis: Emphasis) -> Result<(), Self::Error> {
        self.check(range)?;
        for glyph in &mut self.glyphs[range.start..range.end()] {
            glyph.emphasis = emphasis;
        }
        self.restyles += 1;
        Ok(())
    }

    fn scroll_to_visible(&mut self, range: CharRange) -> Result<(), Self::Error> {
        self.check(range)?;
        self.visible_line = self.line_of(range.start);
        Ok(())
    }

    fn select(&mut self, range: CharRange) -> Result<(), Self::Error> {
        self.check(range)?;
        self.selection = Some(range);
        Ok(())
    }
}
