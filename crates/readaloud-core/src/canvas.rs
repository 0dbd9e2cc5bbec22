//! Host text view contract.

use crate::document::CharRange;

/// Emphasis state of a character. Canvases keep every other style attribute
/// (font, size, paragraph style) untouched when this changes.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum Emphasis {
    #[default]
    Normal,
    Highlighted,
}

/// Styled text surface the highlight is projected onto. Offsets are `char`
/// positions in [`TextCanvas::text`].
pub trait TextCanvas {
    type Error;

    fn text(&self) -> &str;

    fn emphasis_at(&self, offset: usize) -> Emphasis;

    /// Restyle `range`, preserving all attributes other than emphasis.
    fn set_emphasis(&mut self, range: CharRange, emphasis: Emphasis) -> Result<(), Self::Error>;

    fn scroll_to_visible(&mut self, range: CharRange) -> Result<(), Self::Error>;

    /// Mirror the spoken range as the view's selection when supported.
    fn select(&mut self, _range: CharRange) -> Result<(), Self::Error> {
        Ok(())
    }
}
