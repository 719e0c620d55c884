//! Character cells: the unit a line is made of.
//!
//! A cell pairs a character with the state the highlighter last computed
//! for it. Only the highlighter writes `fg`, `bg`, `quote` and `escaped`;
//! every other path creates plain cells with [`CharCell::new`] and waits
//! for the next highlight pass.

use weft_term::color::CellColor;

/// Which quote character opened the string a cell sits in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QuoteKind {
    /// `'`
    Single,
    /// `"`
    Double,
}

impl QuoteKind {
    /// The quote kind `ch` opens, if it is a quote at all.
    #[inline]
    #[must_use]
    pub const fn from_char(ch: char) -> Option<Self> {
        match ch {
            '\'' => Some(Self::Single),
            '"' => Some(Self::Double),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub const fn as_char(self) -> char {
        match self {
            Self::Single => '\'',
            Self::Double => '"',
        }
    }
}

/// One character of a document line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CharCell {
    pub ch: char,
    pub fg: CellColor,
    pub bg: CellColor,
    /// The quote active at this cell, opening and closing marks included.
    pub quote: Option<QuoteKind>,
    /// Escaped by a preceding backslash, or half of a doubled quote.
    pub escaped: bool,
}

impl CharCell {
    /// An unhighlighted cell.
    #[inline]
    #[must_use]
    pub const fn new(ch: char) -> Self {
        Self {
            ch,
            fg: CellColor::Default,
            bg: CellColor::Default,
            quote: None,
            escaped: false,
        }
    }

    /// Cells for every char of `text`.
    pub fn from_text(text: &str) -> impl Iterator<Item = Self> + '_ {
        text.chars().map(Self::new)
    }
}

impl From<char> for CharCell {
    fn from(ch: char) -> Self {
        Self::new(ch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn new_cell_is_plain() {
        let cell = CharCell::new('a');
        assert_eq!(cell.ch, 'a');
        assert_eq!(cell.quote, None);
        assert!(!cell.escaped);
        assert!(cell.fg.is_default());
    }

    #[test]
    fn quote_kinds() {
        assert_eq!(QuoteKind::from_char('\''), Some(QuoteKind::Single));
        assert_eq!(QuoteKind::from_char('"'), Some(QuoteKind::Double));
        assert_eq!(QuoteKind::from_char('`'), None);
        assert_eq!(QuoteKind::Double.as_char(), '"');
    }

    #[test]
    fn from_text_splits_chars() {
        let chars: String = CharCell::from_text("héllo").map(|c| c.ch).collect();
        assert_eq!(chars, "héllo");
    }
}
