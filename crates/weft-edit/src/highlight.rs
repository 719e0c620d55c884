//! Syntax highlighting for the EditBox.
//!
//! A single forward pass over [`TextBackend::all_chars`] with one slot of
//! look-ahead. The pass owns every cell's `fg`, `bg`, `quote` and `escaped`
//! fields and rewrites all of them, so running it twice gives the same
//! result as running it once.
//!
//! # Rules
//!
//! 1. **Escapes.** A cell is escaped when the previous cell is a backslash
//!    that is not itself escaped, or when it is a quote equal to the open
//!    quote that is immediately followed by the same quote. The second
//!    quote of such a pair is escaped too, so `'it''s'` is one string.
//! 2. **Strings.** An unescaped `'` or `"` opens a string when none is
//!    open; the next unescaped matching quote closes it. Every cell from
//!    opener to closer carries the quote kind and the string color.
//! 3. **Words.** Outside strings, cells between delimiters (see
//!    [`is_delimiter`](crate::word::is_delimiter)) form a word. An opening
//!    quote also ends the word before it. Each finished word is handed to
//!    the [`Dialect`], and keywords and types get their palette colors.
//!
//! The pass runs over the whole document on every edit.

use tracing::trace;

use crate::backend::{Slot, TextBackend};
use crate::cell::QuoteKind;
use crate::options::Palette;
use crate::word::is_delimiter;

/// How a dialect classifies a word.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenClass {
    Plain,
    Keyword,
    Type,
}

/// A language's keyword and type vocabulary.
///
/// Any `Fn(&str) -> TokenClass` is a dialect.
pub trait Dialect {
    fn classify(&self, word: &str) -> TokenClass;
}

impl<F: Fn(&str) -> TokenClass> Dialect for F {
    fn classify(&self, word: &str) -> TokenClass {
        self(word)
    }
}

/// Colors a document according to a dialect and a palette.
pub struct Highlighter {
    dialect: Option<Box<dyn Dialect>>,
    palette: Palette,
}

impl Highlighter {
    #[must_use]
    pub fn new(dialect: Option<Box<dyn Dialect>>, palette: Palette) -> Self {
        Self { dialect, palette }
    }

    /// Highlight every cell of `backend`.
    pub fn highlight(&self, backend: &mut dyn TextBackend) {
        let mut slots = backend.all_chars();
        self.apply(&mut slots);
    }

    /// Highlight a flattened document view.
    pub fn apply(&self, slots: &mut [Slot<'_>]) {
        let palette = &self.palette;
        let mut open: Option<QuoteKind> = None;
        let mut word_start: Option<usize> = None;
        let mut prev_escaped = false;
        let mut pair_pending = false;

        for i in 0..slots.len() {
            let ch = slots[i].ch();
            let prev = i.checked_sub(1).map(|p| slots[p].ch());
            let next = slots.get(i + 1).map(Slot::ch);

            let escaped = if pair_pending {
                pair_pending = false;
                true
            } else if prev == Some('\\') && !prev_escaped {
                true
            } else if open.is_some_and(|q| q.as_char() == ch) && next == Some(ch) {
                pair_pending = true;
                true
            } else {
                false
            };

            // The closing quote still belongs to the string.
            let mut quote_here = open;
            if !escaped {
                match open {
                    None => {
                        if let Some(kind) = QuoteKind::from_char(ch) {
                            self.finish_word(slots, &mut word_start, i);
                            open = Some(kind);
                            quote_here = open;
                        }
                    }
                    Some(kind) if kind.as_char() == ch => open = None,
                    Some(_) => {}
                }
            }

            if let Slot::Cell(cell) = &mut slots[i] {
                cell.escaped = escaped;
                cell.quote = quote_here;
                cell.fg = if quote_here.is_some() {
                    palette.string
                } else {
                    palette.text
                };
                cell.bg = palette.background;
            }

            if quote_here.is_none() {
                if is_delimiter(ch) {
                    self.finish_word(slots, &mut word_start, i);
                } else {
                    word_start.get_or_insert(i);
                }
            }
            prev_escaped = escaped;
        }

        let end = slots.len();
        self.finish_word(slots, &mut word_start, end);
        trace!(slots = end, "highlight pass");
    }

    /// Classify the word in `start..end` and color it.
    fn finish_word(&self, slots: &mut [Slot<'_>], start: &mut Option<usize>, end: usize) {
        let Some(begin) = start.take() else {
            return;
        };
        let Some(dialect) = &self.dialect else {
            return;
        };
        let word: String = slots[begin..end].iter().map(Slot::ch).collect();
        let color = match dialect.classify(&word) {
            TokenClass::Plain => return,
            TokenClass::Keyword => self.palette.keyword,
            TokenClass::Type => self.palette.type_name,
        };
        for slot in &mut slots[begin..end] {
            if let Slot::Cell(cell) = slot {
                cell.fg = color;
            }
        }
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
