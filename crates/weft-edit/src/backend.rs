//! The text backend seam.
//!
//! [`EditBox`](crate::editbox::EditBox) never touches line storage
//! directly. Everything it does goes through [`TextBackend`]: text access,
//! cursor stepping, structural edits and the flattened cell view the
//! highlighter walks. [`LineBuffer`](crate::line_buffer::LineBuffer) is the
//! stock implementation.
//!
//! ## Cursor contract
//!
//! The cursor is a [`Position`]. Positional jumps (`line_next`,
//! `cursor_end_of_line`, ...) are *not* clamped: the controller runs
//! [`clamp_cursor`](TextBackend::clamp_cursor) with its mode's
//! [`ClampLimit`] once per event. Mutations (`insert`, `delete`) require a
//! cursor on an existing line.
//!
//! ## Change notification
//!
//! A backend has at most one change handler. It runs synchronously after
//! every mutation, with the backend itself as argument, so the highlighter
//! can recolor the document before control returns to the caller. A
//! monotonically increasing [`revision`](TextBackend::revision) lets the
//! controller tell whether an event changed the text.

use std::ops::RangeInclusive;

use crate::cell::CharCell;
use crate::error::EditError;
use crate::position::Position;

/// One document line. The terminator is implicit.
pub type Line = Vec<CharCell>;

/// Callback run after every mutation of a backend.
pub type ChangeHandler = Box<dyn FnMut(&mut dyn TextBackend)>;

/// How far past the last character the cursor may sit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClampLimit {
    /// Up to the implicit newline (`col <= len`). Insert mode.
    AllowTerminator,
    /// On a real character (`col <= len - 1`, or 0 on an empty line).
    OnCharacter,
}

/// What the cursor rests on within its line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorSlot {
    /// The character at this column.
    OnChar(usize),
    /// The line's implicit newline.
    OnTerminator,
}

/// An entry of the flattened, mutable document view.
///
/// Every line contributes its cells followed by one `Newline`.
#[derive(Debug)]
pub enum Slot<'a> {
    Cell(&'a mut CharCell),
    Newline,
}

impl Slot<'_> {
    /// The character this slot reads as.
    #[inline]
    #[must_use]
    pub fn ch(&self) -> char {
        match self {
            Self::Cell(cell) => cell.ch,
            Self::Newline => '\n',
        }
    }
}

/// Line-oriented text storage with a cursor.
pub trait TextBackend {
    // ── Text ──────────────────────────────────────────────────────────────

    /// All lines joined with `\n`.
    fn text(&self) -> String;

    /// Replace the whole document, splitting on `\n`, and move the cursor
    /// to the origin. Always leaves at least one line.
    fn set_text(&mut self, raw: &str);

    /// Splice `text` in at the cursor and move the cursor past it.
    ///
    /// Each embedded `\n` splits the current line.
    fn insert(&mut self, text: &str);

    /// Delete the character under the cursor, or join the next line when
    /// the cursor is on a newline. Returns `false` when there was nothing
    /// to delete.
    fn delete(&mut self) -> bool;

    // ── Cursor ────────────────────────────────────────────────────────────

    fn cursor(&self) -> Position;

    /// Move the cursor without clamping.
    fn set_cursor(&mut self, pos: Position);

    /// Step one slot forward, crossing newlines. `false` at the document end.
    fn cursor_next(&mut self) -> bool;

    /// Step one slot back, crossing newlines. `false` at the document start.
    fn cursor_previous(&mut self) -> bool;

    fn cursor_beginning_of_line(&mut self);

    /// Jump to the current line's newline slot.
    fn cursor_end_of_line(&mut self);

    /// Up one line, saturating at line 0. The column is kept.
    fn line_previous(&mut self);

    /// Down one line. May leave the cursor past the last line until clamped.
    fn line_next(&mut self);

    /// Jump to the origin.
    fn cursor_beginning(&mut self);

    /// Pull the cursor back onto the document. Idempotent.
    fn clamp_cursor(&mut self, limit: ClampLimit);

    // ── Lines ─────────────────────────────────────────────────────────────

    /// Number of lines, always at least 1.
    fn line_count(&self) -> usize;

    /// The cells of line `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds.
    fn line(&self, index: usize) -> &[CharCell];

    /// Deep copy of the lines in `range`.
    ///
    /// # Panics
    ///
    /// Panics if the range is empty or reaches past the last line.
    fn lines(&self, range: RangeInclusive<usize>) -> Vec<Line>;

    /// Remove the lines in `range`. Removing every line leaves one empty
    /// line behind.
    ///
    /// # Panics
    ///
    /// Panics if the range is empty or reaches past the last line.
    fn remove_lines(&mut self, range: RangeInclusive<usize>);

    // ── Flat access ───────────────────────────────────────────────────────

    /// The cell at flat index `index`. Every line, the last included,
    /// contributes its length plus one newline slot.
    ///
    /// # Errors
    ///
    /// [`EditError::OutOfRange`] when `index` is past the last newline.
    fn char_at(&self, index: usize) -> Result<CharCell, EditError>;

    /// The cursor's flat index.
    fn cursor_index(&self) -> usize;

    /// Every cell in document order, each line followed by a
    /// [`Slot::Newline`]. A fresh view on every call.
    fn all_chars(&mut self) -> Vec<Slot<'_>>;

    // ── Notification ──────────────────────────────────────────────────────

    /// Install (or with `None`, remove) the change handler.
    fn set_change_handler(&mut self, handler: Option<ChangeHandler>);

    /// Bumped by every mutation.
    fn revision(&self) -> u64;

    // ── Provided ──────────────────────────────────────────────────────────

    /// Length of line `index` in chars.
    fn line_len(&self, index: usize) -> usize {
        self.line(index).len()
    }

    /// Index of the last line.
    fn last_line(&self) -> usize {
        self.line_count() - 1
    }

    /// Where the cursor sits relative to its line's end.
    ///
    /// # Panics
    ///
    /// Panics if the cursor line is out of bounds.
    fn cursor_slot(&self) -> CursorSlot {
        let Position { line, col } = self.cursor();
        if col < self.line_len(line) {
            CursorSlot::OnChar(col)
        } else {
            CursorSlot::OnTerminator
        }
    }

    /// The cell under the cursor, or `None` on a newline.
    fn cell_at_cursor(&self) -> Option<CharCell> {
        match self.cursor_slot() {
            CursorSlot::OnChar(col) => Some(self.line(self.cursor().line)[col]),
            CursorSlot::OnTerminator => None,
        }
    }

    /// A single empty line.
    fn is_empty(&self) -> bool {
        self.line_count() == 1 && self.line_len(0) == 0
    }
}
