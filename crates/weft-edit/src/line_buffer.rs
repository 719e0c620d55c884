//! `LineBuffer`: the stock [`TextBackend`].
//!
//! Lines are stored as a `Vec` of cell vectors with no terminators. The
//! document is never empty: `set_text("")` and removing every line both
//! leave a single empty line.

use std::fmt;
use std::ops::RangeInclusive;

use crate::backend::{ChangeHandler, ClampLimit, CursorSlot, Line, Slot, TextBackend};
use crate::cell::CharCell;
use crate::error::EditError;
use crate::position::Position;

/// A document as a vector of lines plus a cursor.
pub struct LineBuffer {
    lines: Vec<Line>,
    cursor: Position,
    revision: u64,
    on_change: Option<ChangeHandler>,
}

impl LineBuffer {
    /// An empty document: one empty line.
    #[must_use]
    pub fn new() -> Self {
        Self {
            lines: vec![Line::new()],
            cursor: Position::ZERO,
            revision: 0,
            on_change: None,
        }
    }

    /// A document holding `text`, cursor at the origin.
    #[must_use]
    pub fn from_text(text: &str) -> Self {
        let mut buf = Self::new();
        buf.lines = split_lines(text);
        buf
    }

    fn check_range(&self, range: &RangeInclusive<usize>) {
        assert!(
            range.start() <= range.end() && *range.end() < self.lines.len(),
            "line range {range:?} out of bounds for {} lines",
            self.lines.len()
        );
    }

    /// Bump the revision and run the change handler.
    ///
    /// The handler is taken out for the call so it can borrow the buffer
    /// mutably. A handler installed from inside the call wins over the old
    /// one.
    fn changed(&mut self) {
        self.revision += 1;
        if let Some(mut handler) = self.on_change.take() {
            handler(self);
            if self.on_change.is_none() {
                self.on_change = Some(handler);
            }
        }
    }

    fn current_line_mut(&mut self) -> &mut Line {
        let line = self.cursor.line;
        self.lines
            .get_mut(line)
            .unwrap_or_else(|| panic!("cursor line {line} out of bounds"))
    }
}

impl Default for LineBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for LineBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LineBuffer")
            .field("lines", &self.lines.len())
            .field("cursor", &self.cursor)
            .field("revision", &self.revision)
            .finish_non_exhaustive()
    }
}

fn split_lines(text: &str) -> Vec<Line> {
    text.split('\n')
        .map(|s| CharCell::from_text(s).collect())
        .collect()
}

impl TextBackend for LineBuffer {
    fn text(&self) -> String {
        let mut out = String::new();
        for (i, line) in self.lines.iter().enumerate() {
            if i > 0 {
                out.push('\n');
            }
            out.extend(line.iter().map(|c| c.ch));
        }
        out
    }

    fn set_text(&mut self, raw: &str) {
        self.lines = split_lines(raw);
        self.cursor = Position::ZERO;
        self.changed();
    }

    fn insert(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        let line_index = self.cursor.line;
        let col = self.cursor.col;
        let current = self.current_line_mut();
        let col = col.min(current.len());

        let mut pieces = text.split('\n');
        let first = pieces.next().unwrap_or_default();
        let mut rest: Vec<Line> = pieces.map(|s| CharCell::from_text(s).collect()).collect();

        if rest.is_empty() {
            let added = first.chars().count();
            current.splice(col..col, CharCell::from_text(first));
            self.cursor.col = col + added;
        } else {
            let tail = current.split_off(col);
            current.extend(CharCell::from_text(first));
            let added = rest.len();
            let mut end_col = 0;
            if let Some(last) = rest.last_mut() {
                end_col = last.len();
                last.extend(tail);
            }
            let at = line_index + 1;
            self.lines.splice(at..at, rest);
            self.cursor = Position::new(line_index + added, end_col);
        }
        self.changed();
    }

    fn delete(&mut self) -> bool {
        let line = self.cursor.line;
        match self.cursor_slot() {
            CursorSlot::OnChar(col) => {
                self.lines[line].remove(col);
            }
            CursorSlot::OnTerminator if line + 1 < self.lines.len() => {
                let next = self.lines.remove(line + 1);
                self.lines[line].extend(next);
            }
            CursorSlot::OnTerminator => return false,
        }
        self.changed();
        true
    }

    #[inline]
    fn cursor(&self) -> Position {
        self.cursor
    }

    #[inline]
    fn set_cursor(&mut self, pos: Position) {
        self.cursor = pos;
    }

    fn cursor_next(&mut self) -> bool {
        let Position { line, col } = self.cursor;
        let len = self.lines.get(line).map_or(0, Vec::len);
        if col < len {
            self.cursor.col = col + 1;
        } else if line + 1 < self.lines.len() {
            self.cursor = Position::new(line + 1, 0);
        } else {
            return false;
        }
        true
    }

    fn cursor_previous(&mut self) -> bool {
        let Position { line, col } = self.cursor;
        let len = self.lines.get(line).map_or(0, Vec::len);
        if col.min(len) > 0 {
            self.cursor.col = col.min(len) - 1;
        } else if line > 0 {
            let prev = line.min(self.lines.len()) - 1;
            self.cursor = Position::new(prev, self.lines[prev].len());
        } else {
            return false;
        }
        true
    }

    fn cursor_beginning_of_line(&mut self) {
        self.cursor.col = 0;
    }

    fn cursor_end_of_line(&mut self) {
        self.cursor.col = self.lines.get(self.cursor.line).map_or(0, Vec::len);
    }

    fn line_previous(&mut self) {
        self.cursor.line = self.cursor.line.saturating_sub(1);
    }

    fn line_next(&mut self) {
        self.cursor.line += 1;
    }

    fn cursor_beginning(&mut self) {
        self.cursor = Position::ZERO;
    }

    fn clamp_cursor(&mut self, limit: ClampLimit) {
        let line = self.cursor.line.min(self.lines.len() - 1);
        let len = self.lines[line].len();
        let max_col = match limit {
            ClampLimit::AllowTerminator => len,
            ClampLimit::OnCharacter => len.saturating_sub(1),
        };
        self.cursor = Position::new(line, self.cursor.col.min(max_col));
    }

    #[inline]
    fn line_count(&self) -> usize {
        self.lines.len()
    }

    fn line(&self, index: usize) -> &[CharCell] {
        self.lines
            .get(index)
            .unwrap_or_else(|| panic!("line {index} out of bounds"))
    }

    fn lines(&self, range: RangeInclusive<usize>) -> Vec<Line> {
        self.check_range(&range);
        self.lines[range].to_vec()
    }

    fn remove_lines(&mut self, range: RangeInclusive<usize>) {
        self.check_range(&range);
        let (start, end) = (*range.start(), *range.end());
        self.lines.drain(range);
        if self.lines.is_empty() {
            self.lines.push(Line::new());
        }

        let removed = end - start + 1;
        if self.cursor.line > end {
            self.cursor.line -= removed;
        } else if self.cursor.line >= start {
            self.cursor = Position::new(start.min(self.lines.len() - 1), 0);
        }
        self.changed();
    }

    fn char_at(&self, index: usize) -> Result<CharCell, EditError> {
        let mut rest = index;
        for line in &self.lines {
            match rest.cmp(&line.len()) {
                std::cmp::Ordering::Less => return Ok(line[rest]),
                std::cmp::Ordering::Equal => return Ok(CharCell::new('\n')),
                std::cmp::Ordering::Greater => rest -= line.len() + 1,
            }
        }
        Err(EditError::OutOfRange {
            index,
            len: self.lines.iter().map(|l| l.len() + 1).sum(),
        })
    }

    fn cursor_index(&self) -> usize {
        let before: usize = self.lines[..self.cursor.line.min(self.lines.len())]
            .iter()
            .map(|l| l.len() + 1)
            .sum();
        before + self.cursor.col
    }

    fn all_chars(&mut self) -> Vec<Slot<'_>> {
        let total = self.lines.iter().map(|l| l.len() + 1).sum();
        let mut slots = Vec::with_capacity(total);
        for line in &mut self.lines {
            slots.extend(line.iter_mut().map(Slot::Cell));
            slots.push(Slot::Newline);
        }
        slots
    }

    fn set_change_handler(&mut self, handler: Option<ChangeHandler>) {
        self.on_change = handler;
    }

    #[inline]
    fn revision(&self) -> u64 {
        self.revision
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
