//! Soft-wrap layout and scroll clamping.
//!
//! Lines wrap at the text width `W` with no regard for words. A line of
//! length `L` takes `⌈(L + 1) / W⌉` virtual rows: the `+ 1` reserves a cell
//! for the cursor on the newline, so an empty line still takes one row and
//! a line of exactly `W` chars takes two.

use std::ops::Range;

use tracing::trace;

use crate::backend::TextBackend;
use crate::position::Position;

/// Virtual rows taken by a line of `len` chars at wrap width `width`.
#[inline]
#[must_use]
pub const fn virtual_rows(len: usize, width: usize) -> usize {
    let width = if width == 0 { 1 } else { width };
    (len + 1).div_ceil(width)
}

/// Virtual rows taken by the whole document.
#[must_use]
pub fn total_rows<B: TextBackend + ?Sized>(backend: &B, width: usize) -> usize {
    (0..backend.line_count())
        .map(|i| virtual_rows(backend.line_len(i), width))
        .sum()
}

/// A position in the wrapped layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct VirtualPos {
    pub row: usize,
    pub col: usize,
}

/// Where `pos` lands in the wrapped layout.
#[must_use]
pub fn virtual_position<B: TextBackend + ?Sized>(
    backend: &B,
    pos: Position,
    width: usize,
) -> VirtualPos {
    let width = width.max(1);
    let above: usize = (0..pos.line.min(backend.line_count()))
        .map(|i| virtual_rows(backend.line_len(i), width))
        .sum();
    VirtualPos {
        row: above + pos.col / width,
        col: pos.col % width,
    }
}

/// Scroll offsets of a text area, in virtual rows and columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Viewport {
    pub scroll_row: usize,
    pub scroll_col: usize,
}

impl Viewport {
    /// Scroll just enough for `cursor` to be inside a `width × height` area.
    pub fn clamp_to(&mut self, cursor: VirtualPos, width: usize, height: usize) {
        let before = *self;
        self.scroll_row = clamp_axis(self.scroll_row, cursor.row, height);
        self.scroll_col = clamp_axis(self.scroll_col, cursor.col, width);
        if *self != before {
            trace!(row = self.scroll_row, col = self.scroll_col, "scrolled");
        }
    }

    /// Virtual rows painted in an area `height` rows tall.
    #[must_use]
    pub fn visible_rows(&self, total: usize, height: usize) -> Range<usize> {
        let start = self.scroll_row.min(total);
        start..total.min(self.scroll_row + height)
    }
}

fn clamp_axis(scroll: usize, at: usize, extent: usize) -> usize {
    if at < scroll {
        at
    } else if extent > 0 && at >= scroll + extent {
        at + 1 - extent
    } else {
        scroll
    }
}
