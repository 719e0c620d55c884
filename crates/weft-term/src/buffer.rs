// SPDX-License-Identifier: MIT
//
// FrameBuffer: the cell grid a whole frame is painted into.
//
// The event loop owns one of these, sized to the terminal. Each frame it is
// cleared, handed to the application's `paint`, and then passed to the
// screen renderer, which diffs it against the previous frame.
//
// Layout is a flat row-major `Vec<Cell>`: a row is a contiguous slice, so
// the renderer's left-to-right scan is linear and whole-row comparisons are
// a single slice `==`.
//
// The frame buffer is also the root `DrawTarget`. Controls never see it
// directly; they receive a `Region` of it scoped to their bounds.

use unicode_width::UnicodeWidthChar;

use crate::cell::Cell;
use crate::color::CellColor;
use crate::surface::{DrawError, DrawTarget};

// ─── FrameBuffer ─────────────────────────────────────────────────────────────

/// A `width × height` grid of cells.
#[derive(Clone, PartialEq, Eq)]
pub struct FrameBuffer {
    width: u16,
    height: u16,
    cells: Vec<Cell>,
}

impl FrameBuffer {
    /// Create a buffer filled with [`Cell::EMPTY`].
    #[must_use]
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            cells: vec![Cell::EMPTY; usize::from(width) * usize::from(height)],
        }
    }

    #[inline]
    #[must_use]
    pub const fn width(&self) -> u16 {
        self.width
    }

    #[inline]
    #[must_use]
    pub const fn height(&self) -> u16 {
        self.height
    }

    /// Row-major index of `(x, y)`, or `None` when outside the grid.
    #[inline]
    fn index(&self, x: u16, y: u16) -> Option<usize> {
        (x < self.width && y < self.height)
            .then(|| usize::from(y) * usize::from(self.width) + usize::from(x))
    }

    #[inline]
    #[must_use]
    pub fn get(&self, x: u16, y: u16) -> Option<&Cell> {
        self.index(x, y).map(|i| &self.cells[i])
    }

    #[inline]
    pub fn get_mut(&mut self, x: u16, y: u16) -> Option<&mut Cell> {
        self.index(x, y).map(|i| &mut self.cells[i])
    }

    /// One row as a slice, or `None` when `y` is out of range.
    #[must_use]
    pub fn row(&self, y: u16) -> Option<&[Cell]> {
        if y >= self.height {
            return None;
        }
        let start = usize::from(y) * usize::from(self.width);
        Some(&self.cells[start..start + usize::from(self.width)])
    }

    /// Write one cell. Returns `false` (and writes nothing) when out of range.
    pub fn set(&mut self, x: u16, y: u16, cell: Cell) -> bool {
        match self.get_mut(x, y) {
            Some(slot) => {
                *slot = cell;
                true
            }
            None => false,
        }
    }

    /// Reset every cell to [`Cell::EMPTY`].
    pub fn clear(&mut self) {
        self.cells.fill(Cell::EMPTY);
    }

    /// Change dimensions. Contents are discarded.
    pub fn resize(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
        self.cells.clear();
        self.cells
            .resize(usize::from(width) * usize::from(height), Cell::EMPTY);
    }
}

impl DrawTarget for FrameBuffer {
    fn width(&self) -> u16 {
        self.width
    }

    fn height(&self) -> u16 {
        self.height
    }

    fn set_cell(
        &mut self,
        x: u16,
        y: u16,
        fg: CellColor,
        bg: CellColor,
        ch: char,
    ) -> Result<(), DrawError> {
        if self.set(x, y, Cell::styled(ch, fg, bg)) {
            Ok(())
        } else {
            Err(DrawError::OutOfBounds {
                x,
                y,
                width: self.width,
                height: self.height,
            })
        }
    }
}

impl std::fmt::Debug for FrameBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "FrameBuffer {}x{}", self.width, self.height)?;
        for y in 0..self.height {
            let line: String = self
                .row(y)
                .unwrap_or_default()
                .iter()
                .map(|c| c.ch)
                .collect();
            writeln!(f, "|{line}|")?;
        }
        Ok(())
    }
}

// ─── Width helpers ───────────────────────────────────────────────────────────

/// Display width of a character in terminal columns.
///
/// Control characters report 0. Wide CJK and most emoji report 2.
#[inline]
#[must_use]
pub fn char_width(ch: char) -> usize {
    ch.width().unwrap_or(0)
}

// ─── Tests ───────────────────────────────────────────────────────────────────
