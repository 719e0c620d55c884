// SPDX-License-Identifier: MIT
//
// Cell: one character position on the terminal grid.
//
// A cell is what the terminal actually stores at a coordinate: a character
// and its two colors. Frame buffers are flat vectors of these, and the
// screen renderer compares them with `==` to decide what to redraw, so the
// type is `Copy` and small.

use std::fmt;

use crate::color::CellColor;

/// A single character cell.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    /// The character shown in this cell.
    pub ch: char,
    /// Foreground (text) color.
    pub fg: CellColor,
    /// Background color.
    pub bg: CellColor,
}

impl Cell {
    /// A blank cell in the terminal's default colors.
    pub const EMPTY: Self = Self {
        ch: ' ',
        fg: CellColor::Default,
        bg: CellColor::Default,
    };

    /// A cell with default colors.
    #[inline]
    #[must_use]
    pub const fn new(ch: char) -> Self {
        Self {
            ch,
            fg: CellColor::Default,
            bg: CellColor::Default,
        }
    }

    /// A cell with explicit colors.
    #[inline]
    #[must_use]
    pub const fn styled(ch: char, fg: CellColor, bg: CellColor) -> Self {
        Self { ch, fg, bg }
    }

    /// Whether two cells would need the same SGR state to render.
    #[inline]
    #[must_use]
    pub fn same_style(&self, other: &Self) -> bool {
        self.fg == other.fg && self.bg == other.bg
    }
}

impl Default for Cell {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl fmt::Debug for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Cell({:?}", self.ch)?;
        if !self.fg.is_default() {
            write!(f, " fg={}", self.fg)?;
        }
        if !self.bg.is_default() {
            write!(f, " bg={}", self.bg)?;
        }
        f.write_str(")")
    }
}
