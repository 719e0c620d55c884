// SPDX-License-Identifier: MIT
//
// Draw targets: where controls paint.
//
// A `DrawTarget` is a rectangle of cells addressed in its own local
// coordinates, origin at the top-left. The frame buffer is the root target;
// everything else is a view onto a parent:
//
//   Region: a child rectangle of its parent. Local (0, 0) maps to the
//     child's top-left corner, and writes outside the child are rejected,
//     so a control handed a Region cannot paint over its neighbours.
//
//   Scrolled: a virtual canvas larger than the parent, of which the parent
//     shows a window starting at (scroll_left, scroll_top). Content
//     scrolled out of view is silently dropped.
//
// Views borrow their parent mutably for as long as they live. Nesting them
// (a Scrolled inside a Region inside the frame) is how a container hands a
// scrolling table its slice of the screen.
//
// Text printing goes through `normalize_graphemes`: a terminal cell holds a
// single code point, so a grapheme cluster made of several code points
// (a letter plus combining accents, a flag emoji, ...) cannot be drawn
// faithfully. Such clusters are replaced with U+FFFD to make the loss
// visible instead of smearing partial code points across cells.

use thiserror::Error;
use unicode_segmentation::UnicodeSegmentation;

use crate::color::CellColor;

// ─── Rect ────────────────────────────────────────────────────────────────────

/// An axis-aligned rectangle in cell coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rect {
    pub left: u16,
    pub top: u16,
    pub width: u16,
    pub height: u16,
}

impl Rect {
    #[inline]
    #[must_use]
    pub const fn new(left: u16, top: u16, width: u16, height: u16) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// Rightmost column inside the rectangle (inclusive).
    #[inline]
    #[must_use]
    pub const fn right(self) -> u16 {
        self.left.saturating_add(self.width).saturating_sub(1)
    }

    /// Bottom row inside the rectangle (inclusive).
    #[inline]
    #[must_use]
    pub const fn bottom(self) -> u16 {
        self.top.saturating_add(self.height).saturating_sub(1)
    }

    #[inline]
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Whether `(x, y)` lies inside the rectangle.
    #[must_use]
    pub const fn contains_point(self, x: u16, y: u16) -> bool {
        x >= self.left
            && y >= self.top
            && (x as u32) < self.left as u32 + self.width as u32
            && (y as u32) < self.top as u32 + self.height as u32
    }

    /// Whether `other` lies entirely inside this rectangle.
    #[must_use]
    pub const fn contains_rect(self, other: Self) -> bool {
        other.left >= self.left
            && other.top >= self.top
            && other.left as u32 + other.width as u32 <= self.left as u32 + self.width as u32
            && other.top as u32 + other.height as u32 <= self.top as u32 + self.height as u32
    }
}

// ─── DrawError ───────────────────────────────────────────────────────────────

/// Failures reported by draw targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DrawError {
    /// A cell write addressed a coordinate outside the target.
    #[error("({x}, {y}) is outside the {width}x{height} draw target")]
    OutOfBounds {
        x: u16,
        y: u16,
        width: u16,
        height: u16,
    },
    /// A region was requested that does not fit inside its parent.
    #[error("region {child:?} exceeds its parent {parent:?}")]
    RegionExceedsParent { child: Rect, parent: Rect },
}

// ─── DrawTarget ──────────────────────────────────────────────────────────────

/// A paintable rectangle of cells in local coordinates.
pub trait DrawTarget {
    /// Width in cells.
    fn width(&self) -> u16;

    /// Height in cells.
    fn height(&self) -> u16;

    /// Write one cell.
    ///
    /// # Errors
    ///
    /// [`DrawError::OutOfBounds`] when `(x, y)` is outside
    /// `0..width × 0..height`. Nothing is written in that case.
    fn set_cell(
        &mut self,
        x: u16,
        y: u16,
        fg: CellColor,
        bg: CellColor,
        ch: char,
    ) -> Result<(), DrawError>;

    /// The target's own extent: origin plus size.
    fn bounds(&self) -> Rect {
        Rect::new(0, 0, self.width(), self.height())
    }

    /// Print `text` starting at `(x, y)`, clipped to the target.
    ///
    /// Returns the number of cells written.
    fn print(&mut self, x: u16, y: u16, fg: CellColor, bg: CellColor, text: &str) -> u16 {
        let mut written = 0;
        for (col, ch) in (x..self.width()).zip(normalize_graphemes(text)) {
            if self.set_cell(col, y, fg, bg, ch).is_ok() {
                written += 1;
            }
        }
        written
    }

    /// Fill a rectangle with one character, clipped to the target.
    fn fill(&mut self, rect: Rect, fg: CellColor, bg: CellColor, ch: char) {
        for y in rect.top..rect.top.saturating_add(rect.height) {
            for x in rect.left..rect.left.saturating_add(rect.width) {
                let _ = self.set_cell(x, y, fg, bg, ch);
            }
        }
    }
}

// ─── Region ──────────────────────────────────────────────────────────────────

/// A child rectangle of a parent target.
///
/// Local coordinates are translated by the child's top-left corner and
/// clipped to the child's size.
pub struct Region<'a, T: DrawTarget + ?Sized> {
    parent: &'a mut T,
    area: Rect,
}

impl<'a, T: DrawTarget + ?Sized> Region<'a, T> {
    /// Scope `parent` down to `area`, given in the parent's coordinates.
    ///
    /// # Errors
    ///
    /// [`DrawError::RegionExceedsParent`] when `area` does not fit inside
    /// the parent.
    pub fn new(parent: &'a mut T, area: Rect) -> Result<Self, DrawError> {
        let parent_bounds = parent.bounds();
        if !parent_bounds.contains_rect(area) {
            return Err(DrawError::RegionExceedsParent {
                child: area,
                parent: parent_bounds,
            });
        }
        Ok(Self { parent, area })
    }

    /// The region's rectangle in parent coordinates.
    #[must_use]
    pub const fn area(&self) -> Rect {
        self.area
    }
}

impl<T: DrawTarget + ?Sized> DrawTarget for Region<'_, T> {
    fn width(&self) -> u16 {
        self.area.width
    }

    fn height(&self) -> u16 {
        self.area.height
    }

    fn set_cell(
        &mut self,
        x: u16,
        y: u16,
        fg: CellColor,
        bg: CellColor,
        ch: char,
    ) -> Result<(), DrawError> {
        if !self.bounds().contains_point(x, y) {
            return Err(DrawError::OutOfBounds {
                x,
                y,
                width: self.area.width,
                height: self.area.height,
            });
        }
        self.parent
            .set_cell(self.area.left + x, self.area.top + y, fg, bg, ch)
    }
}

// ─── Scrolled ────────────────────────────────────────────────────────────────

/// A virtual canvas viewed through its parent at a scroll offset.
///
/// The canvas is `width × height`; the parent shows the window whose
/// top-left corner is `(scroll_left, scroll_top)`.
pub struct Scrolled<'a, T: DrawTarget + ?Sized> {
    parent: &'a mut T,
    width: u16,
    height: u16,
    scroll_left: u16,
    scroll_top: u16,
}

impl<'a, T: DrawTarget + ?Sized> Scrolled<'a, T> {
    /// A `width × height` canvas over `parent`, scrolled to the origin.
    pub fn new(parent: &'a mut T, width: u16, height: u16) -> Self {
        Self {
            parent,
            width,
            height,
            scroll_left: 0,
            scroll_top: 0,
        }
    }

    /// Move the visible window's top-left corner.
    #[must_use]
    pub const fn scrolled_to(mut self, left: u16, top: u16) -> Self {
        self.scroll_left = left;
        self.scroll_top = top;
        self
    }

    #[must_use]
    pub const fn scroll_left(&self) -> u16 {
        self.scroll_left
    }

    #[must_use]
    pub const fn scroll_top(&self) -> u16 {
        self.scroll_top
    }
}

impl<T: DrawTarget + ?Sized> DrawTarget for Scrolled<'_, T> {
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
        if !self.bounds().contains_point(x, y) {
            return Err(DrawError::OutOfBounds {
                x,
                y,
                width: self.width,
                height: self.height,
            });
        }
        let (Some(px), Some(py)) = (
            x.checked_sub(self.scroll_left),
            y.checked_sub(self.scroll_top),
        ) else {
            return Ok(());
        };
        if !self.parent.bounds().contains_point(px, py) {
            return Ok(());
        }
        self.parent.set_cell(px, py, fg, bg, ch)
    }
}

// ─── Helpers ─────────────────────────────────────────────────────────────────

/// One character per grapheme cluster; multi-code-point clusters become
/// U+FFFD.
pub fn normalize_graphemes(text: &str) -> impl Iterator<Item = char> + '_ {
    text.graphemes(true).map(|g| {
        let mut chars = g.chars();
        match (chars.next(), chars.next()) {
            (Some(ch), None) => ch,
            _ => char::REPLACEMENT_CHARACTER,
        }
    })
}

/// Draw a single-line box along the edges of `rect`.
///
/// Rectangles narrower or shorter than two cells have no interior and are
/// left untouched. Cells outside the target are clipped.
pub fn render_border<T: DrawTarget + ?Sized>(
    target: &mut T,
    rect: Rect,
    fg: CellColor,
    bg: CellColor,
) {
    if rect.width < 2 || rect.height < 2 {
        return;
    }
    let (left, top, right, bottom) = (rect.left, rect.top, rect.right(), rect.bottom());

    let mut put = |x, y, ch| {
        let _ = target.set_cell(x, y, fg, bg, ch);
    };

    put(left, top, '┌');
    put(right, top, '┐');
    put(left, bottom, '└');
    put(right, bottom, '┘');
    for x in left + 1..right {
        put(x, top, '─');
        put(x, bottom, '─');
    }
    for y in top + 1..bottom {
        put(left, y, '│');
        put(right, y, '│');
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
