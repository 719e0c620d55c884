//! Tabular list with a header row and a selected row.
//!
//! ```text
//! ┌───────────────────────┐
//! │ID Name More Data      │   header
//! │3  A    Other details  │   rows, alternating row_bg / row_bg_alt
//! │7  B    Yes very many d│   selected row in selected_bg
//! └───────────────────────┘
//! ```
//!
//! Rows are painted through a [`Scrolled`] target so the selection can
//! move past the bottom edge: the view scrolls to keep it visible.

use serde::Deserialize;
use weft_term::color::CellColor;
use weft_term::input::{Event, KeyCode};
use weft_term::surface::{DrawTarget, Rect, Region, Scrolled, render_border};

use crate::control::{Control, Style};

/// A column header and its fixed width.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Column {
    pub name: String,
    pub width: u16,
}

impl Column {
    #[must_use]
    pub fn new(name: impl Into<String>, width: u16) -> Self {
        Self {
            name: name.into(),
            width,
        }
    }
}

/// Row background colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RowColors {
    pub row_bg: CellColor,
    pub row_bg_alt: CellColor,
    pub selected_bg: CellColor,
}

impl Default for RowColors {
    fn default() -> Self {
        Self {
            row_bg: CellColor::Ansi256(0),
            row_bg_alt: CellColor::Ansi256(236),
            selected_bg: CellColor::Ansi256(22),
        }
    }
}

/// A bordered table with keyboard selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailView {
    pub bounds: Rect,
    pub style: Style,
    pub colors: RowColors,
    columns: Vec<Column>,
    rows: Vec<Vec<String>>,
    selected: usize,
    scroll: usize,
    focused: bool,
}

impl DetailView {
    #[must_use]
    pub fn new(bounds: Rect, columns: Vec<Column>) -> Self {
        Self {
            bounds,
            style: Style::default(),
            colors: RowColors::default(),
            columns,
            rows: Vec::new(),
            selected: 0,
            scroll: 0,
            focused: false,
        }
    }

    #[must_use]
    pub fn with_rows(mut self, rows: Vec<Vec<String>>) -> Self {
        self.set_rows(rows);
        self
    }

    /// Replace the rows. The selection is kept if it still exists.
    pub fn set_rows(&mut self, rows: Vec<Vec<String>>) {
        self.rows = rows;
        self.selected = self.selected.min(self.rows.len().saturating_sub(1));
        self.settle();
    }

    #[must_use]
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    #[must_use]
    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    #[inline]
    #[must_use]
    pub const fn selected(&self) -> usize {
        self.selected
    }

    #[inline]
    #[must_use]
    pub const fn scroll(&self) -> usize {
        self.scroll
    }

    /// Rows that fit under the header: height minus borders and header.
    fn visible_rows(&self) -> usize {
        usize::from(self.bounds.height.saturating_sub(3))
    }

    fn settle(&mut self) {
        let visible = self.visible_rows().max(1);
        if self.selected < self.scroll {
            self.scroll = self.selected;
        }
        if self.selected >= self.scroll + visible {
            self.scroll = self.selected + 1 - visible;
        }
    }

    fn row_bg(&self, index: usize) -> CellColor {
        if index == self.selected {
            self.colors.selected_bg
        } else if index % 2 == 1 {
            self.colors.row_bg_alt
        } else {
            self.colors.row_bg
        }
    }

    /// Print one line of cells, each clipped to its column width.
    fn draw_cells<'a>(
        &self,
        target: &mut dyn DrawTarget,
        y: u16,
        bg: CellColor,
        values: impl Iterator<Item = &'a str>,
    ) {
        let mut x = 0u16;
        for (column, value) in self.columns.iter().zip(values) {
            let clipped: String = value.chars().take(usize::from(column.width)).collect();
            target.print(x, y, self.style.fg, bg, &clipped);
            x = x.saturating_add(column.width);
        }
    }
}

impl Control for DetailView {
    fn bounds(&self) -> Rect {
        self.bounds
    }

    fn draw(&mut self, target: &mut dyn DrawTarget) {
        let area = target.bounds();
        render_border(target, area, self.style.fg, self.style.bg);
        if area.width < 3 || area.height < 3 {
            return;
        }
        let inner_width = area.width - 2;

        let header = Rect::new(1, 1, inner_width, 1);
        if let Ok(mut region) = Region::new(target, header) {
            let names = self.columns.iter().map(|c| c.name.as_str());
            self.draw_cells(&mut region, 0, self.style.bg, names);
        }

        let body = Rect::new(1, 2, inner_width, area.height - 3);
        let Ok(mut region) = Region::new(target, body) else {
            return;
        };
        let total = u16::try_from(self.rows.len()).unwrap_or(u16::MAX);
        let top = u16::try_from(self.scroll).unwrap_or(u16::MAX);
        let mut rows = Scrolled::new(&mut region, inner_width, total).scrolled_to(0, top);

        for (index, row) in self.rows.iter().enumerate() {
            let Ok(y) = u16::try_from(index) else {
                break;
            };
            let bg = self.row_bg(index);
            rows.fill(Rect::new(0, y, inner_width, 1), self.style.fg, bg, ' ');
            self.draw_cells(&mut rows, y, bg, row.iter().map(String::as_str));
        }
    }

    fn focusable(&self) -> bool {
        true
    }

    fn set_focus(&mut self, focused: bool) {
        self.focused = focused;
    }

    fn handle_event(&mut self, event: &Event) -> bool {
        let Event::Key(key) = event else {
            return false;
        };
        match (key.code, key.printable()) {
            (KeyCode::Up, _) | (_, Some('k')) => self.selected = self.selected.saturating_sub(1),
            (KeyCode::Down, _) | (_, Some('j')) => {
                if self.selected + 1 < self.rows.len() {
                    self.selected += 1;
                }
            }
            _ => return false,
        }
        self.settle();
        true
    }

    fn cursor(&self) -> Option<(u16, u16)> {
        let row = self.selected.checked_sub(self.scroll)?;
        self.focused.then_some((1, u16::try_from(2 + row).ok()?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use weft_term::buffer::FrameBuffer;
    use weft_term::input::KeyEvent;

    fn sample() -> DetailView {
        DetailView::new(
            Rect::new(0, 0, 14, 4),
            vec![Column::new("ID", 3), Column::new("Name", 9)],
        )
        .with_rows(vec![
            vec!["3".into(), "Alpha".into()],
            vec!["7".into(), "Bravo and more".into()],
            vec!["13".into(), "Charlie".into()],
        ])
    }

    fn row(frame: &FrameBuffer, y: u16) -> String {
        frame.row(y).unwrap().iter().map(|c| c.ch).collect()
    }

    fn down() -> Event {
        Event::Key(KeyEvent::plain(KeyCode::Down))
    }

    #[test]
    fn draws_header_and_visible_rows() {
        let mut dv = sample();
        let mut frame = FrameBuffer::new(14, 4);
        dv.draw(&mut frame);
        assert_eq!(row(&frame, 0), "┌────────────┐");
        assert_eq!(row(&frame, 1), "│ID Name     │");
        assert_eq!(row(&frame, 2), "│3  Alpha    │");
        assert_eq!(row(&frame, 3), "└────────────┘");
        assert_eq!(frame.get(1, 2).map(|c| c.bg), Some(dv.colors.selected_bg));
    }

    #[test]
    fn selection_moves_and_scrolls() {
        let mut dv = sample();
        assert!(dv.handle_event(&down()));
        assert_eq!(dv.selected(), 1);
        assert_eq!(dv.scroll(), 1);

        let mut frame = FrameBuffer::new(14, 4);
        dv.draw(&mut frame);
        assert_eq!(row(&frame, 2), "│7  Bravo and│");

        assert!(dv.handle_event(&Event::Key(KeyEvent::plain(KeyCode::Char('j')))));
        assert!(dv.handle_event(&down()));
        assert_eq!(dv.selected(), 2);

        assert!(dv.handle_event(&Event::Key(KeyEvent::plain(KeyCode::Char('k')))));
        assert_eq!(dv.selected(), 1);
        assert_eq!(dv.scroll(), 1);
    }

    #[test]
    fn alternating_row_colors() {
        let mut dv = sample();
        dv.bounds = Rect::new(0, 0, 14, 6);
        let mut frame = FrameBuffer::new(14, 6);
        dv.draw(&mut frame);
        assert_eq!(frame.get(1, 3).map(|c| c.bg), Some(dv.colors.row_bg_alt));
        assert_eq!(frame.get(1, 4).map(|c| c.bg), Some(dv.colors.row_bg));
    }

    #[test]
    fn cursor_tracks_selection() {
        let mut dv = sample();
        assert_eq!(dv.cursor(), None);
        dv.set_focus(true);
        assert_eq!(dv.cursor(), Some((1, 2)));
    }

    #[test]
    fn other_keys_are_unhandled() {
        let mut dv = sample();
        assert!(!dv.handle_event(&Event::Key(KeyEvent::plain(KeyCode::Enter))));
    }
}
