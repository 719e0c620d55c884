//! `EditBox`: the modal editing controller.
//!
//! Owns a [`TextBackend`], routes key events through the current [`Mode`]
//! and paints the document into any [`DrawTarget`].
//!
//! # Event flow
//!
//! 1. Global keys (Home, End, arrows, Delete, Backspace) run first in
//!    every mode, and cancel a pending chord.
//! 2. The mode handler runs: Command motions and chords, Insert typing,
//!    or VisualLine selection.
//! 3. Every backend mutation fires the change handler, which re-highlights
//!    the whole document before the mutation call returns.
//! 4. The cursor is clamped with the mode's [`ClampLimit`], the viewport
//!    is scrolled to keep it visible, and the `on_cursor_moved` and
//!    `on_change` subscribers fire if the cursor or the text changed.
//!
//! `handle_event` returns whether the key was consumed. Unknown keys are
//! left for the container to route elsewhere.
//!
//! # Layout
//!
//! ```text
//! ┌──────────────┐
//! │select *      │  text area: (width - 2) × (height - 3), soft-wrapped
//! │from t        │
//! │-- INSERT --  │  status line
//! └──────────────┘
//! ```

use std::fmt;
use std::ops::RangeInclusive;

use tracing::debug;
use weft_term::input::{Event, KeyCode, KeyEvent};
use weft_term::surface::{DrawTarget, Rect, render_border};

use crate::backend::{CursorSlot, TextBackend};
use crate::chord::{Chord, ChordCommand, ChordOutcome};
use crate::clipboard::Clipboard;
use crate::highlight::{Dialect, Highlighter};
use crate::line_buffer::LineBuffer;
use crate::mode::Mode;
use crate::options::EditOptions;
use crate::position::Position;
use crate::viewport::{Viewport, total_rows, virtual_position, virtual_rows};
use crate::word;

/// Subscriber for text changes. Receives the backend after the change.
pub type TextChanged = Box<dyn FnMut(&dyn TextBackend)>;

/// Subscriber for cursor moves. Receives the clamped cursor.
pub type CursorMoved = Box<dyn FnMut(Position)>;

/// A bordered, modal, multi-line text editor.
pub struct EditBox<B: TextBackend = LineBuffer> {
    backend: B,
    /// Where a container places the editor.
    bounds: Rect,
    options: EditOptions,
    mode: Mode,
    chord: Chord,
    clipboard: Clipboard,
    viewport: Viewport,
    /// Anchor line of the VisualLine selection.
    visual_start: usize,
    /// Text area size from the last `set_size` or render.
    text_width: usize,
    text_height: usize,
    focused: bool,
    last_cursor: Option<(u16, u16)>,
    on_change: Option<TextChanged>,
    on_cursor_moved: Option<CursorMoved>,
}

impl EditBox<LineBuffer> {
    /// An empty editor with a [`LineBuffer`] backend.
    #[must_use]
    pub fn new(options: EditOptions) -> Self {
        Self::with_backend(LineBuffer::new(), options)
    }
}

impl Default for EditBox<LineBuffer> {
    fn default() -> Self {
        Self::new(EditOptions::default())
    }
}

impl<B: TextBackend> EditBox<B> {
    /// An editor over `backend`. Installs the highlighter as the backend's
    /// change handler, replacing any handler it had.
    pub fn with_backend(backend: B, options: EditOptions) -> Self {
        let mut edit = Self {
            backend,
            bounds: Rect::default(),
            options,
            mode: Mode::Command,
            chord: Chord::new(),
            clipboard: Clipboard::new(),
            viewport: Viewport::default(),
            visual_start: 0,
            text_width: 0,
            text_height: 0,
            focused: false,
            last_cursor: None,
            on_change: None,
            on_cursor_moved: None,
        };
        edit.install_highlighter(None);
        edit
    }

    // ── Text ──────────────────────────────────────────────────────────────

    /// Replace the document. The cursor returns to the origin and the
    /// subscribers fire as for any edit.
    pub fn set_text(&mut self, text: &str) {
        let cursor = self.backend.cursor();
        let revision = self.backend.revision();
        self.backend.set_text(text);
        self.settle(cursor, revision);
    }

    #[must_use]
    pub fn text(&self) -> String {
        self.backend.text()
    }

    /// Highlight keywords and types with `dialect`.
    pub fn set_dialect(&mut self, dialect: impl Dialect + 'static) {
        self.install_highlighter(Some(Box::new(dialect)));
    }

    /// Highlight strings only.
    pub fn clear_dialect(&mut self) {
        self.install_highlighter(None);
    }

    fn install_highlighter(&mut self, dialect: Option<Box<dyn Dialect>>) {
        let highlighter = Highlighter::new(dialect, self.options.palette);
        highlighter.highlight(&mut self.backend);
        self.backend
            .set_change_handler(Some(Box::new(move |backend: &mut dyn TextBackend| {
                highlighter.highlight(backend);
            })));
    }

    // ── Subscribers ───────────────────────────────────────────────────────

    /// Called after every event or `set_text` that changed the text.
    pub fn on_change(&mut self, callback: impl FnMut(&dyn TextBackend) + 'static) {
        self.on_change = Some(Box::new(callback));
    }

    /// Called after every event that moved the cursor.
    pub fn on_cursor_moved(&mut self, callback: impl FnMut(Position) + 'static) {
        self.on_cursor_moved = Some(Box::new(callback));
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    #[inline]
    #[must_use]
    pub const fn mode(&self) -> Mode {
        self.mode
    }

    #[must_use]
    pub fn cursor(&self) -> Position {
        self.backend.cursor()
    }

    #[inline]
    #[must_use]
    pub const fn backend(&self) -> &B {
        &self.backend
    }

    #[inline]
    #[must_use]
    pub const fn clipboard(&self) -> &Clipboard {
        &self.clipboard
    }

    #[inline]
    #[must_use]
    pub const fn options(&self) -> &EditOptions {
        &self.options
    }

    #[inline]
    #[must_use]
    pub const fn viewport(&self) -> Viewport {
        self.viewport
    }

    #[inline]
    #[must_use]
    pub const fn is_focused(&self) -> bool {
        self.focused
    }

    pub const fn set_focus(&mut self, focused: bool) {
        self.focused = focused;
    }

    /// Cursor cell from the last render, in target coordinates.
    #[inline]
    #[must_use]
    pub const fn last_cursor(&self) -> Option<(u16, u16)> {
        self.last_cursor
    }

    /// Lines selected in VisualLine mode.
    #[must_use]
    pub fn selection(&self) -> Option<RangeInclusive<usize>> {
        if self.mode != Mode::VisualLine {
            return None;
        }
        let cursor = self.backend.cursor().line;
        Some(self.visual_start.min(cursor)..=self.visual_start.max(cursor))
    }

    #[inline]
    #[must_use]
    pub const fn bounds(&self) -> Rect {
        self.bounds
    }

    /// Place the editor. Also sizes the text area.
    pub fn set_bounds(&mut self, bounds: Rect) {
        self.bounds = bounds;
        self.set_size(bounds.width, bounds.height);
    }

    /// Tell the editor its outer size so scrolling works before the first
    /// render.
    pub fn set_size(&mut self, width: u16, height: u16) {
        self.text_width = usize::from(width.saturating_sub(2));
        self.text_height = usize::from(height.saturating_sub(3));
        self.scroll_to_cursor();
    }

    // ── Events ────────────────────────────────────────────────────────────

    /// Process one event. Returns `true` if it was consumed.
    pub fn handle_event(&mut self, event: &Event) -> bool {
        let Event::Key(key) = event else {
            return false;
        };
        let cursor = self.backend.cursor();
        let revision = self.backend.revision();

        let handled = if let Some(handled) = self.global_key(key) {
            self.chord.clear();
            handled
        } else {
            match self.mode {
                Mode::Command => self.command_key(key),
                Mode::Insert => self.insert_key(key),
                Mode::VisualLine => self.visual_key(key),
            }
        };
        if !handled {
            debug!(?key, mode = %self.mode, "unhandled key");
        }

        self.settle(cursor, revision);
        handled
    }

    /// Clamp, scroll and notify after a change.
    fn settle(&mut self, cursor: Position, revision: u64) {
        self.backend.clamp_cursor(self.mode.clamp_limit());
        self.scroll_to_cursor();

        let now = self.backend.cursor();
        if now != cursor {
            if let Some(callback) = &mut self.on_cursor_moved {
                callback(now);
            }
        }
        if self.backend.revision() != revision {
            if let Some(callback) = &mut self.on_change {
                callback(&self.backend);
            }
        }
    }

    fn scroll_to_cursor(&mut self) {
        if self.text_width == 0 || self.text_height == 0 {
            return;
        }
        let at = virtual_position(&self.backend, self.backend.cursor(), self.text_width);
        self.viewport.clamp_to(at, self.text_width, self.text_height);
    }

    fn set_mode(&mut self, mode: Mode) {
        if mode != self.mode {
            debug!(from = %self.mode, to = %mode, "mode change");
            self.mode = mode;
        }
    }

    /// Keys that work the same in every mode. `None` if `key` is not one.
    fn global_key(&mut self, key: &KeyEvent) -> Option<bool> {
        let b = &mut self.backend;
        match key.code {
            KeyCode::Home => b.cursor_beginning_of_line(),
            KeyCode::End => b.cursor_end_of_line(),
            KeyCode::Left => {
                b.cursor_previous();
            }
            KeyCode::Right => {
                b.cursor_next();
            }
            KeyCode::Up => b.line_previous(),
            KeyCode::Down => b.line_next(),
            KeyCode::Delete => {
                b.delete();
            }
            KeyCode::Backspace => {
                if b.cursor_previous() {
                    b.delete();
                }
            }
            _ => return None,
        }
        Some(true)
    }

    fn command_key(&mut self, key: &KeyEvent) -> bool {
        if self.chord.is_pending() {
            if key.code == KeyCode::Escape {
                self.chord.clear();
                debug!("chord cancelled");
                return true;
            }
            return match self.chord.push(*key) {
                ChordOutcome::Pending => true,
                ChordOutcome::Complete(command) => {
                    debug!(?command, "chord");
                    self.run_chord(command);
                    true
                }
                ChordOutcome::Cancelled => false,
            };
        }
        if Chord::starts_chord(key) {
            self.chord.push(*key);
            return true;
        }

        let Some(ch) = key.printable() else {
            return false;
        };
        let Position { line, col } = self.backend.cursor();
        match ch {
            'h' => self.backend.set_cursor(Position::new(line, col.saturating_sub(1))),
            'l' => self.backend.set_cursor(Position::new(line, col + 1)),
            'k' => self.backend.line_previous(),
            'j' => self.backend.line_next(),
            '0' => self.backend.cursor_beginning_of_line(),
            'w' => word::word_forward(&mut self.backend),
            'b' => word::word_backward(&mut self.backend),
            'G' => {
                let last = self.backend.last_line();
                self.backend.set_cursor(Position::new(last, 0));
            }
            'i' => self.set_mode(Mode::Insert),
            'A' => {
                self.backend.cursor_end_of_line();
                self.set_mode(Mode::Insert);
            }
            'V' => {
                self.visual_start = line;
                self.set_mode(Mode::VisualLine);
            }
            'x' => {
                if let CursorSlot::OnChar(_) = self.backend.cursor_slot() {
                    self.backend.delete();
                }
            }
            'o' => {
                self.backend.cursor_end_of_line();
                self.backend.insert("\n");
                self.set_mode(Mode::Insert);
            }
            'p' => self.paste(),
            _ => return false,
        }
        true
    }

    fn run_chord(&mut self, command: ChordCommand) {
        match command {
            ChordCommand::DeleteLine => {
                let line = self.backend.cursor().line;
                self.clipboard.yank(self.backend.lines(line..=line));
                self.backend.remove_lines(line..=line);
            }
            ChordCommand::ChangeWord => {
                word::change_word(&mut self.backend);
                self.set_mode(Mode::Insert);
            }
            ChordCommand::GotoTop => self.backend.cursor_beginning(),
        }
    }

    /// Insert the clipboard lines below the cursor line.
    fn paste(&mut self) {
        if self.clipboard.is_empty() {
            return;
        }
        let line = self.backend.cursor().line;
        let end = self.backend.line_len(line);
        self.backend.set_cursor(Position::new(line, end));
        self.backend.insert(&format!("\n{}", self.clipboard.text()));
        self.backend.set_cursor(Position::new(line + 1, 0));
    }

    fn insert_key(&mut self, key: &KeyEvent) -> bool {
        if key.is_shift_tab() {
            self.unindent();
            return true;
        }
        match key.code {
            KeyCode::Escape => {
                self.set_mode(Mode::Command);
                let Position { line, col } = self.backend.cursor();
                self.backend.set_cursor(Position::new(line, col.saturating_sub(1)));
            }
            KeyCode::Tab => self.backend.insert(&" ".repeat(self.options.tab_width)),
            KeyCode::Enter => self.backend.insert("\n"),
            _ => {
                let Some(ch) = key.printable() else {
                    return false;
                };
                let mut buf = [0u8; 4];
                self.backend.insert(ch.encode_utf8(&mut buf));
            }
        }
        true
    }

    /// Remove one leading tab, or up to `indent_width` leading spaces.
    fn unindent(&mut self) {
        let Position { line, col } = self.backend.cursor();
        let cells = self.backend.line(line);
        let count = if cells.first().is_some_and(|c| c.ch == '\t') {
            1
        } else {
            cells
                .iter()
                .take(self.options.indent_width)
                .take_while(|c| c.ch == ' ')
                .count()
        };
        if count == 0 {
            return;
        }
        self.backend.set_cursor(Position::new(line, 0));
        for _ in 0..count {
            self.backend.delete();
        }
        self.backend.set_cursor(Position::new(line, col.saturating_sub(count)));
    }

    fn visual_key(&mut self, key: &KeyEvent) -> bool {
        if key.code == KeyCode::Escape {
            self.set_mode(Mode::Command);
            return true;
        }
        match key.printable() {
            Some('k') => self.backend.line_previous(),
            Some('j') => self.backend.line_next(),
            Some('d') => {
                if let Some(range) = self.selection() {
                    let start = *range.start();
                    self.clipboard.yank(self.backend.lines(range.clone()));
                    self.backend.remove_lines(range);
                    let line = start.min(self.backend.last_line());
                    self.backend.set_cursor(Position::new(line, 0));
                }
                self.set_mode(Mode::Command);
            }
            _ => return false,
        }
        true
    }

    // ── Rendering ─────────────────────────────────────────────────────────

    /// Paint the editor over the whole of `target`.
    ///
    /// Returns the cursor cell in target coordinates when focused.
    pub fn render<T: DrawTarget + ?Sized>(&mut self, target: &mut T) -> Option<(u16, u16)> {
        let palette = self.options.palette;
        let bounds = target.bounds();
        target.fill(bounds, palette.text, palette.background, ' ');
        render_border(target, bounds, palette.status, palette.background);

        self.last_cursor = None;
        if bounds.width < 3 || bounds.height < 4 {
            return None;
        }
        self.set_size(bounds.width, bounds.height);
        let (width, height) = (self.text_width, self.text_height);

        let total = total_rows(&self.backend, width);
        let visible = self.viewport.visible_rows(total, height);
        let selection = self.selection();

        let mut row = 0;
        for line in 0..self.backend.line_count() {
            if row >= visible.end {
                break;
            }
            let cells = self.backend.line(line);
            let rows = virtual_rows(cells.len(), width);
            let selected = selection.as_ref().is_some_and(|r| r.contains(&line));

            for k in 0..rows {
                let vrow = row + k;
                if !visible.contains(&vrow) {
                    continue;
                }
                let y = to_u16(1 + vrow - visible.start);
                if selected {
                    let area = Rect::new(1, y, to_u16(width), 1);
                    target.fill(area, palette.text, palette.selection, ' ');
                }
                let start = (k * width).min(cells.len());
                let end = ((k + 1) * width).min(cells.len());
                for (x, cell) in (1u16..).zip(&cells[start..end]) {
                    let bg = if selected { palette.selection } else { cell.bg };
                    let ch = if cell.ch == '\t' { ' ' } else { cell.ch };
                    let _ = target.set_cell(x, y, cell.fg, bg, ch);
                }
            }
            row += rows;
        }

        if let Some(status) = self.mode.status_text() {
            let status: String = status.chars().take(width).collect();
            let y = bounds.height - 2;
            target.print(1, y, palette.status, palette.background, &status);
        }

        if !self.focused {
            return None;
        }
        let at = virtual_position(&self.backend, self.backend.cursor(), width);
        let x = 1 + at.col.checked_sub(self.viewport.scroll_col)?;
        let y = 1 + at.row.checked_sub(self.viewport.scroll_row)?;
        self.last_cursor = Some((u16::try_from(x).ok()?, u16::try_from(y).ok()?));
        self.last_cursor
    }
}

fn to_u16(n: usize) -> u16 {
    u16::try_from(n).unwrap_or(u16::MAX)
}

impl<B: TextBackend + fmt::Debug> fmt::Debug for EditBox<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EditBox")
            .field("backend", &self.backend)
            .field("mode", &self.mode)
            .field("viewport", &self.viewport)
            .field("focused", &self.focused)
            .finish_non_exhaustive()
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::highlight::TokenClass;
    use pretty_assertions::assert_eq;
    use std::cell::RefCell;
    use std::rc::Rc;
    use weft_term::buffer::FrameBuffer;

    fn editbox_with(text: &str) -> EditBox {
        let mut edit = EditBox::default();
        edit.set_text(text);
        edit
    }

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::plain(code))
    }

    fn press(edit: &mut EditBox, ch: char) -> bool {
        edit.handle_event(&key(KeyCode::Char(ch)))
    }

    fn esc(edit: &mut EditBox) -> bool {
        edit.handle_event(&key(KeyCode::Escape))
    }

    /// Press each char of `keys` in turn.
    fn feed(edit: &mut EditBox, keys: &str) {
        for ch in keys.chars() {
            press(edit, ch);
        }
    }

    fn row_chars(frame: &FrameBuffer, y: u16) -> String {
        (0..frame.width())
            .map(|x| frame.get(x, y).map_or(' ', |c| c.ch))
            .collect()
    }

    fn sql(word: &str) -> TokenClass {
        match word {
            "select" | "from" => TokenClass::Keyword,
            "int" => TokenClass::Type,
            _ => TokenClass::Plain,
        }
    }

    // ── Modes ─────────────────────────────────────────────────────────────

    #[test]
    fn starts_in_command_mode() {
        let edit = EditBox::default();
        assert_eq!(edit.mode(), Mode::Command);
        assert_eq!(edit.text(), "");
    }

    #[test]
    fn i_types_and_esc_steps_back() {
        let mut edit = editbox_with("");
        feed(&mut edit, "ihello");
        assert_eq!(edit.mode(), Mode::Insert);
        assert_eq!(edit.text(), "hello");
        assert_eq!(edit.cursor(), Position::new(0, 5));
        assert!(esc(&mut edit));
        assert_eq!(edit.mode(), Mode::Command);
        assert_eq!(edit.cursor(), Position::new(0, 4));
    }

    #[test]
    fn esc_at_line_start_stays_on_line() {
        let mut edit = editbox_with("ab\ncd");
        press(&mut edit, 'j');
        press(&mut edit, 'i');
        esc(&mut edit);
        assert_eq!(edit.cursor(), Position::new(1, 0));
    }

    #[test]
    fn append_at_line_end() {
        let mut edit = editbox_with("select");
        feed(&mut edit, "A *");
        assert_eq!(edit.text(), "select *");
    }

    #[test]
    fn o_opens_line_below() {
        let mut edit = editbox_with("one\ntwo");
        feed(&mut edit, "oabc");
        assert_eq!(edit.text(), "one\nabc\ntwo");
        assert_eq!(edit.mode(), Mode::Insert);
        assert_eq!(edit.cursor(), Position::new(1, 3));
    }

    #[test]
    fn enter_splits_line() {
        let mut edit = editbox_with("ab");
        press(&mut edit, 'l');
        press(&mut edit, 'i');
        press(&mut edit, 'x');
        edit.handle_event(&key(KeyCode::Enter));
        press(&mut edit, 'y');
        assert_eq!(edit.text(), "ax\nyb");
        assert_eq!(edit.cursor().line, 1);
    }

    #[test]
    fn tab_inserts_spaces_and_shift_tab_removes_them() {
        let mut edit = editbox_with("x");
        press(&mut edit, 'i');
        edit.handle_event(&key(KeyCode::Tab));
        assert_eq!(edit.text(), "    x");
        assert_eq!(edit.cursor(), Position::new(0, 4));
        edit.handle_event(&Event::Key(KeyEvent::shift_tab()));
        assert_eq!(edit.text(), "x");
        assert_eq!(edit.cursor(), Position::ZERO);
    }

    #[test]
    fn shift_tab_removes_one_tab() {
        let mut edit = editbox_with("\t\tx");
        press(&mut edit, 'i');
        edit.handle_event(&Event::Key(KeyEvent::shift_tab()));
        assert_eq!(edit.text(), "\tx");
    }

    #[test]
    fn shift_tab_removes_at_most_indent_width() {
        let mut edit = editbox_with("      x");
        press(&mut edit, 'i');
        edit.handle_event(&Event::Key(KeyEvent::shift_tab()));
        assert_eq!(edit.text(), "  x");
    }

    #[test]
    fn ctrl_keys_are_not_typed() {
        let mut edit = editbox_with("");
        press(&mut edit, 'i');
        assert!(!edit.handle_event(&Event::Key(KeyEvent::ctrl('a'))));
        assert_eq!(edit.text(), "");
    }

    // ── Motions ───────────────────────────────────────────────────────────

    #[test]
    fn hjkl_and_zero() {
        let mut edit = editbox_with("abc\nde");
        feed(&mut edit, "ll");
        assert_eq!(edit.cursor(), Position::new(0, 2));
        press(&mut edit, 'l');
        assert_eq!(edit.cursor(), Position::new(0, 2));
        press(&mut edit, 'j');
        assert_eq!(edit.cursor(), Position::new(1, 1));
        press(&mut edit, 'j');
        assert_eq!(edit.cursor(), Position::new(1, 1));
        feed(&mut edit, "kh0");
        assert_eq!(edit.cursor(), Position::new(0, 0));
        press(&mut edit, 'h');
        assert_eq!(edit.cursor(), Position::ZERO);
    }

    #[test]
    fn w_moves_to_next_word() {
        let mut edit = editbox_with("foo bar");
        press(&mut edit, 'w');
        assert_eq!(edit.cursor(), Position::new(0, 4));
        press(&mut edit, 'w');
        assert_eq!(edit.cursor(), Position::new(0, 6));
        press(&mut edit, 'b');
        assert_eq!(edit.cursor(), Position::new(0, 4));
    }

    #[test]
    fn big_g_and_gg() {
        let mut edit = editbox_with("a\nb\nc");
        press(&mut edit, 'G');
        assert_eq!(edit.cursor(), Position::new(2, 0));
        feed(&mut edit, "gg");
        assert_eq!(edit.cursor(), Position::ZERO);
    }

    #[test]
    fn arrows_cross_line_boundaries_in_insert() {
        let mut edit = editbox_with("abc\nd");
        press(&mut edit, 'i');
        edit.handle_event(&key(KeyCode::End));
        assert_eq!(edit.cursor(), Position::new(0, 3));
        edit.handle_event(&key(KeyCode::Right));
        assert_eq!(edit.cursor(), Position::new(1, 0));
        edit.handle_event(&key(KeyCode::Left));
        assert_eq!(edit.cursor(), Position::new(0, 3));
    }

    #[test]
    fn end_is_clamped_in_command_mode() {
        let mut edit = editbox_with("abc");
        edit.handle_event(&key(KeyCode::End));
        assert_eq!(edit.cursor(), Position::new(0, 2));
        edit.handle_event(&key(KeyCode::Home));
        assert_eq!(edit.cursor(), Position::ZERO);
    }

    #[test]
    fn cursor_stays_in_bounds() {
        let mut edit = editbox_with("select *\n\nfrom t\nwhere x");
        let keys = "jjjlllllllwwwwbbGkkxx0hhddpVjdAxyz";
        for ch in keys.chars() {
            press(&mut edit, ch);
            let c = edit.cursor();
            let b = edit.backend();
            assert!(c.line < b.line_count());
            let len = b.line_len(c.line);
            match edit.mode() {
                Mode::Insert => assert!(c.col <= len),
                _ => assert!(c.col <= len.saturating_sub(1)),
            }
        }
    }

    // ── Editing ───────────────────────────────────────────────────────────

    #[test]
    fn x_deletes_under_cursor() {
        let mut edit = editbox_with("abc");
        press(&mut edit, 'l');
        press(&mut edit, 'x');
        assert_eq!(edit.text(), "ac");
    }

    #[test]
    fn x_on_empty_line_is_noop() {
        let mut edit = editbox_with("\nnext");
        assert!(press(&mut edit, 'x'));
        assert_eq!(edit.text(), "\nnext");
    }

    #[test]
    fn backspace_at_document_start_is_noop() {
        let mut edit = editbox_with("ab");
        assert!(edit.handle_event(&key(KeyCode::Backspace)));
        assert_eq!(edit.text(), "ab");
    }

    #[test]
    fn backspace_joins_lines() {
        let mut edit = editbox_with("ab\ncd");
        press(&mut edit, 'j');
        press(&mut edit, 'i');
        edit.handle_event(&key(KeyCode::Backspace));
        assert_eq!(edit.text(), "abcd");
        assert_eq!(edit.cursor(), Position::new(0, 2));
    }

    #[test]
    fn dd_yanks_and_deletes_line() {
        let mut edit = editbox_with("one\ntwo\nthree");
        press(&mut edit, 'j');
        feed(&mut edit, "dd");
        assert_eq!(edit.text(), "one\nthree");
        assert_eq!(edit.clipboard().text(), "two");
        assert_eq!(edit.cursor(), Position::new(1, 0));
    }

    #[test]
    fn dd_on_single_line_empties_it() {
        let mut edit = editbox_with("only");
        feed(&mut edit, "dd");
        assert_eq!(edit.text(), "");
        assert_eq!(edit.backend().line_count(), 1);
        assert_eq!(edit.clipboard().text(), "only");
    }

    #[test]
    fn p_pastes_below_and_lands_on_first_line() {
        let mut edit = editbox_with("one\ntwo\nthree");
        feed(&mut edit, "ddp");
        assert_eq!(edit.text(), "two\none\nthree");
        assert_eq!(edit.cursor(), Position::new(1, 0));
    }

    #[test]
    fn p_with_empty_clipboard_does_nothing() {
        let mut edit = editbox_with("x");
        assert!(press(&mut edit, 'p'));
        assert_eq!(edit.text(), "x");
    }

    #[test]
    fn cw_changes_word() {
        let mut edit = editbox_with("select foo from t");
        press(&mut edit, 'w');
        feed(&mut edit, "cwbar");
        assert_eq!(edit.text(), "select bar from t");
        assert_eq!(edit.mode(), Mode::Insert);
    }

    #[test]
    fn unknown_chord_continuation_is_unhandled() {
        let mut edit = editbox_with("abc");
        assert!(press(&mut edit, 'd'));
        assert!(!press(&mut edit, 'z'));
        assert_eq!(edit.text(), "abc");
        // The chord is gone: a single `d` starts a new one.
        assert!(press(&mut edit, 'd'));
        assert!(press(&mut edit, 'd'));
        assert_eq!(edit.text(), "");
    }

    #[test]
    fn escape_cancels_chord() {
        let mut edit = editbox_with("abc");
        press(&mut edit, 'd');
        assert!(esc(&mut edit));
        press(&mut edit, 'x');
        assert_eq!(edit.text(), "bc");
    }

    #[test]
    fn unknown_command_key_is_unhandled() {
        let mut edit = editbox_with("abc");
        assert!(!press(&mut edit, 'Q'));
        assert!(!esc(&mut edit));
        assert!(!edit.handle_event(&key(KeyCode::F(1))));
    }

    #[test]
    fn resize_is_not_handled() {
        let mut edit = editbox_with("abc");
        let resize = Event::Resize(weft_term::terminal::Size { cols: 10, rows: 5 });
        assert!(!edit.handle_event(&resize));
    }

    // ── VisualLine ────────────────────────────────────────────────────────

    #[test]
    fn visual_line_delete() {
        let mut edit = editbox_with("a\nb\nc\nd");
        press(&mut edit, 'j');
        press(&mut edit, 'V');
        assert_eq!(edit.mode(), Mode::VisualLine);
        press(&mut edit, 'j');
        assert_eq!(edit.selection(), Some(1..=2));
        press(&mut edit, 'd');
        assert_eq!(edit.text(), "a\nd");
        assert_eq!(edit.clipboard().text(), "b\nc");
        assert_eq!(edit.mode(), Mode::Command);
        assert_eq!(edit.cursor(), Position::new(1, 0));
    }

    #[test]
    fn visual_line_selects_upwards() {
        let mut edit = editbox_with("a\nb\nc");
        press(&mut edit, 'G');
        feed(&mut edit, "Vkk");
        assert_eq!(edit.selection(), Some(0..=2));
        press(&mut edit, 'd');
        assert_eq!(edit.text(), "");
    }

    #[test]
    fn visual_line_escape() {
        let mut edit = editbox_with("a\nb");
        press(&mut edit, 'V');
        assert!(esc(&mut edit));
        assert_eq!(edit.mode(), Mode::Command);
        assert_eq!(edit.selection(), None);
        assert_eq!(edit.text(), "a\nb");
    }

    // ── Highlighting and subscribers ──────────────────────────────────────

    #[test]
    fn dialect_colors_keywords_after_edits() {
        let mut edit = editbox_with("");
        edit.set_dialect(sql);
        feed(&mut edit, "iselect 'x'");
        let palette = edit.options().palette;
        let line = edit.backend().line(0);
        assert!(line[..6].iter().all(|c| c.fg == palette.keyword));
        assert!(line[7..].iter().all(|c| c.fg == palette.string));
    }

    #[test]
    fn set_dialect_recolors_existing_text() {
        let mut edit = editbox_with("from");
        let palette = edit.options().palette;
        assert_eq!(edit.backend().line(0)[0].fg, palette.text);
        edit.set_dialect(sql);
        assert_eq!(edit.backend().line(0)[0].fg, palette.keyword);
    }

    #[test]
    fn subscribers_fire_on_change_and_move() {
        let changes = Rc::new(RefCell::new(Vec::new()));
        let moves = Rc::new(RefCell::new(Vec::new()));
        let mut edit = editbox_with("ab");
        let sink = Rc::clone(&changes);
        edit.on_change(move |b| sink.borrow_mut().push(b.text()));
        let sink = Rc::clone(&moves);
        edit.on_cursor_moved(move |pos| sink.borrow_mut().push(pos));

        press(&mut edit, 'l');
        press(&mut edit, 'x');
        press(&mut edit, 'Q');

        assert_eq!(*changes.borrow(), vec!["a".to_string()]);
        assert_eq!(*moves.borrow(), vec![Position::new(0, 1), Position::ZERO]);
    }

    // ── Rendering ─────────────────────────────────────────────────────────

    #[test]
    fn renders_border_text_and_status() {
        let mut edit = editbox_with("select *\nfrom t");
        edit.set_focus(true);
        press(&mut edit, 'i');
        let mut frame = FrameBuffer::new(12, 6);
        let cursor = edit.render(&mut frame);

        assert_eq!(row_chars(&frame, 0), "┌──────────┐");
        assert_eq!(row_chars(&frame, 1), "│select *  │");
        assert_eq!(row_chars(&frame, 2), "│from t    │");
        assert_eq!(row_chars(&frame, 4), "│-- INSERT │");
        assert_eq!(row_chars(&frame, 5), "└──────────┘");
        assert_eq!(cursor, Some((1, 1)));
    }

    #[test]
    fn unfocused_render_has_no_cursor() {
        let mut edit = editbox_with("x");
        let mut frame = FrameBuffer::new(10, 5);
        assert_eq!(edit.render(&mut frame), None);
    }

    #[test]
    fn long_lines_wrap() {
        let mut edit = editbox_with("abcdefgh");
        edit.set_focus(true);
        edit.handle_event(&key(KeyCode::End));
        let mut frame = FrameBuffer::new(7, 6);
        let cursor = edit.render(&mut frame);
        assert_eq!(row_chars(&frame, 1), "│abcde│");
        assert_eq!(row_chars(&frame, 2), "│fgh  │");
        assert_eq!(cursor, Some((3, 2)));
    }

    #[test]
    fn scrolls_to_keep_cursor_visible() {
        let text = (0..10).map(|i| i.to_string()).collect::<Vec<_>>().join("\n");
        let mut edit = editbox_with(&text);
        edit.set_focus(true);
        let mut frame = FrameBuffer::new(6, 6);
        edit.render(&mut frame);

        press(&mut edit, 'G');
        assert_eq!(edit.viewport().scroll_row, 7);
        let cursor = edit.render(&mut frame);
        assert_eq!(row_chars(&frame, 1), "│7   │");
        assert_eq!(row_chars(&frame, 3), "│9   │");
        assert_eq!(cursor, Some((1, 3)));

        feed(&mut edit, "gg");
        assert_eq!(edit.viewport().scroll_row, 0);
    }

    #[test]
    fn visual_selection_is_highlighted() {
        let mut edit = editbox_with("a\nb");
        press(&mut edit, 'V');
        let mut frame = FrameBuffer::new(6, 6);
        edit.render(&mut frame);
        let selection = edit.options().palette.selection;
        assert_eq!(frame.get(1, 1).map(|c| c.bg), Some(selection));
        assert_eq!(frame.get(4, 1).map(|c| c.bg), Some(selection));
        assert_ne!(frame.get(1, 2).map(|c| c.bg), Some(selection));
        assert_eq!(row_chars(&frame, 4), "│-- V│");
    }

    #[test]
    fn set_bounds_sizes_the_text_area() {
        let text = (0..10).map(|i| i.to_string()).collect::<Vec<_>>().join("\n");
        let mut edit = editbox_with(&text);
        edit.set_bounds(Rect::new(5, 5, 6, 6));
        assert_eq!(edit.bounds(), Rect::new(5, 5, 6, 6));
        press(&mut edit, 'G');
        assert_eq!(edit.viewport().scroll_row, 7);
    }

    #[test]
    fn tiny_target_paints_nothing_inside() {
        let mut edit = editbox_with("abc");
        edit.set_focus(true);
        let mut frame = FrameBuffer::new(2, 2);
        assert_eq!(edit.render(&mut frame), None);
    }
}
