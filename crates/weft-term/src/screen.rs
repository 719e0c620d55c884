// SPDX-License-Identifier: MIT
//
// Screen: turns finished frames into terminal output.
//
// The renderer keeps the previously rendered frame and, for each new frame,
// emits escape sequences only for cells that changed. All output goes to an
// in-memory byte buffer first; `flush` writes the whole frame with a single
// `write_all`, so the terminal never shows a half-drawn frame.
//
// Per frame:
//
//   1. Rows identical to the previous frame are skipped with one slice `==`.
//   2. For a changed cell, the cursor is moved only when the previous write
//      did not already leave it there, and SGR colors are emitted only when
//      they differ from the last cell written.
//   3. A character wider or narrower than one column leaves the terminal
//      cursor somewhere the grid does not predict, so the next write always
//      repositions explicitly.
//   4. The hardware cursor is placed (or hidden) last.

use std::io::{self, Write};

use crate::ansi;
use crate::buffer::{FrameBuffer, char_width};
use crate::cell::Cell;

/// Differential frame renderer.
#[derive(Default)]
pub struct Screen {
    out: Vec<u8>,
    previous: Option<FrameBuffer>,
}

impl Screen {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget the previous frame so the next render redraws everything.
    pub fn force_redraw(&mut self) {
        self.previous = None;
    }

    /// Generate output for `frame` and return the number of cells written.
    ///
    /// `cursor` is the hardware cursor position, or `None` to hide it.
    pub fn render(&mut self, frame: &FrameBuffer, cursor: Option<(u16, u16)>) -> usize {
        self.out.clear();
        let full = self.previous.as_ref().is_none_or(|prev| {
            prev.width() != frame.width() || prev.height() != frame.height()
        });

        // Writes into a Vec cannot fail.
        let _ = self.emit_frame(frame, full);
        let written = self.count_changed(frame, full);

        let _ = match cursor {
            Some((x, y)) => {
                ansi::cursor_to(&mut self.out, x, y).and_then(|()| ansi::cursor_show(&mut self.out))
            }
            None => ansi::cursor_hide(&mut self.out),
        };

        match &mut self.previous {
            Some(prev) if !full => prev.clone_from(frame),
            _ => self.previous = Some(frame.clone()),
        }
        written
    }

    fn emit_frame(&mut self, frame: &FrameBuffer, full: bool) -> io::Result<()> {
        let out = &mut self.out;
        if full {
            ansi::reset(out)?;
            ansi::clear_screen(out)?;
        }

        let mut at: Option<(u16, u16)> = None;
        let mut style: Option<Cell> = None;

        for y in 0..frame.height() {
            let row = frame.row(y).unwrap_or_default();
            let prev_row = self.previous.as_ref().and_then(|p| p.row(y));
            if !full && prev_row == Some(row) {
                continue;
            }

            for (x, cell) in (0..frame.width()).zip(row) {
                if !full && prev_row.and_then(|r| r.get(usize::from(x))) == Some(cell) {
                    continue;
                }
                if at != Some((x, y)) {
                    ansi::cursor_to(out, x, y)?;
                }
                if style.is_none_or(|s| !s.same_style(cell)) {
                    ansi::fg(out, cell.fg)?;
                    ansi::bg(out, cell.bg)?;
                    style = Some(*cell);
                }
                let mut enc = [0u8; 4];
                out.write_all(cell.ch.encode_utf8(&mut enc).as_bytes())?;
                at = (char_width(cell.ch) == 1).then(|| (x + 1, y));
            }
        }

        ansi::reset(out)
    }

    fn count_changed(&self, frame: &FrameBuffer, full: bool) -> usize {
        if full {
            return usize::from(frame.width()) * usize::from(frame.height());
        }
        let Some(prev) = &self.previous else {
            return 0;
        };
        (0..frame.height())
            .filter_map(|y| frame.row(y).zip(prev.row(y)))
            .map(|(cur, old)| cur.iter().zip(old).filter(|(a, b)| a != b).count())
            .sum()
    }

    /// Bytes produced by the last [`render`](Self::render).
    #[must_use]
    pub fn output(&self) -> &[u8] {
        &self.out
    }

    /// Write the last frame's output to stdout.
    ///
    /// # Errors
    ///
    /// Returns an error if writing to stdout fails.
    pub fn flush(&mut self) -> io::Result<()> {
        self.flush_to(&mut io::stdout().lock())
    }

    /// Write the last frame's output to `w`.
    ///
    /// # Errors
    ///
    /// Returns an error if writing to `w` fails.
    pub fn flush_to(&mut self, w: &mut impl Write) -> io::Result<()> {
        w.write_all(&self.out)?;
        w.flush()?;
        self.out.clear();
        Ok(())
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::CellColor;
    use pretty_assertions::assert_eq;

    fn text(screen: &Screen) -> String {
        String::from_utf8_lossy(screen.output()).into_owned()
    }

    #[test]
    fn first_frame_is_full() {
        let mut screen = Screen::new();
        let frame = FrameBuffer::new(3, 2);
        assert_eq!(screen.render(&frame, None), 6);
        let out = text(&screen);
        assert!(out.contains("\x1b[2J"));
        assert!(out.ends_with("\x1b[?25l"));
    }

    #[test]
    fn unchanged_frame_writes_nothing() {
        let mut screen = Screen::new();
        let frame = FrameBuffer::new(3, 2);
        screen.render(&frame, None);
        assert_eq!(screen.render(&frame, None), 0);
        assert!(!text(&screen).contains("\x1b[2J"));
    }

    #[test]
    fn only_changed_cells_are_written() {
        let mut screen = Screen::new();
        let mut frame = FrameBuffer::new(4, 2);
        screen.render(&frame, None);

        frame.set(2, 1, Cell::styled('x', CellColor::RED, CellColor::Default));
        assert_eq!(screen.render(&frame, Some((0, 0))), 1);

        let out = text(&screen);
        assert!(out.contains("\x1b[2;3H"));
        assert!(out.contains("\x1b[31m"));
        assert!(out.contains('x'));
        assert!(out.ends_with("\x1b[1;1H\x1b[?25h"));
    }

    #[test]
    fn adjacent_cells_share_cursor_move() {
        let mut screen = Screen::new();
        let mut frame = FrameBuffer::new(4, 1);
        screen.render(&frame, None);
        frame.set(0, 0, Cell::new('a'));
        frame.set(1, 0, Cell::new('b'));
        screen.render(&frame, None);
        let out = text(&screen);
        assert_eq!(out.matches("\x1b[1;").count(), 1);
        assert!(out.contains("ab"));
    }

    #[test]
    fn resize_forces_full_redraw() {
        let mut screen = Screen::new();
        screen.render(&FrameBuffer::new(3, 2), None);
        assert_eq!(screen.render(&FrameBuffer::new(2, 2), None), 4);
        assert!(text(&screen).contains("\x1b[2J"));
    }

    #[test]
    fn flush_to_drains_output() {
        let mut screen = Screen::new();
        screen.render(&FrameBuffer::new(1, 1), None);
        let mut sink = Vec::new();
        screen.flush_to(&mut sink).unwrap();
        assert!(!sink.is_empty());
        assert!(screen.output().is_empty());
    }
}
