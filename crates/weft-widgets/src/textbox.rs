//! Single-line text fields.
//!
//! The value is edited as chars. The field shows `width - 2` of them
//! between the borders and scrolls horizontally so the cursor is always
//! among the visible ones.

use weft_term::input::{Event, KeyCode};
use weft_term::surface::{DrawTarget, Rect, render_border};

use crate::control::{Control, Style, print_clipped};

/// A bordered one-line editor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextBox {
    pub bounds: Rect,
    pub style: Style,
    value: Vec<char>,
    cursor: usize,
    scroll: usize,
    focused: bool,
}

impl TextBox {
    #[must_use]
    pub fn new(bounds: Rect, value: &str) -> Self {
        Self {
            bounds,
            style: Style::default(),
            value: value.chars().collect(),
            cursor: 0,
            scroll: 0,
            focused: false,
        }
    }

    #[must_use]
    pub fn value(&self) -> String {
        self.value.iter().collect()
    }

    /// Replace the value and put the cursor at its end.
    pub fn set_value(&mut self, value: &str) {
        self.value = value.chars().collect();
        self.cursor = self.value.len();
        self.settle();
    }

    #[inline]
    #[must_use]
    pub const fn cursor_index(&self) -> usize {
        self.cursor
    }

    #[inline]
    #[must_use]
    pub const fn scroll(&self) -> usize {
        self.scroll
    }

    fn visible_chars(&self) -> usize {
        usize::from(self.bounds.width.saturating_sub(2))
    }

    /// Clamp the cursor into `0..=len` and scroll it into view.
    fn settle(&mut self) {
        self.cursor = self.cursor.min(self.value.len());
        let visible = self.visible_chars().max(1);
        if self.cursor < self.scroll {
            self.scroll = self.cursor;
        }
        if self.cursor >= self.scroll + visible {
            self.scroll = self.cursor + 1 - visible;
        }
    }
}

impl Control for TextBox {
    fn bounds(&self) -> Rect {
        self.bounds
    }

    fn draw(&mut self, target: &mut dyn DrawTarget) {
        let area = target.bounds();
        render_border(target, area, self.style.fg, self.style.bg);
        let visible = usize::from(area.width.saturating_sub(2));
        let start = self.scroll.min(self.value.len());
        let shown: String = self.value[start..].iter().collect();
        print_clipped(target, 1, 1, self.style, &shown, visible);
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
        match key.code {
            KeyCode::Backspace => {
                if self.cursor > 0 {
                    self.cursor -= 1;
                    self.value.remove(self.cursor);
                }
            }
            KeyCode::Delete => {
                if self.cursor < self.value.len() {
                    self.value.remove(self.cursor);
                }
            }
            KeyCode::Left => self.cursor = self.cursor.saturating_sub(1),
            KeyCode::Right => self.cursor += 1,
            KeyCode::Home => self.cursor = 0,
            KeyCode::End => self.cursor = self.value.len(),
            _ => {
                let Some(ch) = key.printable() else {
                    return false;
                };
                self.value.insert(self.cursor.min(self.value.len()), ch);
                self.cursor += 1;
            }
        }
        self.settle();
        true
    }

    fn cursor(&self) -> Option<(u16, u16)> {
        if !self.focused {
            return None;
        }
        let x = 1 + self.cursor.checked_sub(self.scroll)?;
        Some((u16::try_from(x).ok()?, 1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use weft_term::buffer::FrameBuffer;
    use weft_term::input::KeyEvent;

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::plain(code))
    }

    fn typed(tb: &mut TextBox, text: &str) {
        for ch in text.chars() {
            tb.handle_event(&key(KeyCode::Char(ch)));
        }
    }

    #[test]
    fn typing_inserts_at_cursor() {
        let mut tb = TextBox::new(Rect::new(0, 0, 20, 3), "ac");
        tb.handle_event(&key(KeyCode::Right));
        typed(&mut tb, "b");
        assert_eq!(tb.value(), "abc");
        assert_eq!(tb.cursor_index(), 2);
    }

    #[test]
    fn backspace_and_delete() {
        let mut tb = TextBox::new(Rect::new(0, 0, 20, 3), "abcd");
        tb.handle_event(&key(KeyCode::Backspace));
        assert_eq!(tb.value(), "abcd");
        tb.handle_event(&key(KeyCode::Delete));
        assert_eq!(tb.value(), "bcd");
        tb.handle_event(&key(KeyCode::End));
        tb.handle_event(&key(KeyCode::Delete));
        assert_eq!(tb.value(), "bcd");
        tb.handle_event(&key(KeyCode::Backspace));
        assert_eq!(tb.value(), "bc");
    }

    #[test]
    fn cursor_is_clamped() {
        let mut tb = TextBox::new(Rect::new(0, 0, 20, 3), "ab");
        tb.handle_event(&key(KeyCode::Left));
        assert_eq!(tb.cursor_index(), 0);
        for _ in 0..5 {
            tb.handle_event(&key(KeyCode::Right));
        }
        assert_eq!(tb.cursor_index(), 2);
        tb.handle_event(&key(KeyCode::Home));
        assert_eq!(tb.cursor_index(), 0);
    }

    #[test]
    fn scrolls_to_follow_cursor() {
        let mut tb = TextBox::new(Rect::new(0, 0, 5, 3), "12");
        tb.set_focus(true);
        tb.handle_event(&key(KeyCode::End));
        typed(&mut tb, "345");
        assert_eq!(tb.value(), "12345");
        assert_eq!(tb.scroll(), 3);
        assert_eq!(tb.cursor(), Some((3, 1)));

        let mut frame = FrameBuffer::new(5, 3);
        tb.draw(&mut frame);
        let row: String = frame.row(1).unwrap().iter().map(|c| c.ch).collect();
        assert_eq!(row, "│45 │");

        tb.handle_event(&key(KeyCode::Home));
        assert_eq!(tb.scroll(), 0);
    }

    #[test]
    fn non_text_keys_are_unhandled() {
        let mut tb = TextBox::new(Rect::new(0, 0, 10, 3), "");
        assert!(!tb.handle_event(&key(KeyCode::Enter)));
        assert!(!tb.handle_event(&Event::Key(KeyEvent::ctrl('c'))));
        assert_eq!(tb.value(), "");
    }
}
