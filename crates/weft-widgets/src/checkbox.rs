//! `[X] text` toggles.

use weft_term::input::{Event, KeyCode};
use weft_term::surface::{DrawTarget, Rect};

use crate::control::{Control, Style, print_clipped};

/// A checkbox toggled with Space.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckBox {
    pub bounds: Rect,
    pub text: String,
    pub checked: bool,
    pub style: Style,
    focused: bool,
}

impl CheckBox {
    #[must_use]
    pub fn new(bounds: Rect, text: impl Into<String>) -> Self {
        Self {
            bounds,
            text: text.into(),
            checked: false,
            style: Style::default(),
            focused: false,
        }
    }

    /// `[X] text` or `[ ] text`.
    #[must_use]
    pub fn caption(&self) -> String {
        let mark = if self.checked { 'X' } else { ' ' };
        format!("[{mark}] {}", self.text)
    }
}

impl Control for CheckBox {
    fn bounds(&self) -> Rect {
        self.bounds
    }

    fn draw(&mut self, target: &mut dyn DrawTarget) {
        let width = usize::from(target.width());
        print_clipped(target, 0, 0, self.style, &self.caption(), width);
    }

    fn focusable(&self) -> bool {
        true
    }

    fn set_focus(&mut self, focused: bool) {
        self.focused = focused;
    }

    fn handle_event(&mut self, event: &Event) -> bool {
        match event {
            Event::Key(key) if key.code == KeyCode::Char(' ') && key.modifiers.is_empty() => {
                self.checked = !self.checked;
                true
            }
            _ => false,
        }
    }

    fn cursor(&self) -> Option<(u16, u16)> {
        self.focused.then_some((1, 0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use weft_term::buffer::FrameBuffer;
    use weft_term::input::KeyEvent;

    fn space() -> Event {
        Event::Key(KeyEvent::plain(KeyCode::Char(' ')))
    }

    #[test]
    fn space_toggles() {
        let mut cb = CheckBox::new(Rect::new(0, 0, 20, 1), "Enable");
        assert!(cb.handle_event(&space()));
        assert!(cb.checked);
        assert_eq!(cb.caption(), "[X] Enable");
        assert!(cb.handle_event(&space()));
        assert!(!cb.checked);
    }

    #[test]
    fn other_keys_are_ignored() {
        let mut cb = CheckBox::new(Rect::new(0, 0, 20, 1), "Enable");
        assert!(!cb.handle_event(&Event::Key(KeyEvent::plain(KeyCode::Enter))));
        assert!(!cb.checked);
    }

    #[test]
    fn draws_caption_and_cursor_in_brackets() {
        let mut cb = CheckBox::new(Rect::new(0, 0, 8, 1), "Enable it");
        cb.set_focus(true);
        let mut frame = FrameBuffer::new(8, 1);
        cb.draw(&mut frame);
        let row: String = frame.row(0).unwrap().iter().map(|c| c.ch).collect();
        assert_eq!(row, "[ ] Enab");
        assert_eq!(cb.cursor(), Some((1, 0)));
    }
}
