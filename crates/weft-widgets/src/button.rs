//! Bordered push buttons.

use std::fmt;

use weft_term::input::{Event, KeyCode};
use weft_term::surface::{DrawTarget, Rect, render_border};

use crate::control::{Control, Style, print_clipped};

/// Called when the button is pressed.
pub type ClickHandler = Box<dyn FnMut(&mut Button)>;

/// A bordered label activated with Enter or Space.
pub struct Button {
    pub bounds: Rect,
    pub text: String,
    pub style: Style,
    focused: bool,
    on_click: Option<ClickHandler>,
}

impl Button {
    #[must_use]
    pub fn new(bounds: Rect, text: impl Into<String>) -> Self {
        Self {
            bounds,
            text: text.into(),
            style: Style::default(),
            focused: false,
            on_click: None,
        }
    }

    #[must_use]
    pub fn on_click(mut self, handler: impl FnMut(&mut Self) + 'static) -> Self {
        self.on_click = Some(Box::new(handler));
        self
    }

    /// Run the click handler, if any.
    pub fn click(&mut self) {
        if let Some(mut handler) = self.on_click.take() {
            handler(self);
            if self.on_click.is_none() {
                self.on_click = Some(handler);
            }
        }
    }
}

impl fmt::Debug for Button {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Button")
            .field("bounds", &self.bounds)
            .field("text", &self.text)
            .field("focused", &self.focused)
            .finish_non_exhaustive()
    }
}

impl Control for Button {
    fn bounds(&self) -> Rect {
        self.bounds
    }

    fn draw(&mut self, target: &mut dyn DrawTarget) {
        let area = target.bounds();
        render_border(target, area, self.style.fg, self.style.bg);
        let room = usize::from(area.width.saturating_sub(4));
        print_clipped(target, 2, 1, self.style, &self.text, room);
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
            KeyCode::Enter | KeyCode::Char(' ') if key.modifiers.is_empty() => {
                self.click();
                true
            }
            _ => false,
        }
    }

    fn cursor(&self) -> Option<(u16, u16)> {
        self.focused.then_some((1, 1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::cell::Cell;
    use std::rc::Rc;
    use weft_term::buffer::FrameBuffer;
    use weft_term::input::KeyEvent;

    fn row(frame: &FrameBuffer, y: u16) -> String {
        frame.row(y).unwrap().iter().map(|c| c.ch).collect()
    }

    #[test]
    fn enter_and_space_click() {
        let clicks = Rc::new(Cell::new(0));
        let seen = Rc::clone(&clicks);
        let mut button =
            Button::new(Rect::new(0, 0, 10, 3), "OK").on_click(move |_| seen.set(seen.get() + 1));

        assert!(button.handle_event(&Event::Key(KeyEvent::plain(KeyCode::Enter))));
        assert!(button.handle_event(&Event::Key(KeyEvent::plain(KeyCode::Char(' ')))));
        assert!(!button.handle_event(&Event::Key(KeyEvent::plain(KeyCode::Char('x')))));
        assert_eq!(clicks.get(), 2);
    }

    #[test]
    fn handler_can_change_the_button() {
        let mut button =
            Button::new(Rect::new(0, 0, 10, 3), "Go").on_click(|b| b.text = "Done".into());
        button.click();
        assert_eq!(button.text, "Done");
    }

    #[test]
    fn draws_border_and_clipped_text() {
        let mut button = Button::new(Rect::new(0, 0, 8, 3), "Continue!");
        let mut frame = FrameBuffer::new(8, 3);
        button.draw(&mut frame);
        assert_eq!(row(&frame, 0), "┌──────┐");
        assert_eq!(row(&frame, 1), "│ Cont │");
        assert_eq!(row(&frame, 2), "└──────┘");
    }
}
