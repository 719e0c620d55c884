//! [`EditBox`] as a [`Control`].
//!
//! Everything forwards to the inherent methods; the cursor is the one
//! recorded by the last render.

use weft_edit::{EditBox, TextBackend};
use weft_term::input::Event;
use weft_term::surface::{DrawTarget, Rect};

use crate::control::Control;

impl<B: TextBackend> Control for EditBox<B> {
    fn bounds(&self) -> Rect {
        Self::bounds(self)
    }

    fn draw(&mut self, target: &mut dyn DrawTarget) {
        self.render(target);
    }

    fn focusable(&self) -> bool {
        true
    }

    fn set_focus(&mut self, focused: bool) {
        Self::set_focus(self, focused);
    }

    fn handle_event(&mut self, event: &Event) -> bool {
        Self::handle_event(self, event)
    }

    fn cursor(&self) -> Option<(u16, u16)> {
        self.last_cursor()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use weft_edit::{EditOptions, Mode};
    use weft_term::buffer::FrameBuffer;
    use weft_term::input::{KeyCode, KeyEvent};

    fn boxed() -> Box<dyn Control> {
        let mut edit = EditBox::new(EditOptions::default());
        edit.set_bounds(Rect::new(2, 1, 12, 6));
        edit.set_text("select 1");
        Box::new(edit)
    }

    #[test]
    fn forwards_through_the_trait_object() {
        let mut control = boxed();
        assert!(control.focusable());
        assert_eq!(control.bounds(), Rect::new(2, 1, 12, 6));

        control.set_focus(true);
        assert!(control.handle_event(&Event::Key(KeyEvent::plain(KeyCode::Char('l')))));

        let mut frame = FrameBuffer::new(12, 6);
        control.draw(&mut frame);
        assert_eq!(control.cursor(), Some((2, 1)));
    }

    #[test]
    fn cursor_is_hidden_until_drawn_focused() {
        let mut edit = EditBox::new(EditOptions::default());
        edit.set_bounds(Rect::new(0, 0, 10, 5));
        assert_eq!(Control::cursor(&edit), None);

        Control::set_focus(&mut edit, true);
        Control::handle_event(&mut edit, &Event::Key(KeyEvent::plain(KeyCode::Char('i'))));
        assert_eq!(edit.mode(), Mode::Insert);

        let mut frame = FrameBuffer::new(10, 5);
        Control::draw(&mut edit, &mut frame);
        assert_eq!(Control::cursor(&edit), Some((1, 1)));
    }
}
