//! Static text.

use weft_term::surface::{DrawTarget, Rect};

use crate::control::{Control, Style};

/// One line of text. Never takes focus.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Label {
    pub bounds: Rect,
    pub text: String,
    pub style: Style,
}

impl Label {
    #[must_use]
    pub fn new(bounds: Rect, text: impl Into<String>) -> Self {
        Self {
            bounds,
            text: text.into(),
            style: Style::default(),
        }
    }
}

impl Control for Label {
    fn bounds(&self) -> Rect {
        self.bounds
    }

    fn draw(&mut self, target: &mut dyn DrawTarget) {
        target.print(0, 0, self.style.fg, self.style.bg, &self.text);
    }
}
