//! The `Control` trait.
//!
//! A control owns its bounds in screen coordinates but draws in local
//! ones: the container hands `draw` a [`Region`](weft_term::surface::Region)
//! whose origin is the control's top-left corner. `cursor` is local too.

use serde::Deserialize;
use weft_term::color::CellColor;
use weft_term::input::Event;
use weft_term::surface::{DrawTarget, Rect};

/// Foreground and background shared by a control's plain text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Style {
    pub fg: CellColor,
    pub bg: CellColor,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            fg: CellColor::WHITE,
            bg: CellColor::BLACK,
        }
    }
}

/// An on-screen widget.
pub trait Control {
    /// Placement in screen coordinates.
    fn bounds(&self) -> Rect;

    /// Paint into a target exactly the size of `bounds`.
    fn draw(&mut self, target: &mut dyn DrawTarget);

    /// Whether focus cycling may stop here.
    fn focusable(&self) -> bool {
        false
    }

    fn set_focus(&mut self, _focused: bool) {}

    /// Handle an event routed to the focused control. Returns `true` if
    /// it was consumed.
    fn handle_event(&mut self, _event: &Event) -> bool {
        false
    }

    /// Hardware cursor in local coordinates, when focused.
    fn cursor(&self) -> Option<(u16, u16)> {
        None
    }
}

/// Print `text` at `(x, y)` keeping at most `max` cells.
pub(crate) fn print_clipped(
    target: &mut dyn DrawTarget,
    x: u16,
    y: u16,
    style: Style,
    text: &str,
    max: usize,
) {
    let clipped: String = text.chars().take(max).collect();
    target.print(x, y, style.fg, style.bg, &clipped);
}
