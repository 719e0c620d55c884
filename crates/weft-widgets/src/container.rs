//! Top-level control container.
//!
//! The container owns every control, tracks which one has focus and routes
//! key events: its own bindings first (exit and focus cycling), then the
//! focused control. It implements [`App`], so [`run`] is the whole main
//! loop of a weft program.

use std::io;

use tracing::{debug, warn};
use weft_term::buffer::FrameBuffer;
use weft_term::event_loop::{Action, App, EventLoop};
use weft_term::input::{Event, KeyCode, KeyEvent, Modifiers};
use weft_term::surface::Region;

use crate::control::Control;

// ─── Key Bindings ────────────────────────────────────────────────────────────

/// A key code plus the exact modifiers it must be pressed with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyBinding {
    pub code: KeyCode,
    pub modifiers: Modifiers,
}

impl KeyBinding {
    #[inline]
    #[must_use]
    pub const fn new(code: KeyCode, modifiers: Modifiers) -> Self {
        Self { code, modifiers }
    }

    #[must_use]
    pub fn matches(&self, key: &KeyEvent) -> bool {
        self.code == key.code && self.modifiers == key.modifiers
    }
}

impl From<KeyEvent> for KeyBinding {
    fn from(key: KeyEvent) -> Self {
        Self::new(key.code, key.modifiers)
    }
}

/// Keys the container handles before any control sees them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyBindings {
    pub exit: KeyBinding,
    pub focus_next: KeyBinding,
    pub focus_previous: KeyBinding,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            exit: KeyEvent::ctrl('c').into(),
            focus_next: KeyEvent::plain(KeyCode::Tab).into(),
            focus_previous: KeyEvent::shift_tab().into(),
        }
    }
}

// ─── Container ───────────────────────────────────────────────────────────────

/// An ordered set of controls with a single focus.
#[derive(Default)]
pub struct Container {
    controls: Vec<Box<dyn Control>>,
    focused: Option<usize>,
    pub bindings: KeyBindings,
}

impl Container {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_bindings(bindings: KeyBindings) -> Self {
        Self {
            bindings,
            ..Self::default()
        }
    }

    /// Append a control. The first focusable control added takes focus.
    pub fn add(&mut self, control: impl Control + 'static) -> usize {
        let index = self.controls.len();
        self.controls.push(Box::new(control));
        if self.focused.is_none() && self.controls[index].focusable() {
            self.focus(Some(index));
        }
        index
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.controls.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.controls.is_empty()
    }

    #[inline]
    #[must_use]
    pub const fn focused(&self) -> Option<usize> {
        self.focused
    }

    #[must_use]
    pub fn control(&self, index: usize) -> Option<&dyn Control> {
        self.controls.get(index).map(|c| &**c)
    }

    pub fn control_mut(&mut self, index: usize) -> Option<&mut (dyn Control + 'static)> {
        self.controls.get_mut(index).map(|c| &mut **c)
    }

    /// Move focus to the next focusable control, wrapping at the end.
    pub fn focus_next(&mut self) {
        let next = self.scan(|start, step, len| (start + step) % len);
        self.focus(next);
    }

    /// Move focus to the previous focusable control, wrapping at the start.
    pub fn focus_previous(&mut self) {
        let previous = self.scan(|start, step, len| (start + len - step % len) % len);
        self.focus(previous);
    }

    /// First focusable control visited by `walk`, starting after the
    /// focused one. Comes back to the focused control when it is the only
    /// candidate.
    fn scan(&self, walk: impl Fn(usize, usize, usize) -> usize) -> Option<usize> {
        let len = self.controls.len();
        if len == 0 {
            return None;
        }
        let Some(start) = self.focused else {
            return self.controls.iter().position(|c| c.focusable());
        };
        (1..=len)
            .map(|step| walk(start, step, len))
            .find(|&i| self.controls[i].focusable())
    }

    fn focus(&mut self, index: Option<usize>) {
        if index == self.focused {
            return;
        }
        if let Some(old) = self.focused.and_then(|i| self.controls.get_mut(i)) {
            old.set_focus(false);
        }
        if let Some(new) = index.and_then(|i| self.controls.get_mut(i)) {
            new.set_focus(true);
        }
        debug!(from = ?self.focused, to = ?index, "focus changed");
        self.focused = index;
    }

    /// Route one event. Returns `false` once the exit binding was pressed.
    pub fn dispatch(&mut self, event: &Event) -> bool {
        let Event::Key(key) = event else {
            return true;
        };
        if self.bindings.exit.matches(key) {
            debug!("exit binding pressed");
            return false;
        }
        if self.bindings.focus_next.matches(key) {
            self.focus_next();
        } else if self.bindings.focus_previous.matches(key) {
            self.focus_previous();
        } else if let Some(control) = self.focused.and_then(|i| self.controls.get_mut(i)) {
            control.handle_event(event);
        }
        true
    }
}

impl App for Container {
    fn on_event(&mut self, event: &Event) -> Action {
        if self.dispatch(event) {
            Action::Continue
        } else {
            Action::Quit
        }
    }

    fn paint(&mut self, frame: &mut FrameBuffer) {
        for (index, control) in self.controls.iter_mut().enumerate() {
            let area = control.bounds();
            match Region::new(frame, area) {
                Ok(mut region) => control.draw(&mut region),
                Err(err) => warn!(index, %err, "control skipped"),
            }
        }
    }

    fn cursor(&self) -> Option<(u16, u16)> {
        let control = self.controls.get(self.focused?)?;
        let (x, y) = control.cursor()?;
        let area = control.bounds();
        Some((area.left.checked_add(x)?, area.top.checked_add(y)?))
    }
}

/// Run `container` on the terminal until the exit binding is pressed.
///
/// # Errors
///
/// Returns an error if the terminal cannot be set up, restored or
/// written to.
pub fn run(mut container: Container) -> io::Result<()> {
    let mut event_loop = EventLoop::new()?;
    event_loop.run(&mut container)
}
