//! EditBox modes.
//!
//! | Mode       | Cursor limit       | Status line         | Purpose            |
//! |------------|--------------------|---------------------|--------------------|
//! | Command    | `0..len-1`         | (none)              | Motions, commands  |
//! | Insert     | `0..len`           | `-- INSERT --`      | Typing text        |
//! | VisualLine | `0..len-1`         | `-- VISUAL LINE --` | Line selection     |

use std::fmt;

use crate::backend::ClampLimit;

/// The current editing mode. Pure data; key dispatch lives in the EditBox.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mode {
    /// Keys are commands. The initial mode.
    #[default]
    Command,
    /// Keys produce text.
    Insert,
    /// `V`: whole lines between the anchor and the cursor are selected.
    VisualLine,
}

impl Mode {
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Command => "COMMAND",
            Self::Insert => "INSERT",
            Self::VisualLine => "VISUAL LINE",
        }
    }

    /// The status line banner, if the mode shows one.
    #[must_use]
    pub const fn status_text(self) -> Option<&'static str> {
        match self {
            Self::Command => None,
            Self::Insert => Some("-- INSERT --"),
            Self::VisualLine => Some("-- VISUAL LINE --"),
        }
    }

    /// Only Insert lets the cursor rest on a line's newline.
    #[inline]
    #[must_use]
    pub const fn clamp_limit(self) -> ClampLimit {
        match self {
            Self::Insert => ClampLimit::AllowTerminator,
            Self::Command | Self::VisualLine => ClampLimit::OnCharacter,
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn starts_in_command() {
        assert_eq!(Mode::default(), Mode::Command);
    }

    #[test]
    fn clamp_limits() {
        assert_eq!(Mode::Insert.clamp_limit(), ClampLimit::AllowTerminator);
        assert_eq!(Mode::Command.clamp_limit(), ClampLimit::OnCharacter);
        assert_eq!(Mode::VisualLine.clamp_limit(), ClampLimit::OnCharacter);
    }

    #[test]
    fn status_banners() {
        assert_eq!(Mode::Command.status_text(), None);
        assert_eq!(Mode::Insert.status_text(), Some("-- INSERT --"));
        assert_eq!(Mode::VisualLine.to_string(), "VISUAL LINE");
    }
}
