//! Line-wise clipboard for `dd`, VisualLine `d` and `p`.
//!
//! Yanked lines are deep copies: editing the document afterwards never
//! changes what `p` pastes.

use crate::backend::Line;

/// Whole lines captured by the last yank.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Clipboard {
    lines: Vec<Line>,
}

impl Clipboard {
    #[must_use]
    pub const fn new() -> Self {
        Self { lines: Vec::new() }
    }

    /// Replace the contents.
    pub fn yank(&mut self, lines: Vec<Line>) {
        self.lines = lines;
    }

    #[must_use]
    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// The lines joined with `\n`, without a trailing newline.
    #[must_use]
    pub fn text(&self) -> String {
        let mut out = String::new();
        for (i, line) in self.lines.iter().enumerate() {
            if i > 0 {
                out.push('\n');
            }
            out.extend(line.iter().map(|c| c.ch));
        }
        out
    }
}
