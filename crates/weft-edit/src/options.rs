//! Editor options and colors.
//!
//! Both structs deserialize from TOML with every field optional:
//!
//! ```toml
//! tab_width = 2
//! indent_width = 2
//!
//! [palette]
//! keyword = "#5fafff"
//! string = "214"
//! ```
//!
//! | Field          | Default |
//! |----------------|---------|
//! | `tab_width`    | 4       |
//! | `indent_width` | 4       |

use serde::Deserialize;
use weft_term::color::CellColor;

/// Behavior knobs for an [`EditBox`](crate::editbox::EditBox).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct EditOptions {
    /// Spaces inserted by Tab in Insert mode.
    #[serde(default = "default_tab_width")]
    pub tab_width: usize,
    /// Leading spaces removed by shift-tab.
    #[serde(default = "default_indent_width")]
    pub indent_width: usize,
    #[serde(default)]
    pub palette: Palette,
}

const fn default_tab_width() -> usize {
    4
}

const fn default_indent_width() -> usize {
    4
}

impl Default for EditOptions {
    fn default() -> Self {
        Self {
            tab_width: default_tab_width(),
            indent_width: default_indent_width(),
            palette: Palette::default(),
        }
    }
}

/// Colors used by the highlighter and the EditBox chrome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Palette {
    pub text: CellColor,
    pub background: CellColor,
    pub keyword: CellColor,
    pub type_name: CellColor,
    pub string: CellColor,
    /// Background of selected lines in VisualLine mode.
    pub selection: CellColor,
    /// Border and status line.
    pub status: CellColor,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            text: CellColor::WHITE,
            background: CellColor::BLACK,
            keyword: CellColor::Ansi256(75),
            type_name: CellColor::Ansi256(114),
            string: CellColor::Ansi256(214),
            selection: CellColor::Ansi256(238),
            status: CellColor::WHITE,
        }
    }
}
