// SPDX-License-Identifier: MIT
//
// Cell colors.
//
// A cell carries exactly one foreground and one background color, stored in
// the form the terminal consumes: the terminal's own default, an index into
// the 256-color palette, or 24-bit RGB. There is no blending or alpha here;
// a control that wants a "selected" look simply picks a different color.
//
// Configuration files spell colors as strings. `CellColor::parse` is the one
// place that understands those spellings, and serde goes through it via
// `try_from = "String"` so a bad color in a config file is reported with the
// offending text.

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;
use thiserror::Error;

// ─── CellColor ───────────────────────────────────────────────────────────────

/// A terminal color as stored in a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(try_from = "String")]
pub enum CellColor {
    /// The terminal's configured default (SGR 39 / 49).
    #[default]
    Default,
    /// A 256-color palette index. 0–7 are the classic ANSI colors,
    /// 8–15 their bright variants.
    Ansi256(u8),
    /// 24-bit color.
    Rgb(u8, u8, u8),
}

/// Names accepted by [`CellColor::parse`] for the eight classic colors.
const NAMED: [(&str, u8); 8] = [
    ("black", 0),
    ("red", 1),
    ("green", 2),
    ("yellow", 3),
    ("blue", 4),
    ("magenta", 5),
    ("cyan", 6),
    ("white", 7),
];

impl CellColor {
    pub const BLACK: Self = Self::Ansi256(0);
    pub const RED: Self = Self::Ansi256(1);
    pub const GREEN: Self = Self::Ansi256(2);
    pub const YELLOW: Self = Self::Ansi256(3);
    pub const BLUE: Self = Self::Ansi256(4);
    pub const MAGENTA: Self = Self::Ansi256(5);
    pub const CYAN: Self = Self::Ansi256(6);
    pub const WHITE: Self = Self::Ansi256(7);

    /// Parse a color from its config-file spelling.
    ///
    /// Accepted forms (case-insensitive, surrounding whitespace ignored):
    /// - `default` or the empty string
    /// - a classic color name: `black`, `red`, … `white`
    /// - `#rrggbb`
    /// - a decimal palette index `0`–`255`
    ///
    /// # Errors
    ///
    /// Returns [`ParseColorError`] carrying the original text when none of
    /// the forms match.
    pub fn parse(text: &str) -> Result<Self, ParseColorError> {
        let s = text.trim().to_ascii_lowercase();
        if s.is_empty() || s == "default" {
            return Ok(Self::Default);
        }
        if let Some(&(_, idx)) = NAMED.iter().find(|(name, _)| *name == s) {
            return Ok(Self::Ansi256(idx));
        }
        if let Some(hex) = s.strip_prefix('#') {
            return parse_hex(hex).ok_or_else(|| ParseColorError(text.to_string()));
        }
        s.parse::<u8>()
            .map(Self::Ansi256)
            .map_err(|_| ParseColorError(text.to_string()))
    }

    /// Whether this is the terminal default color.
    #[inline]
    #[must_use]
    pub const fn is_default(self) -> bool {
        matches!(self, Self::Default)
    }
}

fn parse_hex(hex: &str) -> Option<CellColor> {
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    Some(CellColor::Rgb(channel(0)?, channel(2)?, channel(4)?))
}

/// A color string that matched none of the accepted spellings.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid color `{0}`: expected \"default\", a color name, \"#rrggbb\" or an index 0-255")]
pub struct ParseColorError(pub String);

impl TryFrom<String> for CellColor {
    type Error = ParseColorError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl FromStr for CellColor {
    type Err = ParseColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for CellColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Default => f.write_str("default"),
            Self::Ansi256(idx) => write!(f, "{idx}"),
            Self::Rgb(r, g, b) => write!(f, "#{r:02x}{g:02x}{b:02x}"),
        }
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn default_spellings() {
        assert_eq!(CellColor::parse("default"), Ok(CellColor::Default));
        assert_eq!(CellColor::parse(""), Ok(CellColor::Default));
        assert_eq!(CellColor::parse("  Default "), Ok(CellColor::Default));
    }

    #[test]
    fn names_and_indices() {
        assert_eq!(CellColor::parse("white"), Ok(CellColor::WHITE));
        assert_eq!(CellColor::parse("Blue"), Ok(CellColor::BLUE));
        assert_eq!(CellColor::parse("236"), Ok(CellColor::Ansi256(236)));
        assert_eq!(CellColor::parse("0"), Ok(CellColor::BLACK));
    }

    #[test]
    fn hex_colors() {
        assert_eq!(CellColor::parse("#ff8000"), Ok(CellColor::Rgb(255, 128, 0)));
        assert_eq!(CellColor::parse("#FF8000"), Ok(CellColor::Rgb(255, 128, 0)));
    }

    #[test]
    fn rejects_garbage() {
        assert!(CellColor::parse("256").is_err());
        assert!(CellColor::parse("#fff").is_err());
        assert!(CellColor::parse("#gg0000").is_err());
        assert!(CellColor::parse("chartreuse").is_err());
    }

    #[test]
    fn error_keeps_original_text() {
        let err = CellColor::parse("Nope").unwrap_err();
        assert_eq!(err, ParseColorError("Nope".to_string()));
        assert!(err.to_string().contains("`Nope`"));
    }

    #[test]
    fn display_round_trips() {
        for color in [
            CellColor::Default,
            CellColor::Ansi256(22),
            CellColor::Rgb(1, 2, 255),
        ] {
            assert_eq!(CellColor::parse(&color.to_string()), Ok(color));
        }
    }

    #[test]
    fn is_default() {
        assert!(CellColor::Default.is_default());
        assert!(!CellColor::BLACK.is_default());
    }
}
