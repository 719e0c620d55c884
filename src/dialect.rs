// SPDX-License-Identifier: MIT
//
// SQL vocabulary for the demo EditBox.
//
// Keywords are a fixed list compared case-insensitively. Types are matched
// by a regex so sized and numbered spellings (`int8`, `float4`,
// `timestamptz`) need no separate entries. `varchar(20)` is split at the
// parenthesis by the highlighter, so only the bare name has to match.

use regex::Regex;
use weft_edit::{Dialect, TokenClass};

const KEYWORDS: &[&str] = &[
    "select", "from", "where", "and", "or", "not", "in", "is", "null", "as", "join", "left",
    "right", "inner", "outer", "on", "group", "by", "order", "having", "limit", "offset",
    "insert", "into", "values", "update", "set", "delete", "create", "table", "drop", "alter",
    "primary", "key", "references", "distinct", "union", "case", "when", "then", "else", "end",
    "like", "between", "exists", "asc", "desc", "default",
];

const TYPES: &str = r"(?i)^(?:(?:small|big)?int(?:eger|[248])?|serial[48]?|bigserial|(?:var)?char|character|text|bool(?:ean)?|date|time(?:stamp)?(?:tz)?|interval|numeric|decimal|real|float[48]?|double|uuid|json[b]?|bytea)$";

/// Classifies SQL words for the highlighter.
#[derive(Debug, Clone)]
pub struct SqlDialect {
    types: Regex,
}

impl SqlDialect {
    /// # Errors
    ///
    /// Returns the regex error if the type pattern fails to compile.
    pub fn new() -> Result<Self, regex::Error> {
        Ok(Self {
            types: Regex::new(TYPES)?,
        })
    }
}

impl Dialect for SqlDialect {
    fn classify(&self, word: &str) -> TokenClass {
        if KEYWORDS.iter().any(|k| k.eq_ignore_ascii_case(word)) {
            TokenClass::Keyword
        } else if self.types.is_match(word) {
            TokenClass::Type
        } else {
            TokenClass::Plain
        }
    }
}

/// The demo's SQL dialect.
///
/// # Errors
///
/// See [`SqlDialect::new`].
pub fn sql_dialect() -> Result<SqlDialect, regex::Error> {
    SqlDialect::new()
}
