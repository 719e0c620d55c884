//! Word motions: `w`, `b` and the `cw` deletion.
//!
//! A **word** is a run of cells that are not delimiters. Delimiters are
//! space, tab, newline, `(`, `)`, `,` and `;`, the same set the
//! highlighter splits words on.
//!
//! `cw` works on [`DelimClass`] instead: it deletes forward while the class
//! stays the one under the cursor when the chord started.

use crate::backend::TextBackend;
use crate::position::Position;

/// Coarse character class used by `cw`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DelimClass {
    /// Anything that can be part of a word.
    Normal,
    /// Space or tab.
    Whitespace,
    /// `(`, `)`, `,` or `;`.
    Symbol,
    /// A line's implicit newline.
    Newline,
}

/// Whether `ch` separates words.
#[inline]
#[must_use]
pub const fn is_delimiter(ch: char) -> bool {
    matches!(ch, ' ' | '\t' | '\n' | '(' | ')' | ',' | ';')
}

#[must_use]
pub const fn classify(ch: char) -> DelimClass {
    match ch {
        ' ' | '\t' => DelimClass::Whitespace,
        '\n' => DelimClass::Newline,
        '(' | ')' | ',' | ';' => DelimClass::Symbol,
        _ => DelimClass::Normal,
    }
}

/// The character under the cursor, `'\n'` on a line terminator.
fn char_under<B: TextBackend + ?Sized>(backend: &B) -> char {
    backend.cell_at_cursor().map_or('\n', |c| c.ch)
}

/// `w`: move to the start of the next word.
///
/// Skips the rest of the current word, then every delimiter, newlines and
/// empty lines included. Stops on the last slot of the document when no
/// word follows; it never wraps back to the top.
pub fn word_forward<B: TextBackend + ?Sized>(backend: &mut B) {
    while !is_delimiter(char_under(backend)) {
        if !backend.cursor_next() {
            return;
        }
    }
    while is_delimiter(char_under(backend)) {
        if !backend.cursor_next() {
            return;
        }
    }
}

/// `b`: move to the start of the current or previous word.
pub fn word_backward<B: TextBackend + ?Sized>(backend: &mut B) {
    if !backend.cursor_previous() {
        return;
    }
    while is_delimiter(char_under(backend)) {
        if !backend.cursor_previous() {
            return;
        }
    }
    let Position { line, mut col } = backend.cursor();
    let cells = backend.line(line);
    while col > 0 && !is_delimiter(cells[col - 1].ch) {
        col -= 1;
    }
    backend.set_cursor(Position::new(line, col));
}

/// `cw`: delete forward while the class under the cursor matches the
/// class at the start. Stays on the current line. Returns the number of
/// characters deleted.
pub fn change_word<B: TextBackend + ?Sized>(backend: &mut B) -> usize {
    let Some(start) = backend.cell_at_cursor() else {
        return 0;
    };
    let class = classify(start.ch);
    let mut deleted = 0;
    while backend
        .cell_at_cursor()
        .is_some_and(|cell| classify(cell.ch) == class)
    {
        backend.delete();
        deleted += 1;
    }
    deleted
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::line_buffer::LineBuffer;
    use pretty_assertions::assert_eq;

    fn at(text: &str, line: usize, col: usize) -> LineBuffer {
        let mut b = LineBuffer::from_text(text);
        b.set_cursor(Position::new(line, col));
        b
    }

    #[test]
    fn delimiter_set() {
        for ch in [' ', '\t', '\n', '(', ')', ',', ';'] {
            assert!(is_delimiter(ch), "{ch:?}");
        }
        for ch in ['a', '_', '.', '\'', '*'] {
            assert!(!is_delimiter(ch), "{ch:?}");
        }
    }

    #[test]
    fn classes() {
        assert_eq!(classify('x'), DelimClass::Normal);
        assert_eq!(classify('\t'), DelimClass::Whitespace);
        assert_eq!(classify(','), DelimClass::Symbol);
        assert_eq!(classify('\n'), DelimClass::Newline);
    }

    #[test]
    fn w_moves_to_next_word() {
        let mut b = at("foo bar", 0, 0);
        word_forward(&mut b);
        assert_eq!(b.cursor(), Position::new(0, 4));
    }

    #[test]
    fn w_skips_delimiter_runs() {
        let mut b = at("count(*), x", 0, 0);
        word_forward(&mut b);
        assert_eq!(b.cursor(), Position::new(0, 6));
        word_forward(&mut b);
        assert_eq!(b.cursor(), Position::new(0, 10));
    }

    #[test]
    fn w_crosses_lines_and_skips_empty_ones() {
        let mut b = at("foo\n\n  bar", 0, 1);
        word_forward(&mut b);
        assert_eq!(b.cursor(), Position::new(2, 2));
    }

    #[test]
    fn w_stops_at_document_end() {
        let mut b = at("foo bar", 0, 4);
        word_forward(&mut b);
        assert_eq!(b.cursor(), Position::new(0, 7));
        word_forward(&mut b);
        assert_eq!(b.cursor(), Position::new(0, 7));
    }

    #[test]
    fn b_moves_to_word_start() {
        let mut b = at("foo bar", 0, 6);
        word_backward(&mut b);
        assert_eq!(b.cursor(), Position::new(0, 4));
        word_backward(&mut b);
        assert_eq!(b.cursor(), Position::ZERO);
        word_backward(&mut b);
        assert_eq!(b.cursor(), Position::ZERO);
    }

    #[test]
    fn b_crosses_lines() {
        let mut b = at("select x\n\n  from", 2, 2);
        word_backward(&mut b);
        assert_eq!(b.cursor(), Position::new(0, 7));
    }

    #[test]
    fn cw_deletes_word_tail() {
        let mut b = at("foo bar", 0, 1);
        assert_eq!(change_word(&mut b), 2);
        assert_eq!(b.text(), "f bar");
        assert_eq!(b.cursor(), Position::new(0, 1));
    }

    #[test]
    fn cw_on_whitespace_deletes_the_run() {
        let mut b = at("a   b", 0, 1);
        change_word(&mut b);
        assert_eq!(b.text(), "ab");
    }

    #[test]
    fn cw_stops_at_line_end() {
        let mut b = at("foo\nbar", 0, 0);
        change_word(&mut b);
        assert_eq!(b.text(), "\nbar");
        assert_eq!(b.line_count(), 2);
    }

    #[test]
    fn cw_on_newline_deletes_nothing() {
        let mut b = at("foo\nbar", 0, 3);
        assert_eq!(change_word(&mut b), 0);
        assert_eq!(b.text(), "foo\nbar");
    }
}
