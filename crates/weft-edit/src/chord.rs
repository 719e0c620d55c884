//! Multi-key commands.
//!
//! A chord starts with `d`, `c` or `g` in Command mode. Each following key
//! is appended and the whole buffer is resolved again:
//!
//! | Keys | Command                       |
//! |------|-------------------------------|
//! | `dd` | yank and delete the line      |
//! | `cw` | change to the end of the word |
//! | `gg` | go to the first line          |
//!
//! Anything else cancels the chord. Escape is handled by the EditBox, which
//! clears the buffer and swallows the key.

use weft_term::input::KeyEvent;

/// A completed chord.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChordCommand {
    DeleteLine,
    ChangeWord,
    GotoTop,
}

/// Result of feeding a key to the chord buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChordOutcome {
    /// More keys are needed.
    Pending,
    Complete(ChordCommand),
    /// The keys match no chord. The buffer has been cleared.
    Cancelled,
}

/// Buffered chord keys.
#[derive(Debug, Default)]
pub struct Chord {
    keys: Vec<KeyEvent>,
}

impl Chord {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `key` starts a chord.
    #[must_use]
    pub fn starts_chord(key: &KeyEvent) -> bool {
        matches!(key.printable(), Some('d' | 'c' | 'g'))
    }

    #[inline]
    #[must_use]
    pub fn is_pending(&self) -> bool {
        !self.keys.is_empty()
    }

    /// Append `key` and resolve. The buffer is cleared unless the result
    /// is [`ChordOutcome::Pending`].
    pub fn push(&mut self, key: KeyEvent) -> ChordOutcome {
        self.keys.push(key);
        let outcome = resolve(&self.keys);
        if outcome != ChordOutcome::Pending {
            self.keys.clear();
        }
        outcome
    }

    pub fn clear(&mut self) {
        self.keys.clear();
    }
}

fn resolve(keys: &[KeyEvent]) -> ChordOutcome {
    let chars: Vec<Option<char>> = keys.iter().map(KeyEvent::printable).collect();
    match chars.as_slice() {
        [Some('d' | 'c' | 'g')] => ChordOutcome::Pending,
        [Some('d'), Some('d')] => ChordOutcome::Complete(ChordCommand::DeleteLine),
        [Some('c'), Some('w')] => ChordOutcome::Complete(ChordCommand::ChangeWord),
        [Some('g'), Some('g')] => ChordOutcome::Complete(ChordCommand::GotoTop),
        _ => ChordOutcome::Cancelled,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use weft_term::input::KeyCode;

    fn key(ch: char) -> KeyEvent {
        KeyEvent::plain(KeyCode::Char(ch))
    }

    #[test]
    fn completes_known_chords() {
        for (a, b, cmd) in [
            ('d', 'd', ChordCommand::DeleteLine),
            ('c', 'w', ChordCommand::ChangeWord),
            ('g', 'g', ChordCommand::GotoTop),
        ] {
            let mut chord = Chord::new();
            assert_eq!(chord.push(key(a)), ChordOutcome::Pending);
            assert!(chord.is_pending());
            assert_eq!(chord.push(key(b)), ChordOutcome::Complete(cmd));
            assert!(!chord.is_pending());
        }
    }

    #[test]
    fn unknown_continuation_cancels() {
        let mut chord = Chord::new();
        chord.push(key('d'));
        assert_eq!(chord.push(key('x')), ChordOutcome::Cancelled);
        assert!(!chord.is_pending());
    }

    #[test]
    fn non_char_continuation_cancels() {
        let mut chord = Chord::new();
        chord.push(key('g'));
        assert_eq!(chord.push(KeyEvent::plain(KeyCode::Down)), ChordOutcome::Cancelled);
    }

    #[test]
    fn ctrl_does_not_start_a_chord() {
        assert!(Chord::starts_chord(&key('c')));
        assert!(!Chord::starts_chord(&KeyEvent::ctrl('c')));
        assert!(!Chord::starts_chord(&key('x')));
    }
}
