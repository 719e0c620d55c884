//! Errors returned by the editing engine.

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum EditError {
    /// A flat character index past the end of the document.
    #[error("index {index} is out of range for a document of {len} positions")]
    OutOfRange { index: usize, len: usize },
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn message_names_both_numbers() {
        let err = EditError::OutOfRange { index: 7, len: 4 };
        assert_eq!(
            err.to_string(),
            "index 7 is out of range for a document of 4 positions"
        );
    }
}
