//! Error type for the streaming JSON writer.

use thiserror::Error;

/// Violation of the writer's token protocol, or a failure of its sink.
#[derive(Debug, Error)]
pub enum JsonError {
    #[error("invalid bracket {0:?}")]
    InvalidBracket(char),

    #[error("unmatched bracket: expected {expected:?} but found {found:?}")]
    UnmatchedBracket { expected: char, found: char },

    #[error("bracket not open")]
    BracketNotOpen,

    #[error("unexpected key")]
    UnexpectedKey,

    #[error("expected key")]
    ExpectedKey,

    #[error("unexpected token")]
    UnexpectedToken,

    #[error("document already complete")]
    DocumentComplete,

    #[error("document incomplete")]
    IncompleteDocument,

    #[error("number is not finite")]
    NonFiniteNumber,

    #[error("IO error - {0}")]
    Io(#[from] std::io::Error),
}
