//! Crate-level error type.

use crate::json::JsonError;
use crate::parser::ParsingError;
use crate::trie::TrieError;
use thiserror::Error;

/// Any failure of a conversion run. None of these are recovered from: the
/// run aborts on the first error.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Parsing(#[from] ParsingError),

    #[error("JSON writer error: {0}")]
    Json(#[from] JsonError),

    #[error("search index error: {0}")]
    Trie(#[from] TrieError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
