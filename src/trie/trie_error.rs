//! Error type for trie operations.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum TrieError {
    /// Insert without `replace` hit a key that already holds a value.
    #[error("key already exists in trie: '{0}'")]
    DuplicateKey(String),

    /// The "must exist" accessor did not find the key.
    #[error("key not found in trie: '{0}'")]
    KeyNotFound(String),
}
