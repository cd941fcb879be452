//! Two-stage trie: a per-code-point insertion trie ([UnicodeTrie]) that is
//! compacted into a path-compressed [RadixTrie] once all keys are in.

pub mod radix_trie;
pub mod trie_error;
pub mod unicode_trie;

pub use radix_trie::RadixTrie;
pub use trie_error::TrieError;
pub use unicode_trie::UnicodeTrie;
