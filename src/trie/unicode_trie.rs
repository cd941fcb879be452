//! Insertion trie keyed one Unicode code point per edge.

use crate::trie::trie_error::TrieError;
use std::collections::BTreeMap;

// =#========================================================================#=
// UNICODE TRIE
// =#========================================================================#=
/// A trie with one `char` per edge, used while collecting keys.
///
/// Keys are split into code points, not bytes, so a multi-byte character is
/// a single edge. Children are kept sorted by code point, which makes every
/// traversal (and thus the compacted output) deterministic.
///
/// Once all keys are inserted, the trie is turned into a
/// [RadixTrie](crate::trie::RadixTrie) for serialization.
///
/// # Example
/// ```
/// use tolsplit::trie::UnicodeTrie;
///
/// let mut trie = UnicodeTrie::new();
/// trie.insert("Aves", 1, false).unwrap();
/// assert_eq!(trie.lookup("Aves"), Some(&1));
/// assert_eq!(trie.lookup("Ave"), None);
/// assert!(trie.insert("Aves", 2, false).is_err());
/// ```
#[derive(Debug, Clone)]
pub struct UnicodeTrie<V> {
    children: BTreeMap<char, UnicodeTrie<V>>,
    value: Option<V>,
}

impl<V> Default for UnicodeTrie<V> {
    fn default() -> Self {
        Self {
            children: BTreeMap::new(),
            value: None,
        }
    }
}

impl<V> UnicodeTrie<V> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `value` under `key`.
    ///
    /// # Errors
    /// Returns [TrieError::DuplicateKey] if the key already holds a value
    /// and `replace` is `false`. The trie is left unchanged in that case.
    pub fn insert(&mut self, key: &str, value: V, replace: bool) -> Result<(), TrieError> {
        let mut node = self;
        for ch in key.chars() {
            node = node.children.entry(ch).or_default();
        }

        if node.value.is_some() && !replace {
            return Err(TrieError::DuplicateKey(key.to_string()));
        }
        node.value = Some(value);
        Ok(())
    }

    /// Returns the value stored under exactly `key`, if any.
    pub fn lookup(&self, key: &str) -> Option<&V> {
        let mut node = self;
        for ch in key.chars() {
            node = node.children.get(&ch)?;
        }
        node.value.as_ref()
    }

    /// Returns the value stored under exactly `key`.
    ///
    /// # Errors
    /// Returns [TrieError::KeyNotFound] if no value is stored under `key`.
    pub fn get(&self, key: &str) -> Result<&V, TrieError> {
        self.lookup(key)
            .ok_or_else(|| TrieError::KeyNotFound(key.to_string()))
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.lookup(key).is_some()
    }

    /// Value stored at this node.
    pub fn value(&self) -> Option<&V> {
        self.value.as_ref()
    }

    /// Children of this node in code point order.
    pub fn children(&self) -> impl Iterator<Item = (char, &UnicodeTrie<V>)> {
        self.children.iter().map(|(ch, child)| (*ch, child))
    }

    pub fn num_children(&self) -> usize {
        self.children.len()
    }

    /// Whether this node holds neither a value nor children.
    pub fn is_empty(&self) -> bool {
        self.value.is_none() && self.children.is_empty()
    }

    /// If this node is a valueless link with exactly one child, returns it.
    pub(crate) fn single_link(&self) -> Option<(char, &UnicodeTrie<V>)> {
        if self.value.is_some() || self.children.len() != 1 {
            return None;
        }
        self.children().next()
    }
}
