//! Searchable name index over the decomposed tree.
//!
//! [SearchIndex] maps every taxon name to a [NodePointer] telling a viewer
//! which node to show and which subtree document holds it. Names are keyed
//! after [normalize_name]; a name already taken by a different node is
//! re-keyed as `"<name> (<ext_id>)"`.
//!
//! [SearchIndexWriter] serializes the compacted index, splitting it into
//! size-bounded documents.

pub mod writer;

pub use writer::{SearchIndexWriter, SearchSplitConfig};

use crate::decompose::Decomposition;
use crate::json::{JsonError, JsonWriter, ToJson};
use crate::trie::{RadixTrie, TrieError, UnicodeTrie};
use log::{debug, info};
use std::borrow::Cow;
use std::collections::HashMap;
use std::io::Write;

// =#========================================================================#=
// NODE POINTER
// =#========================================================================#=
/// Location of a taxon: its node id and the subtree document holding it.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct NodePointer {
    pub node_id: usize,
    pub subtree_id: usize,
}

impl NodePointer {
    pub fn new(node_id: usize, subtree_id: usize) -> Self {
        Self { node_id, subtree_id }
    }
}

/// Written as the two-element array `[node_id, subtree_id]`.
impl ToJson for NodePointer {
    fn write_json<W: Write>(&self, json: &mut JsonWriter<W>) -> Result<(), JsonError> {
        json.begin('[')?.value(self.node_id)?.value(self.subtree_id)?.end(']')?;
        Ok(())
    }
}

/// Upper-cases the first character of `name` if it is a lowercase ASCII letter.
///
/// # Example
/// ```
/// use tolsplit::search::normalize_name;
///
/// assert_eq!(normalize_name("homo"), "Homo");
/// assert_eq!(normalize_name("Homo"), "Homo");
/// assert_eq!(normalize_name("ábaco"), "ábaco");
/// ```
pub fn normalize_name(name: &str) -> Cow<'_, str> {
    match name.as_bytes().first() {
        Some(first) if first.is_ascii_lowercase() => {
            let mut normalized = String::with_capacity(name.len());
            normalized.push(first.to_ascii_uppercase() as char);
            normalized.push_str(&name[1..]);
            Cow::Owned(normalized)
        }
        _ => Cow::Borrowed(name),
    }
}

// =#========================================================================#=
// SEARCH INDEX
// =#========================================================================#=
/// Name → [NodePointer] index with collision handling.
///
/// # Example
/// ```
/// use tolsplit::search::{NodePointer, SearchIndex};
///
/// let mut index = SearchIndex::new();
/// index.insert_taxon("Morus", "ott1", NodePointer::new(10, 0)).unwrap();
/// index.insert_taxon("Morus", "ott2", NodePointer::new(20, 3)).unwrap();
///
/// assert_eq!(index.lookup("morus"), Some(&NodePointer::new(10, 0)));
/// assert_eq!(index.lookup("Morus (ott2)"), Some(&NodePointer::new(20, 3)));
/// ```
#[derive(Debug, Clone, Default)]
pub struct SearchIndex {
    trie: UnicodeTrie<NodePointer>,
    num_entries: usize,
}

impl SearchIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Indexes every named node of the forest.
    ///
    /// Each node points to its home document, the highest forest entry it
    /// appears in; that is the most finely extracted subtree containing it.
    /// Entries are visited in forest order, each in pre-order, so among
    /// nodes sharing a name the first one met keeps the plain name.
    ///
    /// # Errors
    /// Returns [TrieError::DuplicateKey] if a re-keyed name still collides.
    pub fn from_decomposition(decomposition: &Decomposition) -> Result<Self, TrieError> {
        let mut home: HashMap<usize, usize> = HashMap::new();
        for (subtree_id, subtree) in decomposition.forest().iter().enumerate() {
            for node in subtree.iter() {
                home.insert(node.id(), subtree_id);
            }
        }
        debug!("located {} node(s) in their home documents", home.len());

        let mut index = Self::new();
        for (subtree_id, subtree) in decomposition.forest().iter().enumerate() {
            for node in subtree.iter().filter(|node| node.has_name()) {
                let home_id = home.get(&node.id()).copied().unwrap_or(subtree_id);
                index.insert_taxon(node.name(), node.ext_id(), NodePointer::new(node.id(), home_id))?;
            }
        }

        info!("search index holds {} name(s)", index.len());
        Ok(index)
    }

    /// Adds `name` for the node `pointer` refers to.
    ///
    /// - A name not yet taken is stored under its normalized form.
    /// - Re-inserting a name for the node that already holds it is a no-op.
    /// - A name held by a different node is stored as `"<name> (<ext_id>)"`.
    ///
    /// # Errors
    /// Returns [TrieError::DuplicateKey] if the composite key is taken by a
    /// different node as well.
    pub fn insert_taxon(
        &mut self,
        name: &str,
        ext_id: &str,
        pointer: NodePointer,
    ) -> Result<(), TrieError> {
        let key = normalize_name(name);
        match self.trie.lookup(&key) {
            None => {
                self.trie.insert(&key, pointer, false)?;
            }
            Some(existing) if existing.node_id == pointer.node_id => return Ok(()),
            Some(_) => {
                let composite = format!("{key} ({ext_id})");
                if let Some(existing) = self.trie.lookup(&composite) {
                    if existing.node_id == pointer.node_id {
                        return Ok(());
                    }
                }
                self.trie.insert(&composite, pointer, false)?;
            }
        }
        self.num_entries += 1;
        Ok(())
    }

    /// Looks up a name exactly, after normalizing it.
    pub fn lookup(&self, name: &str) -> Option<&NodePointer> {
        self.trie.lookup(&normalize_name(name))
    }

    /// Number of stored keys.
    pub fn len(&self) -> usize {
        self.num_entries
    }

    pub fn is_empty(&self) -> bool {
        self.num_entries == 0
    }

    pub fn trie(&self) -> &UnicodeTrie<NodePointer> {
        &self.trie
    }

    /// Builds the compacted trie for serialization.
    pub fn compact(&self) -> RadixTrie<NodePointer> {
        RadixTrie::compact(&self.trie)
    }
}
