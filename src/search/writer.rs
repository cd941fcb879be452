//! Serialization of the compacted search trie into size-bounded documents.

use crate::error::Error;
use crate::export::store::{DocumentReport, DocumentStore};
use crate::json::{JsonWriter, ToJson};
use crate::trie::RadixTrie;
use log::debug;

/// Default maximum number of trie nodes of an extracted search document
pub const DEFAULT_SEARCH_MAX_SUBTREE_SIZE: usize = 20_000;

/// Default minimum number of trie nodes of an extracted search document
pub const DEFAULT_SEARCH_MIN_SUBTREE_SIZE: usize = 1_000;

/// Size bounds for splitting the search trie, counted in compacted trie nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchSplitConfig {
    pub max_subtree_size: usize,
    pub min_subtree_size: usize,
}

impl Default for SearchSplitConfig {
    fn default() -> Self {
        Self {
            max_subtree_size: DEFAULT_SEARCH_MAX_SUBTREE_SIZE,
            min_subtree_size: DEFAULT_SEARCH_MIN_SUBTREE_SIZE,
        }
    }
}

impl SearchSplitConfig {
    pub fn new(max_subtree_size: usize, min_subtree_size: usize) -> Self {
        Self {
            max_subtree_size,
            min_subtree_size,
        }
    }
}

/// Name of the search document with the given id (0 = root document).
pub fn search_document_name(subtree_id: usize) -> String {
    format!("search-{subtree_id}.json")
}

// =#========================================================================#=
// SEARCH INDEX WRITER
// =#========================================================================#=
/// Writes a [RadixTrie] as one root document `search-0.json` plus one
/// document per extracted sub-trie.
///
/// The root document is walked depth-first; the first node on each path
/// whose size lies within the configured bounds is written to its own
/// document right away and replaced by `{"subtree_index": N}`, with `N`
/// counting up from 1. Extracted documents are not split further.
///
/// Node shape: `{"c": {edge: node, ...}, "v": [node_id, subtree_id]}`,
/// without `"c"` for childless and without `"v"` for valueless nodes.
pub struct SearchIndexWriter<'a, S: DocumentStore> {
    store: &'a mut S,
    config: SearchSplitConfig,
    next_subtree_id: usize,
    reports: Vec<DocumentReport>,
}

impl<'a, S: DocumentStore> SearchIndexWriter<'a, S> {
    pub fn new(store: &'a mut S, config: SearchSplitConfig) -> Self {
        Self {
            store,
            config,
            next_subtree_id: 1,
            reports: Vec::new(),
        }
    }

    /// Writes all documents of `trie`, returning one report per document
    /// in the order they were completed (the root document last).
    pub fn write<V: ToJson>(mut self, trie: &RadixTrie<V>) -> Result<Vec<DocumentReport>, Error> {
        self.write_document(trie, 0)?;
        debug!("wrote search index as {} document(s)", self.reports.len());
        Ok(self.reports)
    }

    fn write_document<V: ToJson>(&mut self, node: &RadixTrie<V>, subtree_id: usize) -> Result<(), Error> {
        let name = search_document_name(subtree_id);
        let mut json = JsonWriter::new(self.store.open(&name)?);
        self.write_node(node, &mut json, subtree_id == 0)?;
        let bytes = json.bytes_written();
        self.store.close(&name, json.finish()?)?;

        self.reports.push(DocumentReport { name, bytes });
        Ok(())
    }

    fn write_node<V: ToJson>(
        &mut self,
        node: &RadixTrie<V>,
        json: &mut JsonWriter<S::Sink>,
        splittable: bool,
    ) -> Result<(), Error> {
        json.begin('{')?;

        if node.num_children() > 0 {
            json.key("c")?.begin('{')?;
            for (edge, child) in node.edges() {
                json.key(edge)?;
                if splittable && self.fits(child) {
                    let subtree_id = self.next_subtree_id;
                    self.next_subtree_id += 1;
                    self.write_document(child, subtree_id)?;
                    json.begin('{')?.key("subtree_index")?.value(subtree_id)?.end('}')?;
                } else {
                    self.write_node(child, json, splittable)?;
                }
            }
            json.end('}')?;
        }

        if let Some(value) = node.value() {
            json.key("v")?.value(value)?;
        }

        json.end('}')?;
        Ok(())
    }

    fn fits<V>(&self, node: &RadixTrie<V>) -> bool {
        node.node_count() <= self.config.max_subtree_size
            && node.node_count() >= self.config.min_subtree_size
    }
}
