//! Path-compressed form of a [UnicodeTrie] for serialization.

use crate::json::{JsonError, JsonWriter, ToJson};
use crate::trie::unicode_trie::UnicodeTrie;
use std::io::Write;

// =#========================================================================#=
// RADIX TRIE
// =#========================================================================#=
/// A trie in which every maximal chain of valueless single-child nodes is
/// merged into one edge labelled by the concatenated code points.
///
/// Built from a finished [UnicodeTrie] via [RadixTrie::compact]; the source
/// trie is not modified. A node holding a value, or having more than one
/// child, always ends an edge. Each node also records the number of nodes
/// of its compacted subtree, which the search index uses to split the trie
/// into documents.
///
/// # Example
/// ```
/// use tolsplit::trie::{RadixTrie, UnicodeTrie};
///
/// let mut trie = UnicodeTrie::new();
/// trie.insert("abcd", 1, false).unwrap();
/// trie.insert("abf", 2, false).unwrap();
///
/// let radix = RadixTrie::compact(&trie);
/// let edges: Vec<&str> = radix.edges().map(|(edge, _)| edge).collect();
/// assert_eq!(edges, ["ab"]);
/// assert_eq!(radix.lookup("abf"), Some(&2));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct RadixTrie<V> {
    children: Vec<(String, RadixTrie<V>)>,
    value: Option<V>,
    node_count: usize,
}

impl<V: Clone> RadixTrie<V> {
    /// Builds the compacted form of `char_trie`, copying its values.
    pub fn compact(char_trie: &UnicodeTrie<V>) -> Self {
        let mut node = RadixTrie {
            children: Vec::with_capacity(char_trie.num_children()),
            value: char_trie.value().cloned(),
            node_count: 1,
        };

        for (ch, child) in char_trie.children() {
            let mut edge = String::new();
            edge.push(ch);

            let mut end = child;
            while let Some((next_ch, next)) = end.single_link() {
                edge.push(next_ch);
                end = next;
            }

            let compacted = RadixTrie::compact(end);
            node.node_count += compacted.node_count;
            node.children.push((edge, compacted));
        }

        node
    }
}

impl<V> RadixTrie<V> {
    /// Value stored at this node.
    pub fn value(&self) -> Option<&V> {
        self.value.as_ref()
    }

    /// Outgoing edges with their target nodes, in code point order.
    pub fn edges(&self) -> impl Iterator<Item = (&str, &RadixTrie<V>)> {
        self.children.iter().map(|(edge, child)| (edge.as_str(), child))
    }

    pub fn num_children(&self) -> usize {
        self.children.len()
    }

    /// Number of nodes in the compacted subtree rooted here, including itself.
    pub fn node_count(&self) -> usize {
        self.node_count
    }

    /// Returns the value stored under exactly `key`, if any.
    pub fn lookup(&self, key: &str) -> Option<&V> {
        let mut node = self;
        let mut rest = key;
        while !rest.is_empty() {
            let (edge, child) = node.edges().find(|(edge, _)| rest.starts_with(edge))?;
            rest = &rest[edge.len()..];
            node = child;
        }
        node.value()
    }
}

/// Writes the whole trie inline as `{"c": {edge: node, ...}, "v": value}`,
/// omitting `"c"` without children and `"v"` without value.
impl<V: ToJson> ToJson for RadixTrie<V> {
    fn write_json<W: Write>(&self, json: &mut JsonWriter<W>) -> Result<(), JsonError> {
        json.begin('{')?;
        if !self.children.is_empty() {
            json.key("c")?.begin('{')?;
            for (edge, child) in &self.children {
                json.key(edge)?.value(child)?;
            }
            json.end('}')?;
        }
        if let Some(value) = &self.value {
            json.key("v")?.value(value)?;
        }
        json.end('}')?;
        Ok(())
    }
}
