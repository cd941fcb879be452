//! JSON shape of tree documents.

use crate::decompose::Decomposition;
use crate::json::{JsonError, JsonWriter, ToJson};
use crate::model::TaxonNode;
use std::io::Write;

/// Writes a node and everything still attached below it as
/// `{"i": id, "n": name, "s": leaves, "subtree_index": tag, "c": [...]}`.
///
/// - `"n"` only for named nodes
/// - `"s"` only for nodes with attached children; a pruned stub carries
///   only its `"subtree_index"`
/// - `"subtree_index"` only for nodes extracted as their own subtree
/// - `"c"` only for nodes with attached children
impl ToJson for TaxonNode {
    fn write_json<W: Write>(&self, json: &mut JsonWriter<W>) -> Result<(), JsonError> {
        json.begin('{')?;
        json.key("i")?.value(self.id())?;

        if self.has_name() {
            json.key("n")?.value(self.name())?;
        }
        if !self.is_leaf() {
            json.key("s")?.value(self.leaf_count())?;
        }
        if self.subtree_tag() > 0 {
            json.key("subtree_index")?.value(self.subtree_tag())?;
        }
        if !self.is_leaf() {
            json.key("c")?.begin('[')?;
            for child in self.children() {
                json.value(child)?;
            }
            json.end(']')?;
        }

        json.end('}')?;
        Ok(())
    }
}

/// Writes the subtree index `{"0": {}, "<id>": {"parent": <parent_id>}, ...}`.
pub(crate) fn write_subtree_index<W: Write>(
    decomposition: &Decomposition,
    json: &mut JsonWriter<W>,
) -> Result<(), JsonError> {
    json.begin('{')?;
    json.key("0")?.begin('{')?.end('}')?;
    for (subtree_id, parent_id) in decomposition.parents() {
        json.key(&subtree_id.to_string())?
            .begin('{')?
            .key("parent")?
            .value(*parent_id)?
            .end('}')?;
    }
    json.end('}')?;
    Ok(())
}

/// Writes the parent map of one tree document,
/// `{"<node_id>": <parent_id>, ...}` over every attached non-root node.
///
/// Entries follow pre-order, which is ascending id order.
pub(crate) fn write_parent_map<W: Write>(
    tree: &TaxonNode,
    json: &mut JsonWriter<W>,
) -> Result<(), JsonError> {
    json.begin('{')?;
    write_parent_entries(tree, json)?;
    json.end('}')?;
    Ok(())
}

fn write_parent_entries<W: Write>(
    node: &TaxonNode,
    json: &mut JsonWriter<W>,
) -> Result<(), JsonError> {
    for child in node.children() {
        json.key(&child.id().to_string())?.value(node.id())?;
        write_parent_entries(child, json)?;
    }
    Ok(())
}
