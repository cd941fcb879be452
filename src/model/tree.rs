//! Owned tree of taxa as produced by the Newick parser.

// =#========================================================================#=
// TAXON NODE
// =#========================================================================#=
/// One taxon of the tree, owning its children.
///
/// Each node exclusively owns its children, in the left-to-right order of
/// the notation. Identifiers are assigned in pre-order starting at 1, so a
/// node's id is smaller than the ids of all its descendants.
///
/// Leaf and node counts are computed bottom-up during parsing and are not
/// updated afterwards, not even when decomposition prunes children: a pruned
/// node still reports the size of the subtree it stands for.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaxonNode {
    pub(crate) id: usize,
    pub(crate) name: String,
    pub(crate) ext_id: String,
    pub(crate) children: Vec<TaxonNode>,
    pub(crate) leaf_count: usize,
    pub(crate) node_count: usize,
    pub(crate) subtree_tag: usize,
}

impl TaxonNode {
    /// Creates a childless node with the given id and no label.
    pub(crate) fn allocate(id: usize) -> Self {
        Self {
            id,
            node_count: 1,
            ..Default::default()
        }
    }

    /// Appends a completely parsed child and accumulates its counts.
    pub(crate) fn push_child(&mut self, child: TaxonNode) {
        self.leaf_count += child.leaf_count;
        self.node_count += child.node_count;
        self.children.push(child);
    }

    /// Pre-order identifier, starting at 1 for the root.
    pub fn id(&self) -> usize {
        self.id
    }

    /// Human-readable name, empty for unnamed nodes.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// External identifier taken from the label (e.g. `ott770315`).
    pub fn ext_id(&self) -> &str {
        &self.ext_id
    }

    pub fn children(&self) -> &[TaxonNode] {
        &self.children
    }

    /// Number of leaves below (and including) this node at parse time.
    pub fn leaf_count(&self) -> usize {
        self.leaf_count
    }

    /// Number of nodes below (and including) this node at parse time.
    pub fn node_count(&self) -> usize {
        self.node_count
    }

    /// Index of the extracted subtree document rooted at this node,
    /// 0 if this node was never extracted.
    pub fn subtree_tag(&self) -> usize {
        self.subtree_tag
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    pub fn has_name(&self) -> bool {
        !self.name.is_empty()
    }

    /// Iterates over this node and all nodes still attached below it, in pre-order.
    pub fn iter(&self) -> PreOrderIter<'_> {
        PreOrderIter { stack: vec![self] }
    }
}

// =#========================================================================#=
// PRE-ORDER ITERATOR
// =#========================================================================#=
/// Pre-order iterator over a [TaxonNode] and its attached descendants.
///
/// Created by [TaxonNode::iter]. Uses an explicit stack, so deep trees do
/// not recurse.
pub struct PreOrderIter<'a> {
    stack: Vec<&'a TaxonNode>,
}

impl<'a> Iterator for PreOrderIter<'a> {
    type Item = &'a TaxonNode;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children.iter().rev());
        Some(node)
    }
}
