//! Decomposition of a large tree into overlapping, size-bounded subtrees.
//!
//! The [Decomposer] runs several passes with shrinking size ceilings. In each
//! pass, every current root that is still too large is walked in pre-order,
//! and the first node whose size falls into `[min_subtree_size, ceiling]` is
//! copied out as a new subtree. Below such an extraction point the original
//! keeps a few levels of overlap (so a viewer has local context across the
//! cut) and drops everything deeper, which lives on only in the copy.
//!
//! The copies extracted in one pass are the roots of the next pass, so large
//! subtrees are refined further with the next, smaller ceiling.

use crate::model::TaxonNode;
use log::{debug, info};
use std::collections::BTreeMap;

/// Default size ceilings, one decomposition pass each
pub const DEFAULT_MAX_SUBTREE_SIZES: [usize; 3] = [500_000, 200_000, 100_000];

/// Default minimum number of nodes of an extracted subtree
pub const DEFAULT_MIN_SUBTREE_SIZE: usize = 10_000;

/// Default depth below an extraction point at which the original is pruned
pub const DEFAULT_MAX_OVERLAP_DEPTH: usize = 3;

// =#========================================================================#=
// CONFIGURATION
// =#========================================================================#=
/// Tunable thresholds of the decomposition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecompositionConfig {
    /// Size ceiling per pass; the number of entries is the number of passes.
    pub max_subtree_sizes: Vec<usize>,
    /// Smallest subtree that is extracted on its own.
    pub min_subtree_size: usize,
    /// Overlap levels kept in the original below an extraction point;
    /// nodes at this depth below it lose their children.
    pub max_overlap_depth: usize,
}

impl Default for DecompositionConfig {
    fn default() -> Self {
        Self {
            max_subtree_sizes: DEFAULT_MAX_SUBTREE_SIZES.to_vec(),
            min_subtree_size: DEFAULT_MIN_SUBTREE_SIZE,
            max_overlap_depth: DEFAULT_MAX_OVERLAP_DEPTH,
        }
    }
}

impl DecompositionConfig {
    pub fn with_max_subtree_sizes(mut self, max_subtree_sizes: Vec<usize>) -> Self {
        self.max_subtree_sizes = max_subtree_sizes;
        self
    }

    pub fn with_min_subtree_size(mut self, min_subtree_size: usize) -> Self {
        self.min_subtree_size = min_subtree_size;
        self
    }

    pub fn with_max_overlap_depth(mut self, max_overlap_depth: usize) -> Self {
        self.max_overlap_depth = max_overlap_depth;
        self
    }
}

// =#========================================================================#=
// DECOMPOSITION (result)
// =#========================================================================#=
/// Forest produced by [Decomposer::decompose].
///
/// Entry 0 is the pruned original tree, entry `k >= 1` the `k`-th extracted
/// subtree. The parent map holds, for every `k >= 1`, the entry it was
/// carved out of.
#[derive(Debug, Clone)]
pub struct Decomposition {
    forest: Vec<TaxonNode>,
    parents: BTreeMap<usize, usize>,
}

impl Decomposition {
    /// The pruned original tree (entry 0).
    pub fn root(&self) -> &TaxonNode {
        &self.forest[0]
    }

    /// All entries, the pruned original first.
    pub fn forest(&self) -> &[TaxonNode] {
        &self.forest
    }

    /// Extracted subtrees only; the `i`-th element has subtree id `i + 1`.
    pub fn subtrees(&self) -> &[TaxonNode] {
        &self.forest[1..]
    }

    /// Number of extracted subtrees (excluding the original).
    pub fn num_subtrees(&self) -> usize {
        self.forest.len() - 1
    }

    /// Subtree id → id of the entry it was extracted from (0 = original).
    pub fn parents(&self) -> &BTreeMap<usize, usize> {
        &self.parents
    }

    pub fn parent_of(&self, subtree_id: usize) -> Option<usize> {
        self.parents.get(&subtree_id).copied()
    }
}

// =#========================================================================#=
// DECOMPOSER
// =#========================================================================#=
/// Splits a tree into a forest of size-bounded subtrees.
///
/// # Example
/// ```
/// use tolsplit::decompose::{Decomposer, DecompositionConfig};
/// use tolsplit::newick::parse_str;
///
/// let tree = parse_str("((A_ott1,B_ott2)ab_ott3,C_ott4)root_ott5;").unwrap();
/// let config = DecompositionConfig::default()
///     .with_max_subtree_sizes(vec![3])
///     .with_min_subtree_size(2);
/// let decomposition = Decomposer::new(config).decompose(tree);
///
/// assert_eq!(decomposition.num_subtrees(), 1);
/// assert_eq!(decomposition.subtrees()[0].name(), "ab");
/// assert_eq!(decomposition.parent_of(1), Some(0));
/// ```
#[derive(Debug, Clone, Default)]
pub struct Decomposer {
    config: DecompositionConfig,
}

impl Decomposer {
    pub fn new(config: DecompositionConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &DecompositionConfig {
        &self.config
    }

    /// Decomposes `tree`, taking ownership of it; the pruned tree is
    /// returned as entry 0 of the result.
    ///
    /// The original root is always visited in the first pass, so a tree
    /// that fits the first ceiling (and the minimum) is extracted whole and
    /// left behind as a childless stub. Later passes only revisit subtrees
    /// larger than their ceiling.
    pub fn decompose(&self, tree: TaxonNode) -> Decomposition {
        // Slot 0 holds the original during the passes.
        let mut forest = vec![tree];
        let mut parents = BTreeMap::new();
        let mut roots = vec![0];

        for (pass, &ceiling) in self.config.max_subtree_sizes.iter().enumerate() {
            debug!(
                "decomposition pass {}, ceiling {}, {} root(s)",
                pass + 1,
                ceiling,
                roots.len()
            );

            let mut new_roots = Vec::new();
            for &root_id in &roots {
                let is_original_root = pass == 0 && root_id == 0;
                if !is_original_root && forest[root_id].node_count <= ceiling {
                    continue;
                }

                let first_new = forest.len();
                // Take the root out of its slot so extractions can be
                // appended while it is borrowed mutably.
                let mut root = std::mem::take(&mut forest[root_id]);
                let mut extracted = Vec::new();
                self.decompose_root(&mut root, first_new, &mut extracted, ceiling);
                forest[root_id] = root;

                for subtree in extracted {
                    let subtree_id = forest.len();
                    forest.push(subtree);
                    parents.insert(subtree_id, root_id);
                    new_roots.push(subtree_id);
                }
            }

            debug!("decomposition pass {} extracted {} subtree(s)", pass + 1, new_roots.len());
            roots = new_roots;
        }

        info!("decomposed tree into {} subtree(s)", forest.len() - 1);
        Decomposition { forest, parents }
    }

    /// Decomposes one current root; a root that fits entirely is extracted
    /// whole and reduced to a stub.
    fn decompose_root(
        &self,
        root: &mut TaxonNode,
        first_new: usize,
        out: &mut Vec<TaxonNode>,
        ceiling: usize,
    ) {
        if self.fits(root, ceiling) {
            out.push(root.clone());
            root.subtree_tag = first_new;
            root.children.clear();
            return;
        }
        self.decompose_node(root, first_new, out, ceiling, 0);
    }

    /// Pre-order walk extracting the first fitting node on every path.
    ///
    /// `overlap_depth` is 0 outside of extracted regions, otherwise the
    /// number of levels below the extraction point plus one.
    fn decompose_node(
        &self,
        node: &mut TaxonNode,
        first_new: usize,
        out: &mut Vec<TaxonNode>,
        ceiling: usize,
        overlap_depth: usize,
    ) {
        let mut overlap_depth = overlap_depth;
        if overlap_depth == 0 {
            if self.fits(node, ceiling) {
                out.push(node.clone());
                node.subtree_tag = first_new + out.len() - 1;
                overlap_depth = 1;
            }
        } else {
            if overlap_depth >= self.config.max_overlap_depth {
                node.children.clear();
                return;
            }
            overlap_depth += 1;
        }

        // Nothing below a small node outside an extracted region can fit.
        if overlap_depth == 0 && node.node_count < self.config.min_subtree_size {
            return;
        }

        for child in node.children.iter_mut() {
            self.decompose_node(child, first_new, out, ceiling, overlap_depth);
        }
    }

    fn fits(&self, node: &TaxonNode, ceiling: usize) -> bool {
        node.node_count <= ceiling && node.node_count >= self.config.min_subtree_size
    }
}
