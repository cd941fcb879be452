//! Data model for the parsed tree of life.
//!
//! The tree is a plain owned structure: every [TaxonNode] owns its children.
//! Extraction during decomposition clones a subtree and truncates the
//! children of the original node, so no shared mutable aliasing is needed.

pub mod tree;

pub use tree::PreOrderIter;
pub use tree::TaxonNode;
