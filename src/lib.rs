//! Tolsplit turns a tree of life given in Newick notation into size-bounded
//! JSON documents that a viewer can load lazily, plus a compressed search
//! index from taxon names to document locations.
//!
//! Core functionality provided:
//! - Newick: parse a (huge) labelled tree with pre-order ids, splitting labels
//!   like `Homo_sapiens_ott770315` into a name and an external identifier.
//!   See [crate::newick].
//! - Decomposition: carve the tree into a forest of overlapping subtrees whose
//!   sizes are bounded by a shrinking sequence of ceilings.
//!   See [crate::decompose].
//! - Search index: map every name (disambiguated on collision) to the node
//!   and subtree document holding it, compact it into a radix trie and split
//!   it into documents as well. See [crate::search] and [crate::trie].
//! - Output: a streaming [JsonWriter](crate::json::JsonWriter) that refuses
//!   malformed call sequences, writing to a
//!   [DocumentStore](crate::export::DocumentStore).
//!
//! Limitations:
//! - The whole input is held in memory; there is no streaming parsing
//! - Trees are not modified after decomposition
//! - Single-threaded
//!
//! # Usage patterns
//! 1. [`convert_file`] runs the whole pipeline with default settings.
//! 2. Configure an [Exporter](crate::export::Exporter) with an
//!    [ExportConfig](crate::config::ExportConfig) for full control, or use
//!    the stages ([newick::parse_str], [decompose::Decomposer],
//!    [search::SearchIndex]) individually.
//!
//! ## Example
//! ```no_run
//! use tolsplit::convert_file;
//!
//! let summary = convert_file("draftversion.tre", "data")?;
//! println!("Wrote {} subtrees", summary.num_subtrees);
//! # Ok::<(), tolsplit::Error>(())
//! ```

pub mod config;
pub mod decompose;
pub mod error;
pub mod export;
pub mod json;
pub mod model;
pub mod newick;
pub mod parser;
pub mod search;
pub mod trie;

pub use error::Error;

use crate::config::ExportConfig;
use crate::export::{ExportSummary, Exporter};
use crate::model::TaxonNode;
use crate::parser::ParsingError;
use std::path::Path;

// ============================================================================
// Quick API
// ============================================================================
/// Parses a Newick string into a [TaxonNode] tree using default settings.
///
/// See [`newick::parse_str`] for full documentation.
pub fn parse_newick_str<S: AsRef<str>>(newick: S) -> Result<TaxonNode, ParsingError> {
    newick::parse_str(newick)
}

/// Converts the Newick file at `input` into documents in `out_dir`
/// using default settings.
///
/// See [`Exporter::run_file`] for full documentation.
pub fn convert_file<P: AsRef<Path>, Q: AsRef<Path>>(
    input: P,
    out_dir: Q,
) -> Result<ExportSummary, Error> {
    Exporter::new(ExportConfig::default()).run_file(input, out_dir)
}
