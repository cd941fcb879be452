//! Conversion pipeline: parse, decompose, index, serialize.
//!
//! [Exporter] drives one run and writes its documents to a [DocumentStore]:
//!
//! | Document | Content |
//! |---|---|
//! | `subtree-<k>.json` | extracted subtree `k` (k = 1..=n) |
//! | `root.json` | the pruned original tree |
//! | `parents-<k>.json` | node id → parent node id within tree document `k` (0 = `root.json`) |
//! | `subtree-index.json` | `{"0": {}, "<k>": {"parent": <id>}, ...}` |
//! | `search-0.json` | root document of the search trie |
//! | `search-<k>.json` | extracted search sub-tries |
//!
//! All fallible work that does not write (parsing, decomposition, building
//! the search index) happens before the first document is opened.

pub mod store;
pub mod tree_json;

pub use store::{DirectoryStore, DocumentReport, DocumentStore, MemoryStore, write_document};

use crate::config::ExportConfig;
use crate::decompose::Decomposer;
use crate::error::Error;
use crate::model::TaxonNode;
use crate::newick::NewickParser;
use crate::parser::{ByteParser, ByteSource};
use crate::search::{SearchIndex, SearchIndexWriter};
use log::{debug, info};
use std::path::Path;

/// Name of the document holding the pruned original tree
pub const ROOT_DOCUMENT: &str = "root.json";

/// Name of the document mapping subtree ids to their parents
pub const SUBTREE_INDEX_DOCUMENT: &str = "subtree-index.json";

/// Name of the document holding extracted subtree `subtree_id`.
pub fn subtree_document_name(subtree_id: usize) -> String {
    format!("subtree-{subtree_id}.json")
}

/// Name of the parent map of tree document `subtree_id` (0 = root document).
pub fn parent_map_document_name(subtree_id: usize) -> String {
    format!("parents-{subtree_id}.json")
}

// =#========================================================================#=
// EXPORT SUMMARY
// =#========================================================================#=
/// Statistics of a completed run.
#[derive(Debug, Clone, Default)]
pub struct ExportSummary {
    pub num_leaves: usize,
    pub num_nodes: usize,
    /// Deepest nesting level of the input, if it was parsed in this run.
    pub max_depth: Option<usize>,
    pub num_subtrees: usize,
    pub num_search_entries: usize,
    pub num_search_documents: usize,
    /// Every written document in write order.
    pub documents: Vec<DocumentReport>,
}

impl ExportSummary {
    pub fn total_bytes(&self) -> usize {
        self.documents.iter().map(|doc| doc.bytes).sum()
    }
}

// =#========================================================================#=
// EXPORTER
// =#========================================================================#=
/// Orchestrates one conversion run.
///
/// # Example
/// ```
/// use tolsplit::config::ExportConfig;
/// use tolsplit::export::{Exporter, MemoryStore};
/// use tolsplit::parser::ByteParser;
///
/// let mut store = MemoryStore::new();
/// let mut input = ByteParser::for_str("(Homo_sapiens_ott1,Pan_ott2)Hominini_ott3;");
/// let summary = Exporter::new(ExportConfig::default()).run(&mut input, &mut store)?;
///
/// assert_eq!(summary.num_nodes, 3);
/// assert!(store.get("root.json").unwrap().contains(r#""n":"Hominini""#));
/// # Ok::<(), tolsplit::Error>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct Exporter {
    config: ExportConfig,
}

impl Exporter {
    pub fn new(config: ExportConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ExportConfig {
        &self.config
    }

    /// Parses the complete input and exports it.
    pub fn run<B: ByteSource, S: DocumentStore>(
        &self,
        input: &mut ByteParser<B>,
        store: &mut S,
    ) -> Result<ExportSummary, Error> {
        let mut newick_parser = NewickParser::new().with_ext_id_prefix(self.config.ext_id_prefix.as_str());
        let tree = crate::newick::parse_complete(&mut newick_parser, input)?;
        let max_depth = newick_parser.context().max_depth();
        info!("{} max depth", max_depth);

        let mut summary = self.export_tree(tree, store)?;
        summary.max_depth = Some(max_depth);
        Ok(summary)
    }

    /// Reads the file at `input` into memory and exports it into the
    /// directory `out_dir`.
    pub fn run_file<P: AsRef<Path>, Q: AsRef<Path>>(
        &self,
        input: P,
        out_dir: Q,
    ) -> Result<ExportSummary, Error> {
        let mut byte_parser = ByteParser::from_file(input)?;
        let mut store = DirectoryStore::create(out_dir)?;
        self.run(&mut byte_parser, &mut store)
    }

    /// Exports an already parsed tree.
    pub fn export_tree<S: DocumentStore>(
        &self,
        tree: TaxonNode,
        store: &mut S,
    ) -> Result<ExportSummary, Error> {
        let mut summary = ExportSummary {
            num_leaves: tree.leaf_count(),
            num_nodes: tree.node_count(),
            ..Default::default()
        };
        info!("{} leaf nodes", summary.num_leaves);
        info!("{} nodes", summary.num_nodes);

        info!("decomposing...");
        let decomposition = Decomposer::new(self.config.decomposition.clone()).decompose(tree);
        summary.num_subtrees = decomposition.num_subtrees();
        info!("got {} subtrees", summary.num_subtrees);

        info!("building search index...");
        let index = SearchIndex::from_decomposition(&decomposition)?;
        let search_trie = index.compact();
        summary.num_search_entries = index.len();

        for (offset, subtree) in decomposition.subtrees().iter().enumerate() {
            let name = subtree_document_name(offset + 1);
            let report = write_document(store, &name, |json| {
                json.value(subtree)?;
                Ok(())
            })?;
            debug!("writing subtree {}\t{} kB", offset + 1, report.bytes / 1024);
            summary.documents.push(report);
            summary.documents.push(write_parent_map(store, offset + 1, subtree)?);
        }

        let report = write_document(store, ROOT_DOCUMENT, |json| {
            json.value(decomposition.root())?;
            Ok(())
        })?;
        info!("root {} kB", report.bytes / 1024);
        summary.documents.push(report);
        summary.documents.push(write_parent_map(store, 0, decomposition.root())?);

        let report = write_document(store, SUBTREE_INDEX_DOCUMENT, |json| {
            tree_json::write_subtree_index(&decomposition, json)?;
            Ok(())
        })?;
        summary.documents.push(report);

        info!("writing search index...");
        let search_reports = SearchIndexWriter::new(store, self.config.search).write(&search_trie)?;
        summary.num_search_documents = search_reports.len();
        summary.documents.extend(search_reports);

        info!(
            "wrote {} document(s), {} kB in total",
            summary.documents.len(),
            summary.total_bytes() / 1024
        );
        Ok(summary)
    }
}

/// Writes `parents-<subtree_id>.json` for the tree document rooted at `tree`.
fn write_parent_map<S: DocumentStore>(
    store: &mut S,
    subtree_id: usize,
    tree: &TaxonNode,
) -> Result<DocumentReport, Error> {
    write_document(store, &parent_map_document_name(subtree_id), |json| {
        tree_json::write_parent_map(tree, json)?;
        Ok(())
    })
}
