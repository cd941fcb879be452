//! Configuration of a conversion run.

use crate::decompose::DecompositionConfig;
use crate::newick::DEFAULT_EXT_ID_PREFIX;
use crate::search::SearchSplitConfig;

/// All tunables of an [Exporter](crate::export::Exporter) run.
///
/// The defaults suit a full tree of life (millions of taxa); smaller inputs
/// mostly need a smaller `min_subtree_size` to be split at all.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportConfig {
    pub decomposition: DecompositionConfig,
    pub search: SearchSplitConfig,
    /// Prefix every external identifier in the input must start with.
    pub ext_id_prefix: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            decomposition: DecompositionConfig::default(),
            search: SearchSplitConfig::default(),
            ext_id_prefix: DEFAULT_EXT_ID_PREFIX.to_string(),
        }
    }
}

impl ExportConfig {
    pub fn with_decomposition(mut self, decomposition: DecompositionConfig) -> Self {
        self.decomposition = decomposition;
        self
    }

    pub fn with_search(mut self, search: SearchSplitConfig) -> Self {
        self.search = search;
        self
    }

    pub fn with_ext_id_prefix<S: Into<String>>(mut self, prefix: S) -> Self {
        self.ext_id_prefix = prefix.into();
        self
    }
}
