//! Constants for Newick parsing.

/// Newick label delimiters outside of quotes: comma, closing parenthesis, semicolon
pub(crate) const NEWICK_LABEL_DELIMITERS: &[u8] = b",);";

/// Terminator that may follow the closing mark of the top-level node
pub(crate) const TREE_TERMINATOR: u8 = b';';

/// Prefix every external identifier of a named taxon starts with
pub const DEFAULT_EXT_ID_PREFIX: &str = "ott";
