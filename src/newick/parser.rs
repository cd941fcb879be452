//! Structs and logic to parse a Newick tree of life.
//!
//! This module provides the [NewickParser] struct, which parses one complete
//! Newick expression into an owned [TaxonNode] tree.

use crate::model::TaxonNode;
use crate::newick::defs::{DEFAULT_EXT_ID_PREFIX, NEWICK_LABEL_DELIMITERS, TREE_TERMINATOR};
use crate::parser::byte_parser::ByteParser;
use crate::parser::byte_source::ByteSource;
use crate::parser::parsing_error::ParsingError;

// =#========================================================================#=
// PARSER CONTEXT
// =#========================================================================#=
/// Running state of one parse: the id generator and the depth tracker.
#[derive(Debug, Clone, Default)]
pub struct ParserContext {
    last_id: usize,
    max_depth: usize,
}

impl ParserContext {
    /// Hands out the next pre-order id, starting at 1.
    fn next_id(&mut self) -> usize {
        self.last_id += 1;
        self.last_id
    }

    fn visit_depth(&mut self, depth: usize) {
        self.max_depth = self.max_depth.max(depth);
    }

    /// Number of ids assigned so far, i.e. the number of nodes allocated.
    pub fn num_nodes(&self) -> usize {
        self.last_id
    }

    /// Deepest nesting level seen so far (root is depth 0).
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }
}

// =#========================================================================#=
// NEWICK PARSER
// =#========================================================================#=
/// Parser (configuration) for a single Newick tree of life.
///
/// Labels have the form `name ext_id`, where the words of `name` may be
/// joined by underscores and `ext_id` starts with a fixed prefix
/// ([DEFAULT_EXT_ID_PREFIX] unless configured otherwise). Labels without any
/// separator denote unnamed nodes and are kept verbatim as their external id;
/// they must still mention the prefix (e.g. `mrcaott1ott2`).
///
/// # Configuration
/// * [`with_ext_id_prefix(prefix)`](Self::with_ext_id_prefix)
///     - Replaces the required external identifier prefix.
///
/// # Example
/// ```
/// use tolsplit::newick::NewickParser;
/// use tolsplit::parser::ByteParser;
///
/// let mut byte_parser = ByteParser::for_str("(A_ott1,B_ott2)root_ott3;");
/// let mut newick_parser = NewickParser::new();
/// let tree = newick_parser.parse_tree(&mut byte_parser).unwrap();
///
/// assert_eq!(tree.node_count(), 3);
/// assert_eq!(tree.leaf_count(), 2);
/// assert_eq!(tree.name(), "root");
/// assert_eq!(newick_parser.context().max_depth(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct NewickParser {
    ext_id_prefix: String,
    context: ParserContext,
}

impl Default for NewickParser {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Construction & Configuration (pub)
// ============================================================================
impl NewickParser {
    /// Creates a new [NewickParser] requiring [DEFAULT_EXT_ID_PREFIX].
    pub fn new() -> Self {
        Self {
            ext_id_prefix: DEFAULT_EXT_ID_PREFIX.to_string(),
            context: ParserContext::default(),
        }
    }

    /// Sets the prefix every external identifier must start with.
    pub fn with_ext_id_prefix<S: Into<String>>(mut self, prefix: S) -> Self {
        self.ext_id_prefix = prefix.into();
        self
    }

    /// State of the most recent parse (node count, maximum depth).
    pub fn context(&self) -> &ParserContext {
        &self.context
    }
}

// ============================================================================
// API Parsing (pub)
// ============================================================================
impl NewickParser {
    /// Parses one complete Newick expression from the given [ByteParser].
    ///
    /// Leading whitespace is skipped and a trailing `;` after the final
    /// closing mark is consumed if present. Anything after that is left in
    /// the byte parser.
    ///
    /// # Returns
    /// * `Ok(TaxonNode)` - The root of the parsed tree
    /// * `Err(ParsingError)` - If the notation or a label is invalid
    pub fn parse_tree<B: ByteSource>(
        &mut self,
        parser: &mut ByteParser<B>,
    ) -> Result<TaxonNode, ParsingError> {
        self.context = ParserContext::default();

        let root = self.parse_node(parser, 0)?;
        parser.consume_if(TREE_TERMINATOR);

        Ok(root)
    }
}

// ============================================================================
// Parsing
// ============================================================================
impl NewickParser {
    /// Parses a node `'(' node (',' node)* ')' label | label`:
    /// - The id is assigned before any child is parsed
    /// - Counts are accumulated as each child completes
    fn parse_node<B: ByteSource>(
        &mut self,
        parser: &mut ByteParser<B>,
        depth: usize,
    ) -> Result<TaxonNode, ParsingError> {
        self.context.visit_depth(depth);
        let mut node = TaxonNode::allocate(self.context.next_id());

        parser.skip_whitespace();
        if parser.consume_if(b'(') {
            loop {
                let child = self.parse_node(parser, depth + 1)?;
                node.push_child(child);

                match parser.peek() {
                    Some(b',') => {
                        parser.next_byte();
                    }
                    Some(b')') => {
                        parser.next_byte();
                        break;
                    }
                    Some(b) => return Err(ParsingError::unexpected_character(parser, char::from(b))),
                    None => return Err(ParsingError::unexpected_eof(parser)),
                }
            }
        } else {
            node.leaf_count = 1;
        }

        let label = parser.parse_label(NEWICK_LABEL_DELIMITERS)?;
        self.set_label(&mut node, label, parser)?;

        Ok(node)
    }

    /// Splits a decoded label at its last space into name and external id.
    fn set_label<B: ByteSource>(
        &self,
        node: &mut TaxonNode,
        label: String,
        parser: &ByteParser<B>,
    ) -> Result<(), ParsingError> {
        match split_label(&label, &self.ext_id_prefix) {
            Ok((name, ext_id)) => {
                node.name = name.to_string();
                node.ext_id = ext_id.to_string();
                Ok(())
            }
            Err(msg) => Err(ParsingError::invalid_label(parser, msg)),
        }
    }
}

/// Splits a decoded label into `(name, ext_id)`.
///
/// - An empty label yields two empty halves.
/// - A label without a space is an unnamed node; it must contain `prefix`
///   somewhere (e.g. `ott42`, `mrcaott1ott2`) and is returned as the
///   external id with an empty name.
/// - Otherwise the label is split at its last space and the external id
///   must start with `prefix`.
///
/// # Example
/// ```
/// use tolsplit::newick::split_label;
///
/// assert_eq!(split_label("Homo sapiens ott770315", "ott"), Ok(("Homo sapiens", "ott770315")));
/// assert_eq!(split_label("mrcaott1ott2", "ott"), Ok(("", "mrcaott1ott2")));
/// assert!(split_label("Homo sapiens 770315", "ott").is_err());
/// assert!(split_label("Hominini", "ott").is_err());
/// ```
pub fn split_label<'a>(label: &'a str, prefix: &str) -> Result<(&'a str, &'a str), String> {
    let Some(split_at) = label.rfind(' ') else {
        if !label.is_empty() && !label.contains(prefix) {
            return Err(format!("expected {prefix} identifier in unnamed label '{label}'"));
        }
        return Ok(("", label));
    };

    let name = &label[..split_at];
    let ext_id = &label[split_at + 1..];

    if !ext_id.starts_with(prefix) {
        return Err(format!("expected {prefix}+number but found '{ext_id}' in '{label}'"));
    }
    if name.is_empty() {
        return Err(format!("empty name in '{label}'"));
    }
    if ext_id.is_empty() {
        return Err(format!("empty external id in '{label}'"));
    }

    Ok((name, ext_id))
}
