//! Newick parser for the tree of life.
//!
//! This module provides [NewickParser] to parse one Newick expression into
//! an owned [TaxonNode] tree, assigning pre-order ids and splitting each
//! label into a name and an external identifier.
//!
//! # Quick API
//! * [`parse_str`] - parses a single string
//! * [`parse_file`] - parses a file holding a single tree
//!
//! # Format
//! The notation has the following grammar:
//! * `tree ::= node [';']`
//! * `node ::= '(' node (',' node)* ')' label | label`
//! * `label ::= (unquoted_run | quoted_segment)*`
//!
//! Furthermore:
//! * Unquoted runs end at `,`, `)`, `;` or end of input
//! * Underscores and whitespace in unquoted runs fold to single spaces,
//!   leading and trailing ones are dropped
//! * Quoted segments are enclosed in `'`, with `''` denoting a literal quote
//! * Labels are `name ext_id` (e.g. `Homo_sapiens_ott770315`);
//!   labels without a space are unnamed nodes and must still contain the
//!   identifier prefix (e.g. `mrcaott1ott2`)
//! * There are no branch lengths and no comments

mod defs;
pub mod parser;

pub use defs::DEFAULT_EXT_ID_PREFIX;
pub use parser::{NewickParser, ParserContext, split_label};

use crate::model::TaxonNode;
use crate::parser::ParsingError;
use crate::parser::byte_parser::ByteParser;
use crate::parser::byte_source::ByteSource;
use std::path::Path;

// ============================================================================
// QUICK PARSING API (pub)
// ============================================================================
/// Parses a single Newick string into a [TaxonNode] tree.
///
/// Only whitespace may follow the tree (and its optional `;`).
///
/// # Example
/// ```
/// use tolsplit::newick::parse_str;
///
/// let tree = parse_str("(Fratercula_cirrhata_ott1,Fratercula_arctica_ott2)Fratercula_ott3;")?;
/// assert_eq!(tree.children()[0].name(), "Fratercula cirrhata");
///
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn parse_str<S: AsRef<str>>(newick: S) -> Result<TaxonNode, ParsingError> {
    let mut byte_parser = ByteParser::for_str(newick.as_ref());
    parse_complete(&mut NewickParser::new(), &mut byte_parser)
}

/// Reads a whole file into memory and parses the single tree it holds.
///
/// # Errors
/// Returns a [ParsingError] if the file cannot be read or the notation is invalid.
pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<TaxonNode, ParsingError> {
    let mut byte_parser = ByteParser::from_file(path)?;
    parse_complete(&mut NewickParser::new(), &mut byte_parser)
}

/// Parses one tree with the given parser and rejects anything but
/// whitespace after it.
pub fn parse_complete<B: ByteSource>(
    newick_parser: &mut NewickParser,
    byte_parser: &mut ByteParser<B>,
) -> Result<TaxonNode, ParsingError> {
    let tree = newick_parser.parse_tree(byte_parser)?;
    byte_parser.skip_whitespace();
    if !byte_parser.is_eof() {
        return Err(ParsingError::trailing_content(byte_parser));
    }
    Ok(tree)
}
