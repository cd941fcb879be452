//! Basic low-level byte parser functionality.
//!
//! Provides the [ByteParser] the Newick parser is built on, the
//! [ByteSource] it reads from, and the [ParsingError] it reports.

pub mod byte_parser;
pub mod byte_source;
pub mod in_memory_byte_source;
pub mod parsing_error;

pub use byte_parser::ByteParser;
pub use byte_source::ByteSource;
pub use parsing_error::{ParsingError, ParsingErrorType};
