//! Error types for the Newick parser.
//!
//! This module provides [ParsingError] and [ParsingErrorType] for representing
//! and reporting errors that occur while parsing the tree notation.

use crate::parser::byte_parser::ByteParser;
use crate::parser::byte_source::ByteSource;
use std::error::Error;
use std::fmt;

/// Default length of context provided by error from parser
const DEFAULT_CONTEXT_LENGTH: usize = 50;

// =#========================================================================#=
// PARSING ERROR TYPE
// =#========================================================================#=
/// Error types that can occur while parsing.
#[derive(PartialEq, Debug, Clone)]
pub enum ParsingErrorType {
    IoError(String),
    UnexpectedEOF,
    /// A structural position held a character other than the expected
    /// separator or closing mark.
    UnexpectedCharacter(char),
    /// A label failed the `name ext_id` convention.
    InvalidLabel(String),
    InvalidUtf8,
    TrailingContent,
}

// =#========================================================================#=
// PARSING ERROR
// =#========================================================================#=
/// Parsing error with contextual information (position and following bytes).
#[derive(Debug)]
pub struct ParsingError {
    kind: ParsingErrorType,
    position: usize,
    context: String,
}

impl ParsingError {
    /// Create a ParsingError from an error type and parser state
    pub fn from_parser<S: ByteSource>(kind: ParsingErrorType, parser: &ByteParser<S>) -> Self {
        Self {
            kind,
            position: parser.position(),
            context: parser.get_context_as_string(DEFAULT_CONTEXT_LENGTH),
        }
    }

    /// Convenience constructor for UnexpectedEOF
    pub fn unexpected_eof<S: ByteSource>(parser: &ByteParser<S>) -> Self {
        Self::from_parser(ParsingErrorType::UnexpectedEOF, parser)
    }

    /// Convenience constructor for UnexpectedCharacter
    pub fn unexpected_character<S: ByteSource>(parser: &ByteParser<S>, ch: char) -> Self {
        Self::from_parser(ParsingErrorType::UnexpectedCharacter(ch), parser)
    }

    /// Convenience constructor for InvalidLabel
    pub fn invalid_label<S: ByteSource>(parser: &ByteParser<S>, msg: String) -> Self {
        Self::from_parser(ParsingErrorType::InvalidLabel(msg), parser)
    }

    /// Convenience constructor for InvalidUtf8, reported at the label start
    pub fn invalid_utf8<S: ByteSource>(parser: &ByteParser<S>, label_start: usize) -> Self {
        let mut error = Self::from_parser(ParsingErrorType::InvalidUtf8, parser);
        error.position = label_start;
        error
    }

    /// Convenience constructor for TrailingContent
    pub fn trailing_content<S: ByteSource>(parser: &ByteParser<S>) -> Self {
        Self::from_parser(ParsingErrorType::TrailingContent, parser)
    }

    /// Get the error kind
    pub fn kind(&self) -> &ParsingErrorType {
        &self.kind
    }

    /// Get the position where the error occurred
    pub fn position(&self) -> usize {
        self.position
    }
}

impl fmt::Display for ParsingError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match &self.kind {
            ParsingErrorType::UnexpectedEOF => write!(f, "Unexpected end of input")?,
            ParsingErrorType::UnexpectedCharacter(ch) => write!(f, "Unexpected token {ch:?}")?,
            ParsingErrorType::InvalidLabel(msg) => write!(f, "Invalid label - {msg}")?,
            ParsingErrorType::InvalidUtf8 => write!(f, "Label is not valid UTF-8")?,
            ParsingErrorType::TrailingContent => write!(f, "Unexpected content after tree")?,
            ParsingErrorType::IoError(msg) => write!(f, "IO error - {msg}")?,
        }

        write!(f, " at position {}", self.position)?;

        if !self.context.is_empty() {
            write!(f, "\n  Context (next {} bytes): {}", self.context.len(), self.context)?;
        }

        Ok(())
    }
}

impl Error for ParsingError {}

impl From<std::io::Error> for ParsingError {
    fn from(err: std::io::Error) -> Self {
        ParsingError {
            kind: ParsingErrorType::IoError(err.to_string()),
            position: 0,
            context: String::new(),
        }
    }
}
