//! Low-level byte-by-byte parser for UTF-8 text.
//!
//! This module provides [ByteParser] for parsing the Newick notation with
//! support for peeking, consuming and quote-aware label parsing.

use crate::parser::byte_source::ByteSource;
use crate::parser::in_memory_byte_source::InMemoryByteSource;
use crate::parser::parsing_error::ParsingError;
use std::io::Read;
use std::path::Path;

// =#========================================================================#=
// BYTE PARSER
// =#========================================================================#=
/// A byte-by-byte parser with support for peeking, consuming and label parsing.
///
/// Structural characters of the notation are all ASCII, so the parser works
/// on bytes and only decodes labels as UTF-8 once they are complete.
///
/// # Features
/// - Works with any [ByteSource]
/// - Whitespace skipping
/// - Quote-aware label parsing (single quotes with `''` escaping)
/// - Underscore and whitespace folding outside of quotes
/// - Context extraction for error reporting
///
/// # Example
/// ```
/// use tolsplit::parser::ByteParser;
///
/// let mut parser = ByteParser::for_str("  'Wilson''s'_ott42,rest");
/// parser.skip_whitespace();
/// let label = parser.parse_label(b",);").unwrap();
/// assert_eq!(label, "Wilson's ott42");
/// assert_eq!(parser.peek(), Some(b','));
/// ```
pub struct ByteParser<S: ByteSource> {
    source: S,
}

impl ByteParser<InMemoryByteSource> {
    /// Creates a new [ByteParser] from a string by copying it.
    pub fn for_str(input: &str) -> Self {
        Self::for_bytes(input.as_bytes())
    }

    /// Creates a new [ByteParser] from a byte slice by copying it.
    pub fn for_bytes(input: &[u8]) -> Self {
        Self::new(InMemoryByteSource::from_vec(input.to_vec()))
    }

    /// Creates a new [ByteParser] that reads the whole file into memory.
    ///
    /// # Errors
    /// Returns an error if the file cannot be opened or read.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ParsingError> {
        Ok(Self::new(InMemoryByteSource::from_file(path)?))
    }

    /// Creates a new [ByteParser] that reads the whole reader into memory.
    ///
    /// # Errors
    /// Returns an error if reading fails.
    pub fn from_reader<R: Read>(reader: &mut R) -> Result<Self, ParsingError> {
        Ok(Self::new(InMemoryByteSource::from_reader(reader)?))
    }
}

impl<S: ByteSource> ByteParser<S> {
    /// Creates a new [ByteParser] from a byte source.
    pub fn new(source: S) -> Self {
        Self { source }
    }

    /// Peeks at the current byte without consuming it.
    #[inline(always)]
    pub fn peek(&self) -> Option<u8> {
        self.source.peek()
    }

    /// Gets the current byte and advances the position (consumes it).
    #[inline(always)]
    pub fn next_byte(&mut self) -> Option<u8> {
        self.source.next_byte()
    }

    /// Skips (consumes) all consecutive whitespace characters.
    ///
    /// Whitespace includes: space (' '), tab ('\t'), newline ('\n'), and carriage return ('\r').
    pub fn skip_whitespace(&mut self) {
        while let Some(b) = self.peek() {
            if is_whitespace(b) {
                self.next_byte();
            } else {
                break;
            }
        }
    }

    /// Checks if the current byte is exactly `ch`.
    #[inline]
    pub fn peek_is(&self, ch: u8) -> bool {
        self.peek() == Some(ch)
    }

    /// Consumes the current byte if it is exactly `ch`.
    ///
    /// # Returns
    /// `true` if the byte was matched and consumed, `false` otherwise
    pub fn consume_if(&mut self, ch: u8) -> bool {
        if self.peek_is(ch) {
            self.next_byte();
            true
        } else {
            false
        }
    }

    /// Returns whether the end of data (EOF) has been reached.
    pub fn is_eof(&self) -> bool {
        self.source.is_eof()
    }

    /// Returns the current byte offset in the input.
    pub fn position(&self) -> usize {
        self.source.position()
    }

    /// Returns a string from up to `k` bytes from the current position for error context.
    ///
    /// Invalid UTF-8 sequences are replaced with the Unicode replacement character.
    pub fn get_context_as_string(&self, k: usize) -> String {
        let context_bytes = self.source.get_context(k);
        String::from_utf8_lossy(&context_bytes).into_owned()
    }

    /// Parses a label until any of the given delimiters (outside of quotes)
    /// or EOF is encountered. The delimiter is not consumed.
    ///
    /// A label is a sequence of unquoted runs and single-quoted segments:
    /// - Inside quotes every byte is taken literally, except that a doubled
    ///   quote `''` decodes to one literal quote.
    /// - Outside quotes underscores and whitespace are separators: runs of
    ///   separators fold to a single space, leading and trailing separators
    ///   are dropped.
    ///
    /// # Errors
    /// - [UnexpectedEOF](crate::parser::ParsingErrorType::UnexpectedEOF)
    ///   if a quoted segment is never closed
    /// - [InvalidUtf8](crate::parser::ParsingErrorType::InvalidUtf8)
    ///   if the label bytes are not valid UTF-8
    pub fn parse_label(&mut self, delimiters: &[u8]) -> Result<String, ParsingError> {
        let start = self.position();
        let mut label: Vec<u8> = Vec::new();
        let mut pending_space = false;

        while let Some(b) = self.peek() {
            if b == b'\'' {
                if pending_space && !label.is_empty() {
                    label.push(b' ');
                }
                pending_space = false;
                self.parse_quoted_segment(&mut label)?;
            } else if delimiters.contains(&b) {
                break;
            } else if b == b'_' || is_whitespace(b) {
                pending_space = true;
                self.next_byte();
            } else {
                if pending_space && !label.is_empty() {
                    label.push(b' ');
                }
                pending_space = false;
                label.push(b);
                self.next_byte();
            }
        }

        String::from_utf8(label).map_err(|_| ParsingError::invalid_utf8(self, start))
    }

    /// Parses a quoted segment enclosed in single quotes, appending its
    /// decoded content to `label`.
    ///
    /// Assumes the opening quote has not been consumed yet. Single quotes within
    /// the segment are escaped by doubling them (e.g., `'Wilson''s'` becomes `Wilson's`).
    fn parse_quoted_segment(&mut self, label: &mut Vec<u8>) -> Result<(), ParsingError> {
        self.next_byte(); // consume opening '

        loop {
            match self.next_byte() {
                Some(b'\'') => {
                    if self.peek() == Some(b'\'') {
                        label.push(b'\'');
                        self.next_byte();
                    } else {
                        return Ok(());
                    }
                }
                Some(b) => label.push(b),
                None => return Err(ParsingError::unexpected_eof(self)),
            }
        }
    }
}

#[inline(always)]
fn is_whitespace(b: u8) -> bool {
    b == b' ' || b == b'\t' || b == b'\n' || b == b'\r'
}
