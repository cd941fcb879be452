//! In-memory implementation of byte source for parsing.

use crate::parser::byte_source::ByteSource;
use std::fs::File;
use std::io::Read;
use std::path::Path;

// =#========================================================================#=
// IN MEMORY BYTE SOURCE
// =#========================================================================#=
/// An in-memory byte source that owns its data.
pub struct InMemoryByteSource {
    /// The owned byte data being parsed
    input: Vec<u8>,
    /// Current position in the input
    pos: usize,
}

impl InMemoryByteSource {
    /// Creates a new in-memory byte source from a Vec of bytes.
    pub fn from_vec(bytes: Vec<u8>) -> Self {
        Self {
            input: bytes,
            pos: 0,
        }
    }

    /// Reads the entire file into memory.
    pub fn from_file<P: AsRef<Path>>(path: P) -> std::io::Result<InMemoryByteSource> {
        let mut file = File::open(path)?;
        Self::from_reader(&mut file)
    }

    /// Reads the entire reader (e.g. stdin) into memory.
    pub fn from_reader<R: Read>(reader: &mut R) -> std::io::Result<InMemoryByteSource> {
        let mut contents = Vec::new();
        reader.read_to_end(&mut contents)?;
        Ok(Self::from_vec(contents))
    }

    /// Number of bytes held by this source.
    pub fn len(&self) -> usize {
        self.input.len()
    }

    /// Whether this source holds no bytes at all.
    pub fn is_empty(&self) -> bool {
        self.input.is_empty()
    }
}

impl ByteSource for InMemoryByteSource {
    #[inline(always)]
    fn peek(&self) -> Option<u8> {
        self.input.get(self.pos).copied()
    }

    #[inline(always)]
    fn next_byte(&mut self) -> Option<u8> {
        let byte = self.peek()?;
        self.pos += 1;
        Some(byte)
    }

    fn get_context(&self, k: usize) -> Vec<u8> {
        let start = self.pos.min(self.input.len());
        let end = (self.pos + k).min(self.input.len());
        self.input[start..end].to_vec()
    }

    #[inline]
    fn position(&self) -> usize {
        self.pos
    }

    #[inline]
    fn is_eof(&self) -> bool {
        self.pos >= self.input.len()
    }
}
