//! Destinations for emitted documents.

use crate::error::Error;
use crate::json::JsonWriter;
use log::trace;
use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

// =#========================================================================#=
// DOCUMENT STORE (Trait)
// =#========================================================================#=
/// Trait defining where emitted documents go.
///
/// Each document is opened, written completely and closed before the store
/// considers it done; no document is reopened. Several documents may be open
/// at once (the search index writes sub-documents while their parent is
/// still being written), so sinks are owned values independent of the store.
pub trait DocumentStore {
    type Sink: Write;

    /// Opens a fresh sink for the document called `name`.
    fn open(&mut self, name: &str) -> io::Result<Self::Sink>;

    /// Completes the document called `name` with its fully written sink.
    fn close(&mut self, name: &str, sink: Self::Sink) -> io::Result<()>;
}

/// Size of one emitted document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentReport {
    pub name: String,
    pub bytes: usize,
}

/// Opens `name` in `store`, lets `write` emit exactly one JSON value into
/// it, and closes it again.
///
/// # Errors
/// Propagates errors of `write`; fails with
/// [IncompleteDocument](crate::json::JsonError::IncompleteDocument) if
/// `write` left the value unfinished.
pub fn write_document<S, F>(store: &mut S, name: &str, write: F) -> Result<DocumentReport, Error>
where
    S: DocumentStore,
    F: FnOnce(&mut JsonWriter<S::Sink>) -> Result<(), Error>,
{
    let mut json = JsonWriter::new(store.open(name)?);
    write(&mut json)?;
    let bytes = json.bytes_written();
    store.close(name, json.finish()?)?;

    trace!("wrote {name} ({bytes} bytes)");
    Ok(DocumentReport {
        name: name.to_string(),
        bytes,
    })
}

// =#========================================================================#=
// DIRECTORY STORE
// =#========================================================================#=
/// Writes each document to a file `<dir>/<name>`.
#[derive(Debug, Clone)]
pub struct DirectoryStore {
    dir: PathBuf,
}

impl DirectoryStore {
    /// Uses `dir` as output directory, creating it if needed.
    pub fn create<P: AsRef<Path>>(dir: P) -> io::Result<Self> {
        fs::create_dir_all(dir.as_ref())?;
        Ok(Self {
            dir: dir.as_ref().to_path_buf(),
        })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl DocumentStore for DirectoryStore {
    type Sink = BufWriter<File>;

    fn open(&mut self, name: &str) -> io::Result<Self::Sink> {
        Ok(BufWriter::new(File::create(self.dir.join(name))?))
    }

    fn close(&mut self, _name: &str, mut sink: Self::Sink) -> io::Result<()> {
        sink.flush()
    }
}

// =#========================================================================#=
// MEMORY STORE
// =#========================================================================#=
/// Keeps every document as a string, keyed by name.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    documents: BTreeMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Text of the document called `name`, if it was closed.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.documents.get(name).map(String::as_str)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.documents.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

impl DocumentStore for MemoryStore {
    type Sink = Vec<u8>;

    fn open(&mut self, _name: &str) -> io::Result<Self::Sink> {
        Ok(Vec::new())
    }

    fn close(&mut self, name: &str, sink: Self::Sink) -> io::Result<()> {
        let text = String::from_utf8(sink)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        self.documents.insert(name.to_string(), text);
        Ok(())
    }
}
