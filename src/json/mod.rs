//! Streaming JSON output.
//!
//! [JsonWriter] is the only place that touches raw output formatting; every
//! document the crate emits goes through it. Types implement [ToJson] to be
//! passed to [JsonWriter::value].

pub mod json_error;
pub mod writer;

pub use json_error::JsonError;
pub use writer::{JsonWriter, ToJson};
