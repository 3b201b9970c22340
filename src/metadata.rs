//! Metadata bridge: reads tags with `lofty`, writes ID3 tags with `id3`.
//!
//! Both libraries sit behind the `TagReader` / `TagWriter` traits so the
//! session can be driven without touching real files.

use std::path::Path;

use crate::error::{ReadError, WriteError};
use crate::tags::TagRecord;

mod read;
mod worker;
mod write;

pub use read::LoftyReader;
pub use worker::{ReadOutcome, ReadRequest, ReadTicket, spawn_reader};
pub use write::Id3Writer;


/// Parses the tags of an audio file into a `TagRecord`.
pub trait TagReader {
    fn read(&self, path: &Path) -> Result<TagRecord, ReadError>;
}

/// Writes a `TagRecord` into an audio file, keeping fields the record leaves unset.
pub trait TagWriter {
    fn write(&self, path: &Path, record: &TagRecord) -> Result<(), WriteError>;
}
