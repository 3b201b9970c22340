use std::path::PathBuf;

use crate::error::TagError;
use crate::library::SupportedFile;
use crate::metadata::ReadOutcome;
use crate::tags::{CoverArt, TagField, TagRecord};

/// Requests from the display surface (and the reader thread) to the session.
#[derive(Debug, Clone)]
pub enum Command {
    /// Offer a file for the library; approved only if its format is supported.
    AddFile(PathBuf),
    RemoveFile(PathBuf),
    /// Make `path` the only selected file and read its tags.
    SelectFile(PathBuf),
    /// Add `path` to the selection, or take it out.
    ToggleFile(PathBuf),
    UpdateField(TagField, String),
    Save,
    CoverArtReceived { filename: String, bytes: Vec<u8> },
    RemoveCoverArt,
    /// A tag read issued by `SelectFile` has completed.
    ReadFinished(ReadOutcome),
}

impl Command {
    /// Short name for logging; payloads such as image bytes are left out.
    pub fn name(&self) -> &'static str {
        match self {
            Command::AddFile(_) => "add-file",
            Command::RemoveFile(_) => "remove-file",
            Command::SelectFile(_) => "select-file",
            Command::ToggleFile(_) => "toggle-file",
            Command::UpdateField(..) => "update-field",
            Command::Save => "save",
            Command::CoverArtReceived { .. } => "cover-art-received",
            Command::RemoveCoverArt => "remove-cover-art",
            Command::ReadFinished(_) => "read-finished",
        }
    }
}

/// State changes pushed to the display surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notification {
    FileApproved(SupportedFile),
    FileRemoved(PathBuf),
    /// The full selection, in order.
    SelectionUpdated(Vec<PathBuf>),
    TagFieldsUpdated(TagRecord),
    CoverArtUpdated(CoverArt),
    /// Files whose tags were written by the last save.
    Saved(Vec<PathBuf>),
    Error(TagError),
}
