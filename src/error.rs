//! Error types surfaced to the user.
//!
//! Every error here is terminal for the single operation that raised it and
//! never for the process: the dispatcher turns them into
//! `Notification::Error` and keeps going.

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Reading tags from a file failed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReadError {
    #[error("File not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Failed to read tags from {}: {reason}", path.display())]
    Parse { path: PathBuf, reason: String },
}

impl ReadError {
    pub fn path(&self) -> &Path {
        match self {
            Self::NotFound(path) => path,
            Self::Parse { path, .. } => path,
        }
    }
}

/// Writing tags to a file failed, or the file's format cannot be written.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WriteError {
    #[error(
        "Cannot save {}: saving WAV files is not supported, please encode your music as MP3",
        .0.display()
    )]
    UnsupportedFormat(PathBuf),

    #[error("Failed to write tags to {}: {reason}", path.display())]
    Tag { path: PathBuf, reason: String },
}

impl WriteError {
    pub fn path(&self) -> &Path {
        match self {
            Self::UnsupportedFormat(path) => path,
            Self::Tag { path, .. } => path,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    Read,
    Write,
}

impl ErrorKind {
    pub fn name(self) -> &'static str {
        match self {
            Self::Read => "ReadError",
            Self::Write => "WriteError",
        }
    }
}

/// Any error that is reported to the display surface.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TagError {
    #[error(transparent)]
    Read(#[from] ReadError),

    #[error(transparent)]
    Write(#[from] WriteError),
}

impl TagError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Read(_) => ErrorKind::Read,
            Self::Write(_) => ErrorKind::Write,
        }
    }

    pub fn path(&self) -> &Path {
        match self {
            Self::Read(e) => e.path(),
            Self::Write(e) => e.path(),
        }
    }
}
