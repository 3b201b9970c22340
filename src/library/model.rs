use std::fmt;
use std::path::PathBuf;

/// Audio formats the editor knows about.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum AudioFormat {
    Mp3,
    Wav,
}

impl AudioFormat {
    pub fn label(self) -> &'static str {
        match self {
            Self::Mp3 => "MP3",
            Self::Wav => "WAV",
        }
    }

    /// Map a file extension (without dot, any case) to a format.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "mp3" => Some(Self::Mp3),
            "wav" => Some(Self::Wav),
            _ => None,
        }
    }

    /// Whether tags can be written back for this format.
    pub fn is_writable(self) -> bool {
        matches!(self, Self::Mp3)
    }
}

impl fmt::Display for AudioFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A file that passed classification. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SupportedFile {
    /// Unique identifier of the file.
    pub path: PathBuf,
    pub name: String,
    pub format: AudioFormat,
    /// Parent directory, for display.
    pub location: String,
}
