use std::path::PathBuf;

use serde::Deserialize;

/// Top-level application settings loaded from `config.toml`.
///
/// File format: TOML
/// Default path (Linux/XDG): `$XDG_CONFIG_HOME/tagsmith/config.toml` or `~/.config/tagsmith/config.toml`
///
/// Precedence (highest wins):
/// 1) Environment variables (prefix `TAGSMITH__`, `__` as nested separator)
/// 2) Config file (if present)
/// 3) Struct defaults
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub library: LibrarySettings,
    pub tags: TagSettings,
    pub ui: UiSettings,
    pub logging: LogSettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LibrarySettings {
    /// Whether to follow symlinks when a directory is added.
    pub follow_links: bool,
    /// Whether to include hidden files/directories (dotfiles).
    pub include_hidden: bool,
    /// Whether to recurse into subdirectories.
    pub recursive: bool,
    /// Optional cap on directory recursion depth.
    pub max_depth: Option<usize>,
}

impl Default for LibrarySettings {
    fn default() -> Self {
        Self {
            follow_links: true,
            include_hidden: true,
            recursive: true,
            max_depth: None,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TagSettings {
    /// ID3v2 revision used when writing tags.
    pub id3_version: Id3VersionSetting,
}

#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Id3VersionSetting {
    #[default]
    #[serde(alias = "v2.3", alias = "2.3", alias = "id3v23")]
    V23,
    #[serde(alias = "v2.4", alias = "2.4", alias = "id3v24")]
    V24,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UiSettings {
    /// The text rendered inside the top header box.
    pub header_text: String,
    /// Show the full path of each file instead of its name.
    pub show_full_path: bool,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            header_text: " ~ tagsmith: edit your tags ~ ".to_string(),
            show_full_path: false,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LogSettings {
    /// Minimum level: trace, debug, info, warn, error or off.
    ///
    /// `TAGSMITH_LOG` (an `EnvFilter` directive) wins over this when set.
    pub level: String,
    /// Log file. Defaults to `$XDG_STATE_HOME/tagsmith/tagsmith.log`.
    pub file: Option<PathBuf>,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: None,
        }
    }
}
