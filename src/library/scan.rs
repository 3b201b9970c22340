use std::path::Path;

use walkdir::WalkDir;

use crate::config::LibrarySettings;

use super::model::{AudioFormat, SupportedFile};

/// Decide whether `path` names a supported audio file and build its display record.
///
/// Classification only looks at the file name; the file does not have to exist.
pub fn classify(path: &Path) -> Option<SupportedFile> {
    let format = path
        .extension()
        .and_then(|s| s.to_str())
        .and_then(AudioFormat::from_extension)?;

    let name = path.file_name().and_then(|s| s.to_str())?.to_string();
    let location = path
        .parent()
        .map(|p| p.display().to_string())
        .unwrap_or_default();

    Some(SupportedFile {
        path: path.to_path_buf(),
        name,
        format,
        location,
    })
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|s| s.to_str())
        .map(|name| name.starts_with('.'))
        .unwrap_or(false)
}

/// Walk `dir` and collect every supported file, sorted by name (case-insensitive).
pub fn scan(dir: &Path, settings: &LibrarySettings) -> Vec<SupportedFile> {
    let mut files: Vec<SupportedFile> = Vec::new();

    let mut walker = WalkDir::new(dir).follow_links(settings.follow_links);

    // Non-recursive = only the root directory.
    let depth_cap = if settings.recursive {
        settings.max_depth
    } else {
        Some(1)
    };
    if let Some(d) = depth_cap {
        walker = walker.max_depth(d);
    }

    for entry in walker
        .into_iter()
        .filter_entry(|e| settings.include_hidden || e.depth() == 0 || !is_hidden(e.path()))
        .filter_map(Result::ok)
    {
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        if let Some(file) = classify(path) {
            files.push(file);
        }
    }

    files.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));
    files
}
