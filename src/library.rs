//! Supported-file classification and the registry of files the user added.

use std::path::Path;

mod model;
mod scan;

pub use model::*;
pub use scan::{classify, scan};


/// Ordered registry of known files, keyed by path.
#[derive(Debug, Default)]
pub struct Library {
    files: Vec<SupportedFile>,
}

impl Library {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `file`. Returns `false` if its path is already known.
    pub fn add(&mut self, file: SupportedFile) -> bool {
        if self.contains(&file.path) {
            return false;
        }
        self.files.push(file);
        true
    }

    pub fn remove(&mut self, path: &Path) -> Option<SupportedFile> {
        let idx = self.files.iter().position(|f| f.path == path)?;
        Some(self.files.remove(idx))
    }

    pub fn get(&self, path: &Path) -> Option<&SupportedFile> {
        self.files.iter().find(|f| f.path == path)
    }

    pub fn contains(&self, path: &Path) -> bool {
        self.get(path).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &SupportedFile> {
        self.files.iter()
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}
