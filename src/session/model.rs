//! Session state: the active selection and the tag values staged for it.

use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::error::WriteError;
use crate::library::Library;
use crate::metadata::{ReadTicket, TagWriter};
use crate::tags::cover::{apply_image, image_mime};
use crate::tags::{CoverArt, TagField, TagRecord};

/// Ordered set of selected paths: no duplicates, insertion order for display.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    paths: Vec<PathBuf>,
}

impl Selection {
    pub fn paths(&self) -> &[PathBuf] {
        &self.paths
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    fn position(&self, path: &Path) -> Option<usize> {
        self.paths.iter().position(|p| p == path)
    }
}

/// What a `Session::toggle` call did.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Toggle {
    /// Appended to the selection; the tag record was reset.
    Added,
    /// Dropped from the selection; the tag record is untouched.
    Removed,
    /// Undid the previous toggle of the same path, record included.
    ///
    /// `reread` is set when the read for the restored selection finished
    /// while it was toggled away and was dropped. The selected file has to
    /// be read again under that ticket.
    Restored { reread: Option<ReadTicket> },
}

/// Everything needed to undo the last toggle exactly.
#[derive(Debug, Clone)]
struct ToggleUndo {
    path: PathBuf,
    selection: Selection,
    record: TagRecord,
    generation: u64,
    /// A read issued for `generation` arrived while it was stale.
    missed_read: bool,
}

/// Result of saving the staged record to every selected file.
#[derive(Debug, Default)]
pub struct SaveReport {
    pub saved: Vec<PathBuf>,
    pub failed: Vec<WriteError>,
}

/// The single source of truth for "which files" and "which tag values".
#[derive(Debug, Default)]
pub struct Session {
    selection: Selection,
    record: TagRecord,
    /// Identifies the current selection state; reads issued for an older
    /// generation are stale.
    generation: u64,
    next_generation: u64,
    undo: Option<ToggleUndo>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn record(&self) -> &TagRecord {
        &self.record
    }

    fn bump_generation(&mut self) {
        self.next_generation += 1;
        self.generation = self.next_generation;
    }

    /// Replace the selection with `path` alone and drop unsaved edits.
    ///
    /// The returned ticket must accompany the metadata read for `path`.
    pub fn select_only(&mut self, path: PathBuf) -> ReadTicket {
        self.undo = None;
        self.selection.paths.clear();
        self.selection.paths.push(path);
        self.record = TagRecord::default();
        self.bump_generation();
        ReadTicket::new(self.generation)
    }

    /// Add `path` to the selection, or remove it if it is already there.
    ///
    /// Adding resets the record: a multi-file selection has no single tag
    /// state to show. Repeating a toggle on the same path with nothing in
    /// between restores the state from before the first toggle, asking for
    /// a fresh read if the pending one was dropped meanwhile.
    pub fn toggle(&mut self, path: PathBuf) -> Toggle {
        if let Some(undo) = self.undo.take() {
            if undo.path == path {
                self.selection = undo.selection;
                self.record = undo.record;
                self.generation = undo.generation;
                let reread = undo.missed_read.then(|| {
                    self.bump_generation();
                    ReadTicket::new(self.generation)
                });
                return Toggle::Restored { reread };
            }
        }

        let undo = ToggleUndo {
            path: path.clone(),
            selection: self.selection.clone(),
            record: self.record.clone(),
            generation: self.generation,
            missed_read: false,
        };

        let outcome = match self.selection.position(&path) {
            Some(idx) => {
                self.selection.paths.remove(idx);
                Toggle::Removed
            }
            None => {
                self.selection.paths.push(path);
                self.record = TagRecord::default();
                Toggle::Added
            }
        };
        self.bump_generation();
        self.undo = Some(undo);
        outcome
    }

    /// Drop `path` from the selection. Returns `false` if it was not selected.
    pub fn remove(&mut self, path: &Path) -> bool {
        let Some(idx) = self.selection.position(path) else {
            return false;
        };
        self.undo = None;
        self.selection.paths.remove(idx);
        self.bump_generation();
        true
    }

    /// Stage `value` for `field`. Content is not validated.
    pub fn set_field(&mut self, field: TagField, value: String) {
        self.undo = None;
        self.record.set(field, value);
    }

    /// Stage an image for the cover. Unsupported image types are dropped
    /// silently and leave the record as it was.
    pub fn set_cover_art(&mut self, filename: &str, data: Vec<u8>) -> Option<&CoverArt> {
        if image_mime(filename).is_none() {
            debug!(filename, "ignoring unsupported cover art type");
            return None;
        }
        self.undo = None;
        apply_image(&mut self.record.image, filename, data)
    }

    /// Reset the cover to the empty placeholder.
    pub fn clear_cover_art(&mut self) -> &CoverArt {
        self.undo = None;
        self.record.image.insert(CoverArt::placeholder())
    }

    pub fn is_current(&self, ticket: ReadTicket) -> bool {
        ticket.id() == self.generation
    }

    /// Remember a dropped read that an undo would have made current again.
    fn note_stale(&mut self, ticket: ReadTicket) {
        if let Some(undo) = self.undo.as_mut().filter(|u| u.generation == ticket.id()) {
            undo.missed_read = true;
        }
    }

    /// Merge a finished read into the record, unless the selection moved on
    /// since it was issued. Returns whether the record changed.
    pub fn apply_read(&mut self, ticket: ReadTicket, read: TagRecord) -> bool {
        if !self.is_current(ticket) {
            debug!(ticket = ticket.id(), current = self.generation, "discarding stale read");
            self.note_stale(ticket);
            return false;
        }
        self.undo = None;
        self.record.merge_from(read);
        true
    }

    /// Clear the record after a failed read, unless the read is stale.
    pub fn fail_read(&mut self, ticket: ReadTicket) -> bool {
        if !self.is_current(ticket) {
            debug!(ticket = ticket.id(), current = self.generation, "discarding stale read error");
            self.note_stale(ticket);
            return false;
        }
        self.undo = None;
        self.record = TagRecord::default();
        true
    }

    /// Write the staged record to every selected file, in selection order.
    ///
    /// Files are independent: one failure does not stop the others, and
    /// nothing is rolled back.
    pub fn save(&self, library: &Library, writer: &dyn TagWriter) -> SaveReport {
        let mut report = SaveReport::default();

        for path in self.selection.paths() {
            let Some(file) = library.get(path) else {
                warn!(path = %path.display(), "selected file is not in the library, skipping");
                continue;
            };

            if !file.format.is_writable() {
                report
                    .failed
                    .push(WriteError::UnsupportedFormat(path.clone()));
                continue;
            }

            match writer.write(path, &self.record) {
                Ok(()) => {
                    info!(path = %path.display(), "tags saved");
                    report.saved.push(path.clone());
                }
                Err(e) => {
                    warn!("{e}");
                    report.failed.push(e);
                }
            }
        }

        report
    }
}
