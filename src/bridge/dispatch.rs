use std::path::{Path, PathBuf};
use std::sync::mpsc::Sender;

use tracing::{debug, error, info};

use crate::error::{ReadError, TagError};
use crate::library::{Library, classify};
use crate::metadata::{ReadOutcome, ReadRequest, ReadTicket, TagWriter};
use crate::session::{Session, Toggle};
use crate::tags::TagField;

use super::types::{Command, Notification};

/// Owns the session and the library, and routes commands to them.
pub struct Dispatcher {
    session: Session,
    library: Library,
    writer: Box<dyn TagWriter>,
    reads: Sender<ReadRequest>,
}

impl Dispatcher {
    pub fn new(writer: Box<dyn TagWriter>, reads: Sender<ReadRequest>) -> Self {
        Self {
            session: Session::new(),
            library: Library::new(),
            writer,
            reads,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn library(&self) -> &Library {
        &self.library
    }

    pub fn dispatch(&mut self, cmd: Command) -> Vec<Notification> {
        match cmd {
            Command::AddFile(path) => self.add_file(&path),
            Command::RemoveFile(path) => self.remove_file(&path),
            Command::SelectFile(path) => self.select_file(path),
            Command::ToggleFile(path) => self.toggle_file(path),
            Command::UpdateField(field, value) => self.update_field(field, value),
            Command::Save => self.save(),
            Command::CoverArtReceived { filename, bytes } => {
                match self.session.set_cover_art(&filename, bytes) {
                    Some(art) => vec![Notification::CoverArtUpdated(art.clone())],
                    None => Vec::new(),
                }
            }
            Command::RemoveCoverArt => {
                vec![Notification::CoverArtUpdated(
                    self.session.clear_cover_art().clone(),
                )]
            }
            Command::ReadFinished(outcome) => self.read_finished(outcome),
        }
    }

    fn selection_updated(&self) -> Notification {
        Notification::SelectionUpdated(self.session.selection().paths().to_vec())
    }

    fn tags_updated(&self) -> Notification {
        Notification::TagFieldsUpdated(self.session.record().clone())
    }

    fn add_file(&mut self, path: &Path) -> Vec<Notification> {
        let Some(file) = classify(path) else {
            debug!(path = %path.display(), "not a supported audio file, ignoring");
            return Vec::new();
        };
        if !self.library.add(file.clone()) {
            debug!(path = %path.display(), "file already in library");
            return Vec::new();
        }
        vec![Notification::FileApproved(file)]
    }

    fn remove_file(&mut self, path: &Path) -> Vec<Notification> {
        if self.library.remove(path).is_none() {
            debug!(path = %path.display(), "remove for unknown file, ignoring");
            return Vec::new();
        }
        let mut out = vec![Notification::FileRemoved(path.to_path_buf())];
        if self.session.remove(path) {
            out.push(self.selection_updated());
        }
        out
    }

    fn select_file(&mut self, path: PathBuf) -> Vec<Notification> {
        let ticket = self.session.select_only(path.clone());
        let mut out = vec![self.selection_updated(), self.tags_updated()];
        out.extend(self.request_read(ticket, path));
        out
    }

    fn request_read(&self, ticket: ReadTicket, path: PathBuf) -> Option<Notification> {
        if self
            .reads
            .send(ReadRequest {
                ticket,
                path: path.clone(),
            })
            .is_ok()
        {
            return None;
        }
        error!("tag reader thread is gone");
        let err = ReadError::Parse {
            path,
            reason: "tag reader is not running".to_string(),
        };
        Some(Notification::Error(err.into()))
    }

    fn toggle_file(&mut self, path: PathBuf) -> Vec<Notification> {
        match self.session.toggle(path) {
            Toggle::Removed => vec![self.selection_updated()],
            Toggle::Added => vec![self.selection_updated(), self.tags_updated()],
            Toggle::Restored { reread } => {
                let mut out = vec![self.selection_updated(), self.tags_updated()];
                let target = self.session.selection().paths().first().cloned();
                if let (Some(ticket), Some(target)) = (reread, target) {
                    debug!(path = %target.display(), "reading again after undo");
                    out.extend(self.request_read(ticket, target));
                }
                out
            }
        }
    }

    fn update_field(&mut self, field: TagField, value: String) -> Vec<Notification> {
        self.session.set_field(field, value);
        vec![self.tags_updated()]
    }

    fn save(&mut self) -> Vec<Notification> {
        if self.session.selection().is_empty() {
            debug!("save requested with nothing selected");
        }
        let report = self.session.save(&self.library, self.writer.as_ref());
        info!(
            saved = report.saved.len(),
            failed = report.failed.len(),
            "save finished"
        );

        let mut out: Vec<Notification> = report
            .failed
            .into_iter()
            .map(|e| {
                let err = TagError::from(e);
                debug!(path = %err.path().display(), kind = err.kind().name(), "reporting save error");
                Notification::Error(err)
            })
            .collect();
        out.push(Notification::Saved(report.saved));
        out
    }

    fn read_finished(&mut self, outcome: ReadOutcome) -> Vec<Notification> {
        let ReadOutcome { ticket, result, .. } = outcome;
        match result {
            Ok(record) => {
                if self.session.apply_read(ticket, record) {
                    vec![self.tags_updated()]
                } else {
                    Vec::new()
                }
            }
            Err(e) => {
                if self.session.fail_read(ticket) {
                    vec![Notification::Error(e.into()), self.tags_updated()]
                } else {
                    Vec::new()
                }
            }
        }
    }
}
