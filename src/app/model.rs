//! Application model types: `App`, `Mode`, `Action` and `Status`.
//!
//! `App` is a display-side mirror. It never edits tags itself: it only changes
//! through `App::apply`, fed with notifications from the dispatcher, and it
//! answers key presses with `Action`s for the runtime to carry out.

use std::path::PathBuf;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::bridge::{Command, Notification};
use crate::library::SupportedFile;
use crate::tags::{CoverArt, TagField, TagRecord};

/// What the keyboard is currently driving.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Browse,
    /// Typing a new value for the field under the field cursor.
    EditField,
    /// Typing the path of an image to use as cover art.
    CoverPath,
    /// Typing a file or directory to add to the library.
    AddPath,
}

impl Mode {
    pub fn prompt(self) -> Option<&'static str> {
        match self {
            Mode::Browse => None,
            Mode::EditField => Some("edit"),
            Mode::CoverPath => Some("cover image path"),
            Mode::AddPath => Some("add file or directory"),
        }
    }
}

/// Work the runtime has to do in response to a key.
#[derive(Debug, Clone)]
pub enum Action {
    Dispatch(Command),
    /// Read an image from disk and send it as cover art.
    LoadCover(PathBuf),
    /// Add a file, or every supported file under a directory.
    AddPath(PathBuf),
    Quit,
}

/// One-line message for the status box.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Status {
    pub text: String,
    pub is_error: bool,
}

impl Status {
    pub fn info(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_error: false,
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_error: true,
        }
    }
}

/// The main application model.
#[derive(Debug, Default)]
pub struct App {
    pub files: Vec<SupportedFile>,
    /// Cursor row in the file list.
    pub cursor: usize,
    pub selection: Vec<PathBuf>,
    pub record: TagRecord,
    /// Index into `TagField::ALL`.
    pub field_cursor: usize,
    pub mode: Mode,
    pub input: String,
    pub status: Option<Status>,
}

impl App {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current_file(&self) -> Option<&SupportedFile> {
        self.files.get(self.cursor)
    }

    pub fn current_field(&self) -> TagField {
        TagField::ALL[self.field_cursor % TagField::ALL.len()]
    }

    pub fn is_selected(&self, file: &SupportedFile) -> bool {
        self.selection.contains(&file.path)
    }

    pub fn cover(&self) -> Option<&CoverArt> {
        self.record.image.as_ref()
    }

    pub fn set_status(&mut self, status: Status) {
        self.status = Some(status);
    }

    /// Mirror a state change pushed by the dispatcher.
    pub fn apply(&mut self, note: Notification) {
        match note {
            Notification::FileApproved(file) => self.files.push(file),
            Notification::FileRemoved(path) => {
                self.files.retain(|f| f.path != path);
                self.clamp_cursor();
            }
            Notification::SelectionUpdated(paths) => self.selection = paths,
            Notification::TagFieldsUpdated(record) => self.record = record,
            Notification::CoverArtUpdated(art) => self.record.image = Some(art),
            Notification::Saved(paths) => {
                let saved = match paths.len() {
                    1 => "saved 1 file".to_string(),
                    n => format!("saved {n} files"),
                };
                // Keep errors from the same save visible.
                if let Some(status) = self.status.as_mut().filter(|s| s.is_error) {
                    status.text.push_str(&format!(" ({saved})"));
                } else {
                    self.status = Some(Status::info(saved));
                }
            }
            Notification::Error(e) => {
                self.status = Some(Status::error(format!("{}: {e}", e.kind().name())));
            }
        }
    }

    pub fn apply_all(&mut self, notes: impl IntoIterator<Item = Notification>) {
        for note in notes {
            self.apply(note);
        }
    }

    /// Move the cursor to the next file, wrapping around.
    pub fn next(&mut self) {
        if !self.files.is_empty() {
            self.cursor = (self.cursor + 1) % self.files.len();
        }
    }

    /// Move the cursor to the previous file, wrapping around.
    pub fn prev(&mut self) {
        if !self.files.is_empty() {
            self.cursor = (self.cursor + self.files.len() - 1) % self.files.len();
        }
    }

    pub fn next_field(&mut self) {
        self.field_cursor = (self.field_cursor + 1) % TagField::ALL.len();
    }

    pub fn prev_field(&mut self) {
        self.field_cursor = (self.field_cursor + TagField::ALL.len() - 1) % TagField::ALL.len();
    }

    fn clamp_cursor(&mut self) {
        if self.cursor >= self.files.len() {
            self.cursor = self.files.len().saturating_sub(1);
        }
    }

    fn enter_prompt(&mut self, mode: Mode, initial: String) {
        self.mode = mode;
        self.input = initial;
    }

    fn leave_prompt(&mut self) -> String {
        self.mode = Mode::Browse;
        std::mem::take(&mut self.input)
    }

    /// Translate a key press into an action, updating cursor and prompt state.
    pub fn handle_key(&mut self, key: KeyEvent) -> Option<Action> {
        if self.mode != Mode::Browse {
            return self.handle_prompt_key(key);
        }

        self.status = None;
        let current = self.current_file().map(|f| f.path.clone());

        match key.code {
            KeyCode::Char('q') => Some(Action::Quit),
            KeyCode::Char('j') | KeyCode::Down => {
                self.next();
                None
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.prev();
                None
            }
            KeyCode::Tab => {
                self.next_field();
                None
            }
            KeyCode::BackTab => {
                self.prev_field();
                None
            }
            KeyCode::Enter => current.map(|p| Action::Dispatch(Command::SelectFile(p))),
            KeyCode::Char(' ') => current.map(|p| Action::Dispatch(Command::ToggleFile(p))),
            KeyCode::Char('d') => current.map(|p| Action::Dispatch(Command::RemoveFile(p))),
            KeyCode::Char('s') => {
                if self.selection.is_empty() {
                    self.status = Some(Status::info("nothing selected"));
                    None
                } else {
                    Some(Action::Dispatch(Command::Save))
                }
            }
            KeyCode::Char('x') => Some(Action::Dispatch(Command::RemoveCoverArt)),
            KeyCode::Char('e') => {
                let value = self
                    .record
                    .get(self.current_field())
                    .unwrap_or_default()
                    .to_string();
                self.enter_prompt(Mode::EditField, value);
                None
            }
            KeyCode::Char('c') => {
                self.enter_prompt(Mode::CoverPath, String::new());
                None
            }
            KeyCode::Char('a') => {
                self.enter_prompt(Mode::AddPath, String::new());
                None
            }
            _ => None,
        }
    }

    fn handle_prompt_key(&mut self, key: KeyEvent) -> Option<Action> {
        match key.code {
            KeyCode::Esc => {
                self.leave_prompt();
                None
            }
            KeyCode::Backspace => {
                self.input.pop();
                None
            }
            KeyCode::Enter => {
                let mode = self.mode;
                let input = self.leave_prompt();
                match mode {
                    // A blank value deletes the frame on save; an untouched
                    // prompt on an unset field must not stage one.
                    Mode::EditField
                        if input.is_empty() && self.record.get(self.current_field()).is_none() =>
                    {
                        None
                    }
                    Mode::EditField => Some(Action::Dispatch(Command::UpdateField(
                        self.current_field(),
                        input,
                    ))),
                    Mode::CoverPath if !input.trim().is_empty() => {
                        Some(Action::LoadCover(PathBuf::from(input.trim())))
                    }
                    Mode::AddPath if !input.trim().is_empty() => {
                        Some(Action::AddPath(PathBuf::from(input.trim())))
                    }
                    _ => None,
                }
            }
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.input.push(c);
                None
            }
            _ => None,
        }
    }
}
