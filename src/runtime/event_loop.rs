use std::path::Path;
use std::sync::mpsc;
use std::time::Duration;

use crossterm::event::{self, Event, KeyEventKind};
use ratatui::{Terminal, backend::CrosstermBackend};
use tracing::{debug, warn};

use crate::app::{Action, App, Status};
use crate::bridge::{Command, Dispatcher};
use crate::config;
use crate::metadata::ReadOutcome;
use crate::ui;

use super::add_path;

/// Main terminal event loop: applies finished tag reads, draws, and handles
/// input. Returns `Ok(())` when the user quits.
pub fn run(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    settings: &config::Settings,
    app: &mut App,
    dispatcher: &mut Dispatcher,
    outcomes: &mpsc::Receiver<ReadOutcome>,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        while let Ok(outcome) = outcomes.try_recv() {
            app.apply_all(dispatcher.dispatch(Command::ReadFinished(outcome)));
        }

        terminal.draw(|f| ui::draw(f, app, &settings.ui))?;

        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                match app.handle_key(key) {
                    Some(Action::Quit) => break,
                    Some(action) => perform(action, settings, app, dispatcher),
                    None => {}
                }
            }
        }
    }

    Ok(())
}

fn perform(action: Action, settings: &config::Settings, app: &mut App, dispatcher: &mut Dispatcher) {
    match action {
        Action::Dispatch(cmd) => {
            debug!(command = cmd.name(), "dispatching");
            app.apply_all(dispatcher.dispatch(cmd));
        }
        Action::LoadCover(path) => load_cover(&path, app, dispatcher),
        Action::AddPath(path) => {
            add_path(dispatcher, app, &path, &settings.library);
        }
        Action::Quit => {}
    }
}

fn load_cover(path: &Path, app: &mut App, dispatcher: &mut Dispatcher) {
    let bytes = match std::fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) => {
            warn!(path = %path.display(), "cannot read cover image: {e}");
            app.set_status(Status::error(format!("cannot read {}: {e}", path.display())));
            return;
        }
    };
    let filename = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    let notes = dispatcher.dispatch(Command::CoverArtReceived { filename, bytes });
    if notes.is_empty() {
        app.set_status(Status::info("cover unchanged: only png and jpeg images are used"));
    }
    app.apply_all(notes);
}
