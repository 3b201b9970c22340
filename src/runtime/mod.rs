use std::env;
use std::path::{Path, PathBuf};
use std::sync::mpsc;

use crossterm::execute;
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode};
use ratatui::{Terminal, backend::CrosstermBackend};
use tracing::{debug, info, warn};

use crate::app::{App, Status};
use crate::bridge::{Command, Dispatcher, Notification};
use crate::config::LibrarySettings;
use crate::library::scan;
use crate::logging;
use crate::metadata::{Id3Writer, LoftyReader, spawn_reader};

mod event_loop;
mod settings;

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let settings = settings::load_settings();

    match logging::init(&settings.logging) {
        Ok(path) => debug!(path = %path.display(), "logging initialised"),
        // Logging is best-effort; the editor works without it.
        Err(e) => eprintln!("tagsmith: logging disabled: {e}"),
    }
    info!("tagsmith starting");

    let (request_tx, request_rx) = mpsc::channel();
    let (outcome_tx, outcome_rx) = mpsc::channel();
    let reader = spawn_reader(LoftyReader, request_rx, outcome_tx);

    let writer = Id3Writer::from_settings(&settings.tags);
    debug!(version = ?writer.version(), "writing ID3 tags");
    let mut dispatcher = Dispatcher::new(Box::new(writer), request_tx);
    let mut app = App::new();

    for arg in env::args_os().skip(1) {
        add_path(&mut dispatcher, &mut app, Path::new(&arg), &settings.library);
    }
    info!(files = dispatcher.library().len(), "library ready");

    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let run_result = event_loop::run(&mut terminal, &settings, &mut app, &mut dispatcher, &outcome_rx);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    // Dropping the dispatcher closes the request channel and stops the reader.
    drop(dispatcher);
    if reader.join().is_err() {
        warn!("reader thread panicked");
    }
    info!("tagsmith exiting");

    run_result
}

/// Offer `path` to the library: a directory is scanned, anything else is
/// added as a single file. Returns how many files were approved.
fn add_path(
    dispatcher: &mut Dispatcher,
    app: &mut App,
    path: &Path,
    library: &LibrarySettings,
) -> usize {
    let candidates: Vec<PathBuf> = if path.is_dir() {
        scan(path, library).into_iter().map(|f| f.path).collect()
    } else {
        vec![path.to_path_buf()]
    };

    let mut approved = 0;
    for candidate in candidates {
        let notes = dispatcher.dispatch(Command::AddFile(candidate));
        approved += notes
            .iter()
            .filter(|n| matches!(n, Notification::FileApproved(_)))
            .count();
        app.apply_all(notes);
    }

    info!(path = %path.display(), approved, "added path");
    app.set_status(match approved {
        0 => Status::info(format!("no new audio files in {}", path.display())),
        1 => Status::info("added 1 file"),
        n => Status::info(format!("added {n} files")),
    });
    approved
}
