//! UI rendering helpers for the terminal user interface.
//!
//! This module contains functions to render the TUI using `ratatui`.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Padding, Paragraph, Wrap},
};

use crate::app::{App, Mode};
use crate::config::UiSettings;
use crate::library::SupportedFile;
use crate::tags::{CoverArt, TagField};

const CONTROLS: [(&str, &str); 12] = [
    ("j/k", "up/down"),
    ("enter", "select"),
    ("space", "toggle"),
    ("tab", "next field"),
    ("e", "edit"),
    ("s", "save"),
    ("c", "cover"),
    ("x", "remove cover"),
    ("a", "add"),
    ("d", "remove file"),
    ("esc", "cancel"),
    ("q", "quit"),
];

fn controls_text() -> String {
    CONTROLS
        .iter()
        .map(|(k, v)| format!("[{k}] {v}"))
        .collect::<Vec<String>>()
        .join(" | ")
}

fn left_pad() -> Padding {
    Padding {
        left: 1,
        right: 0,
        top: 0,
        bottom: 0,
    }
}

/// Human-readable byte size: `512 B`, `12.3 KiB`, `4.0 MiB`.
fn format_size(bytes: usize) -> String {
    const KIB: f64 = 1024.0;
    let b = bytes as f64;
    if b < KIB {
        format!("{bytes} B")
    } else if b < KIB * KIB {
        format!("{:.1} KiB", b / KIB)
    } else {
        format!("{:.1} MiB", b / (KIB * KIB))
    }
}

fn cover_summary(art: Option<&CoverArt>) -> String {
    match art {
        Some(art) if !art.is_placeholder() => {
            let mut text = format!("{} • {}", art.mime, format_size(art.byte_len()));
            if !art.kind.name.is_empty() {
                text.push_str(&format!(" • {}", art.kind.name));
            }
            if !art.description.is_empty() {
                text.push_str(&format!("\n{}", art.description));
            }
            text
        }
        _ => "no cover art".to_string(),
    }
}

fn file_label(file: &SupportedFile, ui: &UiSettings) -> String {
    if ui.show_full_path {
        file.path.display().to_string()
    } else {
        format!("{}  ({})", file.name, file.format)
    }
}

/// Keep the cursor row centred when the list is taller than its area.
fn visible_window(total: usize, height: usize, cursor: usize) -> (usize, usize) {
    if total <= height || height == 0 {
        return (0, total);
    }
    let half = height / 2;
    let mut start = cursor.saturating_sub(half);
    if start + height > total {
        start = total - height;
    }
    (start, start + height)
}

fn draw_files(frame: &mut Frame, app: &App, ui: &UiSettings, area: Rect) {
    let title = format!(" files ({} selected) ", app.selection.len());
    let inner_height = area.height.saturating_sub(2) as usize;
    let (start, end) = visible_window(app.files.len(), inner_height, app.cursor);

    let items: Vec<ListItem> = app.files[start..end]
        .iter()
        .map(|f| {
            let mark = if app.is_selected(f) { "* " } else { "  " };
            let item = ListItem::new(format!("{mark}{}", file_label(f, ui)));
            if app.is_selected(f) {
                item.bold()
            } else {
                item
            }
        })
        .collect();

    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title(title))
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .highlight_symbol("> ");
    let mut state = ListState::default();
    if !app.files.is_empty() {
        state.select(Some(app.cursor - start));
    }
    frame.render_stateful_widget(list, area, &mut state);
}

fn draw_tags(frame: &mut Frame, app: &App, area: Rect) {
    let editing = app.mode == Mode::EditField;
    let lines: Vec<Line> = TagField::ALL
        .iter()
        .enumerate()
        .map(|(i, field)| {
            let on_cursor = i == app.field_cursor;
            let value = if on_cursor && editing {
                format!("{}_", app.input)
            } else {
                app.record.get(*field).unwrap_or("-").to_string()
            };
            let label = Span::raw(format!("{:>13}: ", field.label()));
            let value = if on_cursor {
                Span::styled(value, Style::default().add_modifier(Modifier::REVERSED))
            } else {
                Span::raw(value)
            };
            Line::from(vec![label, value])
        })
        .collect();

    let tags = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" tags ")
            .padding(left_pad()),
    );
    frame.render_widget(tags, area);
}

fn status_text(app: &App) -> (String, bool) {
    if let Some(prompt) = app.mode.prompt() {
        if app.mode == Mode::EditField {
            return (format!("{prompt} {}: enter to apply, esc to cancel", app.current_field()), false);
        }
        return (format!("{prompt}: {}_", app.input), false);
    }
    match &app.status {
        Some(status) => (status.text.clone(), status.is_error),
        None => (
            format!("{} files • {} selected", app.files.len(), app.selection.len()),
            false,
        ),
    }
}

/// Render the entire UI into the provided `frame` using `app` state and settings.
pub fn draw(frame: &mut Frame, app: &App, ui_settings: &UiSettings) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(8),
            Constraint::Length(3),
            Constraint::Length(4),
        ])
        .split(frame.area());

    // Header
    let header = Paragraph::new(ui_settings.header_text.as_str())
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" tagsmith ")
                .title_alignment(Alignment::Center),
        );
    frame.render_widget(header, chunks[0]);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(chunks[1]);
    draw_files(frame, app, ui_settings, body[0]);

    let side = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(8), Constraint::Min(3)])
        .split(body[1]);
    draw_tags(frame, app, side[0]);

    let cover = Paragraph::new(cover_summary(app.cover()))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" cover ")
                .padding(left_pad()),
        )
        .wrap(Wrap { trim: true });
    frame.render_widget(cover, side[1]);

    // Status line
    let (text, is_error) = status_text(app);
    let status = Paragraph::new(text).block(
        Block::bordered().padding(left_pad()).title(" status "),
    );
    let status = if is_error { status.red() } else { status };
    frame.render_widget(status, chunks[2]);

    let footer = Paragraph::new(controls_text())
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" controls ")
                .padding(left_pad()),
        )
        .wrap(Wrap { trim: true });
    frame.render_widget(footer, chunks[3]);
}
