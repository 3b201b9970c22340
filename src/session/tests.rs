use super::*;
use crate::error::WriteError;
use crate::library::{Library, classify};
use crate::tags::{CoverArt, TagField, TagRecord};
use crate::test_support::FakeWriter;
use std::path::{Path, PathBuf};

fn library_of(paths: &[&str]) -> Library {
    let mut library = Library::new();
    for p in paths {
        assert!(library.add(classify(Path::new(p)).unwrap()));
    }
    library
}

fn titled(title: &str) -> TagRecord {
    let mut record = TagRecord::default();
    record.set(TagField::Title, title);
    record
}

#[test]
fn new_session_is_empty() {
    let session = Session::new();
    assert!(session.selection().is_empty());
    assert!(session.record().is_empty());
}

#[test]
fn select_only_replaces_selection_and_drops_edits() {
    let mut session = Session::new();
    session.select_only(PathBuf::from("/m/a.mp3"));
    session.toggle(PathBuf::from("/m/b.mp3"));
    session.set_field(TagField::Artist, "Unsaved".to_string());

    session.select_only(PathBuf::from("/m/c.mp3"));

    assert_eq!(session.selection().paths(), &[PathBuf::from("/m/c.mp3")]);
    assert!(session.record().is_empty());
}

#[test]
fn select_only_issues_a_fresh_ticket_each_time() {
    let mut session = Session::new();
    let first = session.select_only(PathBuf::from("/m/a.mp3"));
    let second = session.select_only(PathBuf::from("/m/a.mp3"));

    assert_ne!(first, second);
    assert!(!session.is_current(first));
    assert!(session.is_current(second));
}

#[test]
fn toggle_appends_and_resets_record() {
    let mut session = Session::new();
    let ticket = session.select_only(PathBuf::from("/m/a.mp3"));
    session.apply_read(ticket, titled("A"));

    assert_eq!(session.toggle(PathBuf::from("/m/b.mp3")), Toggle::Added);
    assert_eq!(
        session.selection().paths(),
        &[PathBuf::from("/m/a.mp3"), PathBuf::from("/m/b.mp3")]
    );
    assert!(session.record().is_empty());
}

#[test]
fn toggle_of_selected_path_removes_it_and_keeps_record() {
    let mut session = Session::new();
    session.select_only(PathBuf::from("/m/a.mp3"));
    session.toggle(PathBuf::from("/m/b.mp3"));
    session.set_field(TagField::Album, "Shared".to_string());

    assert_eq!(session.toggle(PathBuf::from("/m/a.mp3")), Toggle::Removed);
    assert_eq!(session.selection().paths(), &[PathBuf::from("/m/b.mp3")]);
    assert_eq!(session.record().get(TagField::Album), Some("Shared"));
}

#[test]
fn toggle_twice_restores_selection_and_record() {
    let mut session = Session::new();
    let ticket = session.select_only(PathBuf::from("/m/a.mp3"));
    session.apply_read(ticket, titled("A"));
    let before_selection = session.selection().clone();
    let before_record = session.record().clone();

    assert_eq!(session.toggle(PathBuf::from("/m/b.mp3")), Toggle::Added);
    assert_eq!(
        session.toggle(PathBuf::from("/m/b.mp3")),
        Toggle::Restored { reread: None }
    );

    assert_eq!(session.selection(), &before_selection);
    assert_eq!(session.record(), &before_record);
    assert!(session.is_current(ticket));
}

#[test]
fn read_dropped_between_toggles_is_requested_again() {
    let mut session = Session::new();
    let first = session.select_only(PathBuf::from("/m/a.mp3"));
    session.toggle(PathBuf::from("/m/b.mp3"));
    assert!(!session.apply_read(first, titled("A")));

    let Toggle::Restored {
        reread: Some(again),
    } = session.toggle(PathBuf::from("/m/b.mp3"))
    else {
        panic!("expected a restore asking for a new read");
    };
    assert_eq!(session.selection().paths(), &[PathBuf::from("/m/a.mp3")]);
    assert!(!session.is_current(first));
    assert!(session.is_current(again));

    assert!(session.apply_read(again, titled("A")));
    assert_eq!(session.record().get(TagField::Title), Some("A"));
}

#[test]
fn read_failing_between_toggles_is_requested_again() {
    let mut session = Session::new();
    let first = session.select_only(PathBuf::from("/m/a.mp3"));
    session.toggle(PathBuf::from("/m/b.mp3"));
    assert!(!session.fail_read(first));

    assert!(matches!(
        session.toggle(PathBuf::from("/m/b.mp3")),
        Toggle::Restored { reread: Some(_) }
    ));
}

#[test]
fn read_still_in_flight_lands_after_restore() {
    let mut session = Session::new();
    let first = session.select_only(PathBuf::from("/m/a.mp3"));
    session.toggle(PathBuf::from("/m/b.mp3"));

    assert_eq!(
        session.toggle(PathBuf::from("/m/b.mp3")),
        Toggle::Restored { reread: None }
    );
    assert!(session.apply_read(first, titled("A")));
}

#[test]
fn toggle_twice_on_selected_path_restores_order() {
    let mut session = Session::new();
    session.select_only(PathBuf::from("/m/a.mp3"));
    session.toggle(PathBuf::from("/m/b.mp3"));
    session.toggle(PathBuf::from("/m/c.mp3"));
    let before = session.selection().clone();

    session.toggle(PathBuf::from("/m/a.mp3"));
    session.toggle(PathBuf::from("/m/a.mp3"));

    assert_eq!(session.selection(), &before);
}

#[test]
fn edit_between_toggles_breaks_the_undo() {
    let mut session = Session::new();
    session.select_only(PathBuf::from("/m/a.mp3"));
    session.toggle(PathBuf::from("/m/b.mp3"));
    session.set_field(TagField::Year, "1999".to_string());

    assert_eq!(session.toggle(PathBuf::from("/m/b.mp3")), Toggle::Removed);
    assert_eq!(session.record().get(TagField::Year), Some("1999"));
}

#[test]
fn selection_never_holds_duplicates() {
    let mut session = Session::new();
    session.select_only(PathBuf::from("/m/a.mp3"));
    session.toggle(PathBuf::from("/m/b.mp3"));
    session.toggle(PathBuf::from("/m/c.mp3"));
    session.toggle(PathBuf::from("/m/b.mp3"));
    session.toggle(PathBuf::from("/m/d.mp3"));
    session.toggle(PathBuf::from("/m/b.mp3"));

    let paths = session.selection().paths();
    for (i, p) in paths.iter().enumerate() {
        assert!(!paths[i + 1..].contains(p), "duplicate {}", p.display());
    }
}

#[test]
fn remove_drops_path_and_reports_absence() {
    let mut session = Session::new();
    session.select_only(PathBuf::from("/m/a.mp3"));
    session.toggle(PathBuf::from("/m/b.mp3"));

    assert!(session.remove(Path::new("/m/a.mp3")));
    assert!(!session.remove(Path::new("/m/zzz.mp3")));
    assert_eq!(session.selection().paths(), &[PathBuf::from("/m/b.mp3")]);
}

#[test]
fn set_field_last_write_wins_without_validation() {
    let mut session = Session::new();
    session.set_field(TagField::TrackNumber, "3".to_string());
    session.set_field(TagField::TrackNumber, "three-ish".to_string());
    assert_eq!(session.record().get(TagField::TrackNumber), Some("three-ish"));
}

#[test]
fn read_merges_over_typed_edits() {
    let mut session = Session::new();
    let ticket = session.select_only(PathBuf::from("/m/a.mp3"));
    session.set_field(TagField::Title, "Typed".to_string());
    session.set_field(TagField::Year, "2020".to_string());

    assert!(session.apply_read(ticket, titled("From file")));

    assert_eq!(session.record().get(TagField::Title), Some("From file"));
    assert_eq!(session.record().get(TagField::Year), Some("2020"));
}

#[test]
fn stale_read_is_discarded() {
    let mut session = Session::new();
    let old = session.select_only(PathBuf::from("/m/a.mp3"));
    let new = session.select_only(PathBuf::from("/m/b.mp3"));

    assert!(!session.apply_read(old, titled("A")));
    assert!(session.record().is_empty());

    assert!(session.apply_read(new, titled("B")));
    assert_eq!(session.record().get(TagField::Title), Some("B"));
}

#[test]
fn read_issued_before_a_toggle_is_stale() {
    let mut session = Session::new();
    let ticket = session.select_only(PathBuf::from("/m/a.mp3"));
    session.toggle(PathBuf::from("/m/b.mp3"));

    assert!(!session.apply_read(ticket, titled("A")));
    assert!(session.record().is_empty());
}

#[test]
fn failed_read_clears_record_but_keeps_selection() {
    let mut session = Session::new();
    let ticket = session.select_only(PathBuf::from("/m/a.mp3"));
    session.set_field(TagField::Artist, "Typed".to_string());

    assert!(session.fail_read(ticket));
    assert!(session.record().is_empty());
    assert_eq!(session.selection().paths(), &[PathBuf::from("/m/a.mp3")]);
}

#[test]
fn stale_failed_read_changes_nothing() {
    let mut session = Session::new();
    let old = session.select_only(PathBuf::from("/m/a.mp3"));
    let new = session.select_only(PathBuf::from("/m/b.mp3"));
    session.apply_read(new, titled("B"));

    assert!(!session.fail_read(old));
    assert_eq!(session.record().get(TagField::Title), Some("B"));
}

#[test]
fn cover_art_accepts_png_and_jpeg() {
    let mut session = Session::new();

    let art = session.set_cover_art("front.PNG", vec![1, 2, 3]).unwrap();
    assert_eq!(art.mime, "image/png");

    let art = session.set_cover_art("front.jpeg", vec![4]).unwrap();
    assert_eq!(art.mime, "image/jpeg");
    assert_eq!(session.record().image.as_ref().unwrap().data, Some(vec![4]));
}

#[test]
fn unsupported_cover_art_leaves_record_untouched() {
    let mut session = Session::new();
    session.set_cover_art("front.png", vec![1]).unwrap();
    let before = session.record().clone();

    assert!(session.set_cover_art("front.gif", vec![9, 9]).is_none());
    assert!(session.set_cover_art("noextension", vec![9]).is_none());
    assert_eq!(session.record(), &before);
}

#[test]
fn clear_cover_art_sets_the_placeholder() {
    let mut session = Session::new();
    session.set_cover_art("front.jpg", vec![1, 2]).unwrap();

    assert_eq!(session.clear_cover_art(), &CoverArt::placeholder());
    assert!(session.record().image.as_ref().unwrap().is_placeholder());
}

#[test]
fn save_writes_the_same_record_to_every_selected_file() {
    let library = library_of(&["/m/a.mp3", "/m/b.mp3"]);
    let mut session = Session::new();
    session.select_only(PathBuf::from("/m/a.mp3"));
    session.toggle(PathBuf::from("/m/b.mp3"));
    session.set_field(TagField::Album, "Shared".to_string());

    let writer = FakeWriter::default();
    let report = session.save(&library, &writer);

    assert_eq!(report.saved, vec![PathBuf::from("/m/a.mp3"), PathBuf::from("/m/b.mp3")]);
    assert!(report.failed.is_empty());
    for (_, record) in writer.calls.borrow().iter() {
        assert_eq!(record, session.record());
    }
}

#[test]
fn save_continues_past_a_failing_file() {
    let library = library_of(&["/m/a.mp3", "/m/b.mp3", "/m/c.mp3"]);
    let mut session = Session::new();
    session.select_only(PathBuf::from("/m/a.mp3"));
    session.toggle(PathBuf::from("/m/b.mp3"));
    session.toggle(PathBuf::from("/m/c.mp3"));

    let writer = FakeWriter::failing_on("/m/b.mp3");
    let report = session.save(&library, &writer);

    assert_eq!(writer.written_paths().len(), 3);
    assert_eq!(report.saved, vec![PathBuf::from("/m/a.mp3"), PathBuf::from("/m/c.mp3")]);
    assert_eq!(report.failed.len(), 1);
    assert_eq!(report.failed[0].path(), Path::new("/m/b.mp3"));
}

#[test]
fn save_refuses_wav_without_calling_the_writer() {
    let library = library_of(&["/m/a.wav", "/m/b.mp3"]);
    let mut session = Session::new();
    session.select_only(PathBuf::from("/m/a.wav"));
    session.toggle(PathBuf::from("/m/b.mp3"));

    let writer = FakeWriter::default();
    let report = session.save(&library, &writer);

    assert_eq!(writer.written_paths(), vec![PathBuf::from("/m/b.mp3")]);
    assert_eq!(
        report.failed,
        vec![WriteError::UnsupportedFormat(PathBuf::from("/m/a.wav"))]
    );
    assert!(report.failed[0].to_string().contains("encode your music as MP3"));
}

#[test]
fn save_skips_paths_unknown_to_the_library() {
    let library = library_of(&["/m/a.mp3"]);
    let mut session = Session::new();
    session.select_only(PathBuf::from("/m/a.mp3"));
    session.toggle(PathBuf::from("/m/ghost.mp3"));

    let writer = FakeWriter::default();
    let report = session.save(&library, &writer);

    assert_eq!(report.saved, vec![PathBuf::from("/m/a.mp3")]);
    assert!(report.failed.is_empty());
}

#[test]
fn save_with_empty_selection_does_nothing() {
    let library = library_of(&["/m/a.mp3"]);
    let writer = FakeWriter::default();
    let report = Session::new().save(&library, &writer);

    assert!(report.saved.is_empty());
    assert!(report.failed.is_empty());
    assert!(writer.written_paths().is_empty());
}
