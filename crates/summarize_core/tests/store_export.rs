use std::sync::Arc;

use chrono::{TimeZone, Utc};
use pretty_assertions::assert_eq;
use summarize_core::{
    artifact_text, build_document, ArtifactKind, Entry, EntryStatus, EntryStore, SelectionModel,
    SharedEntry,
};

fn entry(url: &str, name: &str, status: EntryStatus, summary: Option<&str>) -> Entry {
    Entry {
        url: url.to_string(),
        name: name.to_string(),
        status,
        transcription: None,
        summary: summary.map(str::to_string),
        insertion_date: Utc.with_ymd_and_hms(2024, 2, 10, 9, 30, 0).unwrap(),
    }
}

#[test]
fn replace_snapshot_reports_changes_and_bumps_revision() {
    let mut store = EntryStore::new();
    let change = store.replace_snapshot(vec![
        entry("a", "A", EntryStatus::Downloading, None),
        entry("b", "B", EntryStatus::NotStarted, None),
    ]);
    assert_eq!(change.added, 2);
    assert!(change.has_changes());
    assert_eq!(store.revision(), 1);

    let change = store.replace_snapshot(vec![
        entry("a", "A", EntryStatus::Transcribing, None),
        entry("b", "B", EntryStatus::NotStarted, None),
    ]);
    assert_eq!((change.added, change.updated, change.removed), (0, 1, 0));
    assert_eq!(store.revision(), 2);

    let change = store.replace_snapshot(vec![entry("a", "A", EntryStatus::Transcribing, None)]);
    assert_eq!(change.removed, 1);
    assert!(store.get("b").is_none());
    assert_eq!(store.len(), 1);
}

#[test]
fn identical_snapshot_keeps_arcs_and_reports_no_change() {
    let mut store = EntryStore::new();
    let snapshot = vec![
        entry("a", "A", EntryStatus::Done, Some("s")),
        entry("b", "B", EntryStatus::Summarizing, None),
    ];
    store.replace_snapshot(snapshot.clone());
    let before: Vec<SharedEntry> = store.snapshot().to_vec();

    let change = store.replace_snapshot(snapshot);
    assert!(!change.has_changes());
    for (old, new) in before.iter().zip(store.snapshot()) {
        assert!(Arc::ptr_eq(old, new));
    }
}

#[test]
fn duplicate_urls_collapse_to_one_entry() {
    let mut store = EntryStore::new();
    store.replace_snapshot(vec![
        entry("a", "first", EntryStatus::Downloading, None),
        entry("b", "B", EntryStatus::Done, None),
        entry("a", "second", EntryStatus::Transcribing, None),
    ]);

    assert_eq!(store.len(), 2);
    assert_eq!(store.snapshot()[0].url, "a");
    assert_eq!(store.get("a").unwrap().name, "second");
}

#[test]
fn status_regression_is_overwritten_by_fresh_poll() {
    let mut store = EntryStore::new();
    store.replace_snapshot(vec![entry("a", "A", EntryStatus::Summarizing, None)]);
    let change = store.replace_snapshot(vec![entry("a", "A", EntryStatus::NotStarted, None)]);

    assert_eq!(change.regressed, 1);
    assert_eq!(store.get("a").unwrap().status, EntryStatus::NotStarted);
}

#[test]
fn url_identity_is_case_sensitive() {
    let mut store = EntryStore::new();
    store.replace_snapshot(vec![
        entry("https://x/A", "upper", EntryStatus::Done, None),
        entry("https://x/a", "lower", EntryStatus::Done, None),
    ]);
    assert_eq!(store.len(), 2);
}

fn shared(e: Entry) -> SharedEntry {
    Arc::new(e)
}

#[test]
fn document_concatenates_selected_summaries_in_view_order() {
    let rows = vec![
        shared(entry("a", "A", EntryStatus::Done, Some("s1"))),
        shared(entry("x", "X", EntryStatus::Summarizing, None)),
        shared(entry("b", "B", EntryStatus::Done, Some("s2"))),
        shared(entry("c", "C", EntryStatus::Done, Some("s3"))),
    ];
    let mut selection = SelectionModel::new();
    selection.range_select(0, 2, &rows);

    assert_eq!(
        build_document(&rows, &selection),
        "## A\n\ns1\n\n---\n\n## B\n\ns2\n\n---\n\n"
    );
}

#[test]
fn document_is_empty_without_eligible_selection() {
    let rows = vec![shared(entry("a", "A", EntryStatus::Done, Some("s1")))];
    assert_eq!(build_document(&rows, &SelectionModel::new()), "");
    assert_eq!(build_document(&[], &SelectionModel::new()), "");
}

#[test]
fn artifacts_are_absent_until_produced() {
    let mut e = entry("https://v/1", "One", EntryStatus::Transcribing, None);
    assert_eq!(artifact_text(&e, ArtifactKind::Summary), None);
    assert_eq!(artifact_text(&e, ArtifactKind::Transcription), None);
    assert_eq!(
        artifact_text(&e, ArtifactKind::Url).as_deref(),
        Some("https://v/1")
    );

    e.transcription = Some("hello world".into());
    e.summary = Some("short".into());
    assert_eq!(
        artifact_text(&e, ArtifactKind::Transcription).as_deref(),
        Some("hello world")
    );
    assert_eq!(artifact_text(&e, ArtifactKind::Summary).as_deref(), Some("short"));
}

#[test]
fn entries_decode_from_server_json() {
    let json = r#"[
        {"id": 3, "name": "City Council Meeting", "status": "done",
         "url": "https://youtu.be/abc", "transcription": "t", "summary": "s",
         "insertion_date": "Tue, 02 Jan 2024 10:00:00 GMT"},
        {"id": 4, "name": "https://youtu.be/def", "status": "converting",
         "url": "https://youtu.be/def", "transcription": null, "summary": null,
         "insertion_date": "2024-01-03T08:15:00.123456"}
    ]"#;
    let entries: Vec<Entry> = serde_json::from_str(json).unwrap();

    assert_eq!(entries.len(), 2);
    assert!(entries[0].is_eligible());
    assert_eq!(entries[1].status, EntryStatus::Converting);
    assert!(entries[1].summary.is_none());
    assert_eq!(
        entries[0].insertion_date,
        Utc.with_ymd_and_hms(2024, 1, 2, 10, 0, 0).unwrap()
    );
}
