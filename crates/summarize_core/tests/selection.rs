use std::sync::Arc;

use chrono::{Duration, TimeZone, Utc};
use summarize_core::{
    view, Entry, EntryStatus, EntryStore, SelectionModel, SharedEntry, SortDirection, SortField,
    ViewParams,
};

fn make(url: &str, name: &str, summary: Option<&str>, minutes: i64) -> Entry {
    Entry {
        url: url.to_string(),
        name: name.to_string(),
        status: if summary.is_some() {
            EntryStatus::Done
        } else {
            EntryStatus::Transcribing
        },
        transcription: None,
        summary: summary.map(str::to_string),
        insertion_date: Utc.with_ymd_and_hms(2024, 5, 1, 8, 0, 0).unwrap()
            + Duration::minutes(minutes),
    }
}

fn shared(url: &str, summary: Option<&str>) -> SharedEntry {
    Arc::new(make(url, url, summary, 0))
}

#[test]
fn range_select_skips_ineligible_rows() {
    let rows = vec![shared("e0", None), shared("e1", Some("s1")), shared("e2", Some("s2"))];
    let mut selection = SelectionModel::new();

    selection.toggle("e0", &rows);
    assert_eq!(selection.anchor(), Some(0));
    assert!(!selection.is_selected("e0"));

    selection.range_select(0, 2, &rows);
    assert!(!selection.is_selected("e0"));
    assert!(selection.is_selected("e1"));
    assert!(selection.is_selected("e2"));
}

#[test]
fn range_select_is_additive_and_order_independent() {
    let rows: Vec<_> = (0..5).map(|i| shared(&format!("e{i}"), Some("s"))).collect();
    let mut selection = SelectionModel::new();

    selection.range_select(3, 1, &rows);
    assert_eq!(selection.selected_count(&rows), 3);

    // A narrower range does not deselect anything.
    selection.range_select(2, 2, &rows);
    assert_eq!(selection.selected_count(&rows), 3);

    // Out-of-range indices are clamped rather than panicking.
    selection.range_select(0, 99, &rows);
    assert_eq!(selection.selected_count(&rows), 5);
    selection.range_select(0, 3, &[]);
}

#[test]
fn click_row_toggles_and_shift_extends_from_anchor() {
    let rows: Vec<_> = (0..5).map(|i| shared(&format!("e{i}"), Some("s"))).collect();
    let mut selection = SelectionModel::new();

    selection.click_row(1, "e1", &rows, false);
    assert!(selection.is_selected("e1"));
    assert_eq!(selection.anchor(), Some(1));

    selection.click_row(3, "e3", &rows, true);
    assert!(selection.is_selected("e2"));
    assert!(selection.is_selected("e3"));
    assert_eq!(selection.anchor(), Some(1), "range select keeps the anchor");

    selection.click_row(1, "e1", &rows, false);
    assert!(!selection.is_selected("e1"));
    assert_eq!(selection.selected_count(&rows), 2);
}

#[test]
fn shift_click_without_anchor_acts_like_plain_click() {
    let rows: Vec<_> = (0..3).map(|i| shared(&format!("e{i}"), Some("s"))).collect();
    let mut selection = SelectionModel::new();

    selection.click_row(2, "e2", &rows, true);
    assert!(selection.is_selected("e2"));
    assert_eq!(selection.selected_count(&rows), 1);
    assert_eq!(selection.anchor(), Some(2));
}

#[test]
fn clicking_a_disabled_row_is_a_noop() {
    let rows = vec![shared("e0", Some("s")), shared("e1", None)];
    let mut selection = SelectionModel::new();
    selection.click_row(0, "e0", &rows, false);

    let before = selection.clone();
    selection.click_row(1, "e1", &rows, false);
    selection.click_row(1, "e1", &rows, true);
    selection.click_row(7, "missing", &rows, false);
    assert_eq!(selection, before);
}

#[test]
fn selection_survives_reordering() {
    let mut store = EntryStore::new();
    store.replace_snapshot(vec![
        make("a", "alpha", Some("s"), 0),
        make("b", "zulu", Some("s"), 1),
        make("c", "mike", None, 2),
    ]);
    let by_date = ViewParams::default();
    let rows = view(store.snapshot(), &by_date);
    let mut selection = SelectionModel::new();
    let index_of_a = rows.iter().position(|e| e.url == "a").unwrap();
    selection.click_row(index_of_a, "a", &rows, false);

    let by_name = ViewParams {
        sort_field: SortField::Name,
        sort_direction: SortDirection::Asc,
        search_term: String::new(),
    };
    let reordered = view(store.snapshot(), &by_name);
    assert_ne!(
        reordered.iter().position(|e| e.url == "a"),
        Some(index_of_a)
    );
    assert!(selection.is_selected("a"));
    assert_eq!(selection.selected_count(&reordered), 1);

    // Filtering it out of view hides it from the count but keeps it selected.
    let filtered = ViewParams {
        search_term: "zulu".into(),
        ..by_name
    };
    let narrowed = view(store.snapshot(), &filtered);
    assert_eq!(selection.selected_count(&narrowed), 0);
    assert!(selection.is_selected("a"));
}

#[test]
fn selected_count_never_exceeds_eligible_rows() {
    let mut selection = SelectionModel::new();
    let eligible = vec![shared("a", Some("s")), shared("b", Some("s")), shared("c", None)];
    selection.range_select(0, 2, &eligible);

    // Same identities, but the summary of `b` has been retracted.
    let retracted = vec![shared("a", Some("s")), shared("b", None), shared("c", None)];
    let eligible_rows = retracted.iter().filter(|e| e.is_eligible()).count();
    assert_eq!(selection.selected_count(&retracted), 1);
    assert!(selection.selected_count(&retracted) <= eligible_rows);
}

#[test]
fn retain_eligible_drops_vanished_and_retracted_entries() {
    let mut store = EntryStore::new();
    store.replace_snapshot(vec![
        make("a", "a", Some("s"), 0),
        make("b", "b", Some("s"), 1),
        make("c", "c", Some("s"), 2),
    ]);
    let rows = view(store.snapshot(), &ViewParams::default());
    let mut selection = SelectionModel::new();
    selection.range_select(0, 2, &rows);

    store.replace_snapshot(vec![make("a", "a", Some("s"), 0), make("b", "b", None, 1)]);
    let dropped = selection.retain_eligible(&store);

    assert_eq!(dropped, 2);
    assert!(selection.is_selected("a"));
    assert!(!selection.is_selected("b"));
    assert!(!selection.is_selected("c"));
}

#[test]
fn toggle_deselects_and_clear_forgets_anchor() {
    let rows = vec![shared("a", Some("s")), shared("b", Some("s"))];
    let mut selection = SelectionModel::new();
    selection.toggle("b", &rows);
    assert!(selection.is_selected("b"));
    assert_eq!(selection.anchor(), Some(1));
    selection.toggle("b", &rows);
    assert!(!selection.is_selected("b"));

    selection.toggle("a", &rows);
    selection.clear();
    assert!(selection.is_empty());
    assert_eq!(selection.anchor(), None);
}
