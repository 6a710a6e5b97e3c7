use std::collections::BTreeSet;

use crate::{EntryStore, SharedEntry};

/// Selected entry identities plus the range-select anchor.
///
/// Keys are urls, never view indices, so a selection survives re-sorting and
/// filtering. The anchor is an index into whatever view was current when the
/// last explicit (non-range) action happened.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SelectionModel {
    selected: BTreeSet<String>,
    anchor: Option<usize>,
}

impl SelectionModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flip membership of `url` and move the anchor to its view index.
    ///
    /// Only eligible entries can be added; toggling an ineligible entry just
    /// removes it if it was somehow still present.
    pub fn toggle(&mut self, url: &str, view: &[SharedEntry]) {
        let position = view.iter().position(|entry| entry.url == url);
        self.anchor = position;

        if self.selected.remove(url) {
            return;
        }
        let eligible = position.is_some_and(|idx| view[idx].is_eligible());
        if eligible {
            self.selected.insert(url.to_string());
        }
    }

    /// Add every eligible entry in the inclusive index range. Never removes.
    pub fn range_select(&mut self, from_index: usize, to_index: usize, view: &[SharedEntry]) {
        if view.is_empty() {
            return;
        }
        let last = view.len() - 1;
        let start = from_index.min(to_index).min(last);
        let end = from_index.max(to_index).min(last);
        for entry in &view[start..=end] {
            if entry.is_eligible() {
                self.selected.insert(entry.url.clone());
            }
        }
    }

    /// Row click: shift extends from the anchor, otherwise toggles and re-anchors.
    pub fn click_row(&mut self, index: usize, url: &str, view: &[SharedEntry], shift_held: bool) {
        let Some(row) = view.get(index) else {
            return;
        };
        if !row.is_eligible() {
            return;
        }
        match self.anchor {
            Some(anchor) if shift_held => self.range_select(anchor, index, view),
            _ => {
                self.toggle(url, view);
                self.anchor = Some(index);
            }
        }
    }

    pub fn is_selected(&self, url: &str) -> bool {
        self.selected.contains(url)
    }

    /// Entries of `view` that are both selected and still eligible.
    pub fn selected_count(&self, view: &[SharedEntry]) -> usize {
        view.iter()
            .filter(|entry| entry.is_eligible() && self.is_selected(&entry.url))
            .count()
    }

    pub fn anchor(&self) -> Option<usize> {
        self.anchor
    }

    /// Drop selections whose entry vanished from the store or lost its summary.
    /// Returns how many were dropped.
    pub fn retain_eligible(&mut self, store: &EntryStore) -> usize {
        let before = self.selected.len();
        self.selected
            .retain(|url| store.get(url).is_some_and(|entry| entry.is_eligible()));
        before - self.selected.len()
    }

    pub fn clear(&mut self) {
        self.selected.clear();
        self.anchor = None;
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }
}
