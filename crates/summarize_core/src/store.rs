use std::collections::HashMap;
use std::sync::Arc;

use client_logging::client_debug;

use crate::{Entry, SharedEntry};

/// Counts describing what a snapshot replacement changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SnapshotChange {
    pub added: usize,
    pub updated: usize,
    pub removed: usize,
    /// Entries whose status moved backwards; the new value is kept regardless.
    pub regressed: usize,
    /// True when the membership or order of urls changed.
    pub reordered: bool,
}

impl SnapshotChange {
    pub fn has_changes(&self) -> bool {
        self.added > 0 || self.updated > 0 || self.removed > 0 || self.reordered
    }
}

/// Latest authoritative snapshot of entries, keyed by `url`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EntryStore {
    entries: Vec<SharedEntry>,
    positions: HashMap<String, usize>,
    revision: u64,
}

impl EntryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole collection. Unchanged entries keep their `Arc`.
    ///
    /// Duplicate urls collapse to one entry: the first position, the last value.
    pub fn replace_snapshot(&mut self, new_entries: Vec<Entry>) -> SnapshotChange {
        let mut entries: Vec<SharedEntry> = Vec::with_capacity(new_entries.len());
        let mut positions: HashMap<String, usize> = HashMap::with_capacity(new_entries.len());

        for entry in new_entries {
            match positions.get(&entry.url) {
                Some(&pos) => {
                    client_debug!("Duplicate url in poll result, keeping last value: {}", entry.url);
                    entries[pos] = Arc::new(entry);
                }
                None => {
                    positions.insert(entry.url.clone(), entries.len());
                    entries.push(Arc::new(entry));
                }
            }
        }

        let mut change = SnapshotChange::default();
        for slot in entries.iter_mut() {
            match self.get(&slot.url) {
                Some(previous) if **previous == **slot => {
                    *slot = Arc::clone(previous);
                }
                Some(previous) => {
                    if slot.status.progress_rank() < previous.status.progress_rank() {
                        client_debug!(
                            "Status regressed for {}: {} -> {}",
                            slot.url,
                            previous.status,
                            slot.status
                        );
                        change.regressed += 1;
                    }
                    change.updated += 1;
                }
                None => change.added += 1,
            }
        }
        change.removed = self
            .entries
            .iter()
            .filter(|old| !positions.contains_key(&old.url))
            .count();
        change.reordered = self.entries.len() != entries.len()
            || self
                .entries
                .iter()
                .zip(entries.iter())
                .any(|(old, new)| old.url != new.url);

        self.entries = entries;
        self.positions = positions;
        self.revision += 1;
        change
    }

    pub fn snapshot(&self) -> &[SharedEntry] {
        &self.entries
    }

    pub fn get(&self, url: &str) -> Option<&SharedEntry> {
        self.positions.get(url).map(|&pos| &self.entries[pos])
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Incremented on every replacement; dependents compare it to detect new snapshots.
    pub fn revision(&self) -> u64 {
        self.revision
    }
}
