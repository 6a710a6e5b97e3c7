use std::cmp::Ordering;

use crate::{Entry, SharedEntry};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortField {
    Name,
    Status,
    InsertionDate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortDirection {
    Asc,
    Desc,
}

/// Ephemeral table parameters: sort column, direction and search term.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewParams {
    pub sort_field: SortField,
    pub sort_direction: SortDirection,
    pub search_term: String,
}

impl Default for ViewParams {
    fn default() -> Self {
        Self {
            sort_field: SortField::InsertionDate,
            sort_direction: SortDirection::Desc,
            search_term: String::new(),
        }
    }
}

impl ViewParams {
    /// Header click: the active ascending column flips to descending, anything else sorts ascending.
    pub fn toggle_sort(&mut self, field: SortField) {
        self.sort_direction =
            if self.sort_field == field && self.sort_direction == SortDirection::Asc {
                SortDirection::Desc
            } else {
                SortDirection::Asc
            };
        self.sort_field = field;
    }
}

/// Filter then stably sort a snapshot. `Desc` is the literal reverse of `Asc`.
pub fn view(snapshot: &[SharedEntry], params: &ViewParams) -> Vec<SharedEntry> {
    let needle = params.search_term.to_lowercase();
    let mut rows: Vec<SharedEntry> = snapshot
        .iter()
        .filter(|entry| matches_search(entry, &needle))
        .cloned()
        .collect();

    // `sort_by` is a stable merge sort.
    rows.sort_by(|a, b| compare(a, b, params.sort_field));
    if params.sort_direction == SortDirection::Desc {
        rows.reverse();
    }
    rows
}

fn matches_search(entry: &Entry, needle: &str) -> bool {
    needle.is_empty()
        || entry.name.to_lowercase().contains(needle)
        || entry.status.as_str().to_lowercase().contains(needle)
}

fn compare(a: &Entry, b: &Entry, field: SortField) -> Ordering {
    match field {
        SortField::Name => a.name.cmp(&b.name),
        SortField::Status => a.status.as_str().cmp(b.status.as_str()),
        SortField::InsertionDate => a.insertion_date.cmp(&b.insertion_date),
    }
}
