use chrono::{DateTime, Utc};

use crate::{EntryStatus, SortDirection, SortField, StatusMessage};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppViewModel {
    pub rows: Vec<EntryRowView>,
    pub entry_count: usize,
    pub eligible_count: usize,
    pub selected_count: usize,
    pub panel: Vec<SummaryCard>,
    pub sort_field: SortField,
    pub sort_direction: SortDirection,
    pub search_term: String,
    pub input: String,
    pub status: Option<StatusMessage>,
    pub poll_error: Option<String>,
    pub is_loading: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryRowView {
    pub index: usize,
    pub url: String,
    pub name: String,
    pub status: EntryStatus,
    pub insertion_date: DateTime<Utc>,
    pub selectable: bool,
    pub selected: bool,
    pub has_transcription: bool,
}

/// A selected summary as shown in the side panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryCard {
    pub url: String,
    pub name: String,
    pub summary: String,
}
