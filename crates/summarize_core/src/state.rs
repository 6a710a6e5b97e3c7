use crate::pipeline;
use crate::view_model::{AppViewModel, EntryRowView, SummaryCard};
use crate::{EntryStore, SelectionModel, SharedEntry, ViewParams};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Error,
}

/// Dismissible one-line message shown under the table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub severity: Severity,
    pub text: String,
}

impl StatusMessage {
    pub fn info(text: impl Into<String>) -> Self {
        Self {
            severity: Severity::Info,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            text: text.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppState {
    store: EntryStore,
    params: ViewParams,
    selection: SelectionModel,
    input: String,
    status: Option<StatusMessage>,
    poll_error: Option<String>,
    last_poll_failure: Option<String>,
    loading: bool,
    dirty: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            store: EntryStore::default(),
            params: ViewParams::default(),
            selection: SelectionModel::default(),
            input: String::new(),
            status: None,
            poll_error: None,
            last_poll_failure: None,
            loading: true,
            dirty: false,
        }
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn store(&self) -> &EntryStore {
        &self.store
    }

    pub fn params(&self) -> &ViewParams {
        &self.params
    }

    pub fn selection(&self) -> &SelectionModel {
        &self.selection
    }

    /// Filtered, sorted rows; the index space for row messages.
    pub fn current_view(&self) -> Vec<SharedEntry> {
        pipeline::view(self.store.snapshot(), &self.params)
    }

    pub fn view(&self) -> AppViewModel {
        let rows = self.current_view();
        let row_views = rows
            .iter()
            .enumerate()
            .map(|(index, entry)| EntryRowView {
                index,
                url: entry.url.clone(),
                name: entry.name.clone(),
                status: entry.status,
                insertion_date: entry.insertion_date,
                selectable: entry.is_eligible(),
                selected: self.selection.is_selected(&entry.url),
                has_transcription: entry.transcription_text().is_some(),
            })
            .collect();
        let panel = rows
            .iter()
            .filter(|entry| self.selection.is_selected(&entry.url))
            .filter_map(|entry| {
                entry.summary_text().map(|summary| SummaryCard {
                    url: entry.url.clone(),
                    name: entry.name.clone(),
                    summary: summary.to_string(),
                })
            })
            .collect();

        AppViewModel {
            rows: row_views,
            entry_count: self.store.len(),
            eligible_count: rows.iter().filter(|entry| entry.is_eligible()).count(),
            selected_count: self.selection.selected_count(&rows),
            panel,
            sort_field: self.params.sort_field,
            sort_direction: self.params.sort_direction,
            search_term: self.params.search_term.clone(),
            input: self.input.clone(),
            status: self.status.clone(),
            poll_error: self.poll_error.clone(),
            is_loading: self.loading,
        }
    }

    /// Returns whether anything changed since the last call, and resets the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn store_mut(&mut self) -> &mut EntryStore {
        &mut self.store
    }

    pub(crate) fn params_mut(&mut self) -> &mut ViewParams {
        &mut self.params
    }

    pub(crate) fn selection_mut(&mut self) -> &mut SelectionModel {
        &mut self.selection
    }

    /// Store and selection together, for reconciling after a new snapshot.
    pub(crate) fn store_and_selection_mut(&mut self) -> (&EntryStore, &mut SelectionModel) {
        (&self.store, &mut self.selection)
    }

    pub(crate) fn input(&self) -> &str {
        &self.input
    }

    pub(crate) fn set_input(&mut self, input: String) {
        self.input = input;
    }

    pub(crate) fn set_status(&mut self, status: StatusMessage) {
        self.status = Some(status);
        self.dirty = true;
    }

    pub(crate) fn dismiss_status(&mut self) {
        let had_status = self.status.take().is_some();
        let had_poll_error = self.poll_error.take().is_some();
        if had_status || had_poll_error {
            self.dirty = true;
        }
    }

    pub(crate) fn finish_loading(&mut self) {
        if self.loading {
            self.loading = false;
            self.dirty = true;
        }
    }

    /// Record a failed poll. A repeat of the previous failure's text is not
    /// surfaced again; a different text replaces the shown error.
    pub(crate) fn record_poll_failure(&mut self, message: String) -> bool {
        if self.last_poll_failure.as_deref() == Some(message.as_str()) {
            return false;
        }
        self.last_poll_failure = Some(message.clone());
        self.poll_error = Some(message);
        self.dirty = true;
        true
    }

    pub(crate) fn record_poll_success(&mut self) {
        self.last_poll_failure = None;
        if self.poll_error.take().is_some() {
            self.dirty = true;
        }
    }
}
