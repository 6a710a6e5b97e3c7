//! Summarize core: pure state machine for the live entry list.
//!
//! Holds the polled snapshot, derives the sorted and filtered view, tracks the
//! identity-keyed selection and builds export documents. All I/O happens
//! elsewhere; this crate only turns messages into state changes and effects.
mod effect;
mod entry;
mod export;
mod msg;
mod pipeline;
mod selection;
mod state;
mod store;
mod update;
mod view_model;

pub use effect::{CopiedContent, Effect};
pub use entry::{parse_timestamp, Entry, EntryStatus, SharedEntry};
pub use export::{artifact_text, build_document, ArtifactKind};
pub use msg::Msg;
pub use pipeline::{view, SortDirection, SortField, ViewParams};
pub use selection::SelectionModel;
pub use state::{AppState, Severity, StatusMessage};
pub use store::{EntryStore, SnapshotChange};
pub use update::{update, NOTHING_SELECTED_TEXT, SUBMIT_FALLBACK_ERROR, SUBMIT_SUCCESS_TEXT};
pub use view_model::{AppViewModel, EntryRowView, SummaryCard};
