use crate::{ArtifactKind, CopiedContent, Entry, SortField};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User edited the URL input box.
    InputChanged(String),
    /// User submitted the current URL input.
    UrlSubmitted,
    /// Backend accepted a submission.
    SubmitSucceeded { url: String },
    /// Backend rejected a submission, or the request failed.
    SubmitFailed { url: String, message: String },
    /// A poll cycle returned a full snapshot.
    PollSucceeded { cycle: u64, entries: Vec<Entry> },
    /// A poll cycle failed; the previous snapshot stays.
    PollFailed { cycle: u64, message: String },
    /// User clicked a column header.
    SortClicked(SortField),
    /// User edited the search box.
    SearchChanged(String),
    /// User clicked a table row (view index).
    RowClicked { index: usize, shift: bool },
    /// User toggled a row checkbox (view index).
    CheckboxToggled { index: usize },
    /// User asked to copy all selected summaries.
    CopySelectedClicked,
    /// User asked to copy one artifact of a row (view index).
    CopyArtifactClicked { index: usize, kind: ArtifactKind },
    ClipboardWritten { copied: CopiedContent },
    ClipboardFailed { message: String },
    ClearSelectionClicked,
    StatusDismissed,
    /// Force a render of the current state.
    RedrawRequested,
}
