use client_logging::{client_debug, client_info, client_warn};

use crate::export::{artifact_text, build_document};
use crate::{AppState, CopiedContent, Effect, Msg, StatusMessage};

pub const SUBMIT_SUCCESS_TEXT: &str = "Video added successfully.";
pub const SUBMIT_FALLBACK_ERROR: &str = "Failed to add video.";
pub const NOTHING_SELECTED_TEXT: &str = "Nothing selected.";

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::InputChanged(text) => {
            if state.input() != text {
                state.set_input(text);
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::UrlSubmitted => {
            let url = state.input().trim().to_string();
            if url.is_empty() {
                return (state, Vec::new());
            }
            vec![Effect::SubmitUrl { url }]
        }
        Msg::SubmitSucceeded { url } => {
            client_info!("Submitted {}", url);
            if state.input().trim() == url {
                state.set_input(String::new());
            }
            state.set_status(StatusMessage::info(SUBMIT_SUCCESS_TEXT));
            vec![Effect::RefreshEntries]
        }
        Msg::SubmitFailed { url, message } => {
            client_warn!("Submission of {} failed: {}", url, message);
            let text = if message.trim().is_empty() {
                SUBMIT_FALLBACK_ERROR.to_string()
            } else {
                message
            };
            state.set_status(StatusMessage::error(text));
            Vec::new()
        }
        Msg::PollSucceeded { cycle, entries } => {
            let change = state.store_mut().replace_snapshot(entries);
            let (store, selection) = state.store_and_selection_mut();
            let dropped = selection.retain_eligible(store);
            client_debug!(
                "Poll cycle {} applied: {:?}, dropped {} stale selections",
                cycle,
                change,
                dropped
            );
            if change.has_changes() || dropped > 0 {
                state.mark_dirty();
            }
            state.record_poll_success();
            state.finish_loading();
            Vec::new()
        }
        Msg::PollFailed { cycle, message } => {
            if state.record_poll_failure(message.clone()) {
                client_warn!("Poll cycle {} failed: {}", cycle, message);
            } else {
                client_debug!("Poll cycle {} failed again: {}", cycle, message);
            }
            state.finish_loading();
            Vec::new()
        }
        Msg::SortClicked(field) => {
            state.params_mut().toggle_sort(field);
            state.mark_dirty();
            Vec::new()
        }
        Msg::SearchChanged(term) => {
            if state.params().search_term != term {
                state.params_mut().search_term = term;
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::RowClicked { index, shift } => {
            let rows = state.current_view();
            if let Some(url) = rows.get(index).map(|entry| entry.url.clone()) {
                let before = state.selection().clone();
                state.selection_mut().click_row(index, &url, &rows, shift);
                if *state.selection() != before {
                    state.mark_dirty();
                }
            }
            Vec::new()
        }
        Msg::CheckboxToggled { index } => {
            let rows = state.current_view();
            // Checkboxes of rows without a summary are disabled.
            if let Some(entry) = rows.get(index).filter(|entry| entry.is_eligible()) {
                let url = entry.url.clone();
                state.selection_mut().toggle(&url, &rows);
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::CopySelectedClicked => {
            let rows = state.current_view();
            let document = build_document(&rows, state.selection());
            if document.is_empty() {
                state.set_status(StatusMessage::info(NOTHING_SELECTED_TEXT));
                Vec::new()
            } else {
                let count = state.selection().selected_count(&rows);
                vec![Effect::WriteClipboard {
                    text: document,
                    copied: CopiedContent::Summaries { count },
                }]
            }
        }
        Msg::CopyArtifactClicked { index, kind } => {
            let rows = state.current_view();
            let Some(entry) = rows.get(index) else {
                return (state, Vec::new());
            };
            match artifact_text(entry, kind) {
                Some(text) => vec![Effect::WriteClipboard {
                    text,
                    copied: CopiedContent::Artifact {
                        kind,
                        url: entry.url.clone(),
                    },
                }],
                None => {
                    let text = format!("No {} available yet for {}.", kind.label(), entry.url);
                    state.set_status(StatusMessage::info(text));
                    Vec::new()
                }
            }
        }
        Msg::ClipboardWritten { copied } => {
            let text = match copied {
                CopiedContent::Summaries { count: 1 } => "Copied 1 summary.".to_string(),
                CopiedContent::Summaries { count } => format!("Copied {count} summaries."),
                CopiedContent::Artifact { kind, url } => {
                    format!("Copied {} of {}.", kind.label(), url)
                }
            };
            state.set_status(StatusMessage::info(text));
            Vec::new()
        }
        Msg::ClipboardFailed { message } => {
            client_warn!("Clipboard write failed: {}", message);
            state.set_status(StatusMessage::error(format!("Copy failed: {message}")));
            Vec::new()
        }
        Msg::ClearSelectionClicked => {
            if !state.selection().is_empty() || state.selection().anchor().is_some() {
                state.selection_mut().clear();
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::StatusDismissed => {
            state.dismiss_status();
            Vec::new()
        }
        Msg::RedrawRequested => {
            state.mark_dirty();
            Vec::new()
        }
    };

    (state, effects)
}
