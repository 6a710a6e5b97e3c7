use crate::{Entry, SelectionModel, SharedEntry};

/// Which piece of a single entry to copy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactKind {
    Summary,
    Transcription,
    Url,
}

impl ArtifactKind {
    pub fn label(self) -> &'static str {
        match self {
            ArtifactKind::Summary => "summary",
            ArtifactKind::Transcription => "transcription",
            ArtifactKind::Url => "url",
        }
    }
}

/// Concatenate the selected, eligible entries of `view` in view order.
///
/// Each entry contributes `## <name>\n\n<summary>\n\n---\n\n`. Returns an
/// empty string when nothing qualifies.
pub fn build_document(view: &[SharedEntry], selection: &SelectionModel) -> String {
    let mut buffer = String::new();
    for entry in view.iter().filter(|entry| selection.is_selected(&entry.url)) {
        let Some(summary) = entry.summary_text() else {
            continue;
        };
        buffer.push_str("## ");
        buffer.push_str(&entry.name);
        buffer.push_str("\n\n");
        buffer.push_str(summary);
        buffer.push_str("\n\n---\n\n");
    }
    buffer
}

/// Text to copy for one artifact, or `None` when it has not been produced yet.
pub fn artifact_text(entry: &Entry, kind: ArtifactKind) -> Option<String> {
    match kind {
        ArtifactKind::Summary => entry.summary_text().map(str::to_owned),
        ArtifactKind::Transcription => entry.transcription_text().map(str::to_owned),
        ArtifactKind::Url => Some(entry.url.clone()),
    }
}
