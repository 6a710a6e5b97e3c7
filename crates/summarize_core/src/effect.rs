use crate::ArtifactKind;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    SubmitUrl { url: String },
    /// Poll immediately instead of waiting for the next tick.
    RefreshEntries,
    WriteClipboard { text: String, copied: CopiedContent },
}

/// What a clipboard write carried, echoed back on completion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CopiedContent {
    Summaries { count: usize },
    Artifact { kind: ArtifactKind, url: String },
}
