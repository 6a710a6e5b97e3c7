use std::fmt;

use summarize_core::Entry;

/// Outcome of one PollLoop cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PollEvent {
    Snapshot { cycle: u64, entries: Vec<Entry> },
    Failed { cycle: u64, error: ClientError },
}

/// Everything the client thread reports back to the application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientEvent {
    Poll(PollEvent),
    Submitted {
        url: String,
        result: Result<SubmitReceipt, ClientError>,
    },
}

/// Successful answer to `POST /entries`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitReceipt {
    /// The server echoed the created entry.
    Created(Entry),
    /// The server acknowledged without returning the entry.
    Acknowledged { message: Option<String> },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientError {
    pub kind: FailureKind,
    pub message: String,
}

impl ClientError {
    pub(crate) fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// Text suitable for the status line.
    pub fn user_message(&self) -> String {
        match &self.kind {
            FailureKind::Rejected { .. } => self.message.clone(),
            kind => format!("{kind}: {}", self.message),
        }
    }
}

impl fmt::Display for ClientError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.kind, self.message)
    }
}

impl std::error::Error for ClientError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    InvalidUrl,
    HttpStatus(u16),
    /// The server refused a submission; `message` carries its explanation.
    Rejected { status: u16 },
    Timeout,
    TooLarge { max_bytes: u64, actual: Option<u64> },
    Decode,
    Network,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidUrl => write!(f, "invalid url"),
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::Rejected { status } => write!(f, "rejected with status {status}"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::TooLarge { max_bytes, actual } => {
                write!(f, "response too large (max {max_bytes}, actual {actual:?})")
            }
            FailureKind::Decode => write!(f, "malformed response"),
            FailureKind::Network => write!(f, "network error"),
        }
    }
}
