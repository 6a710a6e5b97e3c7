//! Summarize client: HTTP access to the entries API, polling and copy targets.
mod api;
mod clipboard;
mod engine;
mod poll;
mod settings;
mod types;

pub use api::{EntrySource, ReqwestApi, UrlSubmitter};
pub use clipboard::{ClipboardError, ClipboardWriter, FileClipboard, SystemClipboard};
pub use engine::{ChannelPollSink, ClientHandle, ClientStopped, StartError};
pub use poll::{PollLoop, PollSink, PollState, MIN_POLL_INTERVAL};
pub use settings::{
    ClientSettings, SettingsError, SettingsOverrides, DEFAULT_BACKEND_PORT, DEFAULT_HOST,
    DEFAULT_POLL_INTERVAL, ENV_BACKEND_PORT, ENV_HOST, ENV_POLL_INTERVAL_MS, ENV_SERVER_URL,
};
pub use types::{ClientError, ClientEvent, FailureKind, PollEvent, SubmitReceipt};
