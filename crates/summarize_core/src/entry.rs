use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Entries are shared between the store and every derived view.
pub type SharedEntry = Arc<Entry>;

/// Processing stage reported by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryStatus {
    NotStarted,
    Downloading,
    Converting,
    Transcribing,
    Summarizing,
    Done,
    Error,
}

impl EntryStatus {
    /// Wire name, also used for ordinal sorting and search.
    pub fn as_str(self) -> &'static str {
        match self {
            EntryStatus::NotStarted => "not_started",
            EntryStatus::Downloading => "downloading",
            EntryStatus::Converting => "converting",
            EntryStatus::Transcribing => "transcribing",
            EntryStatus::Summarizing => "summarizing",
            EntryStatus::Done => "done",
            EntryStatus::Error => "error",
        }
    }

    /// Position along the processing pipeline. Terminal states share the top rank.
    pub fn progress_rank(self) -> u8 {
        match self {
            EntryStatus::NotStarted => 0,
            EntryStatus::Downloading => 1,
            EntryStatus::Converting => 2,
            EntryStatus::Transcribing => 3,
            EntryStatus::Summarizing => 4,
            EntryStatus::Done | EntryStatus::Error => 5,
        }
    }
}

impl fmt::Display for EntryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One submitted video and its processing state. Identity is `url`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    pub url: String,
    #[serde(default)]
    pub name: String,
    pub status: EntryStatus,
    #[serde(default)]
    pub transcription: Option<String>,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(deserialize_with = "deserialize_timestamp")]
    pub insertion_date: DateTime<Utc>,
}

impl Entry {
    /// Summary text, treating an empty string as not yet produced.
    pub fn summary_text(&self) -> Option<&str> {
        self.summary.as_deref().filter(|s| !s.is_empty())
    }

    pub fn transcription_text(&self) -> Option<&str> {
        self.transcription.as_deref().filter(|s| !s.is_empty())
    }

    /// Selectable and exportable iff a summary is present.
    pub fn is_eligible(&self) -> bool {
        self.summary_text().is_some()
    }
}

fn deserialize_timestamp<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_timestamp(&raw)
        .ok_or_else(|| serde::de::Error::custom(format!("unrecognized timestamp {raw:?}")))
}

/// Parse RFC 3339, RFC 2822 (HTTP-date) or a naive ISO date-time taken as UTC.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.with_timezone(&Utc));
    }
    if let Ok(ts) = DateTime::parse_from_rfc2822(raw) {
        return Some(ts.with_timezone(&Utc));
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(|naive| naive.and_utc())
}
