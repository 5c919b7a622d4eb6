//! Core note types for zennotes.
//!
//! A [`Note`] is the only record the application stores. Its JSON shape
//! (camelCase fields, epoch-millisecond timestamps) is shared by the
//! persisted collection and by export files.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Opaque note identifier.
///
/// Fresh ids are random v4 UUIDs, but ids read back from storage are kept
/// as whatever string was stored.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NoteId(String);

impl NoteId {
    /// Generate a fresh, random identifier.
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Borrow the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for NoteId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for NoteId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for NoteId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Current wall-clock time in milliseconds since the Unix epoch.
#[must_use]
pub fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

/// A single user-authored note.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    /// Unique identifier, immutable after creation.
    pub id: NoteId,

    /// Note title; may be empty.
    pub title: String,

    /// Note body; may be empty.
    pub content: String,

    /// Creation time in epoch milliseconds.
    pub created_at: i64,

    /// Last modification time in epoch milliseconds.
    pub updated_at: i64,

    /// Optional display tag.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl Note {
    /// Create a new note with a fresh id, stamped with the current time.
    #[must_use]
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self::with_timestamp(title, content, now_millis())
    }

    /// Create a new note with a fresh id and both timestamps set to `at`.
    #[must_use]
    pub fn with_timestamp(title: impl Into<String>, content: impl Into<String>, at: i64) -> Self {
        Self {
            id: NoteId::generate(),
            title: title.into(),
            content: content.into(),
            created_at: at,
            updated_at: at,
            color: None,
        }
    }

    /// Replace title and content and advance `updated_at` to `at`.
    ///
    /// `updated_at` never moves backwards, even if `at` is earlier than the
    /// previous modification time.
    pub fn revise(&mut self, title: impl Into<String>, content: impl Into<String>, at: i64) {
        self.title = title.into();
        self.content = content.into();
        self.updated_at = at.max(self.updated_at);
    }

    /// Check whether both title and content are blank.
    ///
    /// The command line refuses to save such a note.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        is_blank_draft(&self.title, &self.content)
    }

    /// Check whether `query` (already lowercased) occurs in the title or content.
    #[must_use]
    pub fn matches_lowercase(&self, query: &str) -> bool {
        self.title.to_lowercase().contains(query) || self.content.to_lowercase().contains(query)
    }
}

/// Check whether a title/content pair is blank after trimming whitespace.
#[must_use]
pub fn is_blank_draft(title: &str, content: &str) -> bool {
    title.trim().is_empty() && content.trim().is_empty()
}
