//! Persistence adapter mirroring the note collection to durable storage.
//!
//! The whole collection lives under one storage key as a JSON array. Reads
//! never fail from the caller's point of view: a missing key, an unreadable
//! backend, or a value that is not a JSON array all load as an empty
//! collection.

use std::collections::HashSet;

use serde_json::Value;
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::note::Note;
use crate::storage::KeyValueStore;

/// Default storage key for the note collection.
pub const DEFAULT_STORAGE_KEY: &str = "zennotes-data";

/// Loads and saves the note collection under a single storage key.
#[derive(Debug)]
pub struct Persistence<S> {
    backend: S,
    key: String,
}

impl<S: KeyValueStore> Persistence<S> {
    /// Create an adapter writing under [`DEFAULT_STORAGE_KEY`].
    #[must_use]
    pub fn new(backend: S) -> Self {
        Self::with_key(backend, DEFAULT_STORAGE_KEY)
    }

    /// Create an adapter writing under a custom key.
    #[must_use]
    pub fn with_key(backend: S, key: impl Into<String>) -> Self {
        Self {
            backend,
            key: key.into(),
        }
    }

    /// The storage key this adapter reads and writes.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Borrow the underlying key-value backend.
    #[must_use]
    pub fn backend(&self) -> &S {
        &self.backend
    }

    /// Load the stored collection.
    ///
    /// Entries that do not deserialize as a note, and entries repeating an
    /// earlier id, are dropped with a warning. A stored `updatedAt` earlier
    /// than `createdAt` is raised to `createdAt`.
    #[must_use]
    pub fn load(&self) -> Vec<Note> {
        let raw = match self.backend.get(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                debug!("No stored notes under key {}", self.key);
                return Vec::new();
            }
            Err(e) => {
                warn!("Failed to read stored notes, starting empty: {}", e);
                return Vec::new();
            }
        };

        let entries = match serde_json::from_str::<Value>(&raw) {
            Ok(Value::Array(entries)) => entries,
            Ok(_) => {
                warn!("Stored notes under key {} are not an array, starting empty", self.key);
                return Vec::new();
            }
            Err(e) => {
                warn!("Stored notes are not valid JSON, starting empty: {}", e);
                return Vec::new();
            }
        };

        let total = entries.len();
        let mut seen = HashSet::with_capacity(total);
        let mut notes = Vec::with_capacity(total);
        for (index, entry) in entries.into_iter().enumerate() {
            let mut note = match serde_json::from_value::<Note>(entry) {
                Ok(note) => note,
                Err(e) => {
                    warn!("Dropping malformed stored note at index {}: {}", index, e);
                    continue;
                }
            };
            if !seen.insert(note.id.clone()) {
                warn!("Dropping stored note with duplicate id {}", note.id);
                continue;
            }
            note.updated_at = note.updated_at.max(note.created_at);
            notes.push(note);
        }

        debug!("Loaded {} of {} stored notes", notes.len(), total);
        notes
    }

    /// Serialize `notes` and overwrite the stored value.
    ///
    /// # Errors
    ///
    /// Returns [`Error::PersistenceWrite`] if serialization or the backend
    /// write fails.
    pub fn save(&self, notes: &[Note]) -> Result<()> {
        let json = serde_json::to_string(notes)
            .map_err(|e| Error::persistence_write(&self.key, e.to_string()))?;
        self.backend
            .set(&self.key, &json)
            .map_err(|e| Error::persistence_write(&self.key, e.to_string()))?;
        debug!("Saved {} notes under key {}", notes.len(), self.key);
        Ok(())
    }
}
