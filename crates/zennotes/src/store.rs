//! The record store: the authoritative in-memory note collection.
//!
//! [`NoteStore`] owns the collection and is the only place it changes. Each
//! mutating operation changes the in-memory list first and then writes the
//! whole collection through its [`Persistence`] adapter before returning.
//! Write failures are logged and absorbed; the in-memory collection stays
//! authoritative for the rest of the session.
//!
//! Ordering is most-recent-first: created and imported notes are prepended,
//! edits keep a note where it is.

use tracing::{debug, info, warn};

use crate::error::{Error, Result};
use crate::note::{now_millis, Note, NoteId};
use crate::persistence::Persistence;
use crate::search;
use crate::storage::KeyValueStore;
use crate::transfer;

/// Outcome of a successful import.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportReport {
    /// Number of notes added to the collection.
    pub imported: usize,
    /// Size of the collection after the merge.
    pub total: usize,
}

/// Owned note collection with persist-on-write semantics.
#[derive(Debug)]
pub struct NoteStore<S> {
    notes: Vec<Note>,
    persistence: Persistence<S>,
    durable: bool,
}

impl<S: KeyValueStore> NoteStore<S> {
    /// Open the store, loading whatever the adapter has persisted.
    #[must_use]
    pub fn open(persistence: Persistence<S>) -> Self {
        let notes = persistence.load();
        info!("Opened note store with {} notes", notes.len());
        Self {
            notes,
            persistence,
            durable: true,
        }
    }

    /// Create a note and place it at the front of the collection.
    pub fn create(&mut self, title: impl Into<String>, content: impl Into<String>) -> Note {
        let note = Note::new(title, content);
        debug!("Created note {}", note.id);
        self.notes.insert(0, note.clone());
        self.persist();
        note
    }

    /// Replace the title and content of an existing note.
    ///
    /// The note keeps its id, creation time and position.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoteNotFound`] if no note has the given id.
    pub fn update(
        &mut self,
        id: &NoteId,
        title: impl Into<String>,
        content: impl Into<String>,
    ) -> Result<Note> {
        let note = self
            .notes
            .iter_mut()
            .find(|note| note.id == *id)
            .ok_or_else(|| Error::note_not_found(id.as_str()))?;

        note.revise(title, content, now_millis());
        let updated = note.clone();
        debug!("Updated note {}", updated.id);
        self.persist();
        Ok(updated)
    }

    /// Remove the note with the given id.
    ///
    /// Returns `true` if a note was removed. Deleting an unknown id changes
    /// nothing and writes nothing.
    pub fn delete(&mut self, id: &NoteId) -> bool {
        let Some(index) = self.notes.iter().position(|note| note.id == *id) else {
            debug!("Delete of unknown note {} ignored", id);
            return false;
        };

        self.notes.remove(index);
        debug!("Deleted note {}", id);
        self.persist();
        true
    }

    /// The collection in stored order.
    #[must_use]
    pub fn list(&self) -> &[Note] {
        &self.notes
    }

    /// Look up a note by id.
    #[must_use]
    pub fn get(&self, id: &NoteId) -> Option<&Note> {
        self.notes.iter().find(|note| note.id == *id)
    }

    /// Notes whose title or content contains `query`, ignoring case.
    #[must_use]
    pub fn search(&self, query: &str) -> Vec<&Note> {
        search::filter(&self.notes, query)
    }

    /// Merge the notes of an import document into the front of the collection.
    ///
    /// Existing notes are never modified or removed. On error the collection
    /// is unchanged.
    ///
    /// # Errors
    ///
    /// Returns the import errors of [`transfer::parse_import`].
    pub fn import(&mut self, text: &str) -> Result<ImportReport> {
        let mut merged = transfer::parse_import(text, now_millis())?;
        let count = merged.len();

        merged.append(&mut self.notes);
        self.notes = merged;
        info!("Imported {} notes", count);
        self.persist();

        Ok(ImportReport {
            imported: count,
            total: self.notes.len(),
        })
    }

    /// Serialize the full collection for export.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn export(&self) -> Result<String> {
        transfer::export_json(&self.notes)
    }

    /// Number of notes in the collection.
    #[must_use]
    pub fn len(&self) -> usize {
        self.notes.len()
    }

    /// Check whether the collection is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    /// Whether the most recent write reached durable storage.
    #[must_use]
    pub fn is_durable(&self) -> bool {
        self.durable
    }

    /// Borrow the persistence adapter.
    #[must_use]
    pub fn persistence(&self) -> &Persistence<S> {
        &self.persistence
    }

    fn persist(&mut self) {
        match self.persistence.save(&self.notes) {
            Ok(()) => self.durable = true,
            Err(e) => {
                warn!("Keeping changes in memory only: {}", e);
                self.durable = false;
            }
        }
    }
}
