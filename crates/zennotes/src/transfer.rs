//! JSON import and export of the note collection.
//!
//! Export writes the full collection as a pretty-printed array of notes.
//! Import reads such an array (or any array of objects carrying `title` and
//! `content`) and turns every usable entry into a fresh note. Imported ids
//! are always replaced, so an import can never collide with or overwrite an
//! existing note.

use chrono::NaiveDate;
use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::note::{Note, NoteId};

/// Serialize `notes` as a pretty-printed JSON array.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn export_json(notes: &[Note]) -> Result<String> {
    Ok(serde_json::to_string_pretty(notes)?)
}

/// File name for a backup taken on `date`, e.g. `zennotes-backup-2024-05-01.json`.
#[must_use]
pub fn export_file_name(prefix: &str, date: NaiveDate) -> String {
    format!("{prefix}-backup-{}.json", date.format("%Y-%m-%d"))
}

/// Parse an import document into new notes stamped relative to `now`.
///
/// The returned notes are in document order and every one carries a freshly
/// generated id.
///
/// # Errors
///
/// - [`Error::ImportParse`] if `text` is not JSON.
/// - [`Error::ImportFormat`] if the JSON is not an array.
/// - [`Error::NoValidEntries`] if no element has both `title` and `content`.
pub fn parse_import(text: &str, now: i64) -> Result<Vec<Note>> {
    let value: Value = serde_json::from_str(text).map_err(Error::ImportParse)?;
    let Value::Array(entries) = value else {
        return Err(Error::ImportFormat);
    };

    let total = entries.len();
    let notes: Vec<Note> = entries
        .iter()
        .filter_map(|entry| note_from_entry(entry, now))
        .collect();

    if notes.is_empty() {
        warn!("Import contained {} entries but none were valid notes", total);
        return Err(Error::NoValidEntries);
    }

    debug!("Import accepted {} of {} entries", notes.len(), total);
    Ok(notes)
}

fn note_from_entry(entry: &Value, now: i64) -> Option<Note> {
    let object = entry.as_object()?;
    let title = text_field(object, "title")?;
    let content = text_field(object, "content")?;

    let created_at = timestamp_field(object, "createdAt").unwrap_or(now);
    let updated_at = timestamp_field(object, "updatedAt")
        .unwrap_or(now)
        .max(created_at);

    Some(Note {
        id: NoteId::generate(),
        title,
        content,
        created_at,
        updated_at,
        color: None,
    })
}

/// A present string is taken verbatim and `null` reads as empty; a missing
/// key or any other type rejects the entry.
fn text_field(object: &Map<String, Value>, key: &str) -> Option<String> {
    match object.get(key)? {
        Value::String(s) => Some(s.clone()),
        Value::Null => Some(String::new()),
        _ => None,
    }
}

/// Only positive whole numbers count as timestamps; `1700000000000.0` reads
/// the same as `1700000000000`.
fn timestamp_field(object: &Map<String, Value>, key: &str) -> Option<i64> {
    let value = object.get(key)?;
    let millis = value
        .as_i64()
        .or_else(|| value.as_f64().and_then(whole_millis))?;
    (millis > 0).then_some(millis)
}

/// Largest float that still holds every integer exactly (2^53).
const MAX_EXACT_FLOAT: f64 = 9_007_199_254_740_992.0;

#[allow(clippy::cast_possible_truncation)]
fn whole_millis(n: f64) -> Option<i64> {
    (n.fract() == 0.0 && n.abs() <= MAX_EXACT_FLOAT).then(|| n as i64)
}
