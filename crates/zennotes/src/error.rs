//! Error types for zennotes.
//!
//! This module defines all error types used throughout the zennotes crate,
//! providing detailed context for debugging and user-friendly error messages.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for zennotes operations.
#[derive(Error, Debug)]
pub enum Error {
    // === Record Store Errors ===
    /// No note with the given id exists in the collection.
    #[error("note not found: {id}")]
    NoteNotFound {
        /// The id that was looked up.
        id: String,
    },

    // === Import Errors ===
    /// Import text is not valid JSON.
    #[error("could not parse import file as JSON: {0}")]
    ImportParse(#[source] serde_json::Error),

    /// Import JSON is valid but not an array.
    #[error("invalid import format: JSON must be an array")]
    ImportFormat,

    /// Import array contained no usable note entries.
    #[error("import file is well-formed but contains no valid notes")]
    NoValidEntries,

    // === Persistence Errors ===
    /// The key-value store refused a write because it is full.
    #[error("storage quota exceeded: {needed} bytes needed, {quota} available")]
    QuotaExceeded {
        /// Size of the rejected value in bytes.
        needed: usize,
        /// Configured quota in bytes.
        quota: usize,
    },

    /// Writing the collection to durable storage failed.
    #[error("failed to persist notes under key '{key}': {message}")]
    PersistenceWrite {
        /// Storage key that was being written.
        key: String,
        /// Description of what went wrong.
        message: String,
    },

    // === Storage Errors ===
    /// Failed to open or create the database.
    #[error("failed to open database at {path}: {source}")]
    DatabaseOpen {
        /// Path to the database file.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: rusqlite::Error,
    },

    /// A database query failed.
    #[error("database query failed: {0}")]
    DatabaseQuery(#[from] rusqlite::Error),

    /// Failed to run database migrations.
    #[error("database migration failed: {message}")]
    DatabaseMigration {
        /// Description of what went wrong.
        message: String,
    },

    // === Configuration Errors ===
    /// Failed to load configuration.
    #[error("failed to load configuration: {0}")]
    ConfigLoad(Box<figment::Error>),

    /// Configuration validation failed.
    #[error("invalid configuration: {message}")]
    ConfigValidation {
        /// Description of the validation failure.
        message: String,
    },

    // === I/O Errors ===
    /// The configuration file to validate does not exist.
    #[error("configuration file not found: {path}")]
    ConfigNotFound {
        /// Path that was looked up.
        path: PathBuf,
    },

    /// Failed to create a required directory.
    #[error("failed to create directory {path}: {source}")]
    DirectoryCreate {
        /// Path that couldn't be created.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    // === Serialization Errors ===
    /// JSON serialization/deserialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A specialized Result type for zennotes operations.
pub type Result<T> = std::result::Result<T, Error>;

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Self::ConfigLoad(Box::new(err))
    }
}

impl Error {
    /// Create a not-found error for the given note id.
    #[must_use]
    pub fn note_not_found(id: impl Into<String>) -> Self {
        Self::NoteNotFound { id: id.into() }
    }

    /// Create a persistence write error.
    #[must_use]
    pub fn persistence_write(key: impl Into<String>, message: impl Into<String>) -> Self {
        Self::PersistenceWrite {
            key: key.into(),
            message: message.into(),
        }
    }

    /// Check if this error was produced while reading an import document.
    #[must_use]
    pub fn is_import_error(&self) -> bool {
        matches!(
            self,
            Self::ImportParse(_) | Self::ImportFormat | Self::NoValidEntries
        )
    }
}
