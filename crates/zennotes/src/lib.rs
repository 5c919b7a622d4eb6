//! `zennotes` - Local-first note keeping
//!
//! This library holds the note collection and everything around it: the
//! record store with its create/update/delete/list contract, the persistence
//! adapter that mirrors the collection into a local key-value store, the
//! case-insensitive search filter, and JSON import/export.
//!
//! ```
//! use zennotes::{MemoryStore, NoteStore, Persistence};
//!
//! let mut store = NoteStore::open(Persistence::new(MemoryStore::new()));
//! store.create("Groceries", "milk, eggs");
//! store.create("Ideas", "a note-taking CLI");
//!
//! assert_eq!(store.list()[0].title, "Ideas");
//! assert_eq!(store.search("MILK").len(), 1);
//! ```

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod note;
pub mod persistence;
pub mod search;
pub mod storage;
pub mod store;
pub mod transfer;

pub use config::Config;
pub use error::{Error, Result};
pub use logging::init_logging;
pub use note::{Note, NoteId};
pub use persistence::Persistence;
pub use storage::{KeyValueStore, MemoryStore, Storage, StorageStats};
pub use store::{ImportReport, NoteStore};
