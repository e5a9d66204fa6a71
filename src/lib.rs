//! Shelfmark - a reading list and post drafts kept in browser storage
//!
//! Core modules:
//! - `store`: Persisted list stores (reading list, drafts)
//! - `persistence`: JSON list slots in key-value storage
//! - `platform`: Browser/native platform abstraction
//! - `autosave`: Debounced draft editor
//! - `format`: Date and preview formatting
//! - `settings`: Persisted preferences

pub mod autosave;
pub mod error;
pub mod format;
pub mod persistence;
pub mod platform;
pub mod settings;
pub mod store;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use autosave::{CharLimit, Composer, Debouncer, PostOutcome};
pub use error::{RecordId, Result, StoreError};
pub use settings::Settings;
pub use store::{DraftStore, DuplicatePolicy, ImportSummary, ReadingList};

/// Storage layout
pub mod consts {
    /// Active books
    pub const READING_LIST_KEY: &str = "readingList";
    /// Finished books
    pub const COMPLETED_BOOKS_KEY: &str = "completedBooks";
    /// Post drafts
    pub const DRAFTS_KEY: &str = "linkedinDrafts";

    /// Suggested file names for exported backups
    pub const READING_LIST_EXPORT_FILE: &str = "reading-list-backup.json";
    pub const DRAFTS_EXPORT_FILE: &str = "linkedin-drafts.json";
}
