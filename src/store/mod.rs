//! Persisted list stores
//!
//! - `reading`: active/completed book lists
//! - `drafts`: saved post drafts
//!
//! Both keep newest-first lists in memory and rewrite the stored copy after
//! every mutation. A failed write leaves the in-memory change in place and
//! returns the error.

pub mod drafts;
pub mod reading;

pub use drafts::{Draft, DraftFilter, DraftStatus, DraftStore, PostedDraft};
pub use reading::{
    Book, BookDraft, BookFilter, BookPatch, Priority, ReadingList, ReadingListExport,
    ReadingStats,
};

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::{RecordId, Result, StoreError};
use crate::persistence::{self, Record};
use crate::platform::KeyValueStore;

/// What to do when an imported record's id is already in the store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum DuplicatePolicy {
    /// Keep the stored record, drop the incoming one
    #[default]
    KeepExisting,
    /// Drop the stored record, keep the incoming one
    ReplaceExisting,
}

/// Outcome of an import merge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct ImportSummary {
    pub added: usize,
    pub replaced: usize,
    pub skipped: usize,
}

/// One list bound to its storage key
#[derive(Debug, Clone)]
pub struct PersistedList<R> {
    key: &'static str,
    records: Vec<R>,
}

impl<R: Record> PersistedList<R> {
    pub fn load(storage: &impl KeyValueStore, key: &'static str) -> Self {
        Self {
            key,
            records: persistence::load_list(storage, key),
        }
    }

    pub fn key(&self) -> &'static str {
        self.key
    }

    pub fn records(&self) -> &[R] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn contains(&self, id: RecordId) -> bool {
        self.position(id).is_some()
    }

    pub fn position(&self, id: RecordId) -> Option<usize> {
        self.records.iter().position(|r| r.id() == id)
    }

    pub fn get(&self, id: RecordId) -> Option<&R> {
        self.records.iter().find(|r| r.id() == id)
    }

    pub fn get_mut(&mut self, id: RecordId) -> Option<&mut R> {
        self.records.iter_mut().find(|r| r.id() == id)
    }

    /// Newest first
    pub fn insert_head(&mut self, record: R) {
        self.records.insert(0, record);
    }

    pub fn push_back(&mut self, record: R) {
        self.records.push(record);
    }

    pub fn take(&mut self, id: RecordId) -> Option<R> {
        let pos = self.position(id)?;
        Some(self.records.remove(pos))
    }

    pub fn retain(&mut self, f: impl FnMut(&R) -> bool) {
        self.records.retain(f);
    }

    /// Write the whole list to its slot
    pub fn persist(&self, storage: &mut impl KeyValueStore) -> Result<()> {
        persistence::save_list(storage, self.key, &self.records).inspect_err(|err| {
            log::warn!(
                "'{}' changed in memory but was not saved, stored copy is stale: {err}",
                self.key
            );
        })
    }
}

/// Reject an import batch containing a record with an empty required field
pub(crate) fn check_import<R: Record>(batch: &[R]) -> Result<()> {
    match batch.iter().find(|r| r.discriminator().trim().is_empty()) {
        Some(r) => Err(StoreError::Format(format!(
            "record {} has an empty {}",
            r.id(),
            R::DISCRIMINATOR
        ))),
        None => Ok(()),
    }
}

/// Append imported batches onto their lists, de-duplicating by id
///
/// `batches[i]` is appended to `lists[i]`. An id repeated inside the payload
/// keeps its first occurrence, so callers pass the terminal list first.
pub(crate) fn merge_import<R: Record>(
    lists: &mut [&mut PersistedList<R>],
    batches: Vec<Vec<R>>,
    policy: DuplicatePolicy,
) -> ImportSummary {
    let mut summary = ImportSummary::default();
    let mut seen: HashSet<RecordId> = HashSet::new();

    for (index, batch) in batches.into_iter().enumerate() {
        for record in batch {
            let id = record.id();
            if !seen.insert(id) {
                summary.skipped += 1;
                continue;
            }

            if lists.iter().any(|list| list.contains(id)) {
                match policy {
                    DuplicatePolicy::KeepExisting => {
                        summary.skipped += 1;
                        continue;
                    }
                    DuplicatePolicy::ReplaceExisting => {
                        for list in lists.iter_mut() {
                            list.take(id);
                        }
                        summary.replaced += 1;
                    }
                }
            } else {
                summary.added += 1;
            }

            lists[index].push_back(record);
        }
    }

    summary
}
