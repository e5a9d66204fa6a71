//! Reading list: books to read and books already finished
//!
//! Active books live under `readingList`, finished ones under
//! `completedBooks`. Completing a book moves it between the two and stamps
//! `completedDate`; a completed book is never edited again.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{DuplicatePolicy, ImportSummary, PersistedList};
use crate::consts::{COMPLETED_BOOKS_KEY, READING_LIST_KEY};
use crate::error::{RecordId, Result, StoreError};
use crate::persistence::{self, Record};
use crate::platform::time::datetime_from_ms;
use crate::platform::{Clock, KeyValueStore};

/// Reading priority
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "Low",
            Priority::Medium => "Medium",
            Priority::High => "High",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "low" => Some(Priority::Low),
            "medium" | "med" => Some(Priority::Medium),
            "high" => Some(Priority::High),
            _ => None,
        }
    }
}

/// A book on the reading list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    pub id: RecordId,
    pub title: String,
    #[serde(default)]
    pub author: String,
    /// Free-form genre, empty when unset
    #[serde(default)]
    pub genre: String,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub notes: String,
    pub date_added: DateTime<Utc>,
    #[serde(default)]
    pub is_completed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_date: Option<DateTime<Utc>>,
}

impl Record for Book {
    const DISCRIMINATOR: &'static str = "title";

    fn id(&self) -> RecordId {
        self.id
    }

    fn discriminator(&self) -> &str {
        &self.title
    }
}

/// Input for a new book
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct BookDraft {
    pub title: String,
    pub author: String,
    pub genre: String,
    pub priority: Priority,
    pub notes: String,
}

/// Field overrides for an existing book; `None` leaves a field alone
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct BookPatch {
    pub title: Option<String>,
    pub author: Option<String>,
    pub genre: Option<String>,
    pub priority: Option<Priority>,
    pub notes: Option<String>,
}

/// Search criteria; every set criterion must hold
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct BookFilter {
    /// Case-insensitive substring of title, author or notes
    pub query: String,
    /// Exact, case-sensitive genre
    pub genre: Option<String>,
    pub priority: Option<Priority>,
}

impl BookFilter {
    pub fn matches(&self, book: &Book) -> bool {
        let query = self.query.to_lowercase();
        let matches_search = query.is_empty()
            || [&book.title, &book.author, &book.notes]
                .iter()
                .any(|field| field.to_lowercase().contains(&query));
        let matches_genre = match self.genre.as_deref() {
            None | Some("") => true,
            Some(genre) => book.genre == genre,
        };
        let matches_priority = self.priority.is_none_or(|p| book.priority == p);

        matches_search && matches_genre && matches_priority
    }
}

/// Backup document: both lists plus the time of export
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadingListExport {
    pub reading_list: Vec<Book>,
    pub completed_books: Vec<Book>,
    pub export_date: DateTime<Utc>,
}

/// Import payload; either list may be missing
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ReadingListImport {
    #[serde(default)]
    reading_list: Option<Vec<Book>>,
    #[serde(default)]
    completed_books: Option<Vec<Book>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadingStats {
    pub total: usize,
    pub completed: usize,
    pub reading: usize,
    /// Whole percent of all books that are completed
    pub completion_rate: u32,
}

pub struct ReadingList<S, C> {
    storage: S,
    clock: C,
    reading: PersistedList<Book>,
    completed: PersistedList<Book>,
    /// Highest id ever issued or loaded; never decreases
    last_id: Option<RecordId>,
}

impl<S: KeyValueStore, C: Clock> ReadingList<S, C> {
    /// Load both lists from storage
    ///
    /// A book found in both lists was interrupted mid-completion; the active
    /// copy is dropped.
    pub fn load(mut storage: S, clock: C) -> Self {
        let mut reading: PersistedList<Book> = PersistedList::load(&storage, READING_LIST_KEY);
        let completed: PersistedList<Book> = PersistedList::load(&storage, COMPLETED_BOOKS_KEY);

        let before = reading.len();
        reading.retain(|book: &Book| !completed.contains(book.id));
        let repaired = before - reading.len();
        if repaired > 0 {
            log::warn!("Dropped {repaired} active books already marked completed");
            if let Err(err) = reading.persist(&mut storage) {
                log::debug!("Repair not saved, it runs again on the next load: {err}");
            }
        }

        let last_id = persistence::highest_id([reading.records(), completed.records()]);
        Self {
            storage,
            clock,
            reading,
            completed,
            last_id,
        }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn into_storage(self) -> S {
        self.storage
    }

    /// Active books, newest first
    pub fn books(&self) -> &[Book] {
        self.reading.records()
    }

    /// Completed books, most recently completed first
    pub fn completed(&self) -> &[Book] {
        self.completed.records()
    }

    pub fn get(&self, id: RecordId) -> Option<&Book> {
        self.reading.get(id).or_else(|| self.completed.get(id))
    }

    pub fn add(&mut self, draft: BookDraft) -> Result<Book> {
        let title = persistence::validate_discriminator(Book::DISCRIMINATOR, &draft.title)?;
        let now_ms = self.clock.now_ms();
        let id = persistence::next_id(now_ms, self.last_id);
        self.last_id = Some(id);

        let book = Book {
            id,
            title,
            author: draft.author.trim().to_owned(),
            genre: draft.genre,
            priority: draft.priority,
            notes: draft.notes.trim().to_owned(),
            date_added: datetime_from_ms(now_ms),
            is_completed: false,
            completed_date: None,
        };

        self.reading.insert_head(book.clone());
        self.reading.persist(&mut self.storage)?;
        log::info!("Added book {} '{}'", book.id, book.title);
        Ok(book)
    }

    pub fn update(&mut self, id: RecordId, patch: BookPatch) -> Result<Book> {
        let current = self.reading.get(id).ok_or(StoreError::NotFound { id })?;

        let mut updated = current.clone();
        if let Some(title) = &patch.title {
            updated.title = persistence::validate_discriminator(Book::DISCRIMINATOR, title)?;
        }
        if let Some(author) = patch.author {
            updated.author = author.trim().to_owned();
        }
        if let Some(genre) = patch.genre {
            updated.genre = genre;
        }
        if let Some(priority) = patch.priority {
            updated.priority = priority;
        }
        if let Some(notes) = patch.notes {
            updated.notes = notes.trim().to_owned();
        }

        if let Some(slot) = self.reading.get_mut(id) {
            *slot = updated.clone();
        }
        self.reading.persist(&mut self.storage)?;
        log::info!("Updated book {id}");
        Ok(updated)
    }

    /// Move a book to the completed list
    ///
    /// The completed list is written before the active one: an interrupted
    /// completion leaves the book in both slots, which `load` repairs.
    pub fn complete(&mut self, id: RecordId) -> Result<Book> {
        let mut book = self.reading.take(id).ok_or(StoreError::NotFound { id })?;
        book.is_completed = true;
        book.completed_date = Some(self.clock.now());

        self.completed.insert_head(book.clone());
        self.completed.persist(&mut self.storage)?;
        self.reading.persist(&mut self.storage)?;
        log::info!("Completed book {id} '{}'", book.title);
        Ok(book)
    }

    pub fn remove(&mut self, id: RecordId) -> Result<Book> {
        let book = self.reading.take(id).ok_or(StoreError::NotFound { id })?;
        self.reading.persist(&mut self.storage)?;
        log::info!("Deleted book {id}");
        Ok(book)
    }

    /// Active books matching the filter, in list order
    pub fn filter(&self, filter: &BookFilter) -> Vec<&Book> {
        self.books().iter().filter(|b| filter.matches(b)).collect()
    }

    /// Completed books matching the filter, in list order
    pub fn filter_completed(&self, filter: &BookFilter) -> Vec<&Book> {
        self.completed().iter().filter(|b| filter.matches(b)).collect()
    }

    pub fn export_all(&self) -> ReadingListExport {
        ReadingListExport {
            reading_list: self.books().to_vec(),
            completed_books: self.completed().to_vec(),
            export_date: self.clock.now(),
        }
    }

    /// Pretty-printed backup document
    pub fn export_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.export_all())?)
    }

    /// Append the lists of a backup document onto the stored ones
    ///
    /// Nothing changes unless the whole document parses and every book has a
    /// title.
    pub fn import_merge(&mut self, json: &str, policy: DuplicatePolicy) -> Result<ImportSummary> {
        let value: serde_json::Value = serde_json::from_str(json)?;
        if !value.is_object() {
            return Err(StoreError::Format(
                "expected an object with readingList and completedBooks".to_owned(),
            ));
        }
        let import: ReadingListImport = serde_json::from_value(value)?;
        let reading = import.reading_list.unwrap_or_default();
        let completed = import.completed_books.unwrap_or_default();
        super::check_import(&reading)?;
        super::check_import(&completed)?;

        let summary = super::merge_import(
            &mut [&mut self.completed, &mut self.reading],
            vec![completed, reading],
            policy,
        );
        let imported = persistence::highest_id([self.reading.records(), self.completed.records()]);
        self.last_id = self.last_id.max(imported);

        self.completed.persist(&mut self.storage)?;
        self.reading.persist(&mut self.storage)?;
        log::info!(
            "Imported books: {} added, {} replaced, {} skipped",
            summary.added,
            summary.replaced,
            summary.skipped
        );
        Ok(summary)
    }

    pub fn stats(&self) -> ReadingStats {
        let reading = self.reading.len();
        let completed = self.completed.len();
        let total = reading + completed;
        let completion_rate = if total > 0 {
            (completed as f64 / total as f64 * 100.0).round() as u32
        } else {
            0
        };

        ReadingStats {
            total,
            completed,
            reading,
            completion_rate,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::{ManualClock, MemoryStorage};
    use proptest::prelude::*;

    const T0: i64 = 1_700_000_000_000;

    fn draft(title: &str) -> BookDraft {
        BookDraft {
            title: title.to_owned(),
            ..Default::default()
        }
    }

    fn stored(storage: &MemoryStorage) -> (Option<String>, Option<String>) {
        (
            storage.get_item(READING_LIST_KEY),
            storage.get_item(COMPLETED_BOOKS_KEY),
        )
    }

    #[test]
    fn test_add_trims_and_persists() {
        let clock = ManualClock::new(T0);
        let mut list = ReadingList::load(MemoryStorage::new(), &clock);

        let book = list
            .add(BookDraft {
                title: "  Dune ".to_owned(),
                author: " Frank Herbert ".to_owned(),
                genre: "Science Fiction".to_owned(),
                priority: Priority::High,
                notes: String::new(),
            })
            .unwrap();

        assert_eq!(book.id, T0);
        assert_eq!(book.title, "Dune");
        assert_eq!(book.author, "Frank Herbert");
        assert_eq!(book.date_added.timestamp_millis(), T0);
        assert!(!book.is_completed);

        let reloaded = ReadingList::load(list.into_storage(), &clock);
        assert_eq!(reloaded.books(), &[book]);
    }

    #[test]
    fn test_add_empty_title_rejected() {
        let clock = ManualClock::new(T0);
        let mut list = ReadingList::load(MemoryStorage::new(), &clock);
        list.add(draft("Dune")).unwrap();
        let before = stored(list.storage());

        let err = list.add(draft("   ")).unwrap_err();
        assert!(matches!(err, StoreError::Validation { field: "title" }));
        assert_eq!(list.books().len(), 1);
        assert_eq!(stored(list.storage()), before);
    }

    #[test]
    fn test_newest_first_and_unique_ids() {
        let clock = ManualClock::new(T0);
        let mut list = ReadingList::load(MemoryStorage::new(), &clock);
        let a = list.add(draft("A")).unwrap();
        let b = list.add(draft("B")).unwrap();
        clock.advance(10);
        let c = list.add(draft("C")).unwrap();

        assert_eq!(a.id, T0);
        assert_eq!(b.id, T0 + 1);
        assert_eq!(c.id, T0 + 10);
        let titles: Vec<_> = list.books().iter().map(|b| b.title.as_str()).collect();
        assert_eq!(titles, ["C", "B", "A"]);
    }

    #[test]
    fn test_removed_id_not_reissued() {
        let clock = ManualClock::new(T0);
        let mut list = ReadingList::load(MemoryStorage::new(), &clock);

        let a = list.add(draft("A")).unwrap();
        let b = list.add(draft("B")).unwrap();
        list.remove(b.id).unwrap();
        let c = list.add(draft("C")).unwrap();
        assert_ne!(c.id, b.id);
        assert_ne!(c.id, a.id);

        // Single book, removed and re-added within the same millisecond
        list.remove(c.id).unwrap();
        list.remove(a.id).unwrap();
        let d = list.add(draft("D")).unwrap();
        assert!(d.id > c.id);
    }

    #[test]
    fn test_complete_scenario() {
        let clock = ManualClock::new(T0);
        let mut list = ReadingList::load(MemoryStorage::new(), &clock);
        let x = list.add(draft("Dune")).unwrap().id;
        assert_eq!(list.books().len(), 1);

        clock.advance(60_000);
        let done = list.complete(x).unwrap();
        assert!(done.is_completed);
        assert_eq!(done.completed_date.unwrap().timestamp_millis(), T0 + 60_000);
        assert!(list.books().is_empty());
        assert_eq!(list.completed().len(), 1);

        let query = BookFilter {
            query: "dune".to_owned(),
            ..Default::default()
        };
        assert!(list.filter(&query).is_empty());
        assert_eq!(list.filter_completed(&query).len(), 1);

        // Terminal: cannot complete, edit or delete through the active list
        assert!(matches!(list.complete(x), Err(StoreError::NotFound { .. })));
        assert!(matches!(
            list.update(x, BookPatch::default()),
            Err(StoreError::NotFound { .. })
        ));

        let reloaded = ReadingList::load(list.into_storage(), &clock);
        assert!(reloaded.books().is_empty());
        assert_eq!(reloaded.completed()[0].id, x);
    }

    #[test]
    fn test_load_repairs_interrupted_completion() {
        let clock = ManualClock::new(T0);
        let mut list = ReadingList::load(MemoryStorage::new(), &clock);
        let book = list.add(draft("Dune")).unwrap();
        let mut storage = list.into_storage();

        // Completed list written, active list write never happened
        let mut done = book.clone();
        done.is_completed = true;
        done.completed_date = Some(clock.now());
        persistence::save_list(&mut storage, COMPLETED_BOOKS_KEY, &[done]).unwrap();

        let list = ReadingList::load(storage, &clock);
        assert!(list.books().is_empty());
        assert_eq!(list.completed().len(), 1);
        assert_eq!(list.storage().get_item(READING_LIST_KEY).as_deref(), Some("[]"));
    }

    #[test]
    fn test_update_merges_fields() {
        let clock = ManualClock::new(T0);
        let mut list = ReadingList::load(MemoryStorage::new(), &clock);
        let original = list
            .add(BookDraft {
                title: "Dune".to_owned(),
                author: "Herbert".to_owned(),
                ..Default::default()
            })
            .unwrap();
        list.add(draft("Emma")).unwrap();

        clock.advance(5_000);
        let updated = list
            .update(
                original.id,
                BookPatch {
                    title: Some(" Dune Messiah ".to_owned()),
                    priority: Some(Priority::Low),
                    ..Default::default()
                },
            )
            .unwrap();

        assert_eq!(updated.id, original.id);
        assert_eq!(updated.date_added, original.date_added);
        assert_eq!(updated.title, "Dune Messiah");
        assert_eq!(updated.author, "Herbert");
        assert_eq!(updated.priority, Priority::Low);
        // Position unchanged
        assert_eq!(list.books()[1], updated);
    }

    #[test]
    fn test_update_empty_title_rejected() {
        let clock = ManualClock::new(T0);
        let mut list = ReadingList::load(MemoryStorage::new(), &clock);
        let x = list.add(draft("Dune")).unwrap().id;

        let err = list
            .update(
                x,
                BookPatch {
                    title: Some(String::new()),
                    notes: Some("changed".to_owned()),
                    ..Default::default()
                },
            )
            .unwrap_err();

        assert!(matches!(err, StoreError::Validation { .. }));
        let book = list.get(x).unwrap();
        assert_eq!(book.title, "Dune");
        assert_eq!(book.notes, "");
    }

    #[test]
    fn test_remove() {
        let clock = ManualClock::new(T0);
        let mut list = ReadingList::load(MemoryStorage::new(), &clock);
        let x = list.add(draft("Dune")).unwrap().id;

        assert_eq!(list.remove(x).unwrap().title, "Dune");
        assert!(list.books().is_empty());
        assert!(matches!(list.remove(x), Err(StoreError::NotFound { id }) if id == x));
    }

    #[test]
    fn test_filter_criteria() {
        let clock = ManualClock::new(T0);
        let mut list = ReadingList::load(MemoryStorage::new(), &clock);
        list.add(BookDraft {
            title: "Dune".to_owned(),
            author: "Frank Herbert".to_owned(),
            genre: "Science Fiction".to_owned(),
            priority: Priority::High,
            notes: "desert planet".to_owned(),
        })
        .unwrap();
        list.add(BookDraft {
            title: "Emma".to_owned(),
            author: "Jane Austen".to_owned(),
            genre: "Romance".to_owned(),
            priority: Priority::Low,
            notes: String::new(),
        })
        .unwrap();

        let titles = |f: BookFilter| -> Vec<String> {
            list.filter(&f).iter().map(|b| b.title.clone()).collect()
        };

        assert_eq!(titles(BookFilter::default()), ["Emma", "Dune"]);
        assert_eq!(
            titles(BookFilter {
                query: "HERBERT".to_owned(),
                ..Default::default()
            }),
            ["Dune"]
        );
        assert_eq!(
            titles(BookFilter {
                query: "planet".to_owned(),
                ..Default::default()
            }),
            ["Dune"]
        );
        // Genre is not a searchable text field
        assert!(
            titles(BookFilter {
                query: "romance".to_owned(),
                ..Default::default()
            })
            .is_empty()
        );
        assert_eq!(
            titles(BookFilter {
                genre: Some("Romance".to_owned()),
                ..Default::default()
            }),
            ["Emma"]
        );
        // Genre match is case-sensitive
        assert!(
            titles(BookFilter {
                genre: Some("romance".to_owned()),
                ..Default::default()
            })
            .is_empty()
        );
        assert!(
            titles(BookFilter {
                query: "dune".to_owned(),
                priority: Some(Priority::Low),
                ..Default::default()
            })
            .is_empty()
        );
        assert_eq!(
            titles(BookFilter {
                genre: Some(String::new()),
                priority: Some(Priority::High),
                ..Default::default()
            }),
            ["Dune"]
        );
    }

    #[test]
    fn test_export_import_roundtrip() {
        let clock = ManualClock::new(T0);
        let mut list = ReadingList::load(MemoryStorage::new(), &clock);
        list.add(draft("Dune")).unwrap();
        let emma = list.add(draft("Emma")).unwrap().id;
        list.add(draft("Ulysses")).unwrap();
        list.complete(emma).unwrap();

        let json = list.export_json().unwrap();
        let export: ReadingListExport = serde_json::from_str(&json).unwrap();
        assert_eq!(export.export_date.timestamp_millis(), T0);

        let mut fresh = ReadingList::load(MemoryStorage::new(), &clock);
        let summary = fresh.import_merge(&json, DuplicatePolicy::KeepExisting).unwrap();
        assert_eq!(summary.added, 3);
        assert_eq!(fresh.books(), list.books());
        assert_eq!(fresh.completed(), list.completed());
    }

    #[test]
    fn test_import_deduplicates() {
        let clock = ManualClock::new(T0);
        let mut list = ReadingList::load(MemoryStorage::new(), &clock);
        list.add(draft("Dune")).unwrap();
        let json = list.export_json().unwrap();

        let summary = list.import_merge(&json, DuplicatePolicy::KeepExisting).unwrap();
        assert_eq!(summary.skipped, 1);
        assert_eq!(list.books().len(), 1);
    }

    #[test]
    fn test_import_accepts_partial_document() {
        let clock = ManualClock::new(T0);
        let mut list = ReadingList::load(MemoryStorage::new(), &clock);
        let json = r#"{"readingList":[{"id":5,"title":"Dune","dateAdded":"2024-05-01T12:00:00.000Z"}]}"#;

        list.import_merge(json, DuplicatePolicy::KeepExisting).unwrap();
        let book = &list.books()[0];
        assert_eq!(book.priority, Priority::Medium);
        assert_eq!(book.author, "");
        assert!(list.completed().is_empty());
    }

    #[test]
    fn test_import_malformed_leaves_store_untouched() {
        let clock = ManualClock::new(T0);
        let mut list = ReadingList::load(MemoryStorage::new(), &clock);
        let x = list.add(draft("Dune")).unwrap().id;
        list.add(draft("Emma")).unwrap();
        list.complete(x).unwrap();
        let before = stored(list.storage());
        let books_before = list.books().to_vec();

        for payload in [
            "not json",
            "[]",
            r#"{"readingList": 3}"#,
            r#"{"readingList":[{"id":1,"title":"  ","dateAdded":"2024-05-01T12:00:00Z"}]}"#,
        ] {
            let err = list
                .import_merge(payload, DuplicatePolicy::KeepExisting)
                .unwrap_err();
            assert!(matches!(err, StoreError::Format(_)), "{payload}");
        }

        assert_eq!(stored(list.storage()), before);
        assert_eq!(list.books(), books_before.as_slice());
    }

    #[test]
    fn test_storage_failure_surfaces() {
        let clock = ManualClock::new(T0);
        let mut storage = MemoryStorage::new();
        storage.set_read_only(true);
        let mut list = ReadingList::load(storage, &clock);

        let err = list.add(draft("Dune")).unwrap_err();
        assert!(matches!(err, StoreError::Storage { .. }));
        // Kept in memory, not persisted
        assert_eq!(list.books().len(), 1);
        assert_eq!(list.storage().get_item(READING_LIST_KEY), None);
    }

    #[test]
    fn test_stats() {
        let clock = ManualClock::new(T0);
        let mut list = ReadingList::load(MemoryStorage::new(), &clock);
        assert_eq!(list.stats().completion_rate, 0);

        let ids: Vec<_> = ["A", "B", "C"]
            .iter()
            .map(|t| list.add(draft(t)).unwrap().id)
            .collect();
        list.complete(ids[0]).unwrap();

        assert_eq!(
            list.stats(),
            ReadingStats {
                total: 3,
                completed: 1,
                reading: 2,
                completion_rate: 33,
            }
        );
    }

    #[test]
    fn test_priority_from_str() {
        assert_eq!(Priority::from_str("High"), Some(Priority::High));
        assert_eq!(Priority::from_str("med"), Some(Priority::Medium));
        assert_eq!(Priority::from_str("urgent"), None);
        assert_eq!(Priority::Low.as_str(), "Low");
    }

    #[test]
    fn test_loads_browser_written_data() {
        let mut storage = MemoryStorage::new();
        storage
            .set_item(
                READING_LIST_KEY,
                r#"[{"id":1714564800000,"title":"Dune","author":"","genre":"","priority":"High","notes":"","dateAdded":"2024-05-01T12:00:00.000Z","isCompleted":false}]"#,
            )
            .unwrap();

        let list = ReadingList::load(storage, ManualClock::new(T0));
        assert_eq!(list.books()[0].priority, Priority::High);
        assert_eq!(list.books()[0].date_added.timestamp_millis(), 1_714_564_800_000);
    }

    proptest! {
        #[test]
        fn prop_empty_filter_returns_everything(titles in prop::collection::vec("[a-zA-Z ]{0,12}", 0..20)) {
            let clock = ManualClock::new(T0);
            let mut list = ReadingList::load(MemoryStorage::new(), &clock);
            for title in &titles {
                let _ = list.add(draft(title));
            }

            let all: Vec<&Book> = list.books().iter().collect();
            prop_assert_eq!(list.filter(&BookFilter::default()), all);
        }

        #[test]
        fn prop_ids_unique_across_lists(ops in prop::collection::vec((0i64..3, any::<bool>()), 1..30)) {
            let clock = ManualClock::new(T0);
            let mut list = ReadingList::load(MemoryStorage::new(), &clock);
            for (step, complete) in ops {
                clock.advance(step);
                let book = list.add(draft("Book")).unwrap();
                if complete {
                    list.complete(book.id).unwrap();
                }
            }

            let mut ids: Vec<RecordId> = list
                .books()
                .iter()
                .chain(list.completed())
                .map(|b| b.id)
                .collect();
            let count = ids.len();
            ids.sort_unstable();
            ids.dedup();
            prop_assert_eq!(ids.len(), count);
        }

        #[test]
        fn prop_query_matches_case_insensitively(title in "[a-z]{3,10}") {
            let clock = ManualClock::new(T0);
            let mut list = ReadingList::load(MemoryStorage::new(), &clock);
            list.add(draft(&title)).unwrap();

            let upper = BookFilter { query: title.to_uppercase(), ..Default::default() };
            prop_assert_eq!(list.filter(&upper).len(), 1);
        }
    }
}
