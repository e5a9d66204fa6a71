//! Post drafts
//!
//! A single newest-first list under `linkedinDrafts`. Drafts are either
//! saved by hand or by the auto-save timer; posting one removes it from the
//! list. Nothing is sent anywhere.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{DuplicatePolicy, ImportSummary, PersistedList};
use crate::consts::DRAFTS_KEY;
use crate::error::{RecordId, Result, StoreError};
use crate::format::{character_count, format_draft_timestamp};
use crate::persistence::{self, Record};
use crate::platform::time::datetime_from_ms;
use crate::platform::{Clock, KeyValueStore};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Draft {
    pub id: RecordId,
    pub content: String,
    pub timestamp: DateTime<Utc>,
    /// Length in UTF-16 code units, as the editor counts it
    pub character_count: usize,
    #[serde(default)]
    pub is_auto_saved: bool,
}

impl Draft {
    pub fn status(&self) -> DraftStatus {
        if self.is_auto_saved {
            DraftStatus::AutoSaved
        } else {
            DraftStatus::Draft
        }
    }

    /// Save time as the drafts list shows it, e.g. "Nov 14, 10:13 PM"
    pub fn display_timestamp(&self) -> String {
        format_draft_timestamp(&self.timestamp)
    }
}

impl Record for Draft {
    const DISCRIMINATOR: &'static str = "content";

    fn id(&self) -> RecordId {
        self.id
    }

    fn discriminator(&self) -> &str {
        &self.content
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DraftStatus {
    Draft,
    AutoSaved,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct DraftFilter {
    /// Case-insensitive substring of the content
    pub query: String,
    pub status: Option<DraftStatus>,
}

impl DraftFilter {
    pub fn matches(&self, draft: &Draft) -> bool {
        let query = self.query.to_lowercase();
        (query.is_empty() || draft.content.to_lowercase().contains(&query))
            && self.status.is_none_or(|s| draft.status() == s)
    }
}

/// A draft that left the list through the post action
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostedDraft {
    pub draft: Draft,
    pub posted_at: DateTime<Utc>,
}

pub struct DraftStore<S, C> {
    storage: S,
    clock: C,
    drafts: PersistedList<Draft>,
    /// Highest id ever issued or loaded; never decreases
    last_id: Option<RecordId>,
}

impl<S: KeyValueStore, C: Clock> DraftStore<S, C> {
    pub fn load(storage: S, clock: C) -> Self {
        let drafts: PersistedList<Draft> = PersistedList::load(&storage, DRAFTS_KEY);
        let last_id = persistence::highest_id([drafts.records()]);
        Self {
            storage,
            clock,
            drafts,
            last_id,
        }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn into_storage(self) -> S {
        self.storage
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// All drafts, newest first
    pub fn drafts(&self) -> &[Draft] {
        self.drafts.records()
    }

    pub fn get(&self, id: RecordId) -> Option<&Draft> {
        self.drafts.get(id)
    }

    pub fn save_draft(&mut self, content: &str) -> Result<Draft> {
        let content = persistence::validate_discriminator(Draft::DISCRIMINATOR, content)?;
        let draft = self.insert(content, false)?;
        log::info!("Saved draft {} ({} chars)", draft.id, draft.character_count);
        Ok(draft)
    }

    /// Save editor content in the background
    ///
    /// Returns `None` without touching the list when the content is blank or
    /// an identical draft already exists.
    pub fn auto_save(&mut self, content: &str) -> Result<Option<Draft>> {
        let content = content.trim();
        if content.is_empty() || self.drafts().iter().any(|d| d.content == content) {
            return Ok(None);
        }
        let draft = self.insert(content.to_owned(), true)?;
        log::debug!("Auto-saved draft {}", draft.id);
        Ok(Some(draft))
    }

    fn insert(&mut self, content: String, is_auto_saved: bool) -> Result<Draft> {
        let now_ms = self.clock.now_ms();
        let id = persistence::next_id(now_ms, self.last_id);
        self.last_id = Some(id);
        let draft = Draft {
            id,
            character_count: character_count(&content),
            content,
            timestamp: datetime_from_ms(now_ms),
            is_auto_saved,
        };
        self.drafts.insert_head(draft.clone());
        self.drafts.persist(&mut self.storage)?;
        Ok(draft)
    }

    /// Replace a draft's content, keeping its id, timestamp and position
    pub fn update(&mut self, id: RecordId, content: &str) -> Result<Draft> {
        if !self.drafts.contains(id) {
            return Err(StoreError::NotFound { id });
        }
        let content = persistence::validate_discriminator(Draft::DISCRIMINATOR, content)?;

        let draft = self.drafts.get_mut(id).ok_or(StoreError::NotFound { id })?;
        draft.character_count = character_count(&content);
        draft.content = content;
        let updated = draft.clone();

        self.drafts.persist(&mut self.storage)?;
        log::info!("Updated draft {id}");
        Ok(updated)
    }

    pub fn remove(&mut self, id: RecordId) -> Result<Draft> {
        let draft = self.drafts.take(id).ok_or(StoreError::NotFound { id })?;
        self.drafts.persist(&mut self.storage)?;
        log::info!("Deleted draft {id}");
        Ok(draft)
    }

    /// Post a saved draft: it leaves the list for good
    pub fn post(&mut self, id: RecordId) -> Result<PostedDraft> {
        let draft = self.drafts.take(id).ok_or(StoreError::NotFound { id })?;
        let posted = PostedDraft {
            draft,
            posted_at: self.clock.now(),
        };
        self.drafts.persist(&mut self.storage)?;
        log::info!("Posted draft {id} (publishing is not wired up)");
        Ok(posted)
    }

    pub fn filter(&self, filter: &DraftFilter) -> Vec<&Draft> {
        self.drafts().iter().filter(|d| filter.matches(d)).collect()
    }

    /// Pretty-printed array of every draft
    pub fn export_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self.drafts())?)
    }

    /// Append an exported draft array onto the stored list
    pub fn import_merge(&mut self, json: &str, policy: DuplicatePolicy) -> Result<ImportSummary> {
        let value: serde_json::Value = serde_json::from_str(json)?;
        if !value.is_array() {
            return Err(StoreError::Format("expected an array of drafts".to_owned()));
        }
        let incoming: Vec<Draft> = serde_json::from_value(value)?;
        super::check_import(&incoming)?;

        let summary = super::merge_import(&mut [&mut self.drafts], vec![incoming], policy);
        self.last_id = self.last_id.max(persistence::highest_id([self.drafts.records()]));
        self.drafts.persist(&mut self.storage)?;
        log::info!(
            "Imported drafts: {} added, {} replaced, {} skipped",
            summary.added,
            summary.replaced,
            summary.skipped
        );
        Ok(summary)
    }
}
