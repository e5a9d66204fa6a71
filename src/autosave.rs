//! Draft editor with debounced auto-save
//!
//! Every edit re-arms a single pending deadline. The editor content is saved
//! only once the input has been quiet for the whole delay, and at most once
//! per quiet period.

use crate::error::{RecordId, Result, StoreError};
use crate::format::character_count;
use crate::platform::{Clock, KeyValueStore};
use crate::settings::Settings;
use crate::store::{Draft, DraftStore};

/// A single cancellable deadline
#[derive(Debug, Clone)]
pub struct Debouncer {
    delay_ms: i64,
    deadline: Option<i64>,
}

impl Debouncer {
    pub fn new(delay_ms: u32) -> Self {
        Self {
            delay_ms: i64::from(delay_ms),
            deadline: None,
        }
    }

    pub fn delay_ms(&self) -> i64 {
        self.delay_ms
    }

    /// Replace any pending deadline with `now_ms + delay`
    pub fn arm(&mut self, now_ms: i64) {
        self.deadline = Some(now_ms + self.delay_ms);
    }

    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    pub fn deadline(&self) -> Option<i64> {
        self.deadline
    }

    /// True once when the deadline has passed; disarms itself
    pub fn poll(&mut self, now_ms: i64) -> bool {
        match self.deadline {
            Some(deadline) if now_ms >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}

/// Counter color band
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharLimit {
    Normal,
    Warning,
    Danger,
}

/// Result of the post action. Nothing is published.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostOutcome {
    pub content: String,
    pub character_count: usize,
}

/// The draft editor buffer
#[derive(Debug, Clone)]
pub struct Composer {
    text: String,
    debouncer: Debouncer,
    warning_threshold: usize,
    danger_threshold: usize,
}

impl Composer {
    pub fn new(settings: &Settings) -> Self {
        Self {
            text: String::new(),
            debouncer: Debouncer::new(settings.auto_save_delay_ms),
            warning_threshold: settings.char_warning_threshold,
            danger_threshold: settings.char_danger_threshold,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn debouncer(&self) -> &Debouncer {
        &self.debouncer
    }

    /// Replace the buffer after a keystroke and restart the quiet period
    pub fn input(&mut self, text: impl Into<String>, now_ms: i64) {
        self.text = text.into();
        self.debouncer.arm(now_ms);
    }

    /// Auto-save if the quiet period has elapsed
    pub fn poll<S: KeyValueStore, C: Clock>(
        &mut self,
        now_ms: i64,
        store: &mut DraftStore<S, C>,
    ) -> Result<Option<Draft>> {
        if !self.debouncer.poll(now_ms) {
            return Ok(None);
        }
        store.auto_save(&self.text)
    }

    /// Auto-save now if a save is pending, without waiting for the deadline
    pub fn flush<S: KeyValueStore, C: Clock>(
        &mut self,
        store: &mut DraftStore<S, C>,
    ) -> Result<Option<Draft>> {
        if !self.debouncer.is_pending() {
            return Ok(None);
        }
        self.debouncer.cancel();
        store.auto_save(&self.text)
    }

    /// Save the buffer as a draft and clear the editor
    pub fn save_draft<S: KeyValueStore, C: Clock>(
        &mut self,
        store: &mut DraftStore<S, C>,
    ) -> Result<Draft> {
        let draft = store.save_draft(&self.text)?;
        self.clear();
        Ok(draft)
    }

    /// Post the buffer and clear the editor
    pub fn post(&mut self) -> Result<PostOutcome> {
        let content = self.text.trim();
        if content.is_empty() {
            return Err(StoreError::Validation { field: "content" });
        }
        let outcome = PostOutcome {
            content: content.to_owned(),
            character_count: character_count(content),
        };
        log::info!("Post of {} chars accepted (publishing is not wired up)", outcome.character_count);
        self.clear();
        Ok(outcome)
    }

    /// Put a saved draft's content into the editor
    pub fn load_draft<S: KeyValueStore, C: Clock>(
        &mut self,
        store: &DraftStore<S, C>,
        id: RecordId,
    ) -> Result<()> {
        let draft = store.get(id).ok_or(StoreError::NotFound { id })?;
        self.text = draft.content.clone();
        Ok(())
    }

    pub fn clear(&mut self) {
        self.text.clear();
        self.debouncer.cancel();
    }

    pub fn character_count(&self) -> usize {
        character_count(&self.text)
    }

    pub fn can_post(&self) -> bool {
        self.character_count() > 0
    }

    pub fn limit_level(&self) -> CharLimit {
        let count = self.character_count();
        if count > self.danger_threshold {
            CharLimit::Danger
        } else if count > self.warning_threshold {
            CharLimit::Warning
        } else {
            CharLimit::Normal
        }
    }
}
