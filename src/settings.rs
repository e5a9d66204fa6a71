//! App settings and preferences
//!
//! Persisted separately from the lists in the same key-value storage.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::platform::KeyValueStore;
use crate::store::{DuplicatePolicy, Priority};

/// App settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Settings {
    // === Drafts ===
    /// Quiet period before the editor content is auto-saved
    pub auto_save_delay_ms: u32,
    /// Characters shown in a draft list preview
    pub preview_chars: usize,
    /// Character count where the counter turns amber
    pub char_warning_threshold: usize,
    /// Character count where the counter turns red
    pub char_danger_threshold: usize,

    // === Reading list ===
    /// Priority preselected for new books
    pub default_priority: Priority,

    // === Import ===
    pub import_policy: DuplicatePolicy,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            auto_save_delay_ms: 3000,
            preview_chars: 150,
            char_warning_threshold: 2500,
            char_danger_threshold: 2800,
            default_priority: Priority::Medium,
            import_policy: DuplicatePolicy::KeepExisting,
        }
    }
}

impl Settings {
    /// Storage key
    const STORAGE_KEY: &'static str = "shelfmark_settings";

    /// Fix values that would make the editor misbehave
    pub fn sanitized(mut self) -> Self {
        if self.auto_save_delay_ms == 0 {
            self.auto_save_delay_ms = Self::default().auto_save_delay_ms;
        }
        if self.char_danger_threshold < self.char_warning_threshold {
            std::mem::swap(
                &mut self.char_danger_threshold,
                &mut self.char_warning_threshold,
            );
        }
        self
    }

    /// Load settings, falling back to defaults
    pub fn load(storage: &impl KeyValueStore) -> Self {
        if let Some(json) = storage.get_item(Self::STORAGE_KEY) {
            match serde_json::from_str::<Settings>(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings from storage");
                    return settings.sanitized();
                }
                Err(err) => log::warn!("Ignoring unreadable settings: {err}"),
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    pub fn save(&self, storage: &mut impl KeyValueStore) -> Result<()> {
        let json = serde_json::to_string(self)?;
        storage.set_item(Self::STORAGE_KEY, &json)?;
        log::info!("Settings saved");
        Ok(())
    }
}
