//! JSON list slots in key-value storage
//!
//! Each list lives whole under one key and is rewritten whole on every
//! mutation. Reads are forgiving: a missing or corrupt slot loads as an
//! empty list and is logged, never returned as an error.

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::{RecordId, Result, StoreError};
use crate::platform::KeyValueStore;

/// A persisted item with a stable id and one required text field
pub trait Record: Clone + Serialize + DeserializeOwned {
    /// Name of the required field, used in validation messages
    const DISCRIMINATOR: &'static str;

    fn id(&self) -> RecordId;

    fn discriminator(&self) -> &str;
}

/// Load a list, treating absent or unparsable data as empty
pub fn load_list<T: DeserializeOwned>(storage: &impl KeyValueStore, key: &str) -> Vec<T> {
    let Some(json) = storage.get_item(key) else {
        log::info!("No data under '{key}', starting fresh");
        return Vec::new();
    };

    match serde_json::from_str::<Vec<T>>(&json) {
        Ok(list) => {
            log::info!("Loaded {} records from '{key}'", list.len());
            list
        }
        Err(err) => {
            log::warn!("Discarding unreadable data under '{key}': {err}");
            Vec::new()
        }
    }
}

/// Overwrite a list slot with the full list
pub fn save_list<T: Serialize>(
    storage: &mut impl KeyValueStore,
    key: &str,
    list: &[T],
) -> Result<()> {
    let json = serde_json::to_string(list).map_err(|err| StoreError::storage(key, err))?;
    storage.set_item(key, &json)?;
    log::debug!("Saved {} records to '{key}'", list.len());
    Ok(())
}

/// Trim the required field and reject it if nothing is left
pub fn validate_discriminator(field: &'static str, value: &str) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(StoreError::Validation { field });
    }
    Ok(trimmed.to_owned())
}

/// Highest id across the given lists
pub fn highest_id<'a, R: Record + 'a>(
    lists: impl IntoIterator<Item = &'a [R]>,
) -> Option<RecordId> {
    lists
        .into_iter()
        .flat_map(|list| list.iter().map(Record::id))
        .max()
}

/// Next id: the current time in ms, bumped past the highest id ever issued
///
/// `last_id` is a high-water mark that never goes down, so ids of removed
/// records are not handed out again.
pub fn next_id(now_ms: i64, last_id: Option<RecordId>) -> RecordId {
    match last_id {
        Some(last) if last >= now_ms => last + 1,
        _ => now_ms,
    }
}
