//! Key-value storage backends
//!
//! Mirrors the browser `Storage` API: string keys, string values, whole-value
//! overwrites. Reads never fail (a missing or unreadable slot is `None`),
//! writes report failure so callers can surface it.

use std::collections::HashMap;

use crate::error::{Result, StoreError};

pub trait KeyValueStore {
    fn get_item(&self, key: &str) -> Option<String>;
    fn set_item(&mut self, key: &str, value: &str) -> Result<()>;
    fn remove_item(&mut self, key: &str) -> Result<()>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for &mut S {
    fn get_item(&self, key: &str) -> Option<String> {
        (**self).get_item(key)
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<()> {
        (**self).set_item(key, value)
    }

    fn remove_item(&mut self, key: &str) -> Result<()> {
        (**self).remove_item(key)
    }
}

/// In-memory storage (native runs and tests)
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    items: HashMap<String, String>,
    /// Reject every write, as a full or disabled LocalStorage would
    read_only: bool,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_read_only(&mut self, read_only: bool) {
        self.read_only = read_only;
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl KeyValueStore for MemoryStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        self.items.get(key).cloned()
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<()> {
        if self.read_only {
            return Err(StoreError::storage(key, "quota exceeded"));
        }
        self.items.insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove_item(&mut self, key: &str) -> Result<()> {
        if self.read_only {
            return Err(StoreError::storage(key, "quota exceeded"));
        }
        self.items.remove(key);
        Ok(())
    }
}

/// Directory-backed storage: one `<key>.json` file per key
///
/// Writes go to `<key>.json.tmp` first and are renamed over the old file, so
/// a slot is either the old or the new value, never half of one.
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: std::path::PathBuf,
}

#[cfg(not(target_arch = "wasm32"))]
impl FileStorage {
    pub fn open(dir: impl Into<std::path::PathBuf>) -> Result<Self> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir)
            .map_err(|err| StoreError::storage(&dir.display().to_string(), err))?;
        log::debug!("File storage at {}", dir.display());
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &std::path::Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> Option<std::path::PathBuf> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        valid.then(|| self.dir.join(format!("{key}.json")))
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl KeyValueStore for FileStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        let path = self.path_for(key)?;
        std::fs::read_to_string(path).ok()
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<()> {
        let path = self
            .path_for(key)
            .ok_or_else(|| StoreError::storage(key, "invalid key"))?;
        let tmp = path.with_extension("json.tmp");
        std::fs::write(&tmp, value).map_err(|err| StoreError::storage(key, err))?;
        std::fs::rename(&tmp, &path).map_err(|err| StoreError::storage(key, err))
    }

    fn remove_item(&mut self, key: &str) -> Result<()> {
        let path = self
            .path_for(key)
            .ok_or_else(|| StoreError::storage(key, "invalid key"))?;
        match std::fs::remove_file(path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(StoreError::storage(key, err)),
        }
    }
}

/// Browser LocalStorage
#[cfg(target_arch = "wasm32")]
pub struct LocalStorage {
    storage: web_sys::Storage,
}

#[cfg(target_arch = "wasm32")]
impl LocalStorage {
    pub fn open() -> Result<Self> {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
            .ok_or_else(|| StoreError::storage("localStorage", "unavailable"))?;
        Ok(Self { storage })
    }
}

#[cfg(target_arch = "wasm32")]
impl KeyValueStore for LocalStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        self.storage.get_item(key).ok().flatten()
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<()> {
        self.storage
            .set_item(key, value)
            .map_err(|err| StoreError::storage(key, format!("{err:?}")))
    }

    fn remove_item(&mut self, key: &str) -> Result<()> {
        self.storage
            .remove_item(key)
            .map_err(|err| StoreError::storage(key, format!("{err:?}")))
    }
}
