//! Browser bindings
//!
//! The page owns rendering and calls into these classes. Records cross the
//! boundary as JSON strings; errors come back as strings for the page to
//! show as a toast.

use std::cell::RefCell;
use std::rc::Rc;

use serde::Serialize;
use wasm_bindgen::prelude::*;

use crate::autosave::{CharLimit, Composer};
use crate::consts::{DRAFTS_EXPORT_FILE, READING_LIST_EXPORT_FILE};
use crate::error::{RecordId, StoreError};
use crate::platform::{Clock, LocalStorage, ScheduledTask, SystemClock};
use crate::settings::Settings;
use crate::store::{BookDraft, BookFilter, BookPatch, DraftFilter, DraftStore, Priority, ReadingList};

#[wasm_bindgen(start)]
pub fn wasm_main() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        web_sys::console::warn_1(&"Logger already initialized".into());
    }
    log::info!("Shelfmark ready");
}

fn js_err(err: StoreError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String, JsValue> {
    serde_json::to_string(value).map_err(|err| js_err(err.into()))
}

/// Ids are creation times in ms and fit a JS number exactly
fn record_id(id: f64) -> RecordId {
    id as RecordId
}

fn non_empty(s: &str) -> Option<String> {
    (!s.is_empty()).then(|| s.to_owned())
}

#[wasm_bindgen]
pub struct ReadingListApp {
    list: ReadingList<LocalStorage, SystemClock>,
    settings: Settings,
}

#[wasm_bindgen]
impl ReadingListApp {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Result<ReadingListApp, JsValue> {
        let storage = LocalStorage::open().map_err(js_err)?;
        let settings = Settings::load(&storage);
        Ok(Self {
            list: ReadingList::load(storage, SystemClock),
            settings,
        })
    }

    /// Priority to preselect in the add form
    #[wasm_bindgen(js_name = defaultPriority)]
    pub fn default_priority(&self) -> String {
        self.settings.default_priority.as_str().to_owned()
    }

    pub fn add(
        &mut self,
        title: &str,
        author: &str,
        genre: &str,
        priority: &str,
        notes: &str,
    ) -> Result<String, JsValue> {
        let draft = BookDraft {
            title: title.to_owned(),
            author: author.to_owned(),
            genre: genre.to_owned(),
            priority: Priority::from_str(priority).unwrap_or(self.settings.default_priority),
            notes: notes.to_owned(),
        };
        let book = self.list.add(draft).map_err(js_err)?;
        to_json(&book)
    }

    /// `patch` is a JSON object with any of title, author, genre, priority, notes
    pub fn update(&mut self, id: f64, patch: &str) -> Result<String, JsValue> {
        let patch: BookPatch = serde_json::from_str(patch).map_err(|err| js_err(err.into()))?;
        let book = self.list.update(record_id(id), patch).map_err(js_err)?;
        to_json(&book)
    }

    pub fn complete(&mut self, id: f64) -> Result<String, JsValue> {
        let book = self.list.complete(record_id(id)).map_err(js_err)?;
        to_json(&book)
    }

    pub fn remove(&mut self, id: f64) -> Result<(), JsValue> {
        self.list.remove(record_id(id)).map(drop).map_err(js_err)
    }

    /// Empty strings mean "any"
    pub fn filter(&self, query: &str, genre: &str, priority: &str) -> Result<String, JsValue> {
        to_json(&self.list.filter(&Self::book_filter(query, genre, priority)))
    }

    #[wasm_bindgen(js_name = filterCompleted)]
    pub fn filter_completed(&self, query: &str, genre: &str, priority: &str) -> Result<String, JsValue> {
        to_json(&self.list.filter_completed(&Self::book_filter(query, genre, priority)))
    }

    pub fn stats(&self) -> Result<String, JsValue> {
        to_json(&self.list.stats())
    }

    #[wasm_bindgen(js_name = exportJson)]
    pub fn export_json(&self) -> Result<String, JsValue> {
        self.list.export_json().map_err(js_err)
    }

    #[wasm_bindgen(js_name = exportFileName)]
    pub fn export_file_name(&self) -> String {
        READING_LIST_EXPORT_FILE.to_owned()
    }

    #[wasm_bindgen(js_name = importJson)]
    pub fn import_json(&mut self, json: &str) -> Result<String, JsValue> {
        let summary = self
            .list
            .import_merge(json, self.settings.import_policy)
            .map_err(js_err)?;
        to_json(&summary)
    }
}

impl ReadingListApp {
    fn book_filter(query: &str, genre: &str, priority: &str) -> BookFilter {
        BookFilter {
            query: query.to_owned(),
            genre: non_empty(genre),
            priority: Priority::from_str(priority),
        }
    }
}

struct DraftsState {
    store: DraftStore<LocalStorage, SystemClock>,
    composer: Composer,
    /// Called with the draft JSON after a background save
    on_auto_save: Option<js_sys::Function>,
}

impl DraftsState {
    fn fire_auto_save(&mut self) {
        let Self {
            store,
            composer,
            on_auto_save,
        } = self;
        match composer.flush(store) {
            Ok(Some(draft)) => {
                if let (Some(callback), Ok(json)) = (on_auto_save.as_ref(), to_json(&draft)) {
                    let _ = callback.call1(&JsValue::NULL, &JsValue::from_str(&json));
                }
            }
            Ok(None) => {}
            Err(err) => log::warn!("Auto-save failed: {err}"),
        }
    }
}

#[wasm_bindgen]
pub struct DraftsApp {
    state: Rc<RefCell<DraftsState>>,
    pending: Option<ScheduledTask>,
    settings: Settings,
}

#[wasm_bindgen]
impl DraftsApp {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Result<DraftsApp, JsValue> {
        let storage = LocalStorage::open().map_err(js_err)?;
        let settings = Settings::load(&storage);
        let state = DraftsState {
            store: DraftStore::load(storage, SystemClock),
            composer: Composer::new(&settings),
            on_auto_save: None,
        };
        Ok(Self {
            state: Rc::new(RefCell::new(state)),
            pending: None,
            settings,
        })
    }

    #[wasm_bindgen(js_name = onAutoSave)]
    pub fn on_auto_save(&mut self, callback: js_sys::Function) {
        self.state.borrow_mut().on_auto_save = Some(callback);
    }

    /// Editor changed; restarts the auto-save timer
    pub fn input(&mut self, text: &str) -> Result<(), JsValue> {
        let now = SystemClock.now_ms();
        self.state.borrow_mut().composer.input(text, now);

        // Dropping the previous task clears its timeout
        self.pending = None;
        let state = Rc::clone(&self.state);
        let task = ScheduledTask::schedule(self.settings.auto_save_delay_ms, move || {
            if let Ok(mut state) = state.try_borrow_mut() {
                state.fire_auto_save();
            }
        })
        .map_err(js_err)?;
        self.pending = Some(task);
        Ok(())
    }

    #[wasm_bindgen(js_name = characterCount)]
    pub fn character_count(&self) -> usize {
        self.state.borrow().composer.character_count()
    }

    /// "normal", "warning" or "danger"
    #[wasm_bindgen(js_name = limitLevel)]
    pub fn limit_level(&self) -> String {
        match self.state.borrow().composer.limit_level() {
            CharLimit::Normal => "normal",
            CharLimit::Warning => "warning",
            CharLimit::Danger => "danger",
        }
        .to_owned()
    }

    #[wasm_bindgen(js_name = canPost)]
    pub fn can_post(&self) -> bool {
        self.state.borrow().composer.can_post()
    }

    #[wasm_bindgen(js_name = saveDraft)]
    pub fn save_draft(&mut self) -> Result<String, JsValue> {
        self.pending = None;
        let mut state = self.state.borrow_mut();
        let DraftsState {
            store, composer, ..
        } = &mut *state;
        let draft = composer.save_draft(store).map_err(js_err)?;
        to_json(&draft)
    }

    /// Post the editor content. Nothing is published.
    pub fn post(&mut self) -> Result<String, JsValue> {
        self.pending = None;
        let outcome = self.state.borrow_mut().composer.post().map_err(js_err)?;
        Ok(outcome.content)
    }

    /// Post a saved draft, removing it from the list
    #[wasm_bindgen(js_name = postDraft)]
    pub fn post_draft(&mut self, id: f64) -> Result<String, JsValue> {
        let posted = self.state.borrow_mut().store.post(record_id(id)).map_err(js_err)?;
        to_json(&posted)
    }

    /// Put a saved draft into the editor and return its content
    #[wasm_bindgen(js_name = loadDraft)]
    pub fn load_draft(&mut self, id: f64) -> Result<String, JsValue> {
        let mut state = self.state.borrow_mut();
        let DraftsState {
            store, composer, ..
        } = &mut *state;
        composer.load_draft(store, record_id(id)).map_err(js_err)?;
        Ok(composer.text().to_owned())
    }

    #[wasm_bindgen(js_name = updateDraft)]
    pub fn update_draft(&mut self, id: f64, content: &str) -> Result<String, JsValue> {
        let draft = self
            .state
            .borrow_mut()
            .store
            .update(record_id(id), content)
            .map_err(js_err)?;
        to_json(&draft)
    }

    #[wasm_bindgen(js_name = deleteDraft)]
    pub fn delete_draft(&mut self, id: f64) -> Result<(), JsValue> {
        self.state
            .borrow_mut()
            .store
            .remove(record_id(id))
            .map(drop)
            .map_err(js_err)
    }

    /// Drafts matching `query`; `status` is "", "Draft" or "AutoSaved"
    pub fn drafts(&self, query: &str, status: &str) -> Result<String, JsValue> {
        let status = match status {
            "" => None,
            other => Some(
                serde_json::from_value(serde_json::Value::String(other.to_owned()))
                    .map_err(|err| js_err(err.into()))?,
            ),
        };
        let filter = DraftFilter {
            query: query.to_owned(),
            status,
        };
        to_json(&self.state.borrow().store.filter(&filter))
    }

    /// Save time of a draft, formatted for the list ("Nov 14, 10:13 PM")
    #[wasm_bindgen(js_name = draftTimestamp)]
    pub fn draft_timestamp(&self, id: f64) -> Result<String, JsValue> {
        let id = record_id(id);
        let state = self.state.borrow();
        let draft = state
            .store
            .get(id)
            .ok_or_else(|| js_err(StoreError::NotFound { id }))?;
        Ok(draft.display_timestamp())
    }

    #[wasm_bindgen(js_name = previewChars)]
    pub fn preview_chars(&self) -> usize {
        self.settings.preview_chars
    }

    #[wasm_bindgen(js_name = exportJson)]
    pub fn export_json(&self) -> Result<String, JsValue> {
        self.state.borrow().store.export_json().map_err(js_err)
    }

    #[wasm_bindgen(js_name = exportFileName)]
    pub fn export_file_name(&self) -> String {
        DRAFTS_EXPORT_FILE.to_owned()
    }

    #[wasm_bindgen(js_name = importJson)]
    pub fn import_json(&mut self, json: &str) -> Result<String, JsValue> {
        let summary = self
            .state
            .borrow_mut()
            .store
            .import_merge(json, self.settings.import_policy)
            .map_err(js_err)?;
        to_json(&summary)
    }
}
