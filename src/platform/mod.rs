//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Storage (LocalStorage on web, one JSON file per key natively)
//! - Time (Date.now on web, system clock natively)
//! - Timers (setTimeout on web, used for auto-save)

pub mod storage;
pub mod time;
#[cfg(target_arch = "wasm32")]
pub mod timer;

pub use storage::{KeyValueStore, MemoryStorage};
#[cfg(not(target_arch = "wasm32"))]
pub use storage::FileStorage;
#[cfg(target_arch = "wasm32")]
pub use storage::LocalStorage;
pub use time::{Clock, ManualClock, SystemClock};
#[cfg(target_arch = "wasm32")]
pub use timer::ScheduledTask;
