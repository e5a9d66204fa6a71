//! Cancellable `setTimeout` wrapper

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;

use crate::error::{Result, StoreError};

/// A callback scheduled on the browser event loop
///
/// Dropping the task clears the timeout, so the callback never runs against
/// a freed closure.
pub struct ScheduledTask {
    handle: i32,
    _closure: Closure<dyn FnMut()>,
}

impl ScheduledTask {
    pub fn schedule(delay_ms: u32, callback: impl FnOnce() + 'static) -> Result<Self> {
        let window = web_sys::window().ok_or_else(|| StoreError::Timer("no window".to_owned()))?;
        let closure: Closure<dyn FnMut()> = Closure::once(callback);
        let handle = window
            .set_timeout_with_callback_and_timeout_and_arguments_0(
                closure.as_ref().unchecked_ref(),
                delay_ms as i32,
            )
            .map_err(|err| StoreError::Timer(format!("setTimeout failed: {err:?}")))?;
        Ok(Self {
            handle,
            _closure: closure,
        })
    }

    pub fn cancel(self) {
        drop(self);
    }
}

impl Drop for ScheduledTask {
    fn drop(&mut self) {
        if let Some(window) = web_sys::window() {
            window.clear_timeout_with_handle(self.handle);
        }
    }
}
