//! Thin wrappers over the browser console.

use wasm_bindgen::JsValue;

pub fn info(message: &str) {
    web_sys::console::info_1(&JsValue::from_str(message));
}

pub fn error(message: &str) {
    web_sys::console::error_1(&JsValue::from_str(message));
}

/// Diagnostics that only debug builds emit, like the per-field dirty/save
/// decision trail.
pub fn debug(message: &str) {
    #[cfg(debug_assertions)]
    web_sys::console::log_1(&JsValue::from_str(message));
    #[cfg(not(debug_assertions))]
    let _ = message;
}
