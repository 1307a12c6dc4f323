//! JavaScript interop helpers

use wasm_bindgen::JsValue;

/// Best-effort message for a thrown JS value: a string, an `Error.message`,
/// or the debug form.
pub fn js_error_message(err: &JsValue) -> String {
    if let Some(message) = err.as_string() {
        return message;
    }

    js_sys::Reflect::get(err, &JsValue::from_str("message"))
        .ok()
        .and_then(|message| message.as_string())
        .unwrap_or_else(|| format!("{:?}", err))
}
