use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{console, Document, Window};

pub fn set_panic_hook() {
    // When the `console_error_panic_hook` feature is enabled, we can call the
    // `set_panic_hook` function at least once during initialization, and then
    // we will get better error messages if our code ever panics.
    //
    // For more details see
    // https://github.com/rustwasm/console_error_panic_hook#readme
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

pub fn window() -> Result<Window, JsValue> {
    web_sys::window().ok_or_else(|| JsValue::from_str("no global `window` exists"))
}

pub fn document() -> Result<Document, JsValue> {
    window()?
        .document()
        .ok_or_else(|| JsValue::from_str("should have a document on window"))
}

pub fn debug(message: &str) {
    console::debug_1(&message.into());
}

/// Runs `f` once the DOM is parsed: right away when the document has already
/// left the `loading` state, otherwise on `DOMContentLoaded`.
pub fn on_dom_ready<F>(document: &Document, f: F) -> Result<(), JsValue>
where
    F: FnOnce() + 'static,
{
    if document.ready_state() != "loading" {
        f();
        return Ok(());
    }
    let ready = Closure::once(f);
    document.add_event_listener_with_callback("DOMContentLoaded", ready.as_ref().unchecked_ref())?;
    ready.forget();
    Ok(())
}

// Brackets a block with console.time / console.timeEnd when built with the
// `frame-timing` feature; does nothing otherwise.
pub struct Timer<'a> {
    name: &'a str,
}

impl<'a> Timer<'a> {
    pub fn new(name: &'a str) -> Timer<'a> {
        if cfg!(feature = "frame-timing") {
            console::time_with_label(name);
        }
        Timer { name }
    }
}

impl<'a> Drop for Timer<'a> {
    fn drop(&mut self) {
        if cfg!(feature = "frame-timing") {
            console::time_end_with_label(self.name);
        }
    }
}
